pub mod model;

pub use model::PythonPipeline;
