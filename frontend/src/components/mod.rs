pub mod handlers;
pub mod header;
pub mod manual_form;
pub mod mode_toggle;
pub mod results;
pub mod upload_section;
pub mod utils;
