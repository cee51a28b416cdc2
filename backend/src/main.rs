mod config;
mod error;
mod frame;
mod model;
mod pyprocess;
mod routes;
mod tabular;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use model::PriceModel;
use pyprocess::PythonPipeline;
use routes::configure_routes;
use std::env;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::debug!("Resolved configuration: {:?}", config);

    let pipeline = PythonPipeline::launch(&config.pipeline).map_err(|e| {
        log::error!("Failed to load model at startup: {}", e);
        std::io::Error::other(format!("Model loading failed: {}", e))
    })?;
    log::info!("Model loaded from {}", config.pipeline.artifact.display());

    let model = web::Data::new(PriceModel::new(Arc::new(pipeline)));
    let frontend_dir = config.server.frontend_dir();
    let bind_address = config.server.bind_address();
    let workers = config.server.workers.max(1);
    let app_config = web::Data::new(config);

    log::info!("Serving frontend from {}", frontend_dir.display());
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(model.clone())
            .app_data(app_config.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
