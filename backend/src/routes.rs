use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::PriceModel;
use crate::tabular;
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde_json::json;
use shared::{
    BatchPredictionResponse, DOWNLOAD_FILE_NAME, FormSchema, ManualEntry, PredictionResponse,
};
use std::path::PathBuf;
use uuid::Uuid;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .service(web::resource("/api/health").route(web::get().to(health)))
    .service(web::resource("/api/schema").route(web::get().to(schema)))
    .service(web::resource("/api/predict").route(web::post().to(predict_manual)))
    .service(web::resource("/api/predict/csv").route(web::post().to(predict_csv)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn schema() -> HttpResponse {
    HttpResponse::Ok().json(FormSchema::current())
}

async fn predict_manual(
    model: web::Data<PriceModel>,
    entry: web::Json<ManualEntry>,
) -> Result<HttpResponse, AppError> {
    let entry = entry.into_inner();
    entry.validate()?;

    let record = entry.into_record();
    info!(
        "Manual prediction for {} {} ({})",
        record.make, record.model, record.year
    );

    let price = web::block(move || model.predict_vehicle(&record))
        .await
        .map_err(|_| AppError::Blocking)?
        .map_err(|e| {
            error!("Prediction failed: {}", e);
            AppError::Prediction(e)
        })?;

    info!("Estimated price: {}", price);
    Ok(HttpResponse::Ok().json(PredictionResponse::new(price)))
}

async fn predict_csv(
    model: web::Data<PriceModel>,
    config: web::Data<AppConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(&mut payload, config.upload.max_bytes).await?;

    let table = tabular::read_csv(&upload).map_err(|e| {
        error!("[{}] Failed to parse upload: {}", request_id, e);
        AppError::from(e)
    })?;
    info!(
        "[{}] Uploaded CSV with {} rows and {} columns",
        request_id,
        table.len(),
        table.columns.len()
    );

    let augmented = web::block(move || model.predict_table(&table))
        .await
        .map_err(|_| AppError::Blocking)?
        .map_err(|e| {
            error!("[{}] Batch prediction failed: {}", request_id, e);
            AppError::BatchPrediction(e)
        })?;
    let csv = tabular::write_csv(&augmented)?;

    info!("[{}] Prediction completed for {} rows", request_id, augmented.len());
    Ok(HttpResponse::Ok().json(BatchPredictionResponse {
        table: augmented,
        csv,
        file_name: DOWNLOAD_FILE_NAME.to_string(),
    }))
}

/// Collects the first multipart field, which carries the uploaded file.
async fn read_upload(payload: &mut Multipart, limit: usize) -> Result<Vec<u8>, AppError> {
    let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    else {
        return Err(AppError::MissingFile);
    };

    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::Upload(e.to_string()))?;
        if data.len() + chunk.len() > limit {
            return Err(AppError::UploadTooLarge { limit });
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
