use crate::model::InferenceError;
use crate::tabular::TabularError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::{ErrorResponse, FieldError};

/// Failures surfaced to the form. Every variant renders as an
/// [`ErrorResponse`] carrying the underlying message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidEntry(#[from] FieldError),
    #[error("Invalid input: {0}")]
    InvalidRequest(String),
    #[error("Error in prediction: {0}")]
    Prediction(InferenceError),
    #[error("Error processing file: {0}")]
    FileParse(#[from] TabularError),
    #[error("Error processing file: {0}")]
    BatchPrediction(InferenceError),
    #[error("Error processing file: {0}")]
    Upload(String),
    #[error("Error processing file: upload exceeds {limit} bytes")]
    UploadTooLarge { limit: usize },
    #[error("Error processing file: no file was uploaded")]
    MissingFile,
    #[error("Prediction was interrupted")]
    Blocking,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidEntry(_)
            | AppError::InvalidRequest(_)
            | AppError::FileParse(_)
            | AppError::Upload(_)
            | AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Prediction(_) | AppError::BatchPrediction(_) | AppError::Blocking => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_errors_keep_the_model_message() {
        let err = AppError::Prediction(InferenceError::Pipeline("could not convert string to float".into()));
        assert_eq!(err.to_string(), "Error in prediction: could not convert string to float");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn file_errors_are_client_errors() {
        let err = AppError::from(TabularError::NoColumns);
        assert_eq!(err.to_string(), "Error processing file: No columns to parse from file");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UploadTooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
