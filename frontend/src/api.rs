use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{BatchPredictionResponse, ErrorResponse, ManualEntry, PredictionResponse};

pub async fn predict_manual(entry: &ManualEntry) -> Result<PredictionResponse, String> {
    const CONTEXT: &str = "Error in prediction";

    let request = Request::post("/api/predict")
        .json(entry)
        .map_err(|e| format!("{CONTEXT}: {e}"))?;
    let response = request
        .send()
        .await
        .map_err(|e| format!("{CONTEXT}: network error: {e}"))?;
    read_response(response, CONTEXT).await
}

pub async fn predict_csv(file: &GlooFile) -> Result<BatchPredictionResponse, String> {
    const CONTEXT: &str = "Error processing file";

    let form_data =
        web_sys::FormData::new().map_err(|e| format!("{CONTEXT}: {e:?}"))?;
    form_data
        .append_with_blob_and_filename("file", file.as_ref(), &file.name())
        .map_err(|e| format!("{CONTEXT}: {e:?}"))?;

    let request = Request::post("/api/predict/csv")
        .body(form_data)
        .map_err(|e| format!("{CONTEXT}: {e}"))?;
    let response = request
        .send()
        .await
        .map_err(|e| format!("{CONTEXT}: network error: {e}"))?;
    read_response(response, CONTEXT).await
}

/// Decodes a success body, or the server's `ErrorResponse` message.
async fn read_response<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, String> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("{context}: failed to parse response: {e}"));
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => Err(error.error),
        Err(_) => Err(format!("{context}: server error {status}: {body}")),
    }
}
