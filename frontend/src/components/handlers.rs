use super::super::{InputMode, Model, Msg};
use super::manual_form::{OptionField, TextField};
use super::utils::{csv_object_url, extract_csv_file, parse_whole_number};
use crate::api;
use gloo_file::File as GlooFile;
use shared::{BatchPredictionResponse, NUMERIC_BOUNDS, PredictionResponse};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_set_mode(model: &mut Model, mode: InputMode) -> bool {
    if model.mode == mode {
        return false;
    }
    model.mode = mode;
    model.error = None;
    model.estimate = None;
    clear_batch(model);
    true
}

pub fn handle_edit_text(model: &mut Model, field: TextField, value: String) -> bool {
    field.apply(&mut model.entry, value);
    true
}

fn number_label(field: &'static str) -> &'static str {
    NUMERIC_BOUNDS
        .iter()
        .find(|b| b.field == field)
        .map(|b| b.label)
        .unwrap_or(field)
}

pub fn handle_edit_number(model: &mut Model, field: &'static str, raw: &str) -> bool {
    match parse_whole_number(number_label(field), raw) {
        Ok(value) => {
            model.entry.set_numeric(field, value);
            model.invalid_numbers.remove(field);
            model.error = None;
        }
        Err(message) => {
            model.invalid_numbers.insert(field);
            model.error = Some(message);
        }
    }
    true
}

pub fn handle_select_option(model: &mut Model, field: OptionField, value: &str) -> bool {
    if !field.apply(&mut model.entry, value) {
        log::warn!("Ignoring unknown option {:?} for {:?}", value, field);
        return false;
    }
    true
}

pub fn handle_submit_manual(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.estimate = None;

    if let Some(message) = manual_submit_error(model) {
        model.error = Some(message);
        return true;
    }

    model.loading = true;
    model.error = None;

    let entry = model.entry.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = api::predict_manual(&entry).await;
        link.send_message(Msg::ManualResult(result));
    });
    true
}

/// Why the manual entry cannot be sent yet: a number input holding text that
/// is not a whole number, or a value outside its widget's bounds.
fn manual_submit_error(model: &Model) -> Option<String> {
    let unparsed = NUMERIC_BOUNDS
        .iter()
        .find(|b| model.invalid_numbers.contains(b.field));
    if let Some(bounds) = unparsed {
        return Some(format!("Invalid input: {} must be a whole number", bounds.label));
    }
    model
        .entry
        .validate()
        .err()
        .map(|e| format!("Invalid input: {e}"))
}

pub fn handle_manual_result(model: &mut Model, result: Result<PredictionResponse, String>) -> bool {
    model.loading = false;
    match result {
        Ok(estimate) => {
            log::info!("Estimated price: {}", estimate.price);
            model.estimate = Some(estimate);
            model.error = None;
        }
        Err(message) => {
            log::error!("{}", message);
            model.estimate = None;
            model.error = Some(message);
        }
    }
    true
}

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    if !begin_upload(model, file.name()) {
        log::warn!("Ignoring {} while an upload is in flight", file.name());
        return false;
    }

    let link = ctx.link().clone();
    spawn_local(async move {
        let result = api::predict_csv(&file).await;
        link.send_message(Msg::UploadResult(result));
    });
    true
}

/// Marks an upload as in flight; false while another one still is.
fn begin_upload(model: &mut Model, name: String) -> bool {
    if model.loading {
        return false;
    }
    clear_batch(model);
    model.loading = true;
    model.error = None;
    model.uploaded_name = Some(name);
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;
    if model.loading {
        return true;
    }

    let file = event
        .data_transfer()
        .and_then(|transfer| transfer.files())
        .as_ref()
        .and_then(extract_csv_file);

    match file {
        Some(file) => handle_file_selected(model, ctx, file),
        None => {
            model.error = Some("Please drop a CSV file.".into());
            true
        }
    }
}

pub fn handle_upload_result(
    model: &mut Model,
    result: Result<BatchPredictionResponse, String>,
) -> bool {
    model.loading = false;
    match result {
        Ok(batch) => {
            log::info!("Prediction completed for {} rows", batch.table.len());
            model.download_url = Some(csv_object_url(&batch.csv));
            model.batch = Some(batch);
            model.error = None;
        }
        Err(message) => {
            log::error!("{}", message);
            clear_batch(model);
            model.error = Some(message);
        }
    }
    true
}

fn clear_batch(model: &mut Model) {
    model.batch = None;
    // Dropping the ObjectUrl revokes it.
    model.download_url = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsed_number_blocks_submit_until_fixed() {
        let mut model = Model::blank();
        handle_edit_number(&mut model, "doors", "");

        assert_eq!(model.entry.doors, 4);
        assert_eq!(
            model.error.as_deref(),
            Some("Number of Doors must be a whole number")
        );
        assert_eq!(
            manual_submit_error(&model).as_deref(),
            Some("Invalid input: Number of Doors must be a whole number")
        );

        handle_edit_number(&mut model, "doors", "2");
        assert_eq!(model.entry.doors, 2);
        assert!(model.error.is_none());
        assert_eq!(manual_submit_error(&model), None);
    }

    #[test]
    fn out_of_range_number_blocks_submit() {
        let mut model = Model::blank();
        handle_edit_number(&mut model, "year", "1989");
        assert_eq!(
            manual_submit_error(&model).as_deref(),
            Some("Invalid input: Manufacturing Year must be between 1990 and 2025 (got 1989)")
        );
    }

    #[test]
    fn second_upload_is_ignored_while_first_is_in_flight() {
        let mut model = Model::blank();
        assert!(begin_upload(&mut model, "first.csv".into()));
        assert!(!begin_upload(&mut model, "second.csv".into()));
        assert_eq!(model.uploaded_name.as_deref(), Some("first.csv"));

        handle_upload_result(&mut model, Err("Error processing file: boom".into()));
        assert!(!model.loading);
        assert!(begin_upload(&mut model, "second.csv".into()));
        assert_eq!(model.uploaded_name.as_deref(), Some("second.csv"));
    }
}
