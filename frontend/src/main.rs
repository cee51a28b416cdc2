mod api;
mod components;

use components::handlers;
use components::header::render_header;
use components::manual_form::{OptionField, TextField, render_manual_form};
use components::mode_toggle::render_mode_toggle;
use components::results::{render_batch_results, render_estimate};
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{BatchPredictionResponse, ManualEntry, PredictionResponse};
use std::collections::HashSet;
use web_sys::DragEvent;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum InputMode {
    Manual,
    Upload,
}

// Yew msg components
pub(crate) enum Msg {
    // Mode
    SetMode(InputMode),

    // Manual entry
    EditText(TextField, String),
    EditNumber(&'static str, String),
    SelectOption(OptionField, String),
    SubmitManual,
    ManualResult(Result<PredictionResponse, String>),

    // Upload
    FileSelected(GlooFile),
    HandleDrop(DragEvent),
    SetDragging(bool),
    UploadResult(Result<BatchPredictionResponse, String>),

    SetError(Option<String>),
}

// Main component
pub(crate) struct Model {
    mode: InputMode,
    entry: ManualEntry,
    // Number inputs whose text is not a whole number; submit stays blocked.
    invalid_numbers: HashSet<&'static str>,
    loading: bool,
    error: Option<String>,
    estimate: Option<PredictionResponse>,
    batch: Option<BatchPredictionResponse>,
    download_url: Option<ObjectUrl>,
    uploaded_name: Option<String>,
    is_dragging: bool,
}

impl Model {
    fn blank() -> Self {
        Self {
            mode: InputMode::Manual,
            entry: ManualEntry::default(),
            invalid_numbers: HashSet::new(),
            loading: false,
            error: None,
            estimate: None,
            batch: None,
            download_url: None,
            uploaded_name: None,
            is_dragging: false,
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::blank()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetMode(mode) => handlers::handle_set_mode(self, mode),

            Msg::EditText(field, value) => handlers::handle_edit_text(self, field, value),
            Msg::EditNumber(field, raw) => handlers::handle_edit_number(self, field, &raw),
            Msg::SelectOption(field, value) => handlers::handle_select_option(self, field, &value),
            Msg::SubmitManual => handlers::handle_submit_manual(self, ctx),
            Msg::ManualResult(result) => handlers::handle_manual_result(self, result),

            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::UploadResult(result) => handlers::handle_upload_result(self, result),

            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_mode_toggle(self.mode, link) }
                    {
                        match self.mode {
                            InputMode::Manual => html! {
                                <>
                                    { render_manual_form(self, link) }
                                    { render_error_message(self) }
                                    { render_estimate(self) }
                                </>
                            },
                            InputMode::Upload => html! {
                                <>
                                    { render_upload_section(self, link) }
                                    { render_error_message(self) }
                                    { render_batch_results(self) }
                                </>
                            },
                        }
                    }
                </main>

                <footer class="app-footer">
                    <p>{"Vehicle Price Prediction | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
