use super::super::{Model, Msg};
use super::utils::{debounce, extract_csv_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_upload_section(model: &Model, link: &Scope<Model>) -> Html {
    html! {
        <section class="upload-section">
            <h2>{"Upload CSV File"}</h2>
            <p>{"Make sure your CSV file contains all the required columns."}</p>
            { render_file_input_area(model, link) }
        </section>
    }
}

fn render_file_input_area(model: &Model, link: &Scope<Model>) -> Html {
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(extract_csv_file);

        input.set_value("");

        match file {
            Some(file) => Msg::FileSelected(file),
            None => Msg::SetError(Some("No CSV file selected.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = if model.loading {
        Callback::noop()
    } else {
        Callback::from(|_| {
            let input = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id("file-input"));
            if let Some(input) = input {
                if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                    html_input.click();
                }
            }
        })
    };

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept=".csv,text/csv"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!(
                    "upload-area",
                    model.is_dragging.then_some("drag-over"),
                    model.loading.then_some("busy"),
                )}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a CSV file here, or click to browse"}</p>
                    {
                        match (&model.uploaded_name, model.loading) {
                            (Some(name), true) => html! { <p class="file-types">{format!("Processing {name}...")}</p> },
                            (Some(name), false) => html! { <p class="file-types">{name}</p> },
                            (None, _) => html! { <p class="file-types">{"Supported format: CSV"}</p> },
                        }
                    }
                </div>
            </div>
        </>
    }
}
