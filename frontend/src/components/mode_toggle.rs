use super::super::{InputMode, Model, Msg};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_mode_toggle(mode: InputMode, link: &Scope<Model>) -> Html {
    let option = |value: InputMode, label: &'static str| {
        html! {
            <label class={classes!("mode-option", (mode == value).then_some("selected"))}>
                <input
                    type="radio"
                    name="input-method"
                    checked={mode == value}
                    onchange={link.callback(move |_| Msg::SetMode(value))}
                />
                { label }
            </label>
        }
    };

    html! {
        <fieldset id="mode-toggle" class="mode-toggle">
            <legend>{"Select Input Method:"}</legend>
            { option(InputMode::Manual, "Manual Entry") }
            { option(InputMode::Upload, "Upload CSV") }
        </fieldset>
    }
}
