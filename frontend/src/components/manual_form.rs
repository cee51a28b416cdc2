use super::super::{Model, Msg};
use shared::{
    BodyType, CYLINDER_BOUNDS, DOOR_BOUNDS, Drivetrain, ENGINE_BOUNDS, FuelType, MILEAGE_BOUNDS,
    ManualEntry, NumericBounds, Transmission, YEAR_BOUNDS,
};
use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextField {
    Name,
    Make,
    Model,
    Trim,
    ExteriorColor,
    InteriorColor,
}

impl TextField {
    fn label(self) -> &'static str {
        match self {
            TextField::Name => "Vehicle Name",
            TextField::Make => "Make",
            TextField::Model => "Model",
            TextField::Trim => "Trim",
            TextField::ExteriorColor => "Exterior Color",
            TextField::InteriorColor => "Interior Color",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            TextField::Name => "e.g., Toyota Corolla",
            TextField::Make => "e.g., Toyota",
            TextField::Model => "e.g., Corolla",
            TextField::Trim => "e.g., LE, SE",
            TextField::ExteriorColor => "e.g., White",
            TextField::InteriorColor => "e.g., Black",
        }
    }

    fn value(self, entry: &ManualEntry) -> &str {
        match self {
            TextField::Name => &entry.name,
            TextField::Make => &entry.make,
            TextField::Model => &entry.model,
            TextField::Trim => &entry.trim,
            TextField::ExteriorColor => &entry.exterior_color,
            TextField::InteriorColor => &entry.interior_color,
        }
    }

    pub fn apply(self, entry: &mut ManualEntry, value: String) {
        match self {
            TextField::Name => entry.name = value,
            TextField::Make => entry.make = value,
            TextField::Model => entry.model = value,
            TextField::Trim => entry.trim = value,
            TextField::ExteriorColor => entry.exterior_color = value,
            TextField::InteriorColor => entry.interior_color = value,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionField {
    Fuel,
    Transmission,
    Drivetrain,
    Body,
}

impl OptionField {
    fn label(self) -> &'static str {
        match self {
            OptionField::Fuel => "Fuel Type",
            OptionField::Transmission => "Transmission",
            OptionField::Drivetrain => "Drivetrain",
            OptionField::Body => "Body Type",
        }
    }

    fn options(self) -> Vec<&'static str> {
        match self {
            OptionField::Fuel => FuelType::iter().map(Into::into).collect(),
            OptionField::Transmission => Transmission::iter().map(Into::into).collect(),
            OptionField::Drivetrain => Drivetrain::iter().map(Into::into).collect(),
            OptionField::Body => BodyType::iter().map(Into::into).collect(),
        }
    }

    fn selected(self, entry: &ManualEntry) -> &'static str {
        match self {
            OptionField::Fuel => entry.fuel.into(),
            OptionField::Transmission => entry.transmission.into(),
            OptionField::Drivetrain => entry.drivetrain.into(),
            OptionField::Body => entry.body.into(),
        }
    }

    /// Stores the option named `value`; returns false when it is not one of
    /// the listed options.
    pub fn apply(self, entry: &mut ManualEntry, value: &str) -> bool {
        match self {
            OptionField::Fuel => FuelType::from_str(value).map(|v| entry.fuel = v).is_ok(),
            OptionField::Transmission => Transmission::from_str(value)
                .map(|v| entry.transmission = v)
                .is_ok(),
            OptionField::Drivetrain => Drivetrain::from_str(value)
                .map(|v| entry.drivetrain = v)
                .is_ok(),
            OptionField::Body => BodyType::from_str(value).map(|v| entry.body = v).is_ok(),
        }
    }
}

pub fn render_manual_form(model: &Model, link: &Scope<Model>) -> Html {
    let entry = &model.entry;
    let text = |field: TextField| render_text_input(field, entry, link);
    let number = |bounds: NumericBounds| {
        let unparsed = model.invalid_numbers.contains(bounds.field);
        render_number_input(bounds, entry, unparsed, link)
    };
    let select = |field: OptionField| render_select(field, entry, link);

    html! {
        <section class="manual-entry">
            <h2>{"Enter Vehicle Details"}</h2>

            <details class="form-group" open=true>
                <summary>{"Basic Info"}</summary>
                <div class="columns">
                    <div class="column">
                        { text(TextField::Name) }
                        { text(TextField::Make) }
                        { text(TextField::Model) }
                        { number(YEAR_BOUNDS) }
                    </div>
                    <div class="column">
                        { number(MILEAGE_BOUNDS) }
                        { select(OptionField::Fuel) }
                    </div>
                </div>
            </details>

            <details class="form-group">
                <summary>{"Engine & Performance"}</summary>
                <div class="columns">
                    <div class="column">
                        { number(ENGINE_BOUNDS) }
                        { number(CYLINDER_BOUNDS) }
                    </div>
                    <div class="column">
                        { select(OptionField::Transmission) }
                        { select(OptionField::Drivetrain) }
                    </div>
                </div>
            </details>

            <details class="form-group">
                <summary>{"Design & Features"}</summary>
                <div class="columns">
                    <div class="column">
                        { text(TextField::Trim) }
                        { select(OptionField::Body) }
                        { number(DOOR_BOUNDS) }
                    </div>
                    <div class="column">
                        { text(TextField::ExteriorColor) }
                        { text(TextField::InteriorColor) }
                    </div>
                </div>
            </details>

            <button
                class="analyze-btn"
                disabled={model.loading}
                onclick={link.callback(|_| Msg::SubmitManual)}
            >
                { if model.loading { "Predicting..." } else { "Predict Price" } }
            </button>
        </section>
    }
}

fn render_text_input(field: TextField, entry: &ManualEntry, link: &Scope<Model>) -> Html {
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::EditText(field, input.value())
    });

    html! {
        <label class="field">
            <span>{ field.label() }</span>
            <input
                type="text"
                placeholder={field.placeholder()}
                value={field.value(entry).to_string()}
                {oninput}
            />
        </label>
    }
}

fn render_number_input(
    bounds: NumericBounds,
    entry: &ManualEntry,
    unparsed: bool,
    link: &Scope<Model>,
) -> Html {
    let field = bounds.field;
    let value = entry.numeric(field).unwrap_or(bounds.default);
    let onchange = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::EditNumber(field, input.value())
    });

    html! {
        <label class={classes!("field", (unparsed || !bounds.accepts(value)).then_some("out-of-range"))}>
            <span>{ bounds.label }</span>
            <input
                type="number"
                step="1"
                min={bounds.min.to_string()}
                max={bounds.max.to_string()}
                value={value.to_string()}
                {onchange}
            />
        </label>
    }
}

fn render_select(field: OptionField, entry: &ManualEntry, link: &Scope<Model>) -> Html {
    let selected = field.selected(entry);
    let onchange = link.callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectOption(field, select.value())
    });

    html! {
        <label class="field">
            <span>{ field.label() }</span>
            <select {onchange}>
                { for field.options().into_iter().map(|option| html! {
                    <option value={option} selected={option == selected}>{ option }</option>
                })}
            </select>
        </label>
    }
}
