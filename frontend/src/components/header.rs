use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-car"></i> {" Vehicle Price Prediction App"}</h1>
            <p class="subtitle">
                {"This app predicts the "}<strong>{"estimated market price"}</strong>{" of a vehicle."}
            </p>
            <p class="subtitle">{"You can either enter the details manually or upload a CSV file."}</p>
        </header>
    }
}
