use super::super::Model;
use shared::PREDICTED_PRICE_COLUMN;
use yew::prelude::*;

pub fn render_estimate(model: &Model) -> Html {
    match &model.estimate {
        Some(estimate) => html! {
            <div class="results-container success">
                <i class="fa-solid fa-circle-check"></i>
                <p>{ format!("Estimated Price: {}", estimate.formatted) }</p>
            </div>
        },
        None => html! {},
    }
}

/// Augmented upload table plus its download link.
pub fn render_batch_results(model: &Model) -> Html {
    let (Some(batch), Some(url)) = (&model.batch, &model.download_url) else {
        return html! {};
    };
    let predicted = batch.table.column_index(PREDICTED_PRICE_COLUMN);

    html! {
        <div class="results-container">
            <div class="success">
                <i class="fa-solid fa-circle-check"></i>
                <p>{"Prediction completed!"}</p>
            </div>

            <div class="table-wrapper">
                <table class="result-table">
                    <thead>
                        <tr>
                            { for batch.table.columns.iter().enumerate().map(|(i, column)| html! {
                                <th class={classes!((Some(i) == predicted).then_some("predicted"))}>{ column }</th>
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        { for batch.table.rows.iter().map(|row| html! {
                            <tr>
                                { for row.iter().enumerate().map(|(i, cell)| html! {
                                    <td class={classes!((Some(i) == predicted).then_some("predicted"))}>{ cell }</td>
                                })}
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>

            <a class="analyze-btn download-btn" href={url.to_string()} download={batch.file_name.clone()}>
                <i class="fa-solid fa-download"></i> {" Download Predictions"}
            </a>
        </div>
    }
}
