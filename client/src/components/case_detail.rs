//! Full view of one case with a way back to the grid.

use docket::Case;
use leptos::prelude::*;

#[component]
pub fn CaseDetail(case: Case, on_back: Callback<()>) -> impl IntoView {
    view! {
        <div>
            <button class="back-button" on:click=move |_| on_back.run(())>
                "← Back to List"
            </button>
            <div class="case-details">
                <img class="case-image" src=case.image_url alt="Case"/>
                <h2 class="case-title">{case.title}</h2>
                <p class="case-description">{case.description}</p>
            </div>
        </div>
    }
}
