//! Grid card for one case.

use docket::Case;
use leptos::prelude::*;

/// A clickable card showing the case image, title and description.
#[component]
pub fn CaseCard(case: Case, on_open: Callback<Case>) -> impl IntoView {
    let Case { title, description, image_url, .. } = case.clone();

    view! {
        <div class="case-card" on:click=move |_| on_open.run(case.clone())>
            <img class="card-image" src=image_url alt="Case"/>
            <h3 class="card-title">{title}</h3>
            <p class="card-description">{description}</p>
        </div>
    }
}
