//! Search input filtering the case grid as the user types.

use docket::CaseStore;
use leptos::prelude::*;

#[component]
pub fn SearchBar() -> impl IntoView {
    let cases = expect_context::<RwSignal<CaseStore>>();

    view! {
        <div class="search-container">
            <span class="search-icon" aria-hidden="true">"🔍"</span>
            <input
                type="text"
                class="search-input"
                placeholder="Search cases..."
                prop:value=move || cases.with(|s| s.query().to_owned())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    cases.update(|s| s.search(query));
                }
            />
        </div>
    }
}
