//! Cases tab: searchable grid plus add form, or the detail of one case.

#[cfg(test)]
#[path = "cases_test.rs"]
mod cases_test;

use docket::{Case, CaseStore};
use leptos::prelude::*;

use crate::components::case_card::CaseCard;
use crate::components::case_detail::CaseDetail;
use crate::components::case_form::CaseForm;
use crate::components::search_bar::SearchBar;
use crate::net::api::HttpApi;
use crate::pages::actions::submit_case;
use crate::state::ui::UiState;

pub const APP_TITLE: &str = "LexGenie - Combination of law and Ai expert";
pub const NO_CASES: &str = "No cases found.";

/// Stable `<For>` key for a grid card. Stored cases key by id; id-less
/// records fall back to their position so identical rows stay distinct.
pub fn card_key(index: usize, case: &Case) -> String {
    match &case.id {
        Some(id) => format!("id:{id}"),
        None => format!("at:{index}:{}:{}:{}", case.title, case.description, case.image_url),
    }
}

#[component]
pub fn CasesPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let cases = expect_context::<RwSignal<CaseStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_submit = Callback::new(move |()| submit_case(&api, cases));
    let on_open = Callback::new(move |case: Case| ui.update(|u| u.open_case(case)));
    let on_back = Callback::new(move |()| ui.update(UiState::back_to_list));

    let selected = move || ui.with(|u| u.selected_case().cloned());
    let filtered = move || cases.with(|s| s.filtered().iter().cloned().enumerate().collect::<Vec<_>>());

    view! {
        {move || match selected() {
            Some(case) => view! { <CaseDetail case=case on_back=on_back/> }.into_any(),
            None => view! {
                <h1 class="app-title">{APP_TITLE}</h1>
                <SearchBar/>
                <CaseForm on_submit=on_submit/>
                <h2 class="list-title">"Case List"</h2>
                <div class="case-grid">
                    <Show
                        when=move || cases.with(|s| !s.filtered().is_empty())
                        fallback=|| view! { <p class="no-cases">{NO_CASES}</p> }
                    >
                        <For
                            each=filtered
                            key=|(index, case)| card_key(*index, case)
                            children=move |(_, case)| view! { <CaseCard case=case on_open=on_open/> }
                        />
                    </Show>
                </div>
            }
            .into_any(),
        }}
    }
}
