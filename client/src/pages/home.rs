//! Single-route landing page hosting both tabs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns tab switching. The case list is fetched once on mount and again every
//! time the cases tab is chosen.

use docket::CaseStore;
use leptos::prelude::*;

use crate::components::tab_bar::TabBar;
use crate::net::api::HttpApi;
use crate::pages::actions::refresh_cases;
use crate::pages::cases::CasesPage;
use crate::pages::rag::RagPage;
use crate::state::ui::{Tab, UiState};

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let cases = expect_context::<RwSignal<CaseStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let mount_api = api.clone();
    Effect::new(move || refresh_cases(&mount_api, cases));

    let on_select = Callback::new(move |tab: Tab| {
        if ui.try_update(|u| u.select_tab(tab)).unwrap_or(false) {
            refresh_cases(&api, cases);
        }
    });

    view! {
        <div class="app-container">
            <TabBar on_select=on_select/>
            <div class="main-container">
                <Show when=move || ui.with(|u| u.tab == Tab::Cases) fallback=|| view! { <RagPage/> }>
                    <CasesPage/>
                </Show>
            </div>
        </div>
    }
}
