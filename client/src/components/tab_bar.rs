//! Top navigation bar switching between the cases and document tabs.

use leptos::prelude::*;

use crate::state::ui::{Tab, UiState};

/// Navbar with one link per [`Tab`]. Selection is reported, not applied, so the
/// page can decide whether a tab switch needs a refetch.
#[component]
pub fn TabBar(on_select: Callback<Tab>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <nav class="navbar">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <a
                            class="navbar__tab"
                            class:navbar__tab--active=move || ui.with(|u| u.tab == tab)
                            on:click=move |_| on_select.run(tab)
                        >
                            {tab.label()}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
