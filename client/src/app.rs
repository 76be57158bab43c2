//! Root component, HTML shell and context wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the server for every request; `App` is hydrated in
//! the browser. All shared state is provided here as context so pages and
//! components can pull what they need:
//!
//! - `HttpApi` (transport, same-origin by default)
//! - `RwSignal<CaseStore>` (case list, search, add form)
//! - `PipelineSignal` (document pipeline)
//! - `RwSignal<UiState>` (tab and detail navigation)

use docket::{CaseStore, DocumentPipeline, Endpoints};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Route, Router, Routes};

use crate::net::api::HttpApi;
use crate::pages::actions::PipelineSignal;
use crate::pages::home::HomePage;
use crate::state::ui::UiState;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(HttpApi::new(Endpoints::default()));
    provide_context(RwSignal::new(CaseStore::new()));
    let pipeline: PipelineSignal = RwSignal::new_with_storage(DocumentPipeline::new());
    provide_context(pipeline);
    provide_context(RwSignal::new(UiState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/lexgenie.css"/>
        <Title text="LexGenie"/>
        <Router>
            <main>
                <Routes fallback=|| "Page not found.">
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}
