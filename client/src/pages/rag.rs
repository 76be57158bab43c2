//! Document tab: pick a file, summarize it, then ask a legal question.
//!
//! DESIGN
//! ======
//! Every field rendered here is read from `DocumentPipeline`; the page holds no
//! state of its own. Summary and answer only render once present.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::net::api::BrowserFile;
use crate::net::api::HttpApi;
use crate::pages::actions::{PipelineSignal, generate_response, process_document};

/// File types offered by the picker; the server rejects anything else.
pub const ACCEPTED_TYPES: &str = ".txt, .md, .markdown, .pdf";

#[component]
pub fn RagPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let pipeline = expect_context::<PipelineSignal>();

    let process_api = api.clone();
    let on_process = move |_| process_document(&process_api, pipeline);
    let on_generate = move |_| generate_response(&api, pipeline);

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file = BrowserFile::new(file);
            let name = file.name().to_owned();
            pipeline.update(|p| p.select_file(file, name));
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let file_name = move || pipeline.with(|p| p.file_name().to_owned());
    let summary = move || pipeline.with(|p| p.summary().map(str::to_owned));
    let answer = move || pipeline.with(|p| p.answer().map(str::to_owned));
    let errors = move || {
        pipeline.with(|p| [p.upload_error(), p.query_error()].into_iter().flatten().map(str::to_owned).collect::<Vec<_>>())
    };
    let busy = move || pipeline.with(|p| p.is_processing() || p.is_querying());

    view! {
        <div class="rag-system-container">
            <h2>"RAG System Interface"</h2>
            <div>
                <label for="fileUpload">"Upload Document (PDF, TXT or Markdown):"</label>
                <input type="file" id="fileUpload" accept=ACCEPTED_TYPES on:change=on_file/>
                <Show when=move || !file_name().is_empty()>
                    <p>"Selected File: " {file_name}</p>
                </Show>
                <button on:click=on_process disabled=busy>"Process Document"</button>
            </div>
            {move || summary().map(|text| view! {
                <div>
                    <h3>"Document Summary and Key Points:"</h3>
                    <textarea class="rag-output rag-output--summary" readonly=true prop:value=text></textarea>
                </div>
            })}
            <div class="rag-query">
                <label for="legalQuery">"Enter your legal query:"</label>
                <textarea
                    id="legalQuery"
                    class="rag-query__input"
                    placeholder="Type your legal query here..."
                    prop:value=move || pipeline.with(|p| p.query().to_owned())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        pipeline.update(|p| p.set_query(query));
                    }
                ></textarea>
                <button on:click=on_generate disabled=busy>"Generate Legal Response"</button>
            </div>
            {move || answer().map(|text| view! {
                <div class="rag-answer">
                    <h3>"AI Legal Response:"</h3>
                    <textarea class="rag-output rag-output--answer" readonly=true prop:value=text></textarea>
                </div>
            })}
            <For
                each=errors
                key=|message| message.clone()
                children=|message| view! { <p class="error-message">{message}</p> }
            />
        </div>
    }
}
