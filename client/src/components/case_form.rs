//! "Add New Case" form.
//!
//! DESIGN
//! ======
//! Inputs are bound to the store's draft so validation, the error line and
//! clearing after a successful add all live in `docket::CaseStore`. The form
//! only reports submission.

use docket::{CaseField, CaseStore};
use leptos::prelude::*;

#[component]
pub fn CaseForm(on_submit: Callback<()>) -> impl IntoView {
    let cases = expect_context::<RwSignal<CaseStore>>();

    let value = move |field: CaseField| move || cases.with(|s| s.form().get(field).to_owned());
    let edit = move |field: CaseField| {
        move |ev: leptos::ev::Event| {
            let text = event_target_value(&ev);
            cases.update(|s| s.edit(field, text));
        }
    };
    let error = move || cases.with(|s| s.error().map(str::to_owned));
    let adding = move || cases.with(CaseStore::is_adding);

    view! {
        <form
            class="form-container"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <h2 class="form-title">"Add New Case"</h2>
            <input
                type="text"
                class="form-input"
                placeholder="Case Title"
                prop:value=value(CaseField::Title)
                on:input=edit(CaseField::Title)
            />
            <textarea
                class="form-textarea"
                placeholder="Case Description"
                prop:value=value(CaseField::Description)
                on:input=edit(CaseField::Description)
            ></textarea>
            <input
                type="text"
                class="form-input"
                placeholder="Image URL"
                prop:value=value(CaseField::ImageUrl)
                on:input=edit(CaseField::ImageUrl)
            />
            {move || error().map(|message| view! { <p class="error-message">{message}</p> })}
            <button type="submit" class="submit-button" disabled=adding>
                "➕ Add Case"
            </button>
        </form>
    }
}
