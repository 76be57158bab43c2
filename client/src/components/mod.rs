//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render one piece of a page and read shared state from Leptos
//! context. Anything that starts a request is passed in as a callback.

pub mod case_card;
pub mod case_detail;
pub mod case_form;
pub mod search_bar;
pub mod tab_bar;
