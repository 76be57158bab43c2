//! Client-side state that is not owned by the shared `docket` reducers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `docket::CaseStore` and `docket::DocumentPipeline` hold domain state and
//! are provided as signals by `app::App`; this module only adds navigation.

pub mod ui;
