//! Networking: the browser implementation of the docket transport traits.

pub mod api;
