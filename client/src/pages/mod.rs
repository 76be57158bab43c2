//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns orchestration (which request to start, when) and delegates
//! rendering details to `components`. `actions` bridges the docket reducers
//! to signals.

pub mod actions;
pub mod cases;
pub mod home;
pub mod rag;
