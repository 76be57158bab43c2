//! Shared case and document-pipeline model for LexGenie.
//!
//! This crate owns everything the browser `client` and the `cli` agree on:
//! the case record and its validation, the local search filter, the wire
//! DTOs of both backend services, the error taxonomy, and the two view-state
//! reducers (`CaseStore`, `DocumentPipeline`). Transports plug in through the
//! `CaseApi` / `RagApi` traits so the reducers and workflows stay testable
//! without a network.

pub mod api;
pub mod case;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod ticket;
pub mod wire;
pub mod workflow;

pub use api::{CaseApi, RagApi};
pub use case::{Case, CaseDraft, CaseField, NewCase, filter_cases};
pub use error::{AddCaseError, ApiError, MissingInputError, PipelineError, ValidationError};
pub use pipeline::DocumentPipeline;
pub use store::CaseStore;
pub use ticket::{Ticket, TicketBook};
pub use wire::Endpoints;
