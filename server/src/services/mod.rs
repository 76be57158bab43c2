//! Business logic behind the HTTP routes.

pub mod cases;
pub mod extract;
pub mod rag;
pub mod similar;
