//! docview server library.
//!
//! The preview dispatcher, HTTP routes, presentation views, and shared
//! state live here; `main.rs` only wires configuration and serves.

pub mod error;
pub mod preview;
pub mod routes;
pub mod state;
pub mod views;

pub use preview::{PageKind, PreviewPage, PreviewService};
pub use state::AppState;
