//! Agent Console client library
//!
//! Client-side state for the agent administration console: a bearer-token
//! REST client, request-tracked entity slices behind a single store, and the
//! `Console` composition root exposing one operation per backend call.
//! The `agent-console` binary in `src/main.rs` drives it from the command line.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
/// Client state management
///
/// Slices, actions, reducers, the store and the agent cache.
pub mod state;
pub mod storage;

pub use console::{Console, FetchMode, SelectionRefresh};
pub use error::{ApiError, Outcome, Rejection};
