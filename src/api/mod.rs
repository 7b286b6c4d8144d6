//! Backend REST API
//!
//! `ApiClient` carries the transport and auth; the other modules add one
//! typed method per endpoint.

pub mod account;
pub mod agents;
pub mod catalog;
pub mod client;

pub use client::ApiClient;

use crate::error::ApiError;
use reqwest::multipart::Part;
use std::path::Path;

/// Read a local file into a multipart part named after the file
async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(name))
}
