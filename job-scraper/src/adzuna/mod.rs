pub mod client;
pub mod types;

pub use client::Client;
pub use types::SearchResponse;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Adzuna API error: {status} - {body}")]
    RequestNotOk { status: u16, body: String },
    #[error("Unexpected response body: '{0}'")]
    Json(#[from] serde_json::Error),
}
