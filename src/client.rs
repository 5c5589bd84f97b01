// src/client.rs
use std::fmt;

use chrono::Local;
use log::debug;

use crate::config::StatusConfig;
use crate::models::status::{parse_status, StatusPayload};

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
    Json(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "{}", e),
            Self::Status(code) => write!(f, "Server returned {}", code),
            Self::Json(e) => write!(f, "Server sent an unreadable status document: {}", e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Fetches and parses the server's status document. A network failure, a
/// non-success HTTP status, or an unparsable body is an error; individual bad
/// fields inside a valid document are not.
pub async fn fetch_status(config: &StatusConfig) -> Result<StatusPayload, FetchError> {
    let url = config.status_url();
    debug!("Requesting server status from {}", url);

    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let raw_json = response.text().await?;
    let status = parse_status(&raw_json)?;

    Ok(StatusPayload {
        status,
        raw_json,
        retrieved_at: Local::now(),
    })
}
