use crate::models::{DateRangeError, PayloadError};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("invalid chart payload: {0}")]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
    #[error("invalid date range text {0:?}, expected \"YYYY-MM-DD - YYYY-MM-DD\"")]
    RangeText(String),
}
