//! Error types for the planner.

use thiserror::Error;

/// Reasons an itinerary mutation was declined. The itinerary is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("itinerary is empty")]
    Empty,
    #[error("stop {0:?} is not in the itinerary")]
    UnknownStop(String),
    #[error("proposed order is not a permutation of the current stops")]
    NotAPermutation,
}

/// Failures inside the remote optimizer adapter.
///
/// These never leave the adapter; they are logged and reported as `None`.
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("optimizer request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("optimizer request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("optimizer returned status {status}")]
    Status { status: u16 },
    #[error("optimizer response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("optimizer order is not a permutation of 0..{expected}")]
    InvalidOrder { expected: usize },
    #[error("optimizer reported a negative or non-finite metric")]
    InvalidMetric,
}

impl OptimizerError {
    pub(crate) fn from_reqwest(url: &str, timeout_secs: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OptimizerError::Timeout { timeout_secs }
        } else if let Some(status) = err.status() {
            OptimizerError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            OptimizerError::Decode(err)
        } else {
            OptimizerError::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("an optimization is already in progress")]
    AlreadyOptimizing,
}

/// Errors surfaced by a [`crate::session::PlanningSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
}
