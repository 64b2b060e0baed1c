//! Settled result of a single peer query.

use crate::error::TransportError;

/// How a single peer query settled.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<R> {
    /// The peer answered in time.
    Success(R),
    /// The peer did not answer within the per-request timeout.
    Timeout,
    /// The transport reported a failure.
    TransportFailure(TransportError),
}

impl<R> QueryOutcome<R> {
    /// The response, if the query succeeded.
    pub fn response(&self) -> Option<&R> {
        match self {
            Self::Success(response) => Some(response),
            Self::Timeout | Self::TransportFailure(_) => None,
        }
    }

    /// Returns `true` if the query succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if the query timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl<R> From<Result<R, TransportError>> for QueryOutcome<R> {
    fn from(result: Result<R, TransportError>) -> Self {
        match result {
            Ok(response) => Self::Success(response),
            Err(err) => Self::TransportFailure(err),
        }
    }
}
