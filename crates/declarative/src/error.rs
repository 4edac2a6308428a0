//! Error taxonomy for reconciliation phases.
//!
//! Every error is terminal for the phase that produced it. There is no
//! partial success: a failed phase never yields a record to store.

use std::fmt;

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a phase failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Provider configuration is missing or invalid.
    Configuration,
    /// The remote entity does not exist.
    NotFound,
    /// The remote API rejected the request.
    Remote,
    /// The remote API could not be reached.
    Transport,
    /// The remote response did not have the expected shape.
    Decode,
    /// Input from the operator is malformed.
    Validation,
    /// A record handed over by the host does not match the resource model.
    Record,
    /// No resource is registered under the requested type name.
    UnknownResourceType,
}

impl ErrorKind {
    /// Get a user-friendly description of this error kind.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "Invalid provider configuration",
            Self::NotFound => "Resource not found",
            Self::Remote => "Remote API error",
            Self::Transport => "Remote API unreachable",
            Self::Decode => "Unexpected remote response",
            Self::Validation => "Invalid input",
            Self::Record => "Invalid state record",
            Self::UnknownResourceType => "Unknown resource type",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors surfaced to the host by a lifecycle phase.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required provider configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote entity is gone.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of entity.
        resource: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// The remote API answered with a failing status.
    #[error("{action} failed (HTTP {status}): {detail}")]
    Remote {
        /// What was being attempted, e.g. "create organization".
        action: String,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        detail: String,
    },

    /// No response was received.
    #[error("{action} failed: {detail}")]
    Transport {
        /// What was being attempted.
        action: String,
        /// Transport error message.
        detail: String,
    },

    /// The response body did not decode.
    #[error("{action} returned an invalid response: {detail}")]
    Decode {
        /// What was being attempted.
        action: String,
        /// Decoder message.
        detail: String,
    },

    /// Operator input is malformed.
    #[error("invalid {subject}: {detail}")]
    Validation {
        /// What was invalid, e.g. "import identifier".
        subject: String,
        /// Why it was rejected.
        detail: String,
    },

    /// A host record does not deserialize into the resource model.
    #[error("invalid {resource_type} record: {source}")]
    Record {
        /// Resource type name.
        resource_type: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// No resource registered under this name.
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error.
    pub fn validation(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            subject: subject.into(),
            detail: detail.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(action: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Decode {
            action: action.into(),
            detail: detail.into(),
        }
    }

    /// Create a record error for a resource type.
    pub fn record(resource_type: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Record {
            resource_type: resource_type.into(),
            source,
        }
    }

    /// Get the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Record { .. } => ErrorKind::Record,
            Error::UnknownResourceType(_) => ErrorKind::UnknownResourceType,
        }
    }
}
