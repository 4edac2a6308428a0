//! Error types for Admin API calls.
//!
//! Every failure carries the [`Operation`] that produced it so callers can
//! report which call failed without re-deriving it from a URL.

use std::fmt;

/// Result type alias for Admin API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of remote entity an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A Langfuse organization.
    Organization,
    /// A project inside an organization.
    Project,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization => write!(f, "organization"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// One of the eight Admin API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOrganization,
    GetOrganization,
    UpdateOrganization,
    DeleteOrganization,
    CreateProject,
    GetProject,
    UpdateProject,
    DeleteProject,
}

impl Operation {
    /// Entity this operation acts on.
    #[must_use]
    pub fn entity(&self) -> Entity {
        match self {
            Self::CreateOrganization
            | Self::GetOrganization
            | Self::UpdateOrganization
            | Self::DeleteOrganization => Entity::Organization,
            Self::CreateProject | Self::GetProject | Self::UpdateProject | Self::DeleteProject => {
                Entity::Project
            }
        }
    }

    /// Whether this is a read (GET) call.
    ///
    /// Only reads distinguish a 404 as [`Error::NotFound`].
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::GetOrganization | Self::GetProject)
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::CreateOrganization | Self::CreateProject => "create",
            Self::GetOrganization | Self::GetProject => "get",
            Self::UpdateOrganization | Self::UpdateProject => "update",
            Self::DeleteOrganization | Self::DeleteProject => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.entity())
    }
}

/// Categories of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The entity does not exist (404 on a read).
    NotFound,
    /// The API answered with a non-2xx status.
    Api,
    /// The response body did not have the expected shape.
    Decode,
    /// The request never produced a response.
    Transport,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "Remote entity not found",
            Self::Api => "Admin API rejected the request",
            Self::Decode => "Unexpected response from the Admin API",
            Self::Transport => "Could not reach the Admin API",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to the Admin API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A read returned 404.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: Entity,
        /// Identifier that was looked up.
        id: String,
    },

    /// The API returned a status >= 300.
    #[error("{operation} failed (HTTP {status}): {body}")]
    Api {
        /// Call that failed.
        operation: Operation,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("{operation} returned an invalid response: {message}")]
    Decode {
        /// Call whose response was malformed.
        operation: Operation,
        /// Decoder message.
        message: String,
    },

    /// The request failed before a response was received.
    #[error("{operation} request failed: {message}")]
    Transport {
        /// Call that failed.
        operation: Operation,
        /// Transport error message.
        message: String,
    },
}

impl Error {
    /// Create an API error from a status and raw body.
    pub fn api(operation: Operation, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            operation,
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(operation: Operation, message: impl fmt::Display) -> Self {
        Self::Decode {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a transport error from a ureq failure.
    pub fn transport(operation: Operation, err: &ureq::Error) -> Self {
        Self::Transport {
            operation,
            message: err.to_string(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Api { .. } => ErrorCategory::Api,
            Error::Decode { .. } => ErrorCategory::Decode,
            Error::Transport { .. } => ErrorCategory::Transport,
        }
    }

    /// Whether this is a 404 on a read.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound { .. } => Some(404),
            Error::Api { status, .. } => Some(*status),
            Error::Decode { .. } | Error::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::CreateOrganization.to_string(), "create organization");
        assert_eq!(Operation::GetProject.to_string(), "get project");
        assert_eq!(Operation::DeleteProject.to_string(), "delete project");
    }

    #[test]
    fn test_operation_entity() {
        assert_eq!(Operation::UpdateOrganization.entity(), Entity::Organization);
        assert_eq!(Operation::CreateProject.entity(), Entity::Project);
    }

    #[test]
    fn test_only_gets_are_reads() {
        assert!(Operation::GetOrganization.is_read());
        assert!(Operation::GetProject.is_read());
        assert!(!Operation::DeleteOrganization.is_read());
        assert!(!Operation::UpdateProject.is_read());
    }

    #[test]
    fn test_api_error_keeps_body_verbatim() {
        let err = Error::api(Operation::CreateOrganization, 409, "{\"error\":\"exists\"}");
        assert_eq!(
            err.to_string(),
            "create organization failed (HTTP 409): {\"error\":\"exists\"}"
        );
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_not_found_category() {
        let err = Error::NotFound {
            entity: Entity::Project,
            id: "proj456".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.to_string(), "project proj456 not found");
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = Error::decode(Operation::GetOrganization, "missing field `id`");
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_error_category_display() {
        assert!(ErrorCategory::Transport.to_string().contains("reach"));
    }
}
