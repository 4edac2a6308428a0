//! Langfuse resource reconcilers
//!
//! Each resource kind wraps the shared Admin API client and maps its four
//! lifecycle phases onto the matching REST calls:
//! - `langfuse_organization` - organizations
//! - `langfuse_project` - projects inside an organization

use declarative::Error;
use langfuse_client::Error as ApiError;

pub mod organization;
pub mod project;

pub use organization::OrganizationResource;
pub use project::ProjectResource;

/// Translate an Admin API failure into a phase error
pub(crate) fn api_error(err: ApiError) -> Error {
    match err {
        ApiError::NotFound { entity, id } => Error::NotFound {
            resource: entity.to_string(),
            id,
        },
        ApiError::Api {
            operation,
            status,
            body,
        } => Error::Remote {
            action: operation.to_string(),
            status,
            detail: body,
        },
        ApiError::Decode { operation, message } => Error::Decode {
            action: operation.to_string(),
            detail: message,
        },
        ApiError::Transport { operation, message } => Error::Transport {
            action: operation.to_string(),
            detail: message,
        },
    }
}

/// A record attribute that must be set and non-empty
pub(crate) fn required<'a>(value: &'a Option<String>, attribute: &str) -> Result<&'a str, Error> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::validation(attribute, "a value is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::ErrorKind;
    use langfuse_client::{Entity, Operation};

    #[test]
    fn test_api_error_not_found() {
        let err = api_error(ApiError::NotFound {
            entity: Entity::Organization,
            id: "org123".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "organization org123 not found");
    }

    #[test]
    fn test_api_error_keeps_body_verbatim() {
        let err = api_error(ApiError::api(
            Operation::UpdateProject,
            422,
            "{\"issues\":[\"name too long\"]}",
        ));
        match err {
            Error::Remote {
                action,
                status,
                detail,
            } => {
                assert_eq!(action, "update project");
                assert_eq!(status, 422);
                assert_eq!(detail, "{\"issues\":[\"name too long\"]}");
            }
            other => panic!("Expected Error::Remote, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_decode() {
        let err = api_error(ApiError::decode(Operation::GetProject, "expected value"));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_required() {
        assert_eq!(required(&Some("acme".to_string()), "name").unwrap(), "acme");
        assert!(required(&Some(String::new()), "name").is_err());

        let err = required(&None, "name").unwrap_err();
        assert_eq!(err.to_string(), "invalid name: a value is required");
    }
}
