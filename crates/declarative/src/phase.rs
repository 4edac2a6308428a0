//! Phase dispatch - runs exactly one lifecycle phase for the host

use crate::error::Result;
use crate::resource::ErasedResource;
use crate::types::Phase;
use serde_json::Value;

/// A lifecycle phase invocation with its input records
///
/// Records may contain sensitive values; do not log them.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseRequest {
    Create { plan: Value },
    Read { state: Value },
    Update { prior: Value, plan: Value },
    Delete { state: Value },
    Import { id: String },
}

impl PhaseRequest {
    /// The phase this request invokes
    pub fn phase(&self) -> Phase {
        match self {
            Self::Create { .. } => Phase::Create,
            Self::Read { .. } => Phase::Read,
            Self::Update { .. } => Phase::Update,
            Self::Delete { .. } => Phase::Delete,
            Self::Import { .. } => Phase::Import,
        }
    }
}

/// What the host should do with its stored record after a phase
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    /// Store this record
    Stored(Value),
    /// Discard the stored record
    Removed,
}

impl PhaseOutcome {
    /// The record to store, if any
    pub fn record(&self) -> Option<&Value> {
        match self {
            Self::Stored(record) => Some(record),
            Self::Removed => None,
        }
    }
}

/// Run a single lifecycle phase against a resource
///
/// Errors are terminal for the phase: the caller must keep its prior record
/// untouched (or, for create and import, store nothing).
pub fn run_phase(resource: &dyn ErasedResource, request: PhaseRequest) -> Result<PhaseOutcome> {
    let phase = request.phase();
    let type_name = resource.type_name();
    log::debug!("{type_name}: {phase} starting");

    let result = match request {
        PhaseRequest::Create { plan } => resource.create(plan).map(PhaseOutcome::Stored),
        PhaseRequest::Read { state } => resource.read(state).map(PhaseOutcome::Stored),
        PhaseRequest::Update { prior, plan } => {
            resource.update(prior, plan).map(PhaseOutcome::Stored)
        }
        PhaseRequest::Delete { state } => resource.delete(state).map(|()| PhaseOutcome::Removed),
        PhaseRequest::Import { id } => resource.import(&id).map(PhaseOutcome::Stored),
    };

    match &result {
        Ok(_) => log::info!("{type_name}: {phase} complete"),
        Err(e) => log::warn!("{type_name}: {phase} failed: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::resource::boxed;
    use crate::resource::tests::NoteResource;
    use serde_json::json;

    #[test]
    fn test_request_phase() {
        assert_eq!(
            PhaseRequest::Import { id: "x".into() }.phase(),
            Phase::Import
        );
        assert_eq!(
            PhaseRequest::Update {
                prior: json!({}),
                plan: json!({})
            }
            .phase(),
            Phase::Update
        );
    }

    #[test]
    fn test_full_lifecycle() {
        let resource = boxed(NoteResource::default());

        let created = run_phase(
            resource.as_ref(),
            PhaseRequest::Create {
                plan: json!({"text": "hello"}),
            },
        )
        .unwrap();
        let state = created.record().cloned().unwrap();
        assert_eq!(state["id"], json!("n1"));

        let updated = run_phase(
            resource.as_ref(),
            PhaseRequest::Update {
                prior: state.clone(),
                plan: json!({"text": "world"}),
            },
        )
        .unwrap();
        assert_eq!(updated.record().unwrap()["text"], json!("world"));

        let removed = run_phase(resource.as_ref(), PhaseRequest::Delete { state }).unwrap();
        assert_eq!(removed, PhaseOutcome::Removed);
        assert!(removed.record().is_none());
    }

    #[test]
    fn test_read_error_is_returned() {
        let resource = boxed(NoteResource::default());

        let err = run_phase(
            resource.as_ref(),
            PhaseRequest::Read {
                state: json!({"id": "missing", "text": ""}),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_import_seeds_record() {
        let resource = boxed(NoteResource::default());

        let outcome = run_phase(
            resource.as_ref(),
            PhaseRequest::Import { id: "n9".into() },
        )
        .unwrap();
        assert_eq!(outcome.record().unwrap()["id"], json!("n9"));
    }
}
