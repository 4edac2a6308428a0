//! # Declarative
//!
//! A framework for declarative resource reconciliation.
//!
//! This crate provides the contract between a desired-state host (which
//! plans changes and stores records) and the resources that translate
//! those records into calls against a remote CRUD API.
//!
//! ## Core Concepts
//!
//! - **Resource**: A kind of remote entity with create/read/update/delete/import phases
//! - **Schema**: Attribute descriptions (required, computed, sensitive, write-once)
//! - **WriteOnce**: A field captured at creation and preserved by every read
//! - **Registry**: Resource kinds addressable by type name
//! - **run_phase**: Runs exactly one lifecycle phase and tells the host what to store
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{PhaseRequest, PhaseOutcome, Registry, run_phase};
//! use serde_json::json;
//!
//! let registry = Registry::new().with(OrganizationResource::new(client.clone()));
//! let resource = registry.get("langfuse_organization")?;
//!
//! let outcome = run_phase(resource, PhaseRequest::Create { plan: json!({"name": "acme"}) })?;
//! if let PhaseOutcome::Stored(record) = outcome {
//!     save(record)?;
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is terminal for the current phase and classified by
//! [`ErrorKind`]. A failed phase never returns a record, so the host keeps
//! whatever it had before.

pub mod error;
pub mod phase;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use error::{Error, ErrorKind, Result};
pub use phase::{PhaseOutcome, PhaseRequest, run_phase};
pub use registry::Registry;
pub use resource::{BoxedResource, ErasedResource, Resource, boxed};
pub use schema::{Attribute, Lifecycle, Presence, REDACTED, Schema};
pub use types::{Phase, WriteOnce};
