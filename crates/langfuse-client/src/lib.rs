//! # langfuse-client
//!
//! Blocking client for the Langfuse Admin API.
//!
//! The Admin API manages organizations and the projects inside them. It is
//! only available on self-hosted instances and is authenticated with the
//! instance's admin API key sent as a bearer token.
//!
//! ## Example
//!
//! ```no_run
//! use langfuse_client::{AdminApi, HttpClient};
//!
//! let client = HttpClient::new("http://localhost:3000", "admin-key");
//!
//! let org = client.create_organization("acme").expect("create failed");
//! let project = client.create_project(&org.id, "tracing").expect("create failed");
//!
//! // Keys are only ever returned here
//! println!("public key: {:?}", project.public_key);
//! ```
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create organization | `POST /api/admin/organizations` |
//! | get / update / delete organization | `GET / PUT / DELETE /api/admin/organizations/{id}` |
//! | create project | `POST /api/admin/organizations/{org}/projects` |
//! | get / update / delete project | `GET / PUT / DELETE /api/admin/organizations/{org}/projects/{id}` |
//!
//! A status of 300 or above is an error carrying the response body
//! verbatim. A 404 on a read is reported as [`Error::NotFound`].

#![warn(clippy::all)]

pub mod api;
pub mod error;
pub mod types;

pub use api::http::HttpClient;
pub use api::{AdminApi, MockAdminApi};
pub use error::{Entity, Error, ErrorCategory, Operation, Result};
pub use types::{Organization, Project};
