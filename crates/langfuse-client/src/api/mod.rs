//! The [`AdminApi`] trait and its implementations.
//!
//! [`http::HttpClient`] talks to a real Langfuse instance. [`MockAdminApi`]
//! keeps organizations and projects in memory so reconcilers can be tested
//! without network access:
//!
//! ```
//! use langfuse_client::api::{AdminApi, MockAdminApi};
//!
//! let mock = MockAdminApi::new();
//! let org = mock.create_organization("acme").unwrap();
//! assert_eq!(mock.get_organization(&org.id).unwrap().name, "acme");
//! ```

pub mod http;

use crate::error::{Error, Operation, Result};
use crate::types::{Organization, Project};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Typed operations of the Langfuse Admin API.
///
/// One method per (entity, verb) pair. Implementations must be shareable
/// across threads; the provider hands a single instance to every resource.
pub trait AdminApi: Send + Sync {
    /// `POST /api/admin/organizations`
    fn create_organization(&self, name: &str) -> Result<Organization>;

    /// `GET /api/admin/organizations/{id}`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the organization does not exist.
    fn get_organization(&self, id: &str) -> Result<Organization>;

    /// `PUT /api/admin/organizations/{id}`
    fn update_organization(&self, id: &str, name: &str) -> Result<Organization>;

    /// `DELETE /api/admin/organizations/{id}`
    fn delete_organization(&self, id: &str) -> Result<()>;

    /// `POST /api/admin/organizations/{org_id}/projects`
    ///
    /// The response is the only place the project's keys are ever returned.
    fn create_project(&self, org_id: &str, name: &str) -> Result<Project>;

    /// `GET /api/admin/organizations/{org_id}/projects/{id}`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the project does not exist.
    fn get_project(&self, org_id: &str, id: &str) -> Result<Project>;

    /// `PUT /api/admin/organizations/{org_id}/projects/{id}`
    fn update_project(&self, org_id: &str, id: &str, name: &str) -> Result<Project>;

    /// `DELETE /api/admin/organizations/{org_id}/projects/{id}`
    fn delete_project(&self, org_id: &str, id: &str) -> Result<()>;
}

/// Map a failing HTTP status to an error.
///
/// A 404 is only [`Error::NotFound`] for reads; writes report it like any
/// other rejected call.
pub(crate) fn status_error(operation: Operation, id: &str, status: u16, body: String) -> Error {
    if status == 404 && operation.is_read() {
        Error::NotFound {
            entity: operation.entity(),
            id: id.to_string(),
        }
    } else {
        Error::api(operation, status, body)
    }
}

/// In-memory Admin API for testing.
///
/// Ids and keys are generated from a counter. Like the real API, stored
/// projects never echo their keys back from reads.
#[derive(Debug, Clone, Default)]
pub struct MockAdminApi {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    organizations: BTreeMap<String, Organization>,
    projects: BTreeMap<(String, String), Project>,
    counter: u64,
    fail_next: Option<(u16, String)>,
    calls: Vec<Operation>,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}", self.counter)
    }

    /// Record the call and consume a queued failure, if any.
    fn begin(&mut self, operation: Operation, id: &str) -> Result<()> {
        self.calls.push(operation);
        match self.fail_next.take() {
            Some((status, body)) => Err(status_error(operation, id, status, body)),
            None => Ok(()),
        }
    }

    fn missing(operation: Operation, id: &str) -> Error {
        status_error(
            operation,
            id,
            404,
            format!("{{\"message\":\"{} {id} not found\"}}", operation.entity()),
        )
    }
}

impl MockAdminApi {
    /// Create a new empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call fail with the given status and body.
    pub fn fail_next(&self, status: u16, body: impl Into<String>) {
        self.lock().fail_next = Some((status, body.into()));
    }

    /// Store an organization as if it had been created elsewhere.
    pub fn insert_organization(&self, organization: Organization) {
        self.lock()
            .organizations
            .insert(organization.id.clone(), organization);
    }

    /// Store a project as if it had been created elsewhere.
    ///
    /// Keys are stripped, matching what the read endpoint returns.
    pub fn insert_project(&self, mut project: Project) {
        project.public_key = None;
        project.secret_key = None;
        let key = (project.organization_id.clone(), project.id.clone());
        self.lock().projects.insert(key, project);
    }

    /// Remove an organization behind the provider's back.
    pub fn forget_organization(&self, id: &str) {
        self.lock().organizations.remove(id);
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }
}

impl AdminApi for MockAdminApi {
    fn create_organization(&self, name: &str) -> Result<Organization> {
        let mut state = self.lock();
        state.begin(Operation::CreateOrganization, "")?;

        let organization = Organization {
            id: state.next_id("org"),
            name: name.to_string(),
        };
        state
            .organizations
            .insert(organization.id.clone(), organization.clone());
        Ok(organization)
    }

    fn get_organization(&self, id: &str) -> Result<Organization> {
        let op = Operation::GetOrganization;
        let mut state = self.lock();
        state.begin(op, id)?;

        state
            .organizations
            .get(id)
            .cloned()
            .ok_or_else(|| MockState::missing(op, id))
    }

    fn update_organization(&self, id: &str, name: &str) -> Result<Organization> {
        let op = Operation::UpdateOrganization;
        let mut state = self.lock();
        state.begin(op, id)?;

        let organization = state
            .organizations
            .get_mut(id)
            .ok_or_else(|| MockState::missing(op, id))?;
        organization.name = name.to_string();
        Ok(organization.clone())
    }

    fn delete_organization(&self, id: &str) -> Result<()> {
        let op = Operation::DeleteOrganization;
        let mut state = self.lock();
        state.begin(op, id)?;

        if state.organizations.remove(id).is_none() {
            return Err(MockState::missing(op, id));
        }
        state.projects.retain(|(org_id, _), _| org_id != id);
        Ok(())
    }

    fn create_project(&self, org_id: &str, name: &str) -> Result<Project> {
        let op = Operation::CreateProject;
        let mut state = self.lock();
        state.begin(op, org_id)?;

        if !state.organizations.contains_key(org_id) {
            return Err(MockState::missing(op, org_id));
        }

        let id = state.next_id("proj");
        let stored = Project {
            id: id.clone(),
            name: name.to_string(),
            organization_id: org_id.to_string(),
            public_key: None,
            secret_key: None,
        };
        state
            .projects
            .insert((org_id.to_string(), id.clone()), stored.clone());

        Ok(Project {
            public_key: Some(format!("pk-lf-{id}")),
            secret_key: Some(format!("sk-lf-{id}")),
            ..stored
        })
    }

    fn get_project(&self, org_id: &str, id: &str) -> Result<Project> {
        let op = Operation::GetProject;
        let mut state = self.lock();
        state.begin(op, id)?;

        state
            .projects
            .get(&(org_id.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| MockState::missing(op, id))
    }

    fn update_project(&self, org_id: &str, id: &str, name: &str) -> Result<Project> {
        let op = Operation::UpdateProject;
        let mut state = self.lock();
        state.begin(op, id)?;

        let project = state
            .projects
            .get_mut(&(org_id.to_string(), id.to_string()))
            .ok_or_else(|| MockState::missing(op, id))?;
        project.name = name.to_string();
        Ok(project.clone())
    }

    fn delete_project(&self, org_id: &str, id: &str) -> Result<()> {
        let op = Operation::DeleteProject;
        let mut state = self.lock();
        state.begin(op, id)?;

        state
            .projects
            .remove(&(org_id.to_string(), id.to_string()))
            .map(|_| ())
            .ok_or_else(|| MockState::missing(op, id))
    }
}
