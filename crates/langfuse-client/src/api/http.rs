//! HTTP implementation of the Admin API.
//!
//! Requests are blocking and authenticated with the admin API key as a
//! bearer token. The agent is configured not to treat status codes as
//! errors so the response body of a failed call can be reported verbatim.

use crate::api::{AdminApi, status_error};
use crate::error::{Error, Operation, Result};
use crate::types::{NameBody, Organization, Project};
use serde::de::DeserializeOwned;
use std::fmt;
use ureq::Body;
use ureq::http::Response;

const USER_AGENT: &str = concat!("langfuse-client/", env!("CARGO_PKG_VERSION"));

/// Admin API client backed by a [`ureq::Agent`].
///
/// # Example
///
/// ```no_run
/// use langfuse_client::api::AdminApi;
/// use langfuse_client::api::http::HttpClient;
///
/// let client = HttpClient::new("http://localhost:3000", "admin-key");
/// let org = client.create_organization("acme").unwrap();
/// println!("created organization {}", org.id);
/// ```
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl HttpClient {
    /// Create a client for the given base URL and admin API key.
    ///
    /// A trailing `/` on the base URL is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>, admin_key: impl AsRef<str>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        let mut base_url: String = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            agent: config.into(),
            base_url,
            authorization: format!("Bearer {}", admin_key.as_ref()),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn organizations_url(&self) -> String {
        format!("{}/api/admin/organizations", self.base_url)
    }

    fn organization_url(&self, id: &str) -> String {
        format!("{}/{id}", self.organizations_url())
    }

    fn projects_url(&self, org_id: &str) -> String {
        format!("{}/projects", self.organization_url(org_id))
    }

    fn project_url(&self, org_id: &str, id: &str) -> String {
        format!("{}/{id}", self.projects_url(org_id))
    }

    fn get(&self, operation: Operation, url: &str, id: &str) -> Result<String> {
        log::debug!("GET {url}");
        let result = self
            .agent
            .get(url)
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call();
        finish(operation, id, result)
    }

    fn post(&self, operation: Operation, url: &str, id: &str, name: &str) -> Result<String> {
        log::debug!("POST {url}");
        let result = self
            .agent
            .post(url)
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .content_type("application/json")
            .send_json(NameBody { name });
        finish(operation, id, result)
    }

    fn put(&self, operation: Operation, url: &str, id: &str, name: &str) -> Result<String> {
        log::debug!("PUT {url}");
        let result = self
            .agent
            .put(url)
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .content_type("application/json")
            .send_json(NameBody { name });
        finish(operation, id, result)
    }

    fn delete(&self, operation: Operation, url: &str, id: &str) -> Result<()> {
        log::debug!("DELETE {url}");
        let result = self
            .agent
            .delete(url)
            .header("Authorization", self.authorization.as_str())
            .header("User-Agent", USER_AGENT)
            .call();
        finish(operation, id, result).map(|_| ())
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"Bearer <redacted>")
            .finish()
    }
}

/// Turn a raw response into its body, or the matching error.
fn finish(
    operation: Operation,
    id: &str,
    result: std::result::Result<Response<Body>, ureq::Error>,
) -> Result<String> {
    let mut response = result.map_err(|e| Error::transport(operation, &e))?;
    let status = response.status().as_u16();
    log::trace!("{operation}: HTTP {status}");

    let body = response.body_mut().read_to_string();
    if status >= 300 {
        return Err(status_error(operation, id, status, body.unwrap_or_default()));
    }
    body.map_err(|e| Error::transport(operation, &e))
}

fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(operation, e))
}

impl AdminApi for HttpClient {
    fn create_organization(&self, name: &str) -> Result<Organization> {
        let op = Operation::CreateOrganization;
        let body = self.post(op, &self.organizations_url(), "", name)?;
        decode(op, &body)
    }

    fn get_organization(&self, id: &str) -> Result<Organization> {
        let op = Operation::GetOrganization;
        let body = self.get(op, &self.organization_url(id), id)?;
        decode(op, &body)
    }

    fn update_organization(&self, id: &str, name: &str) -> Result<Organization> {
        let op = Operation::UpdateOrganization;
        let body = self.put(op, &self.organization_url(id), id, name)?;
        decode(op, &body)
    }

    fn delete_organization(&self, id: &str) -> Result<()> {
        self.delete(Operation::DeleteOrganization, &self.organization_url(id), id)
    }

    fn create_project(&self, org_id: &str, name: &str) -> Result<Project> {
        let op = Operation::CreateProject;
        let body = self.post(op, &self.projects_url(org_id), org_id, name)?;
        decode(op, &body)
    }

    fn get_project(&self, org_id: &str, id: &str) -> Result<Project> {
        let op = Operation::GetProject;
        let body = self.get(op, &self.project_url(org_id, id), id)?;
        decode(op, &body)
    }

    fn update_project(&self, org_id: &str, id: &str, name: &str) -> Result<Project> {
        let op = Operation::UpdateProject;
        let body = self.put(op, &self.project_url(org_id, id), id, name)?;
        decode(op, &body)
    }

    fn delete_project(&self, org_id: &str, id: &str) -> Result<()> {
        self.delete(Operation::DeleteProject, &self.project_url(org_id, id), id)
    }
}
