//! Langfuse organization resource

use declarative::{Attribute, Error, Resource, Result, Schema};
use langfuse_client::AdminApi;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{api_error, required};

pub const TYPE_NAME: &str = "langfuse_organization";

/// Stored record for a `langfuse_organization`
///
/// `id` is only absent in a plan for a new organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Reconciles organizations against the Admin API
pub struct OrganizationResource {
    api: Arc<dyn AdminApi>,
}

impl OrganizationResource {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Schema, available without a configured client
    pub fn resource_schema() -> Schema {
        Schema::new("Resource for managing Langfuse organizations.")
            .with_attribute("id", Attribute::computed("ID of the organization."))
            .with_attribute("name", Attribute::required("Name of the organization."))
    }
}

impl Resource for OrganizationResource {
    type Model = OrganizationModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    fn create(&self, plan: OrganizationModel) -> Result<OrganizationModel> {
        let name = required(&plan.name, "name")?;

        let org = self.api.create_organization(name).map_err(api_error)?;
        log::info!("Created organization {}", org.id);

        // Server-normalized values win over the plan
        Ok(OrganizationModel {
            id: Some(org.id),
            name: Some(org.name),
        })
    }

    fn read(&self, state: OrganizationModel) -> Result<OrganizationModel> {
        let id = required(&state.id, "id")?;

        let org = self.api.get_organization(id).map_err(api_error)?;

        Ok(OrganizationModel {
            name: Some(org.name),
            ..state
        })
    }

    fn update(&self, prior: OrganizationModel, plan: OrganizationModel) -> Result<OrganizationModel> {
        let id = required(&prior.id, "id")?;
        let name = required(&plan.name, "name")?;

        self.api.update_organization(id, name).map_err(api_error)?;
        log::info!("Renamed organization {id}");

        Ok(OrganizationModel {
            id: prior.id,
            name: plan.name,
        })
    }

    fn delete(&self, state: OrganizationModel) -> Result<()> {
        let id = required(&state.id, "id")?;

        self.api.delete_organization(id).map_err(api_error)?;
        log::info!("Deleted organization {id}");
        Ok(())
    }

    fn import(&self, id: &str) -> Result<OrganizationModel> {
        if id.is_empty() || id.trim() != id || id.contains('/') {
            return Err(Error::validation(
                "import identifier",
                format!("expected an organization id (e.g. \"org123\"), got \"{id}\""),
            ));
        }

        Ok(OrganizationModel {
            id: Some(id.to_string()),
            name: None,
        })
    }
}
