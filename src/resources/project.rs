//! Langfuse project resource
//!
//! Projects live inside an organization and carry an API key pair. The
//! secret key is only ever returned by the create call, so it is captured
//! there and carried forward by every later phase.

use declarative::{Attribute, Error, REDACTED, Resource, Result, Schema, WriteOnce};
use langfuse_client::AdminApi;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{api_error, required};

pub const TYPE_NAME: &str = "langfuse_project";

/// Stored record for a `langfuse_project`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub secret_key: WriteOnce<String>,
}

/// Split `"<organizationId>/<projectId>"` into its two halves
pub fn parse_import_id(id: &str) -> Result<(&str, &str)> {
    match id.split_once('/') {
        Some((org_id, project_id))
            if !org_id.is_empty() && !project_id.is_empty() && !project_id.contains('/') =>
        {
            Ok((org_id, project_id))
        }
        _ => Err(Error::validation(
            "import identifier",
            format!("expected \"<organizationId>/<projectId>\", got \"{id}\""),
        )),
    }
}

/// Reconciles projects against the Admin API
pub struct ProjectResource {
    api: Arc<dyn AdminApi>,
}

impl ProjectResource {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    pub fn resource_schema() -> Schema {
        Schema::new("Resource for managing Langfuse projects and their API keys.")
            .with_attribute("id", Attribute::computed("ID of the project."))
            .with_attribute("name", Attribute::required("Name of the project."))
            .with_attribute(
                "organization_id",
                Attribute::required("ID of the organization owning the project.")
                    .requires_replace(),
            )
            .with_attribute(
                "public_key",
                Attribute::computed("Public API key of the project.").sensitive(),
            )
            .with_attribute(
                "secret_key",
                Attribute::computed("Secret API key of the project. Only returned at creation.")
                    .sensitive()
                    .write_once(),
            )
    }
}

impl Resource for ProjectResource {
    type Model = ProjectModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    fn create(&self, plan: ProjectModel) -> Result<ProjectModel> {
        let org_id = required(&plan.organization_id, "organization_id")?;
        let name = required(&plan.name, "name")?;

        let project = self.api.create_project(org_id, name).map_err(api_error)?;

        let Some(secret_key) = project.secret_key.filter(|key| !key.is_empty()) else {
            return Err(Error::decode(
                "create project",
                "response did not include a secret key",
            ));
        };
        log::info!("Created project {} in organization {org_id}", project.id);

        Ok(ProjectModel {
            id: Some(project.id),
            name: Some(project.name),
            organization_id: Some(project.organization_id),
            public_key: project.public_key,
            secret_key: WriteOnce::new(secret_key),
        })
    }

    fn read(&self, state: ProjectModel) -> Result<ProjectModel> {
        let org_id = required(&state.organization_id, "organization_id")?;
        let id = required(&state.id, "id")?;

        let project = self.api.get_project(org_id, id).map_err(api_error)?;

        Ok(ProjectModel {
            name: Some(project.name),
            public_key: project.public_key.or(state.public_key),
            ..state
        })
    }

    fn update(&self, prior: ProjectModel, plan: ProjectModel) -> Result<ProjectModel> {
        let org_id = required(&prior.organization_id, "organization_id")?;
        let id = required(&prior.id, "id")?;
        let name = required(&plan.name, "name")?;

        if let Some(planned) = plan.organization_id.as_deref()
            && planned != org_id
        {
            return Err(Error::validation(
                "organization_id",
                format!("cannot move project {id} from {org_id} to {planned}; it must be replaced"),
            ));
        }

        self.api.update_project(org_id, id, name).map_err(api_error)?;
        log::info!("Renamed project {id}");

        // Keys are computed; a plan may only fill a secret that was never captured
        let mut secret_key = prior.secret_key;
        if let Some(planned) = plan.secret_key.into_inner()
            && planned != REDACTED
            && !secret_key.capture(planned)
        {
            log::debug!("Ignoring planned secret_key for project {id}; keeping the captured one");
        }

        Ok(ProjectModel {
            id: prior.id,
            name: plan.name,
            organization_id: prior.organization_id,
            public_key: prior.public_key,
            secret_key,
        })
    }

    fn delete(&self, state: ProjectModel) -> Result<()> {
        let org_id = required(&state.organization_id, "organization_id")?;
        let id = required(&state.id, "id")?;

        self.api.delete_project(org_id, id).map_err(api_error)?;
        log::info!("Deleted project {id}");
        Ok(())
    }

    fn import(&self, id: &str) -> Result<ProjectModel> {
        let (org_id, project_id) = parse_import_id(id)?;

        Ok(ProjectModel {
            id: Some(project_id.to_string()),
            organization_id: Some(org_id.to_string()),
            ..ProjectModel::default()
        })
    }
}
