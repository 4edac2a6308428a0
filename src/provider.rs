//! Provider root
//!
//! Describes the `langfuse` provider to the host and turns resolved
//! settings into a registry of reconcilers sharing one Admin API client.

use declarative::{
    Attribute, ErasedResource, PhaseOutcome, PhaseRequest, Registry, Result, Schema, run_phase,
};
use langfuse_client::{AdminApi, HttpClient};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderSettings};
use crate::resources::{OrganizationResource, ProjectResource, organization, project};

/// Type name the host addresses this provider by
pub const PROVIDER_TYPE: &str = "langfuse";

/// Provider identity reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: &'static str,
}

/// The unconfigured provider
pub struct LangfuseProvider;

impl LangfuseProvider {
    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Provider configuration schema
    pub fn schema() -> Schema {
        Schema::new("Manage Langfuse organizations and projects through the Admin API.")
            .with_attribute(
                "admin_api_key",
                Attribute::required("Admin API key used as the bearer credential.").sensitive(),
            )
            .with_attribute(
                "base_url",
                Attribute::optional("Base URL of the Langfuse instance. Defaults to http://localhost:3000."),
            )
    }

    /// Schemas of every resource kind, available before configuration
    pub fn resource_schemas() -> BTreeMap<&'static str, Schema> {
        BTreeMap::from([
            (organization::TYPE_NAME, OrganizationResource::resource_schema()),
            (project::TYPE_NAME, ProjectResource::resource_schema()),
        ])
    }

    /// Resolve settings and build the shared HTTP client
    pub fn configure(settings: ProviderSettings) -> Result<ConfiguredProvider> {
        let config = ProviderConfig::resolve(settings)?;
        log::debug!("Configuring provider for {}", config.base_url);

        let client = HttpClient::new(config.base_url.as_str(), &config.admin_api_key);
        Ok(ConfiguredProvider::with_client(Arc::new(client)))
    }
}

/// A configured provider: every resource kind wired to one client
pub struct ConfiguredProvider {
    registry: Registry,
}

impl ConfiguredProvider {
    /// Build the registry around an existing client
    pub fn with_client(api: Arc<dyn AdminApi>) -> Self {
        let registry = Registry::new()
            .with(OrganizationResource::new(Arc::clone(&api)))
            .with(ProjectResource::new(api));
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up a resource kind by type name
    pub fn resource(&self, type_name: &str) -> Result<&dyn ErasedResource> {
        self.registry().get(type_name)
    }

    /// Run one lifecycle phase on a resource kind
    pub fn run(&self, type_name: &str, request: PhaseRequest) -> Result<PhaseOutcome> {
        run_phase(self.resource(type_name)?, request)
    }
}
