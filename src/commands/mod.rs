//! Command implementations
//!
//! - `schema` - introspection (`resources`, `schema`)
//! - `phase` - one lifecycle phase per invocation (`create`, `read`,
//!   `update`, `delete`, `import`)

pub mod phase;
pub mod schema;

use anyhow::Result;
use serde_json::Value;

use crate::Context;
use crate::config::ProviderSettings;
use crate::provider::{ConfiguredProvider, LangfuseProvider};

/// Layer flags over the config file and configure the provider
pub fn configure(ctx: &Context) -> Result<ConfiguredProvider> {
    let file = ProviderSettings::load(ctx.config.as_deref())?;
    let settings = ctx.settings.clone().overlay(file);
    Ok(LangfuseProvider::configure(settings)?)
}

/// Print a record as JSON, masking sensitive attributes unless asked not to
pub fn emit(ctx: &Context, resource_type: &str, record: &Value) -> Result<()> {
    println!("{}", render(resource_type, record, ctx.show_sensitive)?);
    Ok(())
}

/// Pretty JSON for a record; sensitive attributes are masked unless `reveal`
pub fn render(resource_type: &str, record: &Value, reveal: bool) -> Result<String> {
    let shown = if reveal {
        record.clone()
    } else {
        LangfuseProvider::resource_schemas()
            .get(resource_type)
            .map_or_else(|| record.clone(), |schema| schema.redact(record))
    };
    Ok(serde_json::to_string_pretty(&shown)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::REDACTED;
    use serde_json::json;

    #[test]
    fn test_render_masks_secret() {
        let record = json!({"id": "proj-1", "secret_key": "sk-lf-1"});

        let masked = render("langfuse_project", &record, false).unwrap();
        assert!(masked.contains(REDACTED));
        assert!(!masked.contains("sk-lf-1"));

        let revealed = render("langfuse_project", &record, true).unwrap();
        assert!(revealed.contains("sk-lf-1"));
    }
}
