use anyhow::Result;
use serde_json::json;

use crate::Context;
use crate::provider::LangfuseProvider;
use crate::ui;

/// `resources` - list resource type names
pub fn resources(ctx: &Context) -> Result<()> {
    let schemas = LangfuseProvider::resource_schemas();
    for name in schemas.keys() {
        println!("{name}");
    }

    if !ctx.quiet {
        let metadata = LangfuseProvider::metadata();
        ui::dim(&format!(
            "{} resource types (provider {} v{})",
            schemas.len(),
            metadata.type_name,
            metadata.version
        ));
    }
    Ok(())
}

/// `schema [TYPE]` - print the provider or a resource schema
pub fn show(resource_type: Option<&str>) -> Result<()> {
    let value = match resource_type {
        None => json!({
            "provider": LangfuseProvider::metadata(),
            "schema": LangfuseProvider::schema(),
        }),
        Some(name) => {
            let schemas = LangfuseProvider::resource_schemas();
            let schema = schemas
                .get(name)
                .ok_or_else(|| declarative::Error::UnknownResourceType(name.to_string()))?;
            json!({
                "type": name,
                "schema": schema,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
