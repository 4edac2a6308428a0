//! Lifecycle phase commands
//!
//! Each command runs exactly one phase (import also refreshes) and only
//! touches the state file after the phase succeeded.

use anyhow::{Context as _, Result};
use declarative::{PhaseOutcome, PhaseRequest};
use serde_json::Value;

use super::{configure, emit, render};
use crate::Context;
use crate::cli::{CreateArgs, ImportArgs, StateArgs, UpdateArgs};
use crate::provider::ConfiguredProvider;
use crate::state::{StateFile, read_input};
use crate::ui;

/// The record a storing phase returned
fn stored(outcome: PhaseOutcome) -> Result<Value> {
    match outcome {
        PhaseOutcome::Stored(record) => Ok(record),
        PhaseOutcome::Removed => anyhow::bail!("phase returned no record"),
    }
}

/// `create TYPE --plan FILE [--state FILE]`
pub fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let state = args.state.map(StateFile::new);
    if let Some(file) = &state {
        file.ensure_writable()?;
    }

    let plan = read_input(&args.plan)?;
    let provider = configure(ctx)?;
    let record = stored(provider.run(&args.resource_type, PhaseRequest::Create { plan })?)?;

    finish_new(ctx, &args.resource_type, &record, state.as_ref())
}

/// `read TYPE --state FILE`
pub fn read(ctx: &Context, args: StateArgs) -> Result<()> {
    let file = StateFile::new(args.state);
    let state = file.load(&args.resource_type)?;

    let provider = configure(ctx)?;
    let record = stored(provider.run(&args.resource_type, PhaseRequest::Read { state })?)?;

    file.save(&args.resource_type, &record)?;
    emit(ctx, &args.resource_type, &record)
}

/// `update TYPE --state FILE --plan FILE`
pub fn update(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let file = StateFile::new(args.state);
    let prior = file.load(&args.resource_type)?;
    let plan = read_input(&args.plan)?;

    let provider = configure(ctx)?;
    let record = stored(provider.run(&args.resource_type, PhaseRequest::Update { prior, plan })?)?;

    file.save(&args.resource_type, &record)?;
    if !ctx.quiet {
        ui::success(&format!("Updated {}", args.resource_type));
    }
    emit(ctx, &args.resource_type, &record)
}

/// `delete TYPE --state FILE`
pub fn delete(ctx: &Context, args: StateArgs) -> Result<()> {
    let file = StateFile::new(args.state);
    let state = file.load(&args.resource_type)?;

    let provider = configure(ctx)?;
    provider.run(&args.resource_type, PhaseRequest::Delete { state })?;

    file.remove()?;
    if !ctx.quiet {
        ui::success(&format!(
            "Deleted {} and removed {}",
            args.resource_type,
            file.path().display()
        ));
    }
    Ok(())
}

/// `import TYPE ID [--state FILE]`
pub fn import(ctx: &Context, args: ImportArgs) -> Result<()> {
    let state = args.state.map(StateFile::new);
    if let Some(file) = &state {
        file.ensure_writable()?;
    }

    let provider = configure(ctx)?;
    let record = import_and_refresh(&provider, &args.resource_type, args.id)?;

    finish_new(ctx, &args.resource_type, &record, state.as_ref())
}

/// Seed a record from `id`, then fill it from the remote entity
fn import_and_refresh(
    provider: &ConfiguredProvider,
    resource_type: &str,
    id: String,
) -> Result<Value> {
    let seeded = stored(provider.run(resource_type, PhaseRequest::Import { id })?)?;
    stored(provider.run(resource_type, PhaseRequest::Read { state: seeded })?)
}

/// Store and print a record for a new instance
fn finish_new(
    ctx: &Context,
    resource_type: &str,
    record: &Value,
    state: Option<&StateFile>,
) -> Result<()> {
    match state {
        Some(file) => {
            if let Err(err) = file.save(resource_type, record) {
                // The remote instance exists now and its secrets are not returned again
                println!("{}", render(resource_type, record, true)?);
                return Err(err).context(format!(
                    "{resource_type} was created but not saved; the full record is printed above"
                ));
            }
            if !ctx.quiet {
                ui::success(&format!("Saved state to {}", file.path().display()));
            }
        }
        None if !ctx.quiet => {
            ui::warn("No --state given; the record is not saved");
            if !ctx.show_sensitive {
                ui::dim("Secrets are masked below and cannot be retrieved again");
            }
        }
        None => {}
    }
    emit(ctx, resource_type, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettings;
    use langfuse_client::MockAdminApi;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_import_and_refresh_fills_name() {
        let mock = MockAdminApi::new();
        let org = langfuse_client::AdminApi::create_organization(&mock, "acme").unwrap();
        let provider = ConfiguredProvider::with_client(Arc::new(mock));

        let record = import_and_refresh(&provider, "langfuse_organization", org.id.clone()).unwrap();
        assert_eq!(record, json!({"id": org.id, "name": "acme"}));
    }

    #[test]
    fn test_import_rejects_bad_id() {
        let mock = MockAdminApi::new();
        let provider = ConfiguredProvider::with_client(Arc::new(mock.clone()));

        assert!(import_and_refresh(&provider, "langfuse_project", "org123".to_string()).is_err());
        assert!(mock.calls().is_empty());
    }

    fn quiet_context() -> Context {
        Context {
            verbose: 0,
            quiet: true,
            show_sensitive: false,
            config: None,
            settings: ProviderSettings::default(),
        }
    }

    #[test]
    fn test_finish_new_saves_record() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("org.json"));
        let record = json!({"id": "org-1", "name": "acme"});

        finish_new(&quiet_context(), "langfuse_organization", &record, Some(&file)).unwrap();
        assert_eq!(file.load("langfuse_organization").unwrap(), record);
    }

    #[test]
    fn test_finish_new_reports_unsaved_record() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let file = StateFile::new(blocker.join("project.json"));
        let record = json!({"id": "proj-1", "secret_key": "sk-lf-1"});

        let err = finish_new(&quiet_context(), "langfuse_project", &record, Some(&file)).unwrap_err();
        assert!(err.to_string().contains("printed above"));
        assert!(!file.exists());
    }

    #[test]
    fn test_stored_rejects_removed() {
        assert!(stored(PhaseOutcome::Removed).is_err());
        assert_eq!(stored(PhaseOutcome::Stored(json!({}))).unwrap(), json!({}));
    }
}
