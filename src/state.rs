use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

// ============================================================================
// State Structures
// ============================================================================

/// On-disk record of one resource instance
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredState {
    /// Resource type the record belongs to
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Full record, sensitive attributes included
    pub record: Value,
}

/// A state file holding a single [`StoredState`]
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Fail if the file already exists
    pub fn ensure_absent(&self) -> Result<()> {
        if self.exists() {
            bail!(
                "State file already exists: {} (delete it or choose another path)",
                self.path.display()
            );
        }
        Ok(())
    }

    /// Fail unless a new state file can be written here
    ///
    /// Checked before a remote create so a secret returned only once is not
    /// lost to an unwritable path.
    pub fn ensure_writable(&self) -> Result<()> {
        self.ensure_absent()?;
        self.create_parent()?;

        let scratch = self.tmp_path();
        write_private(&scratch, b"")?;
        fs::remove_file(&scratch)
            .with_context(|| format!("Failed to remove {}", scratch.display()))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn create_parent(&self) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Load the record, checking it belongs to `resource_type`
    pub fn load(&self, resource_type: &str) -> Result<Value> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;

        let state: StoredState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;

        if state.resource_type != resource_type {
            bail!(
                "State file {} holds a {} record, not {resource_type}",
                self.path.display(),
                state.resource_type
            );
        }

        log::debug!("Loaded state from {}", self.path.display());
        Ok(state.record)
    }

    /// Write the record atomically
    ///
    /// The file is only readable by the owner since it holds secrets.
    pub fn save(&self, resource_type: &str, record: &Value) -> Result<()> {
        self.create_parent()?;

        let state = StoredState {
            resource_type: resource_type.to_string(),
            record: record.clone(),
        };
        let mut content =
            serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
        content.push('\n');

        let tmp = self.tmp_path();
        write_private(&tmp, content.as_bytes())?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        log::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    /// Delete the file
    pub fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove state file: {}", self.path.display()))?;
        log::debug!("Removed state file {}", self.path.display());
        Ok(())
    }
}

/// Create `path` readable by the owner only, then write `content`
///
/// A leftover file is removed first so the mode applies to a fresh file.
fn write_private(path: &Path, content: &[u8]) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove stale {}", path.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read a JSON plan from a file, or from stdin when `source` is `-`
pub fn read_input(source: &str) -> Result<Value> {
    let content = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read plan from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read plan: {source}"))?
    };

    parse_plan(&content).with_context(|| format!("Invalid plan: {source}"))
}

fn parse_plan(content: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        bail!("expected a JSON object");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("org.json"));
        let record = json!({"id": "org-1", "name": "acme"});

        file.save("langfuse_organization", &record).unwrap();
        assert!(file.exists());
        assert_eq!(file.load("langfuse_organization").unwrap(), record);
        assert!(!dir.path().join("org.tmp").exists());
    }

    #[test]
    fn test_load_wrong_type() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("org.json"));
        file.save("langfuse_organization", &json!({"id": "org-1"}))
            .unwrap();

        let err = file.load("langfuse_project").unwrap_err();
        assert!(err.to_string().contains("langfuse_organization"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("nested").join("state.json"));
        file.save("langfuse_project", &json!({})).unwrap();
        assert!(file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("project.json"));
        file.save("langfuse_project", &json!({"secret_key": "sk-lf-1"}))
            .unwrap();

        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_replaces_loose_tmp_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("project.json"));
        let tmp = dir.path().join("project.tmp");
        fs::write(&tmp, "stale").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        file.save("langfuse_project", &json!({"secret_key": "sk-lf-1"}))
            .unwrap();

        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!tmp.exists());
    }

    #[test]
    fn test_ensure_writable() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("nested").join("org.json"));

        file.ensure_writable().unwrap();
        assert!(!file.exists());
        assert!(!dir.path().join("nested").join("org.tmp").exists());
    }

    #[test]
    fn test_ensure_writable_fails_under_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let file = StateFile::new(blocker.join("org.json"));
        assert!(file.ensure_writable().is_err());
        assert!(file.save("langfuse_organization", &json!({})).is_err());
    }

    #[test]
    fn test_ensure_absent() {
        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("org.json"));
        file.ensure_absent().unwrap();

        file.save("langfuse_organization", &json!({})).unwrap();
        assert!(file.ensure_absent().is_err());

        file.remove().unwrap();
        file.ensure_absent().unwrap();
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, r#"{"name": "acme"}"#).unwrap();

        let plan = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(plan, json!({"name": "acme"}));
    }

    #[test]
    fn test_parse_plan_requires_object() {
        assert!(parse_plan("[1, 2]").is_err());
        assert!(parse_plan("not json").is_err());
        assert!(parse_plan("{}").is_ok());
    }
}
