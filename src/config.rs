use anyhow::{Context, Result, bail};
use declarative::Error;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Base URL used when neither flag, environment nor config file sets one
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("langfuse-provider"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Settings
// ============================================================================

/// Partially-specified provider settings from one source
///
/// Sources are layered with [`overlay`](Self::overlay): flags and
/// environment first, then the config file.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    pub admin_api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderSettings {
    /// Fill every unset field from `fallback`
    pub fn overlay(self, fallback: Self) -> Self {
        Self {
            admin_api_key: self.admin_api_key.or(fallback.admin_api_key),
            base_url: self.base_url.or(fallback.base_url),
        }
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the config file layer
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::from_file(path);
        }

        let path = default_config_path()?;
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        log::debug!("Loading config from {}", path.display());
        Self::from_file(&path)
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Resolved config
// ============================================================================

/// Fully resolved provider configuration
///
/// Built once by configure and shared read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub admin_api_key: String,
}

impl ProviderConfig {
    /// Apply defaults and validate
    pub fn resolve(settings: ProviderSettings) -> declarative::Result<Self> {
        let admin_api_key = match settings.admin_api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(Error::configuration(
                    "admin_api_key is required (set --admin-api-key, LANGFUSE_ADMIN_API_KEY or the config file)",
                ));
            }
        };

        let base_url = match settings.base_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "base_url must start with http:// or https://, got \"{base_url}\""
            )));
        }

        Ok(Self {
            base_url,
            admin_api_key,
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("admin_api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::ErrorKind;
    use tempfile::TempDir;

    fn settings(key: Option<&str>, url: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            admin_api_key: key.map(str::to_string),
            base_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_defaults_base_url() {
        let config = ProviderConfig::resolve(settings(Some("admin-key"), None)).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.admin_api_key, "admin-key");
    }

    #[test]
    fn test_resolve_requires_key() {
        for key in [None, Some(""), Some("   ")] {
            let err = ProviderConfig::resolve(settings(key, None)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_resolve_rejects_bad_scheme() {
        let err =
            ProviderConfig::resolve(settings(Some("k"), Some("langfuse.example.com"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("http://"));

        let ok = ProviderConfig::resolve(settings(Some("k"), Some("https://cloud.langfuse.com")));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_overlay_prefers_self() {
        let flags = settings(None, Some("https://flag.example"));
        let file = settings(Some("file-key"), Some("https://file.example"));

        let merged = flags.overlay(file);
        assert_eq!(merged.admin_api_key.as_deref(), Some("file-key"));
        assert_eq!(merged.base_url.as_deref(), Some("https://flag.example"));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ProviderConfig::resolve(settings(Some("super-secret"), None)).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
        assert!(!format!("{:?}", settings(Some("super-secret"), None)).contains("super-secret"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "admin_api_key = \"from-file\"\nbase_url = \"https://langfuse.internal\"\n",
        )
        .unwrap();

        let loaded = ProviderSettings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings(Some("from-file"), Some("https://langfuse.internal")));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = ProviderSettings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "admin_key = \"typo\"\n").unwrap();

        assert!(ProviderSettings::from_file(&path).is_err());
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path().unwrap();
        assert!(path.ends_with(".config/langfuse-provider/config.toml"));
    }
}
