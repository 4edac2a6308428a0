//! Core types for declarative resource reconciliation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle phase the host can invoke on a resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Create the remote entity from a desired plan
    Create,
    /// Refresh the stored record from the remote entity
    Read,
    /// Converge the remote entity to a new plan
    Update,
    /// Remove the remote entity
    Delete,
    /// Seed a record from an external identifier
    Import,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
        };
        write!(f, "{name}")
    }
}

/// A field that is captured once and preserved afterwards
///
/// Used for server-issued values (like API secrets) that are returned only
/// when an entity is created. Once captured, nothing replaces it: reads
/// carry it over and [`capture`](Self::capture) refuses a second value.
///
/// Serializes as the inner value, or `null` when unset. `Debug` never
/// prints the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteOnce<T>(Option<T>);

impl<T> WriteOnce<T> {
    /// An unset value
    pub const fn unset() -> Self {
        Self(None)
    }

    /// A value that has already been captured
    pub const fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// The captured value, if any
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Whether a value has been captured
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Capture `value` unless one is already held
    ///
    /// Returns `true` if the value was stored.
    pub fn capture(&mut self, value: T) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(value);
        true
    }

    /// Consume and return the inner value
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T> fmt::Debug for WriteOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            write!(f, "WriteOnce(<set>)")
        } else {
            write!(f, "WriteOnce(<unset>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_only_once() {
        let mut secret = WriteOnce::unset();
        assert!(secret.capture("first".to_string()));
        assert!(!secret.capture("second".to_string()));
        assert_eq!(secret.get().map(String::as_str), Some("first"));
    }

    #[test]
    fn test_serializes_transparently() {
        let set = WriteOnce::new("sk-lf-1".to_string());
        assert_eq!(serde_json::to_value(&set).unwrap(), serde_json::json!("sk-lf-1"));

        let unset: WriteOnce<String> = WriteOnce::unset();
        assert_eq!(serde_json::to_value(&unset).unwrap(), serde_json::Value::Null);

        let parsed: WriteOnce<String> = serde_json::from_str("null").unwrap();
        assert!(!parsed.is_set());
    }

    #[test]
    fn test_debug_hides_value() {
        let secret = WriteOnce::new("sk-lf-very-secret".to_string());
        let debug = format!("{secret:?}");
        assert!(!debug.contains("very-secret"));
        assert_eq!(debug, "WriteOnce(<set>)");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Create.to_string(), "create");
        assert_eq!(Phase::Import.to_string(), "import");
    }
}
