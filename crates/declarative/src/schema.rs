//! Attribute schemas for providers and resources
//!
//! A schema tells the host which attributes an operator sets, which are
//! computed remotely, which must never be displayed, and how each one may
//! change over the entity's lifetime. All attributes are strings.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Placeholder shown instead of sensitive values
pub const REDACTED: &str = "(sensitive value)";

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Must be set by the operator
    Required,
    /// May be set by the operator
    Optional,
    /// Set by the remote side
    Computed,
}

/// How an attribute may change once the entity exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Can be changed in place by an update
    Mutable,
    /// Changing it means a different entity
    RequiresReplace,
    /// Captured once at creation, preserved by reads
    WriteOnce,
}

/// A single attribute in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub description: String,
    pub presence: Presence,
    pub sensitive: bool,
    pub lifecycle: Lifecycle,
}

impl Attribute {
    fn new(presence: Presence, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            presence,
            sensitive: false,
            lifecycle: Lifecycle::Mutable,
        }
    }

    /// An attribute the operator must set
    pub fn required(description: impl Into<String>) -> Self {
        Self::new(Presence::Required, description)
    }

    /// An attribute the operator may set
    pub fn optional(description: impl Into<String>) -> Self {
        Self::new(Presence::Optional, description)
    }

    /// An attribute assigned by the remote side
    pub fn computed(description: impl Into<String>) -> Self {
        Self::new(Presence::Computed, description)
    }

    /// Mark the value as sensitive
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Changing the value requires replacing the entity
    pub fn requires_replace(mut self) -> Self {
        self.lifecycle = Lifecycle::RequiresReplace;
        self
    }

    /// The value is captured once and preserved by reads
    pub fn write_once(mut self) -> Self {
        self.lifecycle = Lifecycle::WriteOnce;
        self
    }
}

/// Schema of a provider configuration block or a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of sensitive attributes
    pub fn sensitive_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.sensitive)
            .map(|(name, _)| name.as_str())
    }

    /// Copy of `record` with every set sensitive attribute masked
    ///
    /// Null values stay null so an operator can still see that a key was
    /// never captured.
    pub fn redact(&self, record: &Value) -> Value {
        let mut redacted = record.clone();
        if let Some(object) = redacted.as_object_mut() {
            for name in self.sensitive_attributes() {
                if let Some(value) = object.get_mut(name)
                    && !value.is_null()
                {
                    *value = Value::String(REDACTED.to_string());
                }
            }
        }
        redacted
    }
}
