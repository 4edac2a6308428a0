//! Resource trait for declarative state reconciliation
//!
//! A Resource translates between a desired-state record and a remote CRUD
//! API. The host invokes one lifecycle phase at a time and stores whatever
//! record the phase returns.

use crate::error::{Error, Result};
use crate::schema::Schema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Core trait for reconciled resources
///
/// Every resource kind implements this trait, which provides:
/// - Identity (type name, schema)
/// - The four lifecycle phases (create, read, update, delete)
/// - Import of existing remote entities
///
/// Dependencies such as API clients are injected when the resource is
/// constructed; there is no separate configure step.
///
/// # Example
///
/// ```ignore
/// use declarative::{Resource, Result, Schema, Attribute};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Bucket { id: Option<String>, name: String }
///
/// struct BucketResource { api: Arc<dyn BucketApi> }
///
/// impl Resource for BucketResource {
///     type Model = Bucket;
///
///     fn type_name(&self) -> &'static str { "bucket" }
///
///     fn schema(&self) -> Schema {
///         Schema::new("A storage bucket")
///             .with_attribute("id", Attribute::computed("Bucket ID"))
///             .with_attribute("name", Attribute::required("Bucket name"))
///     }
///
///     fn create(&self, plan: Bucket) -> Result<Bucket> {
///         let remote = self.api.create(&plan.name)?;
///         Ok(Bucket { id: Some(remote.id), name: remote.name })
///     }
///
///     // read, update, delete, import ...
/// }
/// ```
pub trait Resource: Send + Sync {
    /// The stored record for one instance of this resource
    type Model: Serialize + DeserializeOwned + Send;

    /// Type name the host uses to address this resource, e.g. "langfuse_project"
    fn type_name(&self) -> &'static str;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Create the remote entity
    ///
    /// The returned record must be built from the remote response so that
    /// server-assigned and server-normalized values are captured. On error
    /// nothing is stored.
    fn create(&self, plan: Self::Model) -> Result<Self::Model>;

    /// Refresh a stored record from the remote entity
    fn read(&self, state: Self::Model) -> Result<Self::Model>;

    /// Apply a new plan to an existing entity
    fn update(&self, prior: Self::Model, plan: Self::Model) -> Result<Self::Model>;

    /// Remove the remote entity
    ///
    /// On success the host discards the stored record.
    fn delete(&self, state: Self::Model) -> Result<()>;

    /// Seed a record from an external identifier
    ///
    /// Only identifying fields are filled; the following read completes it.
    fn import(&self, id: &str) -> Result<Self::Model>;
}

/// Record-level view of a [`Resource`]
///
/// The host deals in untyped JSON records. This trait is object safe so
/// resources of different kinds can live in one registry.
pub trait ErasedResource: Send + Sync {
    /// Type name of the underlying resource
    fn type_name(&self) -> &'static str;

    /// Schema of the underlying resource
    fn schema(&self) -> Schema;

    /// Create from a plan record
    fn create(&self, plan: Value) -> Result<Value>;

    /// Read from a state record
    fn read(&self, state: Value) -> Result<Value>;

    /// Update from prior and planned records
    fn update(&self, prior: Value, plan: Value) -> Result<Value>;

    /// Delete using a state record
    fn delete(&self, state: Value) -> Result<()>;

    /// Import by external identifier
    fn import(&self, id: &str) -> Result<Value>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn ErasedResource>;

/// Adapter that exposes a typed [`Resource`] as an [`ErasedResource`]
struct Erased<R>(R);

impl<R: Resource> Erased<R> {
    fn decode(&self, record: Value) -> Result<R::Model> {
        serde_json::from_value(record).map_err(|e| Error::record(self.0.type_name(), e))
    }

    fn encode(&self, model: &R::Model) -> Result<Value> {
        serde_json::to_value(model).map_err(|e| Error::record(self.0.type_name(), e))
    }
}

impl<R: Resource> ErasedResource for Erased<R> {
    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    fn schema(&self) -> Schema {
        self.0.schema()
    }

    fn create(&self, plan: Value) -> Result<Value> {
        let plan = self.decode(plan)?;
        let state = self.0.create(plan)?;
        self.encode(&state)
    }

    fn read(&self, state: Value) -> Result<Value> {
        let state = self.decode(state)?;
        let state = self.0.read(state)?;
        self.encode(&state)
    }

    fn update(&self, prior: Value, plan: Value) -> Result<Value> {
        let prior = self.decode(prior)?;
        let plan = self.decode(plan)?;
        let state = self.0.update(prior, plan)?;
        self.encode(&state)
    }

    fn delete(&self, state: Value) -> Result<()> {
        let state = self.decode(state)?;
        self.0.delete(state)
    }

    fn import(&self, id: &str) -> Result<Value> {
        let state = self.0.import(id)?;
        self.encode(&state)
    }
}

/// Box a typed resource for storage in a registry
pub fn boxed<R: Resource + 'static>(resource: R) -> BoxedResource {
    Box::new(Erased(resource))
}
