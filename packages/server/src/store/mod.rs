mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::property::Property;

/// Errors surfaced by the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The persistence layer could not be reached or rejected the operation.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Field values for a record about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence backend for property records.
///
/// Malformed ids behave exactly like unknown ids: lookups return `Ok(None)`
/// and deletes return `Ok(false)`.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All records, newest `created_at` first.
    async fn find_all_sorted(&self) -> Result<Vec<Property>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError>;

    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, new: NewProperty) -> Result<Property, StoreError>;

    /// Persist the full state of an existing record, matched by id.
    async fn save(&self, property: &Property) -> Result<(), StoreError>;

    /// Remove a record permanently. Returns `false` if the id did not resolve.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
