use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;

use common::property::Property;

use super::{NewProperty, PropertyStore, StoreError};

/// In-memory property store for integration tests and local development
/// without a running database. Ids are ObjectId hex strings, matching the
/// production store.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Property>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn find_all_sorted(&self) -> Result<Vec<Property>, StoreError> {
        let records = self.lock()?;
        let mut all = records.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let records = self.lock()?;
        Ok(records.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, new: NewProperty) -> Result<Property, StoreError> {
        let property = Property {
            id: ObjectId::new().to_hex(),
            title: new.title,
            description: new.description,
            price: new.price,
            location: new.location,
            image_url: new.image_url,
            created_at: new.created_at,
            updated_at: new.updated_at,
        };

        let mut records = self.lock()?;
        records.push(property.clone());
        Ok(property)
    }

    async fn save(&self, property: &Property) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        if let Some(existing) = records.iter_mut().find(|p| p.id == property.id) {
            *existing = property.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() < before)
    }
}
