use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use common::property::Property;

use super::{NewProperty, PropertyStore, StoreError};

/// Document shape for the `properties` collection.
#[derive(Debug, Serialize, Deserialize)]
struct PropertyDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    description: String,
    price: f64,
    location: String,
    #[serde(rename = "imageUrl", default)]
    image_url: String,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    created_at: DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    updated_at: DateTime<Utc>,
}

impl PropertyDocument {
    fn into_property(self) -> Property {
        Property {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_property(id: ObjectId, property: &Property) -> Self {
        Self {
            id: Some(id),
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price,
            location: property.location.clone(),
            image_url: property.image_url.clone(),
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

/// MongoDB-backed property store.
pub struct MongoStore {
    collection: Collection<PropertyDocument>,
}

impl MongoStore {
    /// Connect to the deployment and verify it is reachable.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await.map_err(to_store_err)?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(to_store_err)?;

        Ok(Self {
            collection: db.collection("properties"),
        })
    }
}

fn to_store_err(err: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl PropertyStore for MongoStore {
    async fn find_all_sorted(&self) -> Result<Vec<Property>, StoreError> {
        let documents: Vec<PropertyDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(to_store_err)?
            .try_collect()
            .await
            .map_err(to_store_err)?;

        Ok(documents
            .into_iter()
            .map(PropertyDocument::into_property)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(to_store_err)?;

        Ok(document.map(PropertyDocument::into_property))
    }

    async fn insert(&self, new: NewProperty) -> Result<Property, StoreError> {
        let mut document = PropertyDocument {
            id: None,
            title: new.title,
            description: new.description,
            price: new.price,
            location: new.location,
            image_url: new.image_url,
            created_at: new.created_at,
            updated_at: new.updated_at,
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(to_store_err)?;
        document.id = result.inserted_id.as_object_id();

        Ok(document.into_property())
    }

    async fn save(&self, property: &Property) -> Result<(), StoreError> {
        let oid = ObjectId::parse_str(&property.id).map_err(|_| {
            StoreError::Unavailable(format!("malformed record id '{}'", property.id))
        })?;

        let document = PropertyDocument::from_property(oid, property);
        self.collection
            .replace_one(doc! { "_id": oid }, &document)
            .await
            .map_err(to_store_err)?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(to_store_err)?;

        Ok(result.deleted_count > 0)
    }
}
