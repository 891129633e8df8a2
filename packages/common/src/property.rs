use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single listing's stored data, as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Opaque store-assigned identifier, stable for the record's lifetime.
    #[schema(example = "665f1e9b2c8f4a0012345678")]
    pub id: String,
    #[schema(example = "Modern Craftsman Home")]
    pub title: String,
    pub description: String,
    /// Listing price, always rounded to cents.
    #[schema(example = 325000.0)]
    pub price: f64,
    #[schema(example = "Austin, TX")]
    pub location: String,
    /// Hosted image URL, or the empty string when no image was supplied.
    #[serde(default)]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Round a price to two decimal places, the form in which it is persisted.
pub fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
