use serde::Serialize;

use common::property::round_to_cents;

use crate::error::AppError;

/// Maximum accepted image upload size (5 MB), matching the original limit.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image file extracted from a multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Text fields and optional image parsed from a property multipart form.
///
/// Absent fields stay `None`; the update path treats that as "leave
/// unchanged".
#[derive(Debug, Default)]
pub struct PropertyForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Validated field set for creating a record.
#[derive(Debug)]
pub struct CreateProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
}

/// Validated partial field set for updating a record.
#[derive(Debug, Default)]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
}

/// Confirmation body returned by the delete endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Property deleted successfully")]
    pub message: String,
}

impl PropertyForm {
    /// Validate the form as a create payload: every field is required.
    pub fn into_create(self) -> Result<(CreateProperty, Option<ImageUpload>), AppError> {
        let PropertyForm {
            title,
            description,
            price,
            location,
            image,
        } = self;

        let title = require_trimmed(title, "title")?;
        let description = require_non_empty(description, "description")?;
        let location = require_trimmed(location, "location")?;
        let price =
            price.ok_or_else(|| AppError::Validation("Field 'price' is required".into()))?;
        let price = parse_price(&price)?;

        Ok((
            CreateProperty {
                title,
                description,
                price,
                location,
            },
            image,
        ))
    }

    /// Validate the form as an update payload: every field is optional, but
    /// a field that is present must still satisfy its constraint.
    pub fn into_update(self) -> Result<(UpdateProperty, Option<ImageUpload>), AppError> {
        let PropertyForm {
            title,
            description,
            price,
            location,
            image,
        } = self;

        let update = UpdateProperty {
            title: title.map(|t| non_empty_trimmed(t, "title")).transpose()?,
            description: description
                .map(|d| non_empty(d, "description"))
                .transpose()?,
            price: price.map(|p| parse_price(&p)).transpose()?,
            location: location
                .map(|l| non_empty_trimmed(l, "location"))
                .transpose()?,
        };

        Ok((update, image))
    }
}

/// Parse, bound-check and round a raw price input.
pub fn parse_price(raw: &str) -> Result<f64, AppError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Price must be a number".into()))?;
    if !price.is_finite() {
        return Err(AppError::Validation("Price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }
    Ok(round_to_cents(price))
}

fn require_trimmed(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value =
        value.ok_or_else(|| AppError::Validation(format!("Field '{field}' is required")))?;
    non_empty_trimmed(value, field)
}

fn require_non_empty(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value =
        value.ok_or_else(|| AppError::Validation(format!("Field '{field}' is required")))?;
    non_empty(value, field)
}

fn non_empty_trimmed(value: String, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!(
            "Field '{field}' must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: String, field: &str) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Field '{field}' must not be empty"
        )));
    }
    Ok(value)
}
