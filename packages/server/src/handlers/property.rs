use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use common::property::Property;

use crate::error::AppError;
use crate::models::property::{DeleteResponse, ImageUpload, PropertyForm, MAX_IMAGE_BYTES};
use crate::state::AppState;
use crate::store::NewProperty;

/// Request body cap for the property form routes. Leaves headroom above the
/// per-image limit for the text fields and multipart framing.
pub fn property_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(8 * 1024 * 1024)
}

#[utoipa::path(
    get,
    path = "/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties, newest first", body = [Property]),
        (status = 500, description = "Store unavailable (STORE_UNAVAILABLE)", body = crate::error::ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, AppError> {
    let properties = state.store.find_all_sorted().await?;
    Ok(Json(properties))
}

#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Property id")),
    responses(
        (status = 200, description = "The requested property", body = Property),
        (status = 404, description = "No property with this id (NOT_FOUND)", body = crate::error::ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, AppError> {
    let property = find_property(&state, &id).await?;
    Ok(Json(property))
}

#[utoipa::path(
    post,
    path = "/properties",
    tag = "Properties",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "The created property", body = Property),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = crate::error::ErrorBody),
        (status = 500, description = "Upload or store failure (UPLOAD_ERROR, STORE_UNAVAILABLE)", body = crate::error::ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_property(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Property>), AppError> {
    let form = read_property_form(multipart).await?;
    let (fields, image) = form.into_create()?;

    // Upload before touching the store so a host failure leaves no record.
    let image_url = match image {
        Some(upload) => upload_image(&state, upload).await?,
        None => String::new(),
    };

    let now = Utc::now();
    let created = state
        .store
        .insert(NewProperty {
            title: fields.title,
            description: fields.description,
            price: fields.price,
            location: fields.location,
            image_url,
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(id = %created.id, "property created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Property id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "The updated property", body = Property),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = crate::error::ErrorBody),
        (status = 404, description = "No property with this id (NOT_FOUND)", body = crate::error::ErrorBody),
        (status = 500, description = "Upload or store failure (UPLOAD_ERROR, STORE_UNAVAILABLE)", body = crate::error::ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Property>, AppError> {
    let form = read_property_form(multipart).await?;
    let mut property = find_property(&state, &id).await?;
    let (update, image) = form.into_update()?;

    // Upload before mutating anything so a host failure leaves the record
    // untouched.
    let image_url = match image {
        Some(upload) => Some(upload_image(&state, upload).await?),
        None => None,
    };

    if let Some(title) = update.title {
        property.title = title;
    }
    if let Some(description) = update.description {
        property.description = description;
    }
    if let Some(price) = update.price {
        property.price = price;
    }
    if let Some(location) = update.location {
        property.location = location;
    }
    if let Some(url) = image_url {
        property.image_url = url;
    }
    property.updated_at = Utc::now();

    state.store.save(&property).await?;

    tracing::info!(id = %property.id, "property updated");
    Ok(Json(property))
}

#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Property id")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteResponse),
        (status = 404, description = "No property with this id (NOT_FOUND)", body = crate::error::ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.store.delete_by_id(&id).await?;
    if !removed {
        return Err(AppError::NotFound("Property not found".into()));
    }

    tracing::info!(id = %id, "property deleted");
    Ok(Json(DeleteResponse {
        message: "Property deleted successfully".into(),
    }))
}

async fn find_property(state: &AppState, id: &str) -> Result<Property, AppError> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".into()))
}

async fn upload_image(state: &AppState, upload: ImageUpload) -> Result<String, AppError> {
    let url = state
        .images
        .upload(
            upload.bytes,
            &upload.content_type,
            &state.config.image_host.upload_folder,
        )
        .await?;
    Ok(url)
}

/// Walk the multipart stream and collect the known fields. Unknown field
/// names are ignored.
async fn read_property_form(mut multipart: Multipart) -> Result<PropertyForm, AppError> {
    let mut form = PropertyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => form.title = Some(read_text(field, &name).await?),
            "description" => form.description = Some(read_text(field, &name).await?),
            "price" => form.price = Some(read_text(field, &name).await?),
            "location" => form.location = Some(read_text(field, &name).await?),
            "image" => form.image = Some(read_image(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))
}

async fn read_image(field: axum::extract::multipart::Field<'_>) -> Result<ImageUpload, AppError> {
    let content_type = match field.content_type() {
        Some(ct) => ct.to_string(),
        None => field
            .file_name()
            .map(|f| mime_guess::from_path(f).first_or_octet_stream().to_string())
            .unwrap_or_else(|| "application/octet-stream".into()),
    };

    if !content_type.starts_with("image/") {
        return Err(AppError::Validation("Only image files are allowed".into()));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read image data: {e}")))?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::Validation(
            "Image exceeds the 5 MB size limit".into(),
        ));
    }

    Ok(ImageUpload {
        bytes: bytes.to_vec(),
        content_type,
    })
}
