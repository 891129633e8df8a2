use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use common::property::Property;

/// Errors returned by [`ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a structured error body.
    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

/// An image file attached to a create or update request.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for creating a listing. All are required by the server.
#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub image: Option<ImageFile>,
}

/// Fields for updating a listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub image: Option<ImageFile>,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct DeleteResponse {
    message: String,
}

/// HTTP client for the listings API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// All listings, newest first.
    pub async fn list(&self) -> Result<Vec<Property>, ApiError> {
        let res = self.http.get(self.url("/properties")).send().await?;
        decode(res).await
    }

    pub async fn get(&self, id: &str) -> Result<Property, ApiError> {
        let res = self
            .http
            .get(self.url(&format!("/properties/{id}")))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn create(&self, new: CreateProperty) -> Result<Property, ApiError> {
        let mut form = Form::new()
            .text("title", new.title)
            .text("description", new.description)
            .text("price", new.price.to_string())
            .text("location", new.location);
        if let Some(image) = new.image {
            form = form.part("image", image_part(image)?);
        }

        let res = self
            .http
            .post(self.url("/properties"))
            .multipart(form)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn update(&self, id: &str, update: UpdateProperty) -> Result<Property, ApiError> {
        let mut form = Form::new();
        if let Some(title) = update.title {
            form = form.text("title", title);
        }
        if let Some(description) = update.description {
            form = form.text("description", description);
        }
        if let Some(price) = update.price {
            form = form.text("price", price.to_string());
        }
        if let Some(location) = update.location {
            form = form.text("location", location);
        }
        if let Some(image) = update.image {
            form = form.part("image", image_part(image)?);
        }

        let res = self
            .http
            .put(self.url(&format!("/properties/{id}")))
            .multipart(form)
            .send()
            .await?;
        decode(res).await
    }

    /// Delete a listing and return the server's confirmation message.
    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let res = self
            .http
            .delete(self.url(&format!("/properties/{id}")))
            .send()
            .await?;
        let body: DeleteResponse = decode(res).await?;
        Ok(body.message)
    }
}

fn image_part(image: ImageFile) -> Result<Part, ApiError> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;
    Ok(part)
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }

    let text = res.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => ("UNKNOWN".to_string(), "Unrecognized error response".to_string()),
    };

    Err(ApiError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
