use async_trait::async_trait;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::config::ImageHostConfig;

use super::{ImageHost, UploadError};

/// Cloudinary-style image host client using signed multipart uploads.
pub struct CloudinaryHost {
    config: ImageHostConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryHost {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// SHA-1 hex digest over the alphabetically ordered upload parameters
    /// followed by the API secret, as the upload API expects.
    fn signature(&self, folder: &str, timestamp: i64) -> String {
        let to_sign = format!(
            "folder={folder}&timestamp={timestamp}{}",
            self.config.api_secret
        );
        hex::encode(Sha1::digest(to_sign.as_bytes()))
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> Result<String, UploadError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.signature(folder, timestamp);

        let file = reqwest::multipart::Part::bytes(bytes)
            .file_name("image")
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("folder", folder.to_string())
            .part("file", file);

        let response = self
            .http
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Response(e.to_string()))?;

        Ok(body.secure_url)
    }
}
