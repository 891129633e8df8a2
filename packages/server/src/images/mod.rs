mod cloudinary;

pub use cloudinary::CloudinaryHost;

use async_trait::async_trait;

/// Errors surfaced by the image host.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("image host request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("image host returned an unexpected response: {0}")]
    Response(String),
}

/// External service that stores image bytes and serves them back by URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload raw image bytes and return the publicly retrievable URL.
    ///
    /// A single blocking attempt with no retry; callers abort their pending
    /// write when this fails.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> Result<String, UploadError>;
}
