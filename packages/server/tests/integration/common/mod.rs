use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use server::config::{AppConfig, CorsConfig, DatabaseConfig, ImageHostConfig, ServerConfig};
use server::images::{ImageHost, UploadError};
use server::state::AppState;
use server::store::MemoryStore;

pub mod routes {
    pub const PROPERTIES: &str = "/properties";

    pub fn property(id: &str) -> String {
        format!("/properties/{id}")
    }
}

/// Image host stub that accepts every upload and returns a deterministic URL.
pub struct StubImageHost;

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        _content_type: &str,
        folder: &str,
    ) -> Result<String, UploadError> {
        Ok(format!("https://images.test/{folder}/{}", bytes.len()))
    }
}

/// Image host stub that rejects every upload.
pub struct FailingImageHost;

#[async_trait]
impl ImageHost for FailingImageHost {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        _content_type: &str,
        _folder: &str,
    ) -> Result<String, UploadError> {
        Err(UploadError::Rejected {
            status: 503,
            message: "host offline".into(),
        })
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "mongodb://unused".to_string(),
            name: "unused".to_string(),
        },
        image_host: ImageHostConfig {
            api_base: "https://images.test".to_string(),
            cloud_name: "test".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            upload_folder: "test_listings".to_string(),
        },
    }
}

/// A running test server backed by an in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_image_host(Arc::new(StubImageHost)).await
    }

    pub async fn spawn_with_image_host(images: Arc<dyn ImageHost>) -> Self {
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            images,
            config: test_config(),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &str, Vec<u8>)>,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(build_form(fields, image))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &str, Vec<u8>)>,
    ) -> TestResponse {
        let req = self.client.put(self.url(path));
        // reqwest sends a zero-byte body for a form with no parts, which is
        // not valid multipart; hand-roll the closing boundary in that case.
        let req = if fields.is_empty() && image.is_none() {
            let boundary = build_form(fields, image).boundary().to_string();
            req.header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(format!("--{boundary}--\r\n"))
        } else {
            req.multipart(build_form(fields, image))
        };
        let res = req.send().await.expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    /// Create a property with valid defaults and return its id.
    pub async fn create_property(&self, title: &str, price: &str, location: &str) -> String {
        let res = self
            .post_form(
                routes::PROPERTIES,
                &[
                    ("title", title),
                    ("description", "A lovely place"),
                    ("price", price),
                    ("location", location),
                ],
                None,
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        res.body["id"]
            .as_str()
            .expect("create response missing id")
            .to_string()
    }
}

/// Multipart form from text fields plus an optional image part
/// (file name, content type, bytes).
fn build_form(fields: &[(&str, &str)], image: Option<(&str, &str, Vec<u8>)>) -> Form {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    if let Some((file_name, content_type, bytes)) = image {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .expect("invalid test mime type");
        form = form.part("image", part);
    }
    form
}
