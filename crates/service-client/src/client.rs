//! Emotion service HTTP client.
//!
//! Async client using `reqwest`. Every request carries the configured
//! timeout; non-success responses are decoded into a [`ServiceFailure`].

use moodlens_protocol::constants::{
    ADMIN_DELETE_PATH, ADMIN_EMOTIONS_PATH, ADMIN_UPLOAD_PATH, FIELD_EMOJI_NAME, FIELD_EMOTION,
    FIELD_FILE, UPLOAD_PATH,
};
use moodlens_protocol::{DetectionResult, EmojiCatalog, Emotion, ServiceFailure, WireCatalog};
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::config::{ConfigError, ServiceConfig};
use crate::service::{EmotionService, ImageFile, ServiceFuture};

/// Errors from the emotion service client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be completed (connect, timeout, transport).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a failure status.
    #[error(
        "service error {status}: {}",
        .failure.as_ref().and_then(|f| f.display_message()).unwrap_or("unrecognised failure body")
    )]
    Service {
        status: u16,
        failure: Option<ServiceFailure>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Decoded failure payload, when the service sent a recognisable one.
    pub fn failure(&self) -> Option<&ServiceFailure> {
        match self {
            Error::Service { failure, .. } => failure.as_ref(),
            _ => None,
        }
    }

    /// Whether the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

/// Emotion service API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl Client {
    /// Creates a new client for the configured origin.
    pub fn new(config: ServiceConfig) -> Result<Self, Error> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, Error> {
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            let failure = ServiceFailure::from_body(&body);
            warn!(status = status.as_u16(), ?failure, "service returned failure");
            return Err(Error::Service {
                status: status.as_u16(),
                failure,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Runs emotion detection on an image.
    pub async fn detect_image(&self, image: ImageFile) -> Result<DetectionResult, Error> {
        debug!(file = %image.file_name, bytes = image.bytes.len(), "submitting image");
        let form = Form::new().part(FIELD_FILE, image_part(image)?);
        let url = self.config.endpoint(UPLOAD_PATH);
        let body = self.send(self.http.post(&url).multipart(form)).await?;
        let result: DetectionResult = serde_json::from_slice(&body)?;
        debug!(emotion = %result.emotion, "detection complete");
        Ok(result)
    }

    /// Fetches the emoji catalog.
    pub async fn fetch_catalog(&self) -> Result<EmojiCatalog, Error> {
        let url = self.config.endpoint(ADMIN_EMOTIONS_PATH);
        let body = self.send(self.http.get(&url)).await?;
        let wire: WireCatalog = serde_json::from_slice(&body)?;
        let catalog = EmojiCatalog::from_wire(wire);
        debug!(assets = catalog.asset_count(), "catalog fetched");
        Ok(catalog)
    }

    /// Uploads an emoji image for `emotion`.
    ///
    /// The label travels both as a multipart field and as a query
    /// parameter; service builds differ in where they read it.
    pub async fn add_emoji(&self, emotion: Emotion, image: ImageFile) -> Result<(), Error> {
        debug!(%emotion, file = %image.file_name, "uploading emoji");
        let form = Form::new()
            .text(FIELD_EMOTION, emotion.as_str())
            .part(FIELD_FILE, image_part(image)?);
        let url = self.config.endpoint(ADMIN_UPLOAD_PATH);
        let req = self
            .http
            .post(&url)
            .query(&[(FIELD_EMOTION, emotion.as_str())])
            .multipart(form);
        self.send(req).await?;
        Ok(())
    }

    /// Deletes the emoji `(emotion, name)`.
    pub async fn remove_emoji(&self, emotion: Emotion, name: &str) -> Result<(), Error> {
        debug!(%emotion, name, "deleting emoji");
        let url = self.config.endpoint(ADMIN_DELETE_PATH);
        let req = self
            .http
            .post(&url)
            .form(&[(FIELD_EMOTION, emotion.as_str()), (FIELD_EMOJI_NAME, name)]);
        self.send(req).await?;
        Ok(())
    }
}

impl EmotionService for Client {
    fn detect(&self, image: ImageFile) -> ServiceFuture<'_, DetectionResult> {
        Box::pin(self.detect_image(image))
    }

    fn list_emojis(&self) -> ServiceFuture<'_, EmojiCatalog> {
        Box::pin(self.fetch_catalog())
    }

    fn upload_emoji(&self, emotion: Emotion, image: ImageFile) -> ServiceFuture<'_, ()> {
        Box::pin(self.add_emoji(emotion, image))
    }

    fn delete_emoji(&self, emotion: Emotion, name: String) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.remove_emoji(emotion, &name).await })
    }
}

fn image_part(image: ImageFile) -> Result<Part, Error> {
    Ok(Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.mime)?)
}
