//! Service abstraction the client flows are written against.
//!
//! [`crate::Client`] implements it over HTTP; tests substitute in-memory
//! fakes.

use std::future::Future;
use std::pin::Pin;

use moodlens_protocol::{DetectionResult, EmojiCatalog, Emotion};

use crate::client::Error;

/// Boxed future returned by [`EmotionService`] methods.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// An image file ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Abstract connection to the emotion service.
pub trait EmotionService: Send + Sync {
    /// Runs detection on an image (`POST /upload`).
    fn detect(&self, image: ImageFile) -> ServiceFuture<'_, DetectionResult>;

    /// Fetches the full emoji catalog (`GET /admin/emotions`).
    fn list_emojis(&self) -> ServiceFuture<'_, EmojiCatalog>;

    /// Adds an emoji image under `emotion` (`POST /admin/upload`).
    fn upload_emoji(&self, emotion: Emotion, image: ImageFile) -> ServiceFuture<'_, ()>;

    /// Removes the emoji identified by `(emotion, name)` (`POST /admin/delete`).
    fn delete_emoji(&self, emotion: Emotion, name: String) -> ServiceFuture<'_, ()>;
}
