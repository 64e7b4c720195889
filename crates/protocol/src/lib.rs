pub mod catalog;
pub mod constants;
pub mod failure;
pub mod image_ref;
pub mod types;

// Re-export primary types for convenience.
pub use catalog::{EmojiAsset, EmojiCatalog, WireCatalog, WireEmoji};
pub use failure::{FieldError, ServiceFailure};
pub use image_ref::{ImageRef, ImageRefError, encode_data_url};
pub use types::{DetectionResult, Emotion, ParseEmotionError};
