//! HTTP client for the MoodLens emotion service.
//!
//! Provides an async [`Client`] for the detection and emoji admin endpoints,
//! the [`EmotionService`] trait the client flows are written against, and
//! the [`ServiceConfig`] that selects the API origin.

pub mod client;
pub mod config;
pub mod service;

pub use client::{Client, Error};
pub use config::{ConfigError, ServiceConfig};
pub use service::{EmotionService, ImageFile, ServiceFuture};
