//! Photo upload flow: media selection, preview, submission, result export.
//!
//! This crate implements the **client logic** for submitting a photo to the
//! emotion service and holding the result. It has no UI dependencies; a
//! shell drives [`UploadController`] from user events and renders
//! [`UploadFlow`] state.
//!
//! # States
//!
//! 1. **Idle**: nothing selected
//! 2. **Ready**: media selected, preview decoding or available
//! 3. **Submitting**: one detection request in flight
//! 4. **Succeeded**: result available for display, download and share
//! 5. **Failed**: error shown, selection kept for retry

pub mod controller;
pub mod error;
pub mod export;
pub mod flow;
pub mod media;
pub mod preview;

// Re-export primary types for convenience.
pub use controller::UploadController;
pub use error::UploadError;
pub use export::{
    DOWNLOAD_FILE_NAME, DirectoryDownloadSink, DownloadError, DownloadSink, ShareTarget,
    instagram_story_uri,
};
pub use flow::{PreviewTicket, SubmitTicket, UploadFlow, UploadState};
pub use media::{FileMediaSource, MediaBlob, MediaError, MediaSource, SelectedMedia};
