//! Upload flow state machine.
//!
//! [`UploadFlow`] is synchronous: every transition is a method call that
//! either hands back a ticket describing asynchronous work (preview decode,
//! detection request) or applies the outcome of such work. Tickets carry the
//! selection generation they were issued for; outcomes for an older
//! generation are discarded.

use moodlens_protocol::DetectionResult;
use moodlens_service_client::{Error as ServiceError, ImageFile};
use moodlens_ui_state::messages::{INVALID_MEDIA, MEDIA_UNREADABLE, NO_MEDIA_SELECTED};
use moodlens_ui_state::{ChartSeries, ErrorSlot, FlowAction, UiError, UiErrorKind};
use tracing::{debug, info, warn};

use crate::error::UploadError;
use crate::export::{DOWNLOAD_FILE_NAME, DownloadSink, ShareTarget, instagram_story_uri};
use crate::media::{MediaBlob, MediaError, SelectedMedia};

/// Phase of the upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

/// Pending preview decode for one selection.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    generation: u64,
    media: SelectedMedia,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn media(&self) -> &SelectedMedia {
        &self.media
    }
}

/// Pending detection request.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    generation: u64,
    image: ImageFile,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &ImageFile {
        &self.image
    }

    pub fn into_image(self) -> ImageFile {
        self.image
    }
}

/// Client-side state of the photo upload workflow.
#[derive(Debug, Clone)]
pub struct UploadFlow {
    state: UploadState,
    media: Option<SelectedMedia>,
    preview: Option<String>,
    result: Option<DetectionResult>,
    errors: ErrorSlot,
    generation: u64,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadFlow {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            media: None,
            preview: None,
            result: None,
            errors: ErrorSlot::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn media(&self) -> Option<&SelectedMedia> {
        self.media.as_ref()
    }

    /// Preview of the current selection, once decoded.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&UiError> {
        self.errors.current()
    }

    /// Selection generation; bumped on every selection and reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Chart projection of the current result.
    pub fn chart(&self) -> Option<ChartSeries> {
        self.result.as_ref().map(ChartSeries::project)
    }

    /// Replaces the selection with `blob`.
    ///
    /// Valid in every state. A non-image blob leaves the selection and state
    /// untouched and raises an error. Selecting while a submission is in
    /// flight supersedes it.
    pub fn select_media(&mut self, blob: MediaBlob) -> Result<PreviewTicket, UploadError> {
        let media = match SelectedMedia::try_from(blob) {
            Ok(media) => media,
            Err(err) => return Err(self.reject_media(err)),
        };

        if self.state == UploadState::Submitting {
            debug!(generation = self.generation, "selection supersedes in-flight submission");
        }
        self.generation += 1;
        self.media = Some(media.clone());
        self.preview = None;
        self.result = None;
        self.errors.clear();
        self.state = UploadState::Ready;
        debug!(generation = self.generation, mime = media.mime(), "media selected");

        Ok(PreviewTicket {
            generation: self.generation,
            media,
        })
    }

    /// Records a media error from a [`crate::MediaSource`] that never
    /// produced a blob.
    pub fn reject_media(&mut self, err: MediaError) -> UploadError {
        warn!(error = %err, "media rejected");
        match err {
            MediaError::NotAnImage { mime } => {
                self.errors
                    .raise(FlowAction::Upload, UiErrorKind::InvalidMedia, INVALID_MEDIA);
                UploadError::InvalidMedia { mime }
            }
            MediaError::Io(e) => {
                self.errors.raise(
                    FlowAction::Upload,
                    UiErrorKind::MediaUnreadable,
                    MEDIA_UNREADABLE,
                );
                UploadError::Media(MediaError::Io(e))
            }
        }
    }

    /// Applies a decoded preview. Returns `false` if the selection has
    /// changed since the ticket was issued.
    pub fn apply_preview(&mut self, generation: u64, url: String) -> bool {
        if generation != self.generation || self.media.is_none() {
            debug!(
                ticket = generation,
                current = self.generation,
                "discarding stale preview"
            );
            return false;
        }
        self.preview = Some(url);
        true
    }

    /// Starts a submission of the current selection.
    ///
    /// A call while already submitting is ignored with [`UploadError::Busy`].
    pub fn submit(&mut self) -> Result<SubmitTicket, UploadError> {
        if self.state == UploadState::Submitting {
            debug!("submit ignored, request already in flight");
            return Err(UploadError::Busy);
        }
        let Some(media) = &self.media else {
            self.errors.raise(
                FlowAction::Upload,
                UiErrorKind::NoMediaSelected,
                NO_MEDIA_SELECTED,
            );
            return Err(UploadError::NoMediaSelected);
        };
        if !matches!(self.state, UploadState::Ready | UploadState::Failed) {
            return Err(UploadError::NotAvailable(self.state));
        }

        let image = media.to_image_file();
        self.result = None;
        self.errors.clear();
        self.state = UploadState::Submitting;
        debug!(generation = self.generation, file = %image.file_name, "submission started");

        Ok(SubmitTicket {
            generation: self.generation,
            image,
        })
    }

    /// Applies the outcome of the request issued for `generation`.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        outcome: Result<DetectionResult, ServiceError>,
    ) -> Result<(), UploadError> {
        if generation != self.generation || self.state != UploadState::Submitting {
            warn!(
                ticket = generation,
                current = self.generation,
                "discarding outcome of superseded submission"
            );
            return Err(UploadError::Superseded);
        }

        match outcome {
            Ok(result) => {
                info!(emotion = %result.emotion, "detection succeeded");
                self.result = Some(result);
                self.errors.clear();
                self.state = UploadState::Succeeded;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "detection failed");
                self.errors.raise_service(FlowAction::Upload, &err);
                self.state = UploadState::Failed;
                Err(UploadError::Service(err))
            }
        }
    }

    /// Returns an aborted submission to `Ready`. Returns `false` if the
    /// ticket no longer matches the in-flight submission.
    pub fn cancel_submit(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.state != UploadState::Submitting {
            return false;
        }
        debug!(generation, "submission aborted");
        self.state = UploadState::Ready;
        true
    }

    /// Back to `Idle`, dropping selection, preview, result and error.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.media = None;
        self.preview = None;
        self.result = None;
        self.errors.clear();
        self.state = UploadState::Idle;
    }

    /// Dismisses the displayed error if it is still `id`.
    pub fn dismiss_error(&mut self, id: u64) -> bool {
        self.errors.dismiss(id)
    }

    /// Hands the processed image to `sink`. Only valid in `Succeeded`.
    pub fn download(&self, sink: &dyn DownloadSink) -> Result<(), UploadError> {
        let result = self.succeeded_result()?;
        sink.save(DOWNLOAD_FILE_NAME, &result.processed_image)
            .map_err(|e| {
                warn!(error = %e, "download failed");
                UploadError::Download(e)
            })
    }

    /// Opens the share target with the processed image. Only valid in
    /// `Succeeded`.
    pub fn share(&self, target: &dyn ShareTarget) -> Result<(), UploadError> {
        let result = self.succeeded_result()?;
        target.open(&instagram_story_uri(&result.processed_image));
        Ok(())
    }

    fn succeeded_result(&self) -> Result<&DetectionResult, UploadError> {
        match (&self.state, &self.result) {
            (UploadState::Succeeded, Some(result)) => Ok(result),
            _ => Err(UploadError::NotAvailable(self.state)),
        }
    }
}
