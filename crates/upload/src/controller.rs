//! Async driver for [`UploadFlow`].
//!
//! Couples the state machine with an [`EmotionService`] and owns the
//! cancellation token of the in-flight detection request. The flow lock is
//! never held across a service call.

use std::sync::Arc;

use moodlens_protocol::DetectionResult;
use moodlens_service_client::EmotionService;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::UploadError;
use crate::export::{DownloadSink, ShareTarget};
use crate::flow::{UploadFlow, UploadState};
use crate::media::{MediaBlob, MediaSource};
use crate::preview::render_preview_async;

struct InFlight {
    id: u64,
    cancel: CancellationToken,
}

struct ControllerState {
    flow: UploadFlow,
    in_flight: Option<InFlight>,
    next_request: u64,
}

impl ControllerState {
    /// Cancels the in-flight request, if any. The caller moves the flow.
    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(req) => {
                req.cancel.cancel();
                debug!(request = req.id, "in-flight request cancelled");
                true
            }
            None => false,
        }
    }
}

/// Drives the photo upload flow against an emotion service.
pub struct UploadController {
    inner: Mutex<ControllerState>,
    service: Arc<dyn EmotionService>,
}

impl UploadController {
    pub fn new(service: Arc<dyn EmotionService>) -> Self {
        Self {
            inner: Mutex::new(ControllerState {
                flow: UploadFlow::new(),
                in_flight: None,
                next_request: 0,
            }),
            service,
        }
    }

    /// Snapshot of the flow for rendering.
    pub async fn snapshot(&self) -> UploadFlow {
        self.inner.lock().await.flow.clone()
    }

    pub async fn state(&self) -> UploadState {
        self.inner.lock().await.flow.state()
    }

    /// Runs `f` against the current flow.
    pub async fn with_flow<R>(&self, f: impl FnOnce(&UploadFlow) -> R) -> R {
        let state = self.inner.lock().await;
        f(&state.flow)
    }

    /// Selects `blob` and decodes its preview.
    ///
    /// Supersedes any in-flight submission. The preview is dropped if
    /// another selection happens before it is ready.
    pub async fn select_media(&self, blob: MediaBlob) -> Result<(), UploadError> {
        let ticket = {
            let mut state = self.inner.lock().await;
            let ticket = state.flow.select_media(blob)?;
            state.cancel_in_flight();
            ticket
        };

        let url = render_preview_async(ticket.media().clone()).await?;
        self.inner
            .lock()
            .await
            .flow
            .apply_preview(ticket.generation(), url);
        Ok(())
    }

    /// Loads media from `source` and selects it.
    pub async fn select_from(&self, source: &dyn MediaSource) -> Result<(), UploadError> {
        match source.load().await {
            Ok(blob) => self.select_media(blob).await,
            Err(e) => Err(self.inner.lock().await.flow.reject_media(e)),
        }
    }

    /// Submits the current selection for detection.
    ///
    /// Returns [`UploadError::Busy`] without contacting the service while a
    /// request is already in flight, and [`UploadError::Cancelled`] if the
    /// request is aborted or superseded before it completes.
    pub async fn submit(&self) -> Result<DetectionResult, UploadError> {
        let (ticket, request, cancel) = {
            let mut state = self.inner.lock().await;
            let ticket = state.flow.submit()?;
            let request = state.next_request;
            state.next_request += 1;
            let cancel = CancellationToken::new();
            state.in_flight = Some(InFlight {
                id: request,
                cancel: cancel.clone(),
            });
            (ticket, request, cancel)
        };
        let generation = ticket.generation();
        info!(request, file = %ticket.image().file_name, "submitting photo");

        let outcome = tokio::select! {
            _ = cancel.cancelled() => None,
            res = self.service.detect(ticket.into_image()) => Some(res),
        };

        let mut state = self.inner.lock().await;
        if state.in_flight.as_ref().is_some_and(|req| req.id == request) {
            state.in_flight = None;
        }
        let outcome = match outcome {
            Some(res) if !cancel.is_cancelled() => res,
            _ => {
                debug!(request, "submission cancelled");
                return Err(UploadError::Cancelled);
            }
        };

        state.flow.complete_submit(generation, outcome)?;
        state
            .flow
            .result()
            .cloned()
            .ok_or(UploadError::NotAvailable(state.flow.state()))
    }

    /// Aborts the in-flight submission and returns to `Ready`.
    pub async fn abort(&self) -> bool {
        let mut state = self.inner.lock().await;
        if !state.cancel_in_flight() {
            return false;
        }
        let generation = state.flow.generation();
        state.flow.cancel_submit(generation)
    }

    /// Cancels any request and returns to `Idle`.
    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.cancel_in_flight();
        state.flow.reset();
    }

    pub async fn dismiss_error(&self, id: u64) -> bool {
        self.inner.lock().await.flow.dismiss_error(id)
    }

    pub async fn download(&self, sink: &dyn DownloadSink) -> Result<(), UploadError> {
        self.inner.lock().await.flow.download(sink)
    }

    pub async fn share(&self, target: &dyn ShareTarget) -> Result<(), UploadError> {
        self.inner.lock().await.flow.share(target)
    }
}
