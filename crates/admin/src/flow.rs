//! Admin flow: CRUD over the emoji catalog.
//!
//! Each action kind allows one call in flight; a second call of the same
//! kind returns [`AdminError::Busy`] without touching the service.
//!
//! Catalog fetches are numbered when issued. A response is applied only if
//! it is newer than the last one applied, so a slow page-load fetch cannot
//! overwrite the fetch that follows a mutation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use moodlens_protocol::{EmojiCatalog, Emotion};
use moodlens_service_client::{EmotionService, ImageFile};
use moodlens_ui_state::messages::MISSING_SELECTION;
use moodlens_ui_state::{FlowAction, UiErrorKind};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::confirm::{Confirmer, delete_prompt};
use crate::error::AdminError;
use crate::types::AdminState;

/// Clears a busy flag on drop, including when the call is cancelled.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool, action: FlowAction) -> Result<Self, AdminError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(action = action.as_str(), "call ignored, already in flight");
            return Err(AdminError::Busy(action.as_str()));
        }
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the admin page against an emotion service.
pub struct AdminFlow {
    service: Arc<dyn EmotionService>,
    confirmer: Arc<dyn Confirmer>,
    state: Mutex<AdminState>,
    fetching: AtomicBool,
    uploading: AtomicBool,
    deleting: AtomicBool,
    /// Number of the most recently issued catalog fetch.
    fetch_seq: AtomicU64,
}

impl AdminFlow {
    pub fn new(service: Arc<dyn EmotionService>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            service,
            confirmer,
            state: Mutex::new(AdminState::default()),
            fetching: AtomicBool::new(false),
            uploading: AtomicBool::new(false),
            deleting: AtomicBool::new(false),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the page state for rendering.
    pub async fn snapshot(&self) -> AdminState {
        self.state.lock().await.clone()
    }

    pub async fn catalog(&self) -> EmojiCatalog {
        self.state.lock().await.catalog.clone()
    }

    pub async fn select_emotion(&self, emotion: Emotion) {
        self.state.lock().await.selected_emotion = emotion;
    }

    /// Sets or clears the file picked for upload.
    pub async fn select_file(&self, file: Option<ImageFile>) {
        self.state.lock().await.pending_file = file;
    }

    pub async fn dismiss_error(&self, id: u64) -> bool {
        self.state.lock().await.errors.dismiss(id)
    }

    /// Re-fetches the catalog. On failure the previous catalog is kept.
    pub async fn refresh_catalog(&self) -> Result<(), AdminError> {
        let _busy = BusyGuard::acquire(&self.fetching, FlowAction::FetchCatalog)?;
        self.fetch_catalog().await
    }

    async fn fetch_catalog(&self) -> Result<(), AdminError> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(seq, "fetching emoji catalog");
        let outcome = self.service.list_emojis().await;

        let mut state = self.state.lock().await;
        if seq <= state.applied_fetch {
            debug!(
                seq,
                applied = state.applied_fetch,
                "discarding stale catalog response"
            );
            return Ok(());
        }
        match outcome {
            Ok(catalog) => {
                info!(seq, assets = catalog.asset_count(), "emoji catalog refreshed");
                state.applied_fetch = seq;
                state.catalog = catalog;
                state.errors.clear_action(FlowAction::FetchCatalog);
                Ok(())
            }
            Err(e) => {
                warn!(seq, error = %e, "emoji catalog fetch failed");
                state.errors.raise_service(FlowAction::FetchCatalog, &e);
                Err(e.into())
            }
        }
    }

    /// Uploads `file` under `emotion`, then re-fetches the catalog once.
    ///
    /// A failed re-fetch is reported as a catalog error; the upload itself
    /// still succeeded.
    pub async fn upload_emoji(
        &self,
        emotion: Option<Emotion>,
        file: Option<ImageFile>,
    ) -> Result<(), AdminError> {
        let _busy = BusyGuard::acquire(&self.uploading, FlowAction::UploadEmoji)?;
        let (Some(emotion), Some(file)) = (emotion, file) else {
            self.state.lock().await.errors.raise(
                FlowAction::UploadEmoji,
                UiErrorKind::MissingSelection,
                MISSING_SELECTION,
            );
            return Err(AdminError::MissingSelection);
        };

        debug!(%emotion, file = %file.file_name, "uploading emoji");
        if let Err(e) = self.service.upload_emoji(emotion, file).await {
            warn!(%emotion, error = %e, "emoji upload failed");
            self.state
                .lock()
                .await
                .errors
                .raise_service(FlowAction::UploadEmoji, &e);
            return Err(e.into());
        }

        info!(%emotion, "emoji uploaded");
        {
            let mut state = self.state.lock().await;
            state.errors.clear();
            state.pending_file = None;
        }
        let _ = self.fetch_catalog().await;
        Ok(())
    }

    /// Uploads the pending file under the selected emotion.
    pub async fn upload_selected(&self) -> Result<(), AdminError> {
        let (emotion, file) = {
            let state = self.state.lock().await;
            (state.selected_emotion, state.pending_file.clone())
        };
        self.upload_emoji(Some(emotion), file).await
    }

    /// Deletes `(emotion, name)` after confirmation, then re-fetches the
    /// catalog once.
    pub async fn delete_emoji(&self, emotion: Emotion, name: &str) -> Result<(), AdminError> {
        let _busy = BusyGuard::acquire(&self.deleting, FlowAction::DeleteEmoji)?;
        if !self.confirmer.confirm(&delete_prompt(name)).await {
            debug!(%emotion, name, "delete declined");
            return Err(AdminError::ConfirmationDeclined);
        }

        debug!(%emotion, name, "deleting emoji");
        if let Err(e) = self.service.delete_emoji(emotion, name.to_string()).await {
            warn!(%emotion, name, error = %e, "emoji delete failed");
            self.state
                .lock()
                .await
                .errors
                .raise_service(FlowAction::DeleteEmoji, &e);
            return Err(e.into());
        }

        info!(%emotion, name, "emoji deleted");
        self.state.lock().await.errors.clear();
        let _ = self.fetch_catalog().await;
        Ok(())
    }
}
