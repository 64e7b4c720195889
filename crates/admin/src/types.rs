//! Domain types for catalog administration.

use moodlens_protocol::{EmojiCatalog, Emotion};
use moodlens_service_client::ImageFile;
use moodlens_ui_state::{ErrorSlot, UiError};

/// Admin page state: cached catalog, form selections, displayed error.
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub(crate) catalog: EmojiCatalog,
    pub(crate) errors: ErrorSlot,
    pub(crate) selected_emotion: Emotion,
    pub(crate) pending_file: Option<ImageFile>,
    /// Number of the catalog fetch whose response is displayed.
    pub(crate) applied_fetch: u64,
}

impl AdminState {
    /// Catalog as of the last successful fetch.
    pub fn catalog(&self) -> &EmojiCatalog {
        &self.catalog
    }

    pub fn error(&self) -> Option<&UiError> {
        self.errors.current()
    }

    /// Emotion the upload form targets. Defaults to happy.
    pub fn selected_emotion(&self) -> Emotion {
        self.selected_emotion
    }

    /// File picked for upload, if any.
    pub fn pending_file(&self) -> Option<&ImageFile> {
        self.pending_file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = AdminState::default();
        assert!(state.catalog().is_empty());
        assert!(state.error().is_none());
        assert_eq!(state.selected_emotion(), Emotion::Happy);
        assert!(state.pending_file().is_none());
    }
}
