use moodlens_service_client::Error as ServiceError;

use crate::messages;

/// User action an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAction {
    Upload,
    FetchCatalog,
    UploadEmoji,
    DeleteEmoji,
}

impl FlowAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowAction::Upload => "upload",
            FlowAction::FetchCatalog => "fetchCatalog",
            FlowAction::UploadEmoji => "uploadEmoji",
            FlowAction::DeleteEmoji => "deleteEmoji",
        }
    }
}

/// What went wrong, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorKind {
    InvalidMedia,
    MediaUnreadable,
    NoMediaSelected,
    MissingSelection,
    Network,
    Service,
}

/// The error message a flow is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub id: u64,
    pub action: FlowAction,
    pub kind: UiErrorKind,
    pub message: String,
}

/// Holds at most one [`UiError`] with monotonic ID assignment.
///
/// Raising a new error replaces the previous one. IDs let a shell dismiss
/// exactly the error it displayed without clearing a newer one.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot {
    current: Option<UiError>,
    next_id: u64,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active error. Returns the assigned ID.
    pub fn raise(
        &mut self,
        action: FlowAction,
        kind: UiErrorKind,
        message: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(id, action = action.as_str(), ?kind, %message, "ui error raised");
        self.current = Some(UiError {
            id,
            action,
            kind,
            message,
        });
        id
    }

    /// Raise the error describing a failed service call.
    pub fn raise_service(&mut self, action: FlowAction, err: &ServiceError) -> u64 {
        let (kind, message) = messages::describe_service_error(action, err);
        self.raise(action, kind, message)
    }

    /// The active error, if any.
    pub fn current(&self) -> Option<&UiError> {
        self.current.as_ref()
    }

    /// Message of the active error, if any.
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.message.as_str())
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    /// Dismiss the error with `id`. Returns `true` if it was still active.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|e| e.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clear the error if it came from `action`.
    pub fn clear_action(&mut self, action: FlowAction) -> bool {
        if self.current.as_ref().is_some_and(|e| e.action == action) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clear whatever error is active.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
