//! Error types for catalog administration.

/// Errors produced by [`crate::AdminFlow`] operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("an emotion and a file must both be selected")]
    MissingSelection,

    #[error("deletion was not confirmed")]
    ConfirmationDeclined,

    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("service error: {0}")]
    Service(#[from] moodlens_service_client::Error),
}
