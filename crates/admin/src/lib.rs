//! Emoji catalog administration: list, upload, delete.
//!
//! This crate implements the **business logic** of the admin page. It has no
//! UI dependencies; a shell provides a [`Confirmer`] for delete prompts and
//! renders [`AdminState`] snapshots.
//!
//! # Operations
//!
//! - **Refresh**: fetch the full catalog, replacing the cached copy
//! - **Upload**: add an image under an emotion, then re-fetch
//! - **Delete**: confirm, remove by `(emotion, name)`, then re-fetch
//!
//! The cached catalog changes only through a fetch; mutations are never
//! applied optimistically.

pub mod confirm;
pub mod error;
pub mod flow;
pub mod types;

// Re-export primary types for convenience.
pub use confirm::{AutoConfirm, Confirmer, delete_prompt};
pub use error::AdminError;
pub use flow::AdminFlow;
pub use types::AdminState;
