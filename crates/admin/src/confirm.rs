//! Delete confirmation.

use std::future::Future;
use std::pin::Pin;

/// Asks the user to confirm a destructive action.
pub trait Confirmer: Send + Sync {
    /// Resolves to `true` if the user affirmed `prompt`.
    fn confirm(&self, prompt: &str) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Prompt shown before deleting the emoji `name`.
pub fn delete_prompt(name: &str) -> String {
    format!("Delete {name}?")
}

/// Answers every prompt the same way. For headless shells and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, prompt: &str) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        tracing::debug!(prompt, answer = self.0, "auto-confirm");
        let answer = self.0;
        Box::pin(async move { answer })
    }
}
