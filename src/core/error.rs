use thiserror::Error;

use crate::core::types::{CanonicalKey, KeySequence};

/// Errors that can occur while building dispatch tables or dispatching.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Dispatch or canonicalisation was given zero keys.
    #[error("Cannot dispatch an empty key sequence")]
    EmptySequence,

    /// The static tree has no handler for this sequence (non-fatal).
    #[error("No hotkey bound to {0}")]
    UnmatchedSequence(KeySequence),

    /// The static tree has an invalid shape (fatal, reported at load time).
    #[error("Malformed hotkey tree at '{path}': {reason}")]
    MalformedTreeNode { path: String, reason: String },

    /// A handler failed; the handlers after it were not run.
    #[error("Action '{action}' (handler #{index}) for {target} failed: {source}")]
    ActionFailed {
        target: CanonicalKey,
        index: usize,
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
