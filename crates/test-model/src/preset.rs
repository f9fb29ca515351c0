use serde::{Deserialize, Serialize};

/// The preset reply for one assistant turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetReply {
    /// The assistant content to answer with.
    pub content: String,
    /// If set, the turn will fail in the first `failures` attempts.
    /// `Some(0)` means the turn will fail infinitely.
    pub failures: Option<u64>,
}

impl PresetReply {
    /// Creates a `PresetReply` with the specified content.
    #[inline]
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            failures: None,
        }
    }

    /// Sets failure times before a successful reply. `0` means the
    /// reply will always be a failure.
    #[inline]
    pub fn with_failures(mut self, failures: u64) -> Self {
        self.failures = Some(failures);
        self
    }
}
