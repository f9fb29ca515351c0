use serde::{Deserialize, Serialize};

/// A complete reply from the model backend.
///
/// Whatever the backend's wire format looks like, a provider resolves to
/// exactly one of these per request: the single top-choice assistant
/// message, fully received.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant message content.
    pub content: String,
}
