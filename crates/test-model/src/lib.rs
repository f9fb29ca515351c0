//! A local fake model for testing purpose.

mod preset;

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex};

use chinwag_model::{
    ChatMessage, ChatProvider, ChatReply, ChatRequest, ErrorKind,
    ProviderError,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to set up the conversation script,
/// which is how the model should reply turn by turn. A request is answered
/// by the script entry whose index equals the number of assistant messages
/// already present in the request, so resending the full history naturally
/// advances the script. When the script runs out, an error is returned.
///
/// Clones share the same attempt counters, so failure injection behaves
/// the same no matter how often the provider is cloned.
///
/// # Note
///
/// This type is not optimized for production use. You should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct TestChatProvider {
    script: Vec<PresetReply>,
    attempts: Arc<Mutex<HashMap<usize, u64>>>,
}

impl TestChatProvider {
    /// Appends a scripted assistant turn.
    #[inline]
    pub fn add_reply(&mut self, preset: PresetReply) {
        self.script.push(preset);
    }
}

impl ChatProvider for TestChatProvider {
    type Error = crate::Error;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let turn_idx = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, ChatMessage::Assistant(_)))
            .count();

        let result = 'blk: {
            let Some(preset) = self.script.get(turn_idx) else {
                break 'blk Err(Error {
                    message: "conversation script exhausted",
                    kind: ErrorKind::Other,
                });
            };

            if let Some(failures) = preset.failures {
                let mut attempts = self.attempts.lock().unwrap();
                let seen = attempts.entry(turn_idx).or_insert(0);
                *seen += 1;
                if failures == 0 || *seen <= failures {
                    break 'blk Err(Error {
                        message: "scripted failure",
                        kind: ErrorKind::RateLimitExceeded,
                    });
                }
            }

            Ok(ChatReply {
                content: preset.content.clone(),
            })
        };
        ready(result)
    }
}
