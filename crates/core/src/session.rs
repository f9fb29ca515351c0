//! The chat loop's state transitions.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

use chinwag_model::ProviderError;

use crate::client::ChatClient;
use crate::config::SessionConfig;
use crate::conversation::Conversation;
use crate::transcript::{Speaker, TranscriptWriter};

#[cfg(test)]
mod tests;

/// The keyword that ends the chat loop, matched case-insensitively on
/// the trimmed input line.
pub const EXIT_KEYWORD: &str = "quit";

/// An error from one chat turn.
#[derive(Debug)]
pub enum SessionError {
    /// The backend failed. Fatal to the turn only: the conversation has
    /// been rolled back and the user may resubmit the same line.
    Backend(Box<dyn ProviderError>),
    /// The transcript could not be written. Fatal to the session, since
    /// transcript integrity is a core guarantee.
    Transcript(io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Backend(err) => {
                write!(f, "the model backend failed: {err}")
            }
            SessionError::Transcript(err) => {
                write!(f, "could not write the transcript: {err}")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::Backend(err) => {
                Some(err.as_ref() as &(dyn Error + 'static))
            }
            SessionError::Transcript(err) => Some(err),
        }
    }
}

/// The outcome of submitting one line.
#[derive(Clone, Debug)]
pub enum Turn {
    /// The backend answered; the reply has been recorded and appended to
    /// the conversation.
    Reply(String),
    /// The line was the exit keyword. It has been recorded, and the
    /// session now awaits the save decision via
    /// [`conclude`](ChatSession::conclude).
    ExitRequested,
}

/// What happened to the transcript when the session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The transcript was kept at the given path.
    Saved(PathBuf),
    /// The transcript file was deleted.
    Discarded,
}

/// One chat session: a conversation, its transcript, and the resolved
/// configuration, advanced one input line at a time.
///
/// The session owns no terminal; the binary reads lines and renders
/// replies, this type decides what each line means.
pub struct ChatSession {
    client: ChatClient,
    config: SessionConfig,
    conversation: Conversation,
    transcript: TranscriptWriter,
}

impl ChatSession {
    /// Creates a session over an already-opened transcript.
    pub fn new(
        client: ChatClient,
        config: SessionConfig,
        conversation: Conversation,
        transcript: TranscriptWriter,
    ) -> Self {
        Self {
            client,
            config,
            conversation,
            transcript,
        }
    }

    /// Returns the in-memory conversation.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the path of the transcript file.
    #[inline]
    pub fn transcript_path(&self) -> &Path {
        self.transcript.path()
    }

    /// Submits one line of user input.
    ///
    /// The line is recorded to the transcript exactly once, before any
    /// backend call for the turn. On backend failure the just-pushed
    /// user message is rolled back, so the conversation keeps its
    /// system-first, strictly alternating shape and the same line can be
    /// resubmitted; the transcript keeps the user line either way.
    pub async fn submit(&mut self, line: &str) -> Result<Turn, SessionError> {
        let line = line.trim();
        self.transcript
            .append(Speaker::User, line)
            .map_err(SessionError::Transcript)?;

        if line.eq_ignore_ascii_case(EXIT_KEYWORD) {
            debug!("exit requested");
            return Ok(Turn::ExitRequested);
        }

        self.conversation.push_user(line);
        let req = self
            .conversation
            .request_for(&self.config.model, self.config.temperature);
        let reply = match self.client.send_chat(req).await {
            Ok(reply) => reply,
            Err(err) => {
                self.conversation.pop_user();
                return Err(SessionError::Backend(err));
            }
        };

        self.transcript
            .append(Speaker::Assistant, &reply.content)
            .map_err(SessionError::Transcript)?;
        self.conversation.push_assistant(reply.content.clone());
        Ok(Turn::Reply(reply.content))
    }

    /// Consumes the session with the user's save decision.
    ///
    /// The decline tokens `n` and `no` (case-insensitive) discard the
    /// transcript; any other input keeps it.
    pub fn conclude(self, line: &str) -> io::Result<SessionEnd> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
            self.transcript.discard()?;
            Ok(SessionEnd::Discarded)
        } else {
            Ok(SessionEnd::Saved(self.transcript.finalize()))
        }
    }
}
