//! Conversation and session management for the chinwag chat client.
//!
//! This crate holds everything between the terminal and the model
//! backend: the built-in persona set, session configuration (including
//! the setup wizard's state machine), the conversation history,
//! transcript persistence, and the chat loop's state transitions. It
//! performs no terminal I/O itself, so the whole session flow can be
//! driven from tests.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod client;
pub mod config;
mod conversation;
pub mod persona;
mod session;
mod transcript;

pub use client::ChatClient;
pub use conversation::Conversation;
pub use session::{ChatSession, EXIT_KEYWORD, SessionEnd, SessionError, Turn};
pub use transcript::{Speaker, TranscriptError, TranscriptWriter};
