//! An abstraction layer for chat-completion backends.
//!
//! This crate establishes a unified protocol between the chat client and
//! whatever LLM backend serves it, so that backends can be swapped without
//! touching the session logic.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.
//!
//! Replies are always delivered whole: streaming is deliberately not part
//! of this protocol, so a provider that streams internally must collapse
//! the stream before resolving.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
