/// A request to be sent to the model backend.
///
/// The backend is stateless between turns: every request carries the
/// entire conversation so far, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    /// The model to sample from.
    pub model: String,
    /// The sampling temperature.
    pub temperature: f32,
    /// The ordered conversation history, system message first.
    pub messages: Vec<ChatMessage>,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ChatMessage {
    /// Returns the text content of this message, whatever the role.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System(text)
            | ChatMessage::User(text)
            | ChatMessage::Assistant(text) => text,
        }
    }
}
