//! Conversation-related types.

use chinwag_model::{ChatMessage, ChatRequest};

/// The ordered message history of one session.
///
/// A conversation starts with exactly one system message and grows by
/// one user message and, on backend success, one assistant message per
/// turn. The backend is stateless, so the entire history is resent with
/// every request.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Builds the opening conversation: a single system message that
    /// deterministically embeds the persona prompt, the user's display
    /// name, and the extra instructions, in that order.
    ///
    /// This is pure string composition; identical inputs produce a
    /// byte-identical system message.
    pub fn opening(
        user_name: &str,
        persona_prompt: &str,
        instructions: &str,
    ) -> Self {
        let content = format!(
            "Your primary instructions are below, delimited by three \
             asterisks.\n\n\
             ***{persona_prompt}***\n\n\
             The name of the person you are talking to is {user_name}.\n\
             If there is any additional context or instructions for you \
             to follow, they will be entered below, delimited by three \
             backticks.\n\n\
             ```{instructions}```"
        );
        Self {
            messages: vec![ChatMessage::System(content)],
        }
    }

    /// Appends a user message.
    #[inline]
    pub fn push_user<S: Into<String>>(&mut self, content: S) {
        self.messages.push(ChatMessage::User(content.into()));
    }

    /// Appends an assistant message.
    #[inline]
    pub fn push_assistant<S: Into<String>>(&mut self, content: S) {
        self.messages.push(ChatMessage::Assistant(content.into()));
    }

    /// Removes the trailing user message, restoring the state before the
    /// turn began. Does nothing when the last message is not a user one.
    pub fn pop_user(&mut self) -> bool {
        if matches!(self.messages.last(), Some(ChatMessage::User(_))) {
            self.messages.pop();
            true
        } else {
            false
        }
    }

    /// Returns the ordered messages.
    #[inline]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Builds the request carrying the full history.
    pub fn request_for(&self, model: &str, temperature: f32) -> ChatRequest {
        ChatRequest {
            model: model.to_owned(),
            temperature,
            messages: self.messages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_is_deterministic() {
        let a = Conversation::opening("Sam", "Be helpful.", "Be brief.");
        let b = Conversation::opening("Sam", "Be helpful.", "Be brief.");
        assert_eq!(a, b);
        assert_eq!(a.messages().len(), 1);
    }

    #[test]
    fn test_opening_embeds_all_three_parts() {
        let conversation =
            Conversation::opening("Sam", "You are a tutor.", "Use emoji.");
        let ChatMessage::System(content) = &conversation.messages()[0] else {
            panic!("the opening message must be a system message");
        };
        assert!(content.contains("***You are a tutor.***"));
        assert!(content.contains("talking to is Sam"));
        assert!(content.contains("```Use emoji.```"));

        // Persona before name, name before instructions.
        let persona_at = content.find("***").unwrap();
        let name_at = content.find("Sam").unwrap();
        let instructions_at = content.find("```").unwrap();
        assert!(persona_at < name_at);
        assert!(name_at < instructions_at);
    }

    #[test]
    fn test_empty_instructions_are_permitted() {
        let conversation = Conversation::opening("Sam", "Be helpful.", "");
        let ChatMessage::System(content) = &conversation.messages()[0] else {
            panic!("the opening message must be a system message");
        };
        assert!(content.contains("``````"));
    }

    #[test]
    fn test_request_resends_the_whole_history() {
        let mut conversation = Conversation::opening("Sam", "p", "");
        conversation.push_user("Hello");
        conversation.push_assistant("Hi!");
        conversation.push_user("Bye");

        let req = conversation.request_for("gpt-4", 0.8);
        assert_eq!(req.model, "gpt-4");
        assert_eq!(req.temperature, 0.8);
        assert_eq!(req.messages.len(), 4);
        assert_eq!(req.messages, conversation.messages());
    }

    #[test]
    fn test_pop_user_only_removes_a_trailing_user_message() {
        let mut conversation = Conversation::opening("Sam", "p", "");
        assert!(!conversation.pop_user());

        conversation.push_user("Hello");
        assert!(conversation.pop_user());
        assert_eq!(conversation.messages().len(), 1);

        conversation.push_user("Hello");
        conversation.push_assistant("Hi!");
        assert!(!conversation.pop_user());
        assert_eq!(conversation.messages().len(), 3);
    }
}
