use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use chinwag_model::{
    ChatMessage, ChatProvider, ChatReply, ChatRequest, ErrorKind,
    ProviderError,
};

#[derive(Debug)]
struct FakeProviderError(ErrorKind);

impl Display for FakeProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeProviderError {}

impl ProviderError for FakeProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// A provider that parrots the last user message back.
struct EchoProvider;

impl ChatProvider for EchoProvider {
    type Error = FakeProviderError;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            let Some(last) = req.messages.last() else {
                break 'blk Err(FakeProviderError(ErrorKind::Other));
            };
            let ChatMessage::User(text) = last else {
                break 'blk Err(FakeProviderError(ErrorKind::MalformedResponse));
            };
            Ok(ChatReply {
                content: format!("You said {text}"),
            })
        };
        ready(result)
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = EchoProvider;
        let req = ChatRequest {
            model: "fake-model".to_string(),
            temperature: 0.8,
            messages: vec![
                ChatMessage::System("Be brief.".to_string()),
                ChatMessage::User("Good morning".to_string()),
            ],
        };
        let reply = provider.send_chat(&req).await.unwrap();
        assert_eq!(reply.content, "You said Good morning");
    }

    #[tokio::test]
    async fn test_error() {
        let provider = EchoProvider;
        let req = ChatRequest {
            model: "fake-model".to_string(),
            temperature: 0.8,
            messages: vec![],
        };
        let err = provider.send_chat(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
