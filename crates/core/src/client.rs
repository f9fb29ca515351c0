use std::pin::Pin;
use std::sync::Arc;

use chinwag_model::{ChatProvider, ChatReply, ChatRequest, ProviderError};
use tracing::Instrument;

type SendChatResult = Result<ChatReply, Box<dyn ProviderError>>;
type BoxedSendChatFuture =
    Pin<Box<dyn Future<Output = SendChatResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ChatRequest) -> BoxedSendChatFuture + Send + Sync>;

/// A wrapper around a chat provider that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ChatClient {
    handler_fn: HandlerFn,
}

impl ChatClient {
    /// Creates a `ChatClient` with the given provider.
    #[inline]
    pub fn new<P: ChatProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ChatClient` doesn't have
        // a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_chat(&req);
            Box::pin(
                async move {
                    trace!("got a request: {req:?}");
                    match fut.await {
                        Ok(reply) => {
                            trace!("got a reply");
                            Ok(reply)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("chat client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends the full conversation to the backend and returns its reply.
    #[inline]
    pub async fn send_chat(&self, req: ChatRequest) -> SendChatResult {
        (self.handler_fn)(req).await
    }
}
