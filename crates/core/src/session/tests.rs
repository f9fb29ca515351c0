use std::fs;

use chinwag_model::ChatMessage;
use chinwag_test_model::{PresetReply, TestChatProvider};
use tempfile::TempDir;

use crate::client::ChatClient;
use crate::config::SessionConfig;
use crate::conversation::Conversation;
use crate::persona::PersonaStore;
use crate::session::{ChatSession, SessionEnd, SessionError, Turn};
use crate::transcript::TranscriptWriter;

fn session_in(dir: &TempDir, provider: TestChatProvider) -> ChatSession {
    let config = SessionConfig::default_for(&PersonaStore::builtin());
    let conversation = Conversation::opening(
        "Sam",
        config.persona.prompt,
        &config.instructions,
    );
    let transcript = TranscriptWriter::create(dir.path(), "Sam").unwrap();
    ChatSession::new(ChatClient::new(provider), config, conversation, transcript)
}

#[tokio::test]
async fn test_hello_quit_decline_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let mut provider = TestChatProvider::default();
    provider.add_reply(PresetReply::with_content("Hi Sam!"));
    let mut session = session_in(&dir, provider);

    let turn = session.submit("Hello").await.unwrap();
    assert!(matches!(turn, Turn::Reply(ref text) if text == "Hi Sam!"));

    let turn = session.submit("quit").await.unwrap();
    assert!(matches!(turn, Turn::ExitRequested));

    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 3);
    assert!(matches!(messages[0], ChatMessage::System(_)));
    assert_eq!(messages[1], ChatMessage::User("Hello".to_owned()));
    assert_eq!(messages[2], ChatMessage::Assistant("Hi Sam!".to_owned()));

    let path = session.transcript_path().to_owned();
    assert_eq!(session.conclude("n").unwrap(), SessionEnd::Discarded);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_saved_transcript_holds_every_turn_in_order() {
    let dir = TempDir::new().unwrap();
    let mut provider = TestChatProvider::default();
    provider.add_reply(PresetReply::with_content("Hi Sam!"));
    provider.add_reply(PresetReply::with_content("Anytime."));
    let mut session = session_in(&dir, provider);

    session.submit("Hello").await.unwrap();
    session.submit("Thanks").await.unwrap();
    session.submit("quit").await.unwrap();

    let end = session.conclude("").unwrap();
    let SessionEnd::Saved(path) = end else {
        panic!("an empty decision line must save the transcript");
    };
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "You: Hello\n\n\
         Chinwag: Hi Sam!\n\n\
         You: Thanks\n\n\
         Chinwag: Anytime.\n\n\
         You: quit\n\n"
    );
}

#[tokio::test]
async fn test_exit_keyword_is_case_insensitive_and_trimmed() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, TestChatProvider::default());

    let turn = session.submit("  QuIt  ").await.unwrap();
    assert!(matches!(turn, Turn::ExitRequested));
    // The exit line is recorded but never forwarded to the backend.
    assert_eq!(session.conversation().messages().len(), 1);
    assert_eq!(
        fs::read_to_string(session.transcript_path()).unwrap(),
        "You: QuIt\n\n"
    );
}

#[tokio::test]
async fn test_backend_failure_is_fatal_to_the_turn_only() {
    let dir = TempDir::new().unwrap();
    let mut provider = TestChatProvider::default();
    provider
        .add_reply(PresetReply::with_content("Recovered.").with_failures(1));
    let mut session = session_in(&dir, provider);

    let err = session.submit("Hello").await.unwrap_err();
    assert!(matches!(err, SessionError::Backend(_)));

    // The conversation rolled back; the transcript kept the user line
    // with no assistant block for the failed turn.
    assert_eq!(session.conversation().messages().len(), 1);
    assert_eq!(
        fs::read_to_string(session.transcript_path()).unwrap(),
        "You: Hello\n\n"
    );

    // The same turn can be retried.
    let turn = session.submit("Hello").await.unwrap();
    assert!(matches!(turn, Turn::Reply(ref text) if text == "Recovered."));
    assert_eq!(session.conversation().messages().len(), 3);
}

#[tokio::test]
async fn test_long_decline_token_also_discards() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, TestChatProvider::default());
    session.submit("quit").await.unwrap();

    let path = session.transcript_path().to_owned();
    assert_eq!(session.conclude("No").unwrap(), SessionEnd::Discarded);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_any_other_decision_saves() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, TestChatProvider::default());
    session.submit("quit").await.unwrap();

    let end = session.conclude("nah, keep it").unwrap();
    assert!(matches!(end, SessionEnd::Saved(ref path) if path.exists()));
}
