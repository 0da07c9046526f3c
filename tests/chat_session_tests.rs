// Chat session tests against a mocked assistant endpoint

use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use trilingo::client::{
    ApiClient, ChatConfig, ChatSession, ClientError, MemoryStorage, SendOutcome, Storage,
};
use trilingo::lang::Language;
use trilingo::models::api::TurnRole;

fn session_for(server: &mockito::ServerGuard) -> ChatSession {
    ChatSession::new(
        ApiClient::new(server.url()),
        Arc::new(MemoryStorage::new()),
        ChatConfig::default(),
    )
}

#[tokio::test]
async fn test_blank_message_is_ignored() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .expect(0)
        .create_async()
        .await;

    let session = session_for(&server);

    let outcome = session.send("   \n  ").await.unwrap();
    assert_eq!(outcome, SendOutcome::Ignored);
    assert!(session.history().is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_successful_send_appends_both_turns() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"message": "What do you do?"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"response":"We run community programs.","language":"en"}"#)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server);

    let outcome = session.send("What do you do?").await.unwrap();
    match outcome {
        SendOutcome::Replied(reply) => {
            assert_eq!(reply.text, "We run community programs.");
            assert_eq!(reply.language, Language::En);
            assert!(!reply.fallback);
        }
        other => panic!("expected a reply, got {:?}", other),
    }

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, TurnRole::User);
    assert_eq!(history[0].content, "What do you do?");
    assert_eq!(history[1].role, TurnRole::Assistant);
    assert_eq!(history[1].content, "We run community programs.");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_sinhala_message_resolves_a_sinhala_reply_language() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"response":"අපි ප්‍රජා වැඩසටහන් පවත්වනවා.","language":"en"}"#)
        .create_async()
        .await;

    let session = session_for(&server);
    // UI is English, but the message script wins
    let outcome = session.send("ඔබ මොනවද කරන්නේ?").await.unwrap();

    match outcome {
        SendOutcome::Replied(reply) => assert_eq!(reply.language, Language::Si),
        other => panic!("expected a reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_yields_localized_apology_outside_history() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server);
    session.set_language(Language::Si);

    let outcome = session.send("hello").await.unwrap();
    match outcome {
        SendOutcome::Replied(reply) => {
            assert!(reply.fallback);
            assert_eq!(reply.language, Language::Si);
            assert_eq!(
                reply.text,
                Language::Si.fallback_message("hello@example.org")
            );
        }
        other => panic!("expected a reply, got {:?}", other),
    }

    // Only the visitor's turn is recorded; the apology stays out
    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, TurnRole::User);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_second_send_while_busy_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_millis(300));
            writer.write_all(br#"{"success":true,"response":"slow reply","language":"en"}"#)
        })
        .create_async()
        .await;

    let session = Arc::new(session_for(&server));

    let background = {
        let session = session.clone();
        tokio::spawn(async move { session.send("first message").await })
    };

    // Give the first send time to take the guard
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(session.is_busy());

    match session.send("second message").await {
        Err(ClientError::SessionBusy) => {}
        other => panic!("expected SessionBusy, got {:?}", other),
    }

    let first = background.await.unwrap().unwrap();
    assert!(matches!(first, SendOutcome::Replied(reply) if !reply.fallback));
    assert!(!session.is_busy());

    // Only the first message reached the history
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_request_carries_prior_turns_but_not_the_current_message() {
    let mut server = mockito::Server::new_async().await;

    // Seed five persisted turns, then expect exactly the last three as
    // history, with the new message only in its own field
    let storage = Arc::new(MemoryStorage::new());
    let seeded = json!([
        {"role": "user", "content": "turn 1"},
        {"role": "assistant", "content": "turn 2"},
        {"role": "user", "content": "turn 3"},
        {"role": "assistant", "content": "turn 4"},
        {"role": "user", "content": "turn 5"}
    ]);
    storage.set("chat_history", &seeded.to_string()).unwrap();

    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({
            "message": "next question",
            "language": "en",
            "conversationHistory": [
                {"role": "user", "content": "turn 3"},
                {"role": "assistant", "content": "turn 4"},
                {"role": "user", "content": "turn 5"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"response":"noted","language":"en"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = ChatConfig {
        history_window: 3,
        ..Default::default()
    };
    let session = ChatSession::new(ApiClient::new(server.url()), storage, config);
    assert_eq!(session.history().len(), 5);

    let outcome = session.send("next question").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Replied(reply) if !reply.fallback));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_truncates_to_the_limit() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"response":"reply","language":"en"}"#)
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let seeded = json!([
        {"role": "user", "content": "turn 1"},
        {"role": "assistant", "content": "turn 2"},
        {"role": "user", "content": "turn 3"},
        {"role": "assistant", "content": "turn 4"}
    ]);
    storage.set("chat_history", &seeded.to_string()).unwrap();

    let config = ChatConfig {
        history_window: 2,
        history_limit: 4,
        ..Default::default()
    };
    let session = ChatSession::new(ApiClient::new(server.url()), storage.clone(), config);

    session.send("turn 5").await.unwrap();

    // 4 seeded + 2 new turns, truncated back down to 4
    let history = session.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].content, "turn 3");
    assert_eq!(history[3].content, "reply");

    // The persisted copy matches
    let persisted: Vec<serde_json::Value> =
        serde_json::from_str(&storage.get("chat_history").unwrap()).unwrap();
    assert_eq!(persisted.len(), 4);
}

#[tokio::test]
async fn test_corrupt_history_starts_fresh() {
    let server = mockito::Server::new_async().await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set("chat_history", "{broken").unwrap();

    let session = ChatSession::new(
        ApiClient::new(server.url()),
        storage,
        ChatConfig::default(),
    );
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_clear_removes_persisted_history() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"response":"reply","language":"en"}"#)
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let session = ChatSession::new(
        ApiClient::new(server.url()),
        storage.clone(),
        ChatConfig::default(),
    );

    session.send("hello").await.unwrap();
    assert!(storage.get("chat_history").is_some());

    session.clear();
    assert!(session.history().is_empty());
    assert_eq!(storage.get("chat_history"), None);
}
