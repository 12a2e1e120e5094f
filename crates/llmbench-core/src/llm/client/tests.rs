use std::sync::Arc;
use std::time::Duration;

use mockall::Sequence;
use tokio::time::Instant;

use super::*;
use crate::config::ModelConfig;
use crate::llm::transport::MockChatTransport;
use crate::llm::{ApiError, ChatMessage};

fn model() -> ModelConfig {
    ModelConfig::new("test-model", "sk-test", "http://localhost:1/v1", "provider/model")
}

fn client(mock: MockChatTransport) -> ApiClient {
    ApiClient::with_transport(&model(), Arc::new(mock))
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let mut mock = MockChatTransport::new();
    mock.expect_complete()
        .withf(|req| {
            req.model == "provider/model"
                && req.max_tokens == 64
                && req.messages.len() == 1
                && req.messages[0].content == "2+2?"
        })
        .times(1)
        .returning(|_| Ok("4".to_string()));

    let text = client(mock)
        .call(&[ChatMessage::user("2+2?")], 64, 0.0)
        .await
        .unwrap();
    assert_eq!(text, "4");
}

#[tokio::test]
async fn test_non_retryable_error_is_not_retried() {
    let mut mock = MockChatTransport::new();
    mock.expect_complete()
        .times(1)
        .returning(|_| Err(ApiError::from_status(401, "bad key")));

    let err = client(mock)
        .call(&[ChatMessage::user("hi")], 16, 0.0)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_transient());
}

#[tokio::test(start_paused = true)]
async fn test_transient_errors_exhaust_five_attempts() {
    let mut mock = MockChatTransport::new();
    mock.expect_complete()
        .times(5)
        .returning(|_| Err(ApiError::from_status(503, "overloaded")));

    let started = Instant::now();
    let err = client(mock)
        .call(&[ChatMessage::user("hi")], 16, 0.0)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    match err {
        ApiError::RetriesExhausted { attempts, last } => {
            assert_eq!(attempts, 5);
            assert_eq!(last.status(), Some(503));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(elapsed >= Duration::from_secs(15), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(16), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failures() {
    let mut mock = MockChatTransport::new();
    let mut seq = Sequence::new();
    mock.expect_complete()
        .times(2)
        .in_sequence(&mut seq)
        .returning(|_| Err(ApiError::transient(None, "connection reset")));
    mock.expect_complete()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok("recovered".to_string()));

    let started = Instant::now();
    let text = client(mock)
        .call(&[ChatMessage::user("hi")], 16, 0.0)
        .await
        .unwrap();
    assert_eq!(text, "recovered");
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy_limits_attempts() {
    let mut mock = MockChatTransport::new();
    mock.expect_complete()
        .times(2)
        .returning(|_| Err(ApiError::from_status(429, "rate limited")));

    let policy = RetryPolicy {
        max_attempts: 2,
        initial_delay: Duration::from_millis(10),
        backoff_factor: 2.0,
    };
    let err = client(mock)
        .with_policy(policy)
        .call(&[ChatMessage::user("hi")], 16, 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RetriesExhausted { attempts: 2, .. }));
}

#[test]
fn test_default_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.delay_for(0), Duration::from_secs(1));
    assert_eq!(policy.delay_for(1), Duration::from_secs(2));
    assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    assert_eq!(policy.delay_for(3), Duration::from_secs(8));
}
