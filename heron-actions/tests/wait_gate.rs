mod common;

use common::{init_test_tracing, Call, MockSession};
use heron_actions::{Locator, WaitGate};
use heron_common::HeronError;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn present_element_resolves_with_zero_timeout() {
    init_test_tracing();
    let session = MockSession::new().with_element("ready");
    let gate = WaitGate::new(Duration::from_millis(100));

    let started = Instant::now();
    let found = gate
        .await_element(&session, &Locator::xpath("ready"), Duration::ZERO)
        .await;

    assert!(found.is_ok());
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(session.calls(), vec![Call::Find("ready".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn absent_element_fails_immediately_with_zero_timeout() {
    init_test_tracing();
    let session = MockSession::new();
    let gate = WaitGate::new(Duration::from_millis(100));

    let started = Instant::now();
    let err = gate
        .await_element(&session, &Locator::xpath("//div[@id='x']"), Duration::ZERO)
        .await
        .unwrap_err();

    assert!(matches!(err, HeronError::NotFound { .. }));
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(session.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn miss_lands_between_timeout_and_one_extra_poll() {
    init_test_tracing();
    let session = MockSession::new();
    let gate = WaitGate::new(Duration::from_millis(100));

    let started = Instant::now();
    let err = gate
        .await_element(&session, &Locator::css("#ghost"), Duration::from_millis(250))
        .await
        .unwrap_err();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250), "elapsed {elapsed:?}");
    assert!(elapsed <= Duration::from_millis(350), "elapsed {elapsed:?}");
    // checks at 0 / 100 / 200 ms plus the final one at the deadline
    assert_eq!(session.calls().len(), 4);
    assert!(matches!(err, HeronError::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn resolves_once_the_element_appears() {
    init_test_tracing();
    let session = MockSession::new().with_element_after("late", 2);
    let gate = WaitGate::new(Duration::from_millis(100));

    let found = gate
        .await_element(&session, &Locator::css("late"), Duration::from_secs(5))
        .await;

    assert!(found.is_ok());
    assert_eq!(session.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn failure_message_names_the_locator() {
    init_test_tracing();
    let session = MockSession::new();
    let gate = WaitGate::new(Duration::from_millis(50));

    let err = gate
        .await_element(&session, &Locator::css("#checkout-button"), Duration::ZERO)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("#checkout-button"), "message: {message}");
    assert!(message.contains("css"), "message: {message}");
}
