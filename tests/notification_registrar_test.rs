//! Integration tests for push registration driven by session transitions.

mod common;

use std::sync::Arc;

use common::*;
use splitpay::adapters::mock::{InMemorySessionStore, MockPushPlatform, MockResponse};
use splitpay::notifications::{NotificationRegistrar, RegistrarConfig, RegistrationOutcome, SkipReason};
use splitpay::traits::PushError;

const PUSH_PATH: &str = "/api/users/push-token";

fn registrar_for(h: &TestHarness, push: &MockPushPlatform) -> Arc<NotificationRegistrar> {
    h.http.set_response(&url(PUSH_PATH), MockResponse::status(200));
    Arc::new(NotificationRegistrar::new(
        Arc::new(push.clone()),
        h.api.clone(),
        RegistrarConfig::new("splitpay-test"),
    ))
}

#[tokio::test]
async fn test_sign_in_registers_token_once() {
    let h = TestHarness::new();
    let push = MockPushPlatform::new();
    let registrar = registrar_for(&h, &push);
    let mut rx = h.controller.subscribe();

    mock_login(&h.http, "u1");
    assert!(h.controller.sign_in("u1@example.com", "pw").await.is_success());

    let bootstrapped = rx.recv().await.unwrap();
    assert_eq!(registrar.handle(&bootstrapped).await, RegistrationOutcome::Ignored);

    let established = rx.recv().await.unwrap();
    assert_eq!(registrar.handle(&established).await, RegistrationOutcome::Registered);

    let uploads = h.http.requests_to(PUSH_PATH);
    assert_eq!(uploads.len(), 1);
    assert_eq!(
        uploads[0].headers.get("X-User-Id").map(String::as_str),
        Some("u1")
    );
    assert_eq!(push.token_requests(), vec!["splitpay-test".to_string()]);
}

#[tokio::test]
async fn test_registration_failure_does_not_affect_sign_in() {
    let h = TestHarness::new();
    let push = MockPushPlatform::new();
    push.set_token_result(Err(PushError::Token("service unavailable".to_string())));
    let registrar = registrar_for(&h, &push);
    let handle = registrar.clone().spawn(h.controller.subscribe());

    mock_login(&h.http, "u1");
    let result = h.controller.sign_in("u1@example.com", "pw").await;
    assert!(result.is_success());

    wait_until(|| push.token_requests().len() == 1).await;
    assert!(h.http.requests_to(PUSH_PATH).is_empty());
    assert_eq!(h.controller.user(), Some(test_session("u1")));

    handle.abort();
}

#[tokio::test]
async fn test_no_upload_after_sign_out() {
    let h = TestHarness::new();
    let push = MockPushPlatform::new();
    let gate = push.gate_token();
    let registrar = registrar_for(&h, &push);
    let mut rx = h.controller.subscribe();

    mock_login(&h.http, "u1");
    h.controller.sign_in("u1@example.com", "pw").await;
    rx.recv().await.unwrap(); // bootstrap
    let established = rx.recv().await.unwrap();

    let attempt = {
        let registrar = registrar.clone();
        tokio::spawn(async move { registrar.handle(&established).await })
    };
    wait_until(|| push.token_requests().len() == 1).await;

    h.controller.sign_out().await;
    gate.notify_one();

    assert_eq!(
        within(attempt).await.unwrap(),
        RegistrationOutcome::Skipped(SkipReason::StaleSession)
    );
    assert!(h.http.requests_to(PUSH_PATH).is_empty());
}

#[tokio::test]
async fn test_switch_mid_registration_skips_old_user() {
    let h = TestHarness::new();
    let push = MockPushPlatform::new();
    let gate = push.gate_token();
    let registrar = registrar_for(&h, &push);
    let mut rx = h.controller.subscribe();

    mock_login(&h.http, "a");
    h.controller.sign_in("a@example.com", "pw").await;
    rx.recv().await.unwrap(); // bootstrap
    let for_a = rx.recv().await.unwrap();

    let attempt = {
        let registrar = registrar.clone();
        tokio::spawn(async move { registrar.handle(&for_a).await })
    };
    wait_until(|| push.token_requests().len() == 1).await;

    mock_login(&h.http, "b");
    h.controller.sign_in("b@example.com", "pw").await;
    gate.notify_one();

    assert_eq!(
        within(attempt).await.unwrap(),
        RegistrationOutcome::Skipped(SkipReason::StaleSession)
    );
    assert!(h.http.requests_to(PUSH_PATH).is_empty());
}

#[tokio::test]
async fn test_spawned_registrar_stops_when_controller_dropped() {
    let h = TestHarness::with_store(InMemorySessionStore::new());
    let push = MockPushPlatform::new();
    let registrar = registrar_for(&h, &push);
    let handle = registrar.spawn(h.controller.subscribe());

    mock_login(&h.http, "u1");
    h.controller.sign_in("u1@example.com", "pw").await;
    wait_until(|| h.http.requests_to(PUSH_PATH).len() == 1).await;

    let TestHarness { controller, .. } = h;
    drop(controller);

    within(handle).await.unwrap();
}
