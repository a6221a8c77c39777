//! Handler integration tests
//!
//! Drives raw change events through the router against the in-memory
//! store and asserts on what the recording gateway saw.
//!
//! Run with: cargo test -p integration-tests --test handler_tests

use serde_json::json;

use integration_tests::{
    build_router, plan, profile, raw_event, subscription, tokenless_profile, InMemoryStore,
    RecordingGateway,
};
use rally_core::TriggerKind;
use rally_reactor::{HandlerOutcome, ReactorError, SkipReason};

// ============================================================================
// SubscriptionCreated
// ============================================================================

#[tokio::test]
async fn test_subscription_created_notifies_owner_exactly_once() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_profile(profile("owner", "owner-token"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/p1/subscriptions/ana",
            None,
            Some(json!({ "displayName": "Ana" })),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Dispatched(1));
    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "owner-token");
    assert_eq!(sent[0].notification.title, "New subscriber");
    assert_eq!(sent[0].notification.body, "Ana joined \"Hiking\"");
    assert_eq!(sent[0].data.get("planId").map(String::as_str), Some("p1"));
    assert_eq!(sent[0].data.get("userId").map(String::as_str), Some("ana"));
}

#[tokio::test]
async fn test_subscription_created_missing_plan_sends_nothing() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/ghost/subscriptions/ana",
            None,
            Some(json!({ "displayName": "Ana" })),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Skipped(SkipReason::MissingPlan));
    assert!(gateway.sent().is_empty());
}

#[tokio::test]
async fn test_subscription_created_tokenless_owner_sends_nothing() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_profile(tokenless_profile("owner"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/p1/subscriptions/ana",
            None,
            Some(json!({ "displayName": "Ana" })),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Skipped(SkipReason::MissingToken));
    assert!(gateway.sent().is_empty());
}

#[tokio::test]
async fn test_subscription_created_anonymous_subscriber_uses_placeholder() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_profile(profile("owner", "owner-token"));

    let router = build_router(&store, &gateway);
    router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/p1/subscriptions/ana",
            None,
            Some(json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(
        gateway.sent()[0].notification.body,
        "A user joined \"Hiking\""
    );
}

// ============================================================================
// SubscriptionRemoved
// ============================================================================

#[tokio::test]
async fn test_subscription_removed_notifies_owner() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_profile(profile("owner", "owner-token"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Delete,
            "plans/p1/subscriptions/ana",
            Some(json!({ "displayName": "Ana" })),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Dispatched(1));
    let sent = gateway.sent();
    assert_eq!(sent[0].notification.title, "Subscriber left");
    assert_eq!(sent[0].notification.body, "Ana left \"Hiking\"");
}

// ============================================================================
// PlanUpdated
// ============================================================================

fn plan_doc(title: &str, scheduled_at: &str, location: &str) -> serde_json::Value {
    json!({
        "title": title,
        "scheduledAt": scheduled_at,
        "location": location,
        "ownerId": "owner"
    })
}

#[tokio::test]
async fn test_plan_updated_location_only_names_only_location() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_subscription(subscription("p1", "u1", "Ana"));
    store.add_subscription(subscription("p1", "u2", "Ben"));
    store.add_profile(profile("u1", "t1"));
    store.add_profile(profile("u2", "t2"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Update,
            "plans/p1",
            Some(plan_doc("Hiking", "2026-06-01T10:00:00Z", "Park")),
            Some(plan_doc("Hiking", "2026-06-01T10:00:00Z", "Lake")),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Dispatched(2));
    let sent = gateway.sent();
    assert_eq!(sent.len(), 2);
    for payload in &sent {
        assert_eq!(payload.notification.title, "Plan updated");
        assert_eq!(payload.notification.body, "\"Hiking\" changed: location");
    }
    let mut tokens = gateway.sent_tokens();
    tokens.sort();
    assert_eq!(tokens, vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_plan_updated_lists_changed_fields_in_fixed_order() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Climbing", "owner", 24));
    store.add_subscription(subscription("p1", "u1", "Ana"));
    store.add_profile(profile("u1", "t1"));

    let router = build_router(&store, &gateway);
    // Title changes last in the body even though the document lists it first
    router
        .dispatch(&raw_event(
            TriggerKind::Update,
            "plans/p1",
            Some(plan_doc("Hiking", "2026-06-01T10:00:00Z", "Park")),
            Some(plan_doc("Climbing", "2026-06-02T10:00:00Z", "Park")),
        ))
        .await
        .unwrap();

    assert_eq!(
        gateway.sent()[0].notification.body,
        "\"Climbing\" changed: schedule, title"
    );
}

#[tokio::test]
async fn test_plan_updated_unwatched_change_is_silent() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_plan(plan("p1", "Hiking", "owner", 24));
    store.add_subscription(subscription("p1", "u1", "Ana"));
    store.add_profile(profile("u1", "t1"));

    let router = build_router(&store, &gateway);
    // Same watched fields, different unwatched extra field
    let before = json!({
        "title": "Hiking", "scheduledAt": "2026-06-01T10:00:00Z",
        "location": "Park", "ownerId": "owner", "viewCount": 3
    });
    let after = json!({
        "title": "Hiking", "scheduledAt": "2026-06-01T10:00:00Z",
        "location": "Park", "ownerId": "owner", "viewCount": 4
    });
    let outcome = router
        .dispatch(&raw_event(TriggerKind::Update, "plans/p1", Some(before), Some(after)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        HandlerOutcome::Skipped(SkipReason::NoWatchedChanges)
    );
    assert!(gateway.sent().is_empty());
}

// ============================================================================
// PlanDeleted
// ============================================================================

#[tokio::test]
async fn test_plan_deleted_skips_tokenless_subscribers_without_error() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_subscription(subscription("p1", "u1", "Ana"));
    store.add_subscription(subscription("p1", "u2", "Ben"));
    store.add_subscription(subscription("p1", "u3", "Cal"));
    store.add_profile(profile("u1", "t1"));
    store.add_profile(tokenless_profile("u2"));
    // u3 has no profile at all

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Delete,
            "plans/p1",
            Some(plan_doc("Hiking", "2026-06-01T10:00:00Z", "Park")),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Dispatched(1));
    assert_eq!(gateway.sent_tokens(), vec!["t1"]);
    assert_eq!(gateway.sent()[0].notification.title, "Plan deleted");
}

// ============================================================================
// ChatMessageCreated
// ============================================================================

#[tokio::test]
async fn test_chat_message_excludes_sender_even_when_subscribed() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_subscription(subscription("p1", "sender", "Ana"));
    store.add_subscription(subscription("p1", "u2", "Ben"));
    store.add_profile(profile("sender", "sender-token"));
    store.add_profile(profile("u2", "t2"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/p1/chatMessages/m1",
            None,
            Some(json!({
                "senderId": "sender",
                "senderName": "Ana",
                "message": "see you there"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, HandlerOutcome::Dispatched(1));
    assert_eq!(gateway.sent_tokens(), vec!["t2"]);
    let payload = &gateway.sent()[0];
    assert_eq!(payload.notification.title, "New message");
    assert_eq!(payload.notification.body, "Ana: see you there");
    assert_eq!(
        payload.data.get("click_action").map(String::as_str),
        Some("FLUTTER_NOTIFICATION_CLICK")
    );
    assert_eq!(
        payload.data.get("type").map(String::as_str),
        Some("chat_message")
    );
}

#[tokio::test]
async fn test_chat_message_tolerates_per_token_gateway_failure() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    gateway.fail_token("bad");
    store.add_subscription(subscription("p1", "u1", "Ana"));
    store.add_subscription(subscription("p1", "u2", "Ben"));
    store.add_profile(profile("u1", "bad"));
    store.add_profile(profile("u2", "t2"));

    let router = build_router(&store, &gateway);
    let outcome = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "plans/p1/chatMessages/m1",
            None,
            Some(json!({ "senderId": "outsider", "message": "hello" })),
        ))
        .await
        .unwrap();

    // Both deliveries were attempted; only one landed
    assert_eq!(outcome, HandlerOutcome::Dispatched(2));
    assert_eq!(gateway.sent_tokens(), vec!["t2"]);
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_unrouted_event_is_an_explicit_error() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();

    let router = build_router(&store, &gateway);
    let err = router
        .dispatch(&raw_event(
            TriggerKind::Create,
            "users/u1",
            None,
            Some(json!({})),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ReactorError::Unrouted(_)));
    assert!(gateway.sent().is_empty());
}

#[tokio::test]
async fn test_missing_snapshot_is_a_decode_error() {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();

    let router = build_router(&store, &gateway);
    let err = router
        .dispatch(&raw_event(TriggerKind::Update, "plans/p1", None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, ReactorError::Decode(_)));
}
