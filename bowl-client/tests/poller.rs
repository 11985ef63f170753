// bowl-client/tests/poller.rs
// New-order badge polling

mod common;

use std::sync::Arc;
use std::time::Duration;

use bowl_client::notify::{Level, MemoryNotifier};
use bowl_client::poller::PENDING_COUNT_PATH;
use bowl_client::PendingOrderPoller;
use common::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const PERIOD: Duration = Duration::from_secs(30);

#[tokio::test(start_paused = true)]
async fn first_poll_is_immediate_and_only_sets_baseline() {
    let http = ScriptedHttp::counts(&[4]);
    let notifier = MemoryNotifier::new();
    let cancel = CancellationToken::new();
    let handle = PendingOrderPoller::new(http.clone(), Arc::new(notifier.clone()), PERIOD)
        .spawn(cancel.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(http.calls(), 1);
    assert_eq!(notifier.badge_count(), None);
    assert!(notifier.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn badge_fires_on_increase_only() {
    let http = ScriptedHttp::counts(&[2, 2, 5]);
    let notifier = MemoryNotifier::new();
    let cancel = CancellationToken::new();
    let handle = PendingOrderPoller::new(http.clone(), Arc::new(notifier.clone()), PERIOD)
        .spawn(cancel.clone());

    // ticks at 0s, 30s and 60s
    tokio::time::sleep(Duration::from_secs(75)).await;
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(http.calls(), 3);
    assert_eq!(notifier.badge_count(), Some(3));
    let toasts = notifier.notifications();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, Level::Info);
    assert!(toasts[0].message.starts_with("3 new order(s)"));
}

#[tokio::test(start_paused = true)]
async fn failed_poll_keeps_baseline() {
    let http = ScriptedHttp::new([
        Step::Reply(json!({"count": 2})),
        Step::Fail,
        Step::Reply(json!({"count": 4})),
    ]);
    let notifier = MemoryNotifier::new();
    let cancel = CancellationToken::new();
    let handle = PendingOrderPoller::new(http.clone(), Arc::new(notifier.clone()), PERIOD)
        .spawn(cancel.clone());

    tokio::time::sleep(Duration::from_secs(75)).await;
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(http.calls(), 3);
    assert_eq!(notifier.badge_count(), Some(2));
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_polling() {
    let http = ScriptedHttp::counts(&[1, 1, 1, 1, 1]);
    let notifier = MemoryNotifier::new();
    let cancel = CancellationToken::new();
    let handle = PendingOrderPoller::new(http.clone(), Arc::new(notifier.clone()), PERIOD)
        .spawn(cancel.clone());

    tokio::time::sleep(Duration::from_secs(45)).await;
    cancel.cancel();
    handle.await.unwrap();
    let seen = http.calls();
    assert_eq!(seen, 2);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(http.calls(), seen);
}

#[tokio::test]
async fn check_reads_pending_count_endpoint() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(PENDING_COUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1, "status": "Pending"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path(PENDING_COUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3, "status": "Pending"})))
        .with_priority(2)
        .mount(&env.server)
        .await;

    let mut poller = PendingOrderPoller::new(env.http.clone(), Arc::new(env.notifier.clone()), PERIOD);
    assert_eq!(poller.check().await.unwrap(), None);
    assert_eq!(poller.watcher().baseline(), Some(1));
    assert_eq!(poller.check().await.unwrap(), Some(2));
    assert_eq!(env.notifier.badge_count(), Some(2));
}

#[tokio::test]
async fn failed_check_leaves_baseline_unset() {
    let env = setup().await;
    Mock::given(method("GET"))
        .and(path(PENDING_COUNT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&env.server)
        .await;

    let mut poller = PendingOrderPoller::new(env.http.clone(), Arc::new(env.notifier.clone()), PERIOD);
    assert!(poller.check().await.is_err());
    assert_eq!(poller.watcher().baseline(), None);
    assert!(env.notifier.notifications().is_empty());
}
