// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tcr_adapters::{FakeNotifyAdapter, FakeRemoteBuildServer, ServerError};
use tcr_core::test_support::{change, personal_change, summary_of};
use tcr_core::ChangeStatus;

const INTERVAL: Duration = Duration::from_secs(60);
const INITIAL: Duration = Duration::from_secs(5);

struct Harness {
    server: FakeRemoteBuildServer,
    notifier: FakeNotifyAdapter,
    watcher: Arc<NotificationWatcher<FakeRemoteBuildServer, FakeNotifyAdapter>>,
}

fn harness() -> Harness {
    let server = FakeRemoteBuildServer::new();
    let notifier = FakeNotifyAdapter::new();
    let subscription = Subscription::standard("42", &["proj1"]);
    let watcher = Arc::new(NotificationWatcher::new(
        Arc::new(server.clone()),
        notifier.clone(),
        subscription,
        WatcherConfig { initial_delay: INITIAL, interval: INTERVAL },
    ));
    Harness { server, notifier, watcher }
}

#[tokio::test]
async fn first_poll_seeds_without_notifying() {
    let h = harness();
    h.server.set_counter(5);
    h.server.set_summary(summary_of(vec![change(1, ChangeStatus::Pending)]));

    let outcome = h.watcher.poll_once().await.unwrap();

    assert_eq!(outcome, PollOutcome::Seeded { counter: 5 });
    assert!(h.notifier.sent().is_empty());
    assert_eq!(h.watcher.state(), WatcherState::Waiting);
    let published = h.watcher.subscribe_summary().borrow().clone().unwrap();
    assert_eq!(published.changes.len(), 1);
}

#[tokio::test]
async fn counter_query_carries_the_subscription() {
    let h = harness();
    h.watcher.poll_once().await.unwrap();

    let calls = h.server.counter_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], Subscription::standard("42", &["proj1"]).serialize());
}

#[tokio::test]
async fn constant_counter_never_fetches_summary_again() {
    let h = harness();
    h.server.set_counter(7);

    assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Seeded { counter: 7 });
    for _ in 0..5 {
        assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Unchanged { counter: 7 });
    }
    assert_eq!(h.server.summary_calls(), 1);
}

#[tokio::test]
async fn counter_change_reconciles_exactly_once() {
    let h = harness();
    h.server.set_counter(1);
    h.server.set_summary(summary_of(vec![change(1, ChangeStatus::Pending)]));
    h.watcher.poll_once().await.unwrap();

    h.server.set_counter(2);
    h.server.set_summary(summary_of(vec![
        change(1, ChangeStatus::Pending),
        change(2, ChangeStatus::RunningSuccessfully),
        personal_change(3, ChangeStatus::Failed),
    ]));

    let outcome = h.watcher.poll_once().await.unwrap();
    assert_eq!(outcome, PollOutcome::Reconciled { counter: 2, new_changes: 2 });
    assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Unchanged { counter: 2 });

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "Change #2: RUNNING_SUCCESSFULLY");
    assert_eq!(sent[1].title, "Personal change #3: FAILED");
    assert_eq!(h.server.summary_calls(), 2);
}

#[tokio::test]
async fn status_transition_is_notified() {
    let h = harness();
    h.server.set_counter(1);
    h.server.set_summary(summary_of(vec![change(9, ChangeStatus::RunningSuccessfully)]));
    h.watcher.poll_once().await.unwrap();

    h.server.set_counter(2);
    h.server.set_summary(summary_of(vec![change(9, ChangeStatus::Checked)]));
    h.watcher.poll_once().await.unwrap();

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Change #9: CHECKED");
}

#[tokio::test]
async fn failed_summary_does_not_advance_baseline() {
    let h = harness();
    h.server.set_counter(1);
    h.watcher.poll_once().await.unwrap();

    h.server.set_counter(2);
    h.server.set_summary(summary_of(vec![change(4, ChangeStatus::Pending)]));
    h.server.fail_next_summary(ServerError::Transport("reset".into()));

    let err = h.watcher.poll_once().await.unwrap_err();
    assert!(matches!(err, EngineError::Server(ServerError::Transport(_))));
    assert_eq!(h.watcher.state(), WatcherState::Waiting);

    let outcome = h.watcher.poll_once().await.unwrap();
    assert_eq!(outcome, PollOutcome::Reconciled { counter: 2, new_changes: 1 });
}

#[tokio::test]
async fn counter_failure_is_retried_next_cycle() {
    let h = harness();
    h.server.set_counter(3);
    h.server.push_counter_result(Err(ServerError::Protocol("bad xml".into())));

    assert!(h.watcher.poll_once().await.is_err());
    assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Seeded { counter: 3 });
}

#[tokio::test]
async fn notifier_failure_does_not_fail_the_cycle() {
    let h = harness();
    h.server.set_counter(1);
    h.watcher.poll_once().await.unwrap();

    h.notifier.set_failing(true);
    h.server.set_counter(2);
    h.server.set_summary(summary_of(vec![change(1, ChangeStatus::Failed)]));

    let outcome = h.watcher.poll_once().await.unwrap();
    assert_eq!(outcome, PollOutcome::Reconciled { counter: 2, new_changes: 1 });
}

#[tokio::test]
async fn auth_failure_is_reported_once() {
    let h = harness();
    h.server.set_unauthorized(true);

    for _ in 0..3 {
        let err = h.watcher.poll_once().await.unwrap_err();
        assert!(err.is_auth());
    }
    assert_eq!(h.notifier.sent().len(), 1);
    assert_eq!(h.notifier.sent()[0].title, "Authentication required");

    h.server.set_unauthorized(false);
    h.watcher.poll_once().await.unwrap();
    h.server.set_unauthorized(true);
    h.watcher.poll_once().await.unwrap_err();
    assert_eq!(h.notifier.sent().len(), 2);
}

#[tokio::test]
async fn reauthentication_reseeds() {
    let h = harness();
    h.server.set_counter(1);
    h.server.set_summary(summary_of(vec![change(1, ChangeStatus::Pending)]));
    h.watcher.poll_once().await.unwrap();

    h.watcher.reauthenticated().await;
    h.server.set_counter(50);
    h.server.set_summary(summary_of(vec![change(2, ChangeStatus::Pending)]));

    assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Seeded { counter: 50 });
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn concurrent_polls_run_one_cycle_at_a_time() {
    let h = harness();
    h.server.set_counter(1);

    let (a, b) = tokio::join!(h.watcher.poll_once(), h.watcher.poll_once());
    let mut outcomes = vec![a.unwrap(), b.unwrap()];
    outcomes.sort_by_key(|o| matches!(o, PollOutcome::Unchanged { .. }));

    assert_eq!(
        outcomes,
        vec![PollOutcome::Seeded { counter: 1 }, PollOutcome::Unchanged { counter: 1 }]
    );
    assert_eq!(h.server.summary_calls(), 1);
}

#[tokio::test]
async fn dispose_stops_polling() {
    let h = harness();
    h.watcher.dispose();
    h.watcher.dispose();

    assert_eq!(h.watcher.poll_once().await.unwrap(), PollOutcome::Disposed);
    assert_eq!(h.watcher.state(), WatcherState::Disposed);
    assert!(h.server.counter_calls().is_empty());
}

// ── poll loop ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn loop_waits_for_initial_delay() {
    let h = harness();
    let handle = h.watcher.clone().spawn();

    tokio::time::sleep(INITIAL - Duration::from_millis(1)).await;
    assert!(h.server.counter_calls().is_empty());
    assert_eq!(h.watcher.state(), WatcherState::Idle);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(h.server.counter_calls().len(), 1);
    assert_eq!(h.watcher.state(), WatcherState::Waiting);

    h.watcher.dispose();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn loop_is_quiet_while_counter_is_constant() {
    let h = harness();
    h.server.set_counter(11);
    h.server.set_summary(summary_of(vec![change(1, ChangeStatus::Pending)]));
    let handle = h.watcher.clone().spawn();

    tokio::time::sleep(INITIAL + INTERVAL * 10 + Duration::from_millis(1)).await;
    h.watcher.dispose();
    handle.await.unwrap();

    assert_eq!(h.server.counter_calls().len(), 11);
    assert_eq!(h.server.summary_calls(), 1);
    assert!(h.notifier.sent().is_empty());
    assert_eq!(h.watcher.state(), WatcherState::Disposed);
}

#[tokio::test(start_paused = true)]
async fn loop_reconciles_once_per_counter_change() {
    let h = harness();
    h.server.set_counter(1);
    let handle = h.watcher.clone().spawn();

    tokio::time::sleep(INITIAL + Duration::from_millis(1)).await;
    h.server.set_counter(2);
    h.server.set_summary(summary_of(vec![change(8, ChangeStatus::Checked)]));

    tokio::time::sleep(INTERVAL * 5).await;
    h.watcher.dispose();
    handle.await.unwrap();

    assert_eq!(h.server.summary_calls(), 2);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn loop_survives_failures() {
    let h = harness();
    h.server.set_counter(1);
    h.server.push_counter_result(Err(ServerError::Transport("down".into())));
    h.server.push_counter_result(Err(ServerError::Transport("down".into())));
    let handle = h.watcher.clone().spawn();

    tokio::time::sleep(INITIAL + INTERVAL * 2 + Duration::from_millis(1)).await;
    h.watcher.dispose();
    handle.await.unwrap();

    assert_eq!(h.server.counter_calls().len(), 3);
    assert_eq!(h.server.summary_calls(), 1);
}
