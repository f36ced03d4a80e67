// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-server notification watcher.
//!
//! Polls a cheap event counter on a fixed interval and only fetches the full
//! summary when the counter moves. New changes (by [`Change::key`]) are
//! surfaced once through the notify adapter; the latest summary is
//! published on a watch channel.
//!
//! At most one poll cycle runs at a time. Disposal is a flag checked before
//! each phase; an in-flight server call is not cancelled, its result is
//! dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tcr_adapters::{Notification, NotifyAdapter, RemoteBuildServer};
use tcr_core::{Change, Subscription, Summary};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::change_storage::ChangeStorage;
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Created, waiting out the initial delay
    Idle,
    /// Between polls
    Waiting,
    /// Reading the event counter
    Fetching,
    /// Counter moved; fetching the summary and diffing it
    Reconciling,
    Disposed,
}

tcr_core::simple_display! {
    WatcherState {
        Idle => "idle",
        Waiting => "waiting",
        Fetching => "fetching",
        Reconciling => "reconciling",
        Disposed => "disposed",
    }
}

/// Result of one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// First successful observation; summary stored without notifying
    Seeded { counter: i64 },
    Unchanged { counter: i64 },
    Reconciled { counter: i64, new_changes: usize },
    /// Watcher was disposed before or during the cycle
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherConfig {
    pub initial_delay: Duration,
    pub interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { initial_delay: Duration::from_secs(5), interval: Duration::from_secs(60) }
    }
}

impl WatcherConfig {
    /// Timings from `TCR_POLL_INITIAL_DELAY_MS` / `TCR_POLL_INTERVAL_MS`
    pub fn from_env() -> Self {
        Self {
            initial_delay: crate::env::poll_initial_delay(),
            interval: crate::env::poll_interval(),
        }
    }
}

/// State owned by the active poll cycle
#[derive(Debug, Default)]
struct CycleState {
    storage: ChangeStorage,
    /// Last counter value that was fully reconciled; `None` until seeded
    last_counter: Option<i64>,
    auth_reported: bool,
}

pub struct NotificationWatcher<S, N> {
    server: Arc<S>,
    notifier: N,
    subscription: Subscription,
    config: WatcherConfig,
    cycle: tokio::sync::Mutex<CycleState>,
    state: Mutex<WatcherState>,
    disposed: AtomicBool,
    summary_tx: watch::Sender<Option<Arc<Summary>>>,
}

impl<S, N> NotificationWatcher<S, N>
where
    S: RemoteBuildServer,
    N: NotifyAdapter,
{
    pub fn new(
        server: Arc<S>,
        notifier: N,
        subscription: Subscription,
        config: WatcherConfig,
    ) -> Self {
        let (summary_tx, _) = watch::channel(None);
        Self {
            server,
            notifier,
            subscription,
            config,
            cycle: tokio::sync::Mutex::new(CycleState::default()),
            state: Mutex::new(WatcherState::Idle),
            disposed: AtomicBool::new(false),
            summary_tx,
        }
    }

    pub fn state(&self) -> WatcherState {
        *self.state.lock()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Latest summary seen by a successful cycle
    pub fn subscribe_summary(&self) -> watch::Receiver<Option<Arc<Summary>>> {
        self.summary_tx.subscribe()
    }

    /// Stop polling. Idempotent; the loop exits at its next check.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            tracing::info!("watcher disposed");
        }
        *self.state.lock() = WatcherState::Disposed;
    }

    /// Forget seen changes and the counter baseline after a credential
    /// change; the next successful poll seeds again.
    pub async fn reauthenticated(&self) {
        let mut cycle = self.cycle.lock().await;
        cycle.storage.reset();
        cycle.last_counter = None;
        cycle.auth_reported = false;
        tracing::info!("watcher reset after re-authentication");
    }

    /// Run the poll loop on a background task
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(&self) {
        tracing::info!(
            initial_delay_ms = self.config.initial_delay.as_millis() as u64,
            interval_ms = self.config.interval.as_millis() as u64,
            "watcher started"
        );
        tokio::time::sleep(self.config.initial_delay).await;

        while !self.is_disposed() {
            match self.poll_once().await {
                Ok(outcome) => tracing::debug!(?outcome, "poll cycle"),
                // Failures leave the state untouched; the next tick retries
                Err(e) => tracing::warn!(error = %e, "poll cycle failed"),
            }
            if self.is_disposed() {
                break;
            }
            tokio::time::sleep(self.config.interval).await;
        }
        tracing::info!("watcher stopped");
    }

    /// One fetch/reconcile cycle. Waits for any cycle already in flight.
    pub async fn poll_once(&self) -> Result<PollOutcome, EngineError> {
        let mut cycle = self.cycle.lock().await;
        if self.is_disposed() {
            return Ok(PollOutcome::Disposed);
        }

        self.set_state(WatcherState::Fetching);
        let result = self.run_cycle(&mut cycle).await;
        self.set_state(WatcherState::Waiting);

        match &result {
            Ok(_) => cycle.auth_reported = false,
            Err(EngineError::AuthenticationRequired) if !cycle.auth_reported => {
                cycle.auth_reported = true;
                tracing::warn!("build server rejected credentials");
                let notification = Notification::new(
                    "Authentication required",
                    "Sign in to the build server again to resume notifications.",
                );
                if let Err(e) = self.notifier.notify(&notification).await {
                    tracing::warn!(error = %e, "failed to report authentication failure");
                }
            }
            Err(_) => {}
        }
        result
    }

    async fn run_cycle(&self, cycle: &mut CycleState) -> Result<PollOutcome, EngineError> {
        let counter = self.server.total_events(&self.subscription.serialize()).await?;
        if self.is_disposed() {
            return Ok(PollOutcome::Disposed);
        }

        let Some(last) = cycle.last_counter else {
            let summary = self.server.summary().await?;
            if self.is_disposed() {
                return Ok(PollOutcome::Disposed);
            }
            cycle.storage.store_new_changes(summary.all_changes());
            cycle.last_counter = Some(counter);
            tracing::info!(counter, changes = cycle.storage.len(), "watcher seeded");
            self.publish(summary);
            return Ok(PollOutcome::Seeded { counter });
        };
        if last == counter {
            return Ok(PollOutcome::Unchanged { counter });
        }

        self.set_state(WatcherState::Reconciling);
        let summary = self.server.summary().await?;
        if self.is_disposed() {
            return Ok(PollOutcome::Disposed);
        }
        let new_changes = cycle.storage.extract_new_changes_from_summary(&summary);
        cycle.storage.store_new_changes(&new_changes);
        // Baseline only advances once the summary for it was stored
        cycle.last_counter = Some(counter);
        tracing::info!(from = last, to = counter, new = new_changes.len(), "reconciled summary");
        self.publish(summary);

        for change in &new_changes {
            if let Err(e) = self.notifier.notify(&notification_for(change)).await {
                tracing::warn!(change = change.id, error = %e, "notification failed");
            }
        }
        Ok(PollOutcome::Reconciled { counter, new_changes: new_changes.len() })
    }

    fn publish(&self, summary: Summary) {
        self.summary_tx.send_replace(Some(Arc::new(summary)));
    }

    fn set_state(&self, state: WatcherState) {
        let mut current = self.state.lock();
        if !self.is_disposed() {
            *current = state;
        }
    }
}

fn notification_for(change: &Change) -> Notification {
    let title = if change.is_personal {
        format!("Personal change #{}: {}", change.id, change.status)
    } else {
        format!("Change #{}: {}", change.id, change.status)
    };
    let body = if change.description.is_empty() {
        format!("{} build(s)", change.builds.len())
    } else {
        change.description.clone()
    };
    Notification::new(title, body)
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
