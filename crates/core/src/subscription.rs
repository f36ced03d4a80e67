// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event subscription descriptor sent with every event-counter poll.
//!
//! Serialized form: comma-joined `eventType;<scope>` tokens where scope is
//! `p:<projectId>` or `u:<userId>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side event types the watcher can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    BuildStarted,
    BuildFinished,
    BuildInterrupted,
    BuildChangedStatus,
    ChangeAdded,
    ChangeStatusChanged,
    PersonalBuildStarted,
    PersonalBuildFinished,
    PersonalBuildChangedStatus,
    PersonalBuildAdded,
    NotificationRulesChanged,
}

crate::simple_display! {
    EventType {
        BuildStarted => "BUILD_STARTED",
        BuildFinished => "BUILD_FINISHED",
        BuildInterrupted => "BUILD_INTERRUPTED",
        BuildChangedStatus => "BUILD_CHANGED_STATUS",
        ChangeAdded => "CHANGE_ADDED",
        ChangeStatusChanged => "CHANGE_STATUS_CHANGED",
        PersonalBuildStarted => "PERSONAL_BUILD_STARTED",
        PersonalBuildFinished => "PERSONAL_BUILD_FINISHED",
        PersonalBuildChangedStatus => "PERSONAL_BUILD_CHANGED_STATUS",
        PersonalBuildAdded => "PERSONAL_BUILD_ADDED",
        NotificationRulesChanged => "NOTIFICATION_RULES_CHANGED",
    }
}

/// Which entity an event is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventScope {
    Project(String),
    User(String),
}

impl fmt::Display for EventScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventScope::Project(id) => write!(f, "p:{id}"),
            EventScope::User(id) => write!(f, "u:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionEvent {
    pub event_type: EventType,
    pub scope: EventScope,
}

impl fmt::Display for SubscriptionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.event_type, self.scope)
    }
}

const PROJECT_EVENTS: &[EventType] = &[
    EventType::BuildStarted,
    EventType::BuildFinished,
    EventType::BuildInterrupted,
    EventType::BuildChangedStatus,
    EventType::ChangeAdded,
    EventType::ChangeStatusChanged,
];

const USER_EVENTS: &[EventType] = &[
    EventType::PersonalBuildStarted,
    EventType::PersonalBuildFinished,
    EventType::PersonalBuildChangedStatus,
    EventType::PersonalBuildAdded,
    EventType::NotificationRulesChanged,
];

/// Ordered list of subscribed events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    events: Vec<SubscriptionEvent>,
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default subscription: project-scoped build/change events for each
    /// visible project, then user-scoped personal-build events.
    pub fn standard<S: AsRef<str>>(user_id: &str, project_ids: &[S]) -> Self {
        let mut subscription = Self::new();
        for project in project_ids {
            for event_type in PROJECT_EVENTS {
                subscription.add(*event_type, EventScope::Project(project.as_ref().to_string()));
            }
        }
        for event_type in USER_EVENTS {
            subscription.add(*event_type, EventScope::User(user_id.to_string()));
        }
        subscription
    }

    /// Add an event unless it is already subscribed
    pub fn add(&mut self, event_type: EventType, scope: EventScope) {
        let event = SubscriptionEvent { event_type, scope };
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[SubscriptionEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn serialize(&self) -> String {
        self.events.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
