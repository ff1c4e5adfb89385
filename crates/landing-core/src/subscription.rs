#![forbid(unsafe_code)]

//! Declarative subscriptions to timers and viewport resizes.
//!
//! Models never start or cancel timers themselves. Instead
//! [`Model::subscriptions`](crate::program::Model::subscriptions) returns the
//! set that should be live for the current state, and the host reconciles it
//! after every update:
//!
//! 1. Ids that are declared but not running are started.
//! 2. Ids that are running but no longer declared are stopped.
//! 3. Ids present on both sides are left untouched (a running interval keeps
//!    its cadence, a pending timeout keeps its deadline).
//!
//! Because a subscription is released as soon as the state stops declaring
//! it, ownership of every timer and listener stays with the model's state
//! and teardown is a single [`SubscriptionLedger::drain`].

use core::time::Duration;
use std::collections::HashSet;

/// A unique identifier for a subscription.
pub type SubId = u64;

/// One live source of messages.
#[derive(Debug, Clone)]
pub enum Subscription<M> {
    /// Deliver `message` every `interval`, first after one full interval.
    Every {
        id: SubId,
        interval: Duration,
        message: M,
    },
    /// Deliver `message` once, `delay` after the subscription starts.
    After {
        id: SubId,
        delay: Duration,
        message: M,
    },
    /// Deliver the current viewport width on start and on every resize.
    Resize { id: SubId, on_resize: fn(u32) -> M },
}

impl<M> Subscription<M> {
    #[must_use]
    pub const fn id(&self) -> SubId {
        match self {
            Self::Every { id, .. } | Self::After { id, .. } | Self::Resize { id, .. } => *id,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Every { .. } => "every",
            Self::After { .. } => "after",
            Self::Resize { .. } => "resize",
        }
    }
}

/// What the host has to do to bring the running set in line.
#[derive(Debug)]
pub struct SubscriptionDiff<M> {
    pub start: Vec<Subscription<M>>,
    pub stop: Vec<SubId>,
}

impl<M> SubscriptionDiff<M> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.stop.is_empty()
    }
}

/// Tracks which subscription ids a host currently has running.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionLedger {
    running: Vec<SubId>,
}

impl SubscriptionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids currently running, in start order.
    #[must_use]
    pub fn running(&self) -> &[SubId] {
        &self.running
    }

    #[must_use]
    pub fn is_running(&self, id: SubId) -> bool {
        self.running.contains(&id)
    }

    /// Diff `declared` against the running set and record the result as the
    /// new running set. Duplicate declared ids keep their first occurrence.
    pub fn reconcile<M>(&mut self, declared: Vec<Subscription<M>>) -> SubscriptionDiff<M> {
        let mut seen = HashSet::with_capacity(declared.len());
        let declared: Vec<Subscription<M>> = declared
            .into_iter()
            .filter(|sub| seen.insert(sub.id()))
            .collect();

        let stop: Vec<SubId> = self
            .running
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        self.running.retain(|id| seen.contains(id));

        let mut start = Vec::new();
        for sub in declared {
            if self.running.contains(&sub.id()) {
                continue;
            }
            tracing::debug!(
                target: "landing.host",
                sub_id = sub.id(),
                kind = sub.kind(),
                "subscription started"
            );
            self.running.push(sub.id());
            start.push(sub);
        }
        for id in &stop {
            tracing::debug!(target: "landing.host", sub_id = *id, "subscription stopped");
        }

        SubscriptionDiff { start, stop }
    }

    /// Forget every running id, returning them for the host to stop.
    pub fn drain(&mut self) -> Vec<SubId> {
        let ids = std::mem::take(&mut self.running);
        if !ids.is_empty() {
            tracing::debug!(
                target: "landing.host",
                count = ids.len(),
                "all subscriptions stopped"
            );
        }
        ids
    }
}
