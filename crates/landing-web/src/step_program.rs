#![forbid(unsafe_code)]

//! Host-driven program runner.
//!
//! [`StepProgram`] runs any [`Model`] without real timers or a real window:
//! the embedding host (a test, a replay tool, a JS shim) pushes viewport
//! widths and advances a [`DeterministicClock`] explicitly. Each timer
//! firing and each resize is delivered as one message, processed to
//! completion (update, reconcile subscriptions, render) before the next.

use core::time::Duration;
use std::collections::VecDeque;

use landing_core::{Model, SubId, Subscription, SubscriptionLedger};

use crate::DeterministicClock;
use crate::timer::TimerQueue;

/// Summary of one host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the program is still running.
    pub running: bool,
    /// Messages delivered to the model.
    pub messages_processed: usize,
    /// Whether at least one frame was rendered.
    pub rendered: bool,
}

/// Deterministic, host-driven runner for a [`Model`].
pub struct StepProgram<M: Model> {
    model: M,
    clock: DeterministicClock,
    timers: TimerQueue<M::Message>,
    ledger: SubscriptionLedger,
    resize: Option<(SubId, fn(u32) -> M::Message)>,
    width: u32,
    pending: VecDeque<M::Message>,
    last_view: Option<M::View>,
    frame_idx: u64,
    running: bool,
    initialized: bool,
}

impl<M: Model> StepProgram<M> {
    /// Create a program for a viewport `width` pixels wide.
    pub fn new(model: M, width: u32) -> Self {
        Self {
            model,
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
            ledger: SubscriptionLedger::new(),
            resize: None,
            width,
            pending: VecDeque::new(),
            last_view: None,
            frame_idx: 0,
            running: false,
            initialized: false,
        }
    }

    /// Mount: start the model's initial subscriptions and render once.
    ///
    /// Calling `init` twice, or after teardown, does nothing.
    pub fn init(&mut self) -> StepResult {
        if self.initialized {
            return self.result(0, false);
        }
        self.initialized = true;
        self.running = true;
        self.reconcile();
        let processed = self.drain_pending();
        self.render();
        self.result(processed, true)
    }

    /// Report a new viewport width.
    ///
    /// The width is always recorded, but a message is only delivered while
    /// the model has a live resize subscription.
    pub fn resize(&mut self, width: u32) -> StepResult {
        self.width = width;
        if !self.running {
            return self.result(0, false);
        }
        let Some((_, on_resize)) = self.resize else {
            return self.result(0, false);
        };
        self.pending.push_back(on_resize(width));
        let processed = self.drain_pending();
        if processed > 0 {
            self.render();
        }
        self.result(processed, processed > 0)
    }

    /// Advance the clock by `dt`, firing every timer that comes due.
    ///
    /// The clock is moved to each timer's deadline before its message is
    /// delivered, so timers armed by that message are scheduled relative to
    /// the moment they were armed.
    pub fn advance_time(&mut self, dt: Duration) -> StepResult {
        let target = self.clock.now().saturating_add(dt);
        if !self.running {
            self.clock.set(target);
            return self.result(0, false);
        }

        let mut processed = 0;
        let mut rendered = false;
        while let Some(fired) = self.timers.pop_due(target) {
            self.clock.set(fired.at);
            self.pending.push_back(fired.message);
            let delivered = self.drain_pending();
            if delivered > 0 {
                processed += delivered;
                self.render();
                rendered = true;
            }
            if !self.running {
                break;
            }
        }
        self.clock.set(target);
        self.result(processed, rendered)
    }

    /// Advance time until the model reaches `done` or `limit` elapses.
    ///
    /// Jumps straight from deadline to deadline. Returns the elapsed time if
    /// `done` was reached.
    pub fn run_until(
        &mut self,
        limit: Duration,
        mut done: impl FnMut(&M) -> bool,
    ) -> Option<Duration> {
        let start = self.clock.now();
        let end = start.saturating_add(limit);
        loop {
            if done(&self.model) {
                return Some(self.clock.now().saturating_sub(start));
            }
            let next = self.timers.next_deadline()?;
            if next > end || !self.running {
                return None;
            }
            let dt = next.saturating_sub(self.clock.now());
            self.advance_time(dt);
        }
    }

    /// Unmount: stop every subscription and drop queued messages.
    ///
    /// After teardown no timer fires and no resize reaches the model.
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        for id in self.ledger.drain() {
            self.timers.cancel(id);
        }
        self.resize = None;
        self.pending.clear();
        self.running = false;
        tracing::debug!(
            target: "landing.host",
            now_ms = self.clock.now().as_millis() as u64,
            "program torn down"
        );
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The most recently rendered view.
    #[must_use]
    pub fn view(&self) -> Option<&M::View> {
        self.last_view.as_ref()
    }

    #[must_use]
    pub const fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Timers currently armed.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub const fn has_resize_listener(&self) -> bool {
        self.resize.is_some()
    }

    /// Subscription ids currently running.
    #[must_use]
    pub fn running_subscriptions(&self) -> &[SubId] {
        self.ledger.running()
    }

    fn drain_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(msg) = self.pending.pop_front() {
            tracing::trace!(target: "landing.host", msg = ?msg, "dispatch");
            self.model.update(msg);
            processed += 1;
            self.reconcile();
        }
        processed
    }

    fn reconcile(&mut self) {
        let diff = self.ledger.reconcile(self.model.subscriptions());
        for id in diff.stop {
            self.timers.cancel(id);
            if self.resize.is_some_and(|(resize_id, _)| resize_id == id) {
                self.resize = None;
            }
        }
        let now = self.clock.now();
        for sub in diff.start {
            match sub {
                Subscription::Every {
                    id,
                    interval,
                    message,
                } => self.timers.arm_interval(id, now, interval, message),
                Subscription::After { id, delay, message } => {
                    self.timers.arm_timeout(id, now, delay, message);
                }
                Subscription::Resize { id, on_resize } => {
                    self.resize = Some((id, on_resize));
                    self.pending.push_back(on_resize(self.width));
                }
            }
        }
    }

    fn render(&mut self) {
        self.last_view = Some(self.model.view());
        self.frame_idx += 1;
    }

    fn result(&self, messages_processed: usize, rendered: bool) -> StepResult {
        StepResult {
            running: self.running,
            messages_processed,
            rendered,
        }
    }
}
