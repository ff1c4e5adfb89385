#![forbid(unsafe_code)]

//! Timer queue driven by an explicit clock.
//!
//! Timers never fire on their own: the host asks for the next timer due at
//! or before some instant with [`TimerQueue::pop_due`]. Due timers come out
//! in deadline order; timers sharing a deadline come out in the order they
//! were (re)armed. An interval is re-armed one period after the deadline it
//! just fired at, so its cadence does not drift with host stepping.

use core::time::Duration;

use landing_core::SubId;

/// Intervals shorter than this are clamped, matching browser timer floors.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct TimerEntry<M> {
    id: SubId,
    deadline: Duration,
    period: Option<Duration>,
    seq: u64,
    message: M,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<M> {
    pub id: SubId,
    /// The deadline it fired at.
    pub at: Duration,
    pub message: M,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<M> {
    entries: Vec<TimerEntry<M>>,
    next_seq: u64,
}

impl<M> Default for TimerQueue<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<M: Clone> TimerQueue<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `message` every `period`, first at `now + period`.
    pub fn arm_interval(&mut self, id: SubId, now: Duration, period: Duration, message: M) {
        let period = period.max(MIN_INTERVAL);
        self.insert(id, now.saturating_add(period), Some(period), message);
    }

    /// Fire `message` once at `now + delay`.
    pub fn arm_timeout(&mut self, id: SubId, now: Duration, delay: Duration, message: M) {
        self.insert(id, now.saturating_add(delay), None, message);
    }

    /// Remove the timer with `id`. Returns `false` if none was armed.
    pub fn cancel(&mut self, id: SubId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    /// Pop the earliest timer due at or before `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<M>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= until)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(index, _)| index)?;

        let at = self.entries[index].deadline;
        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                entry.deadline = at.saturating_add(period);
                entry.seq = seq;
                Some(Fired {
                    id: entry.id,
                    at,
                    message: entry.message.clone(),
                })
            }
            None => {
                let entry = self.entries.remove(index);
                Some(Fired {
                    id: entry.id,
                    at,
                    message: entry.message,
                })
            }
        }
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    #[must_use]
    pub fn contains(&self, id: SubId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, id: SubId, deadline: Duration, period: Option<Duration>, message: M) {
        // Re-arming an id replaces the old timer.
        self.cancel(id);
        let seq = self.bump_seq();
        self.entries.push(TimerEntry {
            id,
            deadline,
            period,
            seq,
            message,
        });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
