#![forbid(unsafe_code)]

//! Simulated load progress.
//!
//! [`ProgressSimulator`] advances a [`LoadProgress`] by one random increment
//! per tick until it reaches 100, at which point the value is pinned and the
//! simulator reports completion exactly once. Randomness comes from a
//! [`RandomSource`] so hosts and tests can substitute their own.
//!
//! The number of ticks to completion depends on the drawn increments and is
//! not part of any contract.

use core::fmt;

/// Upper bound (exclusive) of a single progress increment.
pub const DEFAULT_MAX_INCREMENT: f64 = 15.0;

/// Pseudo-random number source producing values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Load progress as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct LoadProgress(f64);

impl LoadProgress {
    pub const ZERO: Self = Self(0.0);
    pub const COMPLETE: Self = Self(100.0);

    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }
}

impl fmt::Display for LoadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Result of a single simulator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Progress moved (possibly by zero) and is still below 100.
    Advanced { value: f64, increment: f64 },
    /// This tick reached 100. Reported once per simulator.
    Completed,
    /// The simulator had already completed; nothing changed.
    Idle,
}

/// Drives [`LoadProgress`] from random increments.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    progress: LoadProgress,
    max_increment: f64,
}

impl ProgressSimulator {
    /// Create a simulator at 0% with increments drawn from `[0, max_increment)`.
    ///
    /// A non-finite or non-positive `max_increment` falls back to
    /// [`DEFAULT_MAX_INCREMENT`] so progress can only move forward.
    #[must_use]
    pub fn new(max_increment: f64) -> Self {
        let max_increment = if max_increment.is_finite() && max_increment > 0.0 {
            max_increment
        } else {
            tracing::warn!(
                target: "landing.progress",
                max_increment,
                fallback = DEFAULT_MAX_INCREMENT,
                "unusable max increment replaced"
            );
            DEFAULT_MAX_INCREMENT
        };
        Self {
            progress: LoadProgress::ZERO,
            max_increment,
        }
    }

    #[inline]
    #[must_use]
    pub const fn progress(&self) -> LoadProgress {
        self.progress
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    /// Draw one increment and apply it.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.is_complete() {
            return TickOutcome::Idle;
        }

        let unit = sanitize_unit(rng.next_unit());
        let increment = unit * self.max_increment;
        let next = self.progress.0 + increment;

        if next >= 100.0 {
            self.progress = LoadProgress::COMPLETE;
            tracing::debug!(
                target: "landing.progress",
                increment = increment,
                "load progress complete"
            );
            return TickOutcome::Completed;
        }

        self.progress = LoadProgress(next);
        tracing::trace!(
            target: "landing.progress",
            value = next,
            increment = increment,
            "load progress tick"
        );
        TickOutcome::Advanced {
            value: next,
            increment,
        }
    }
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INCREMENT)
    }
}

// A source that strays outside [0, 1) must not break monotonicity or the clamp.
fn sanitize_unit(unit: f64) -> f64 {
    if unit.is_nan() || unit < 0.0 {
        0.0
    } else if unit >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        unit
    }
}

/// Loading caption selected by progress threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCaption {
    /// `< 30`
    Detecting,
    /// `30..60`
    Optimizing,
    /// `60..90`
    AlmostReady,
    /// `>= 90`
    Ready,
}

impl StatusCaption {
    #[must_use]
    pub fn for_progress(progress: LoadProgress) -> Self {
        let p = progress.value();
        if p < 30.0 {
            Self::Detecting
        } else if p < 60.0 {
            Self::Optimizing
        } else if p < 90.0 {
            Self::AlmostReady
        } else {
            Self::Ready
        }
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Detecting => "Detecting your device...",
            Self::Optimizing => "Optimizing experience...",
            Self::AlmostReady => "Almost ready...",
            Self::Ready => "Ready to go!",
        }
    }
}
