#![forbid(unsafe_code)]

//! `landing-web` provides a host-driven backend for the landing orchestrator.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes viewport widths.
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   timers fire only when the clock passes their deadline.
//! - **No blocking / no threads**: the same model that runs in the browser
//!   runs here step by step, which is what the scenario tests rely on.
//!
//! This crate does not bind to `wasm-bindgen`; `landing-wasm` wraps the core
//! model with browser timers and the DOM.

pub mod random;
pub mod step_program;
pub mod timer;

use core::time::Duration;

pub use random::{ScriptedRandom, XorShiftRandom};
pub use step_program::{StepProgram, StepResult};
pub use timer::{Fired, TimerQueue};

use landing_core::{LandingConfig, LandingConfigError, Orchestrator, RandomSource};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Build an initialized landing program for a viewport `width` pixels wide.
///
/// Fails if `config` does not validate.
pub fn landing_program<R>(
    config: LandingConfig,
    rng: R,
    width: u32,
) -> Result<StepProgram<Orchestrator>, LandingConfigError>
where
    R: RandomSource + 'static,
{
    let mut program = StepProgram::new(Orchestrator::new(config, Box::new(rng))?, width);
    program.init();
    Ok(program)
}
