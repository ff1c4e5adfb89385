#![forbid(unsafe_code)]

//! The experience orchestrator: loading → confirming → embedded.
//!
//! The orchestrator composes the viewport classifier, the progress
//! simulator and the transition controller. Its only inputs are the four
//! [`LandingMsg`] variants, all produced by subscriptions it declares for
//! itself:
//!
//! | Subscription | Live while | Message |
//! |---|---|---|
//! | [`VIEWPORT_SUB`] | not embedded | `Resized(width)` |
//! | [`PROGRESS_SUB`] | loading, progress < 100 | `ProgressTick` |
//! | [`SETTLE_SUB`] | loading, progress = 100 | `LoadSettled` |
//! | [`CONFIRM_SUB`] | confirming | `ConfirmElapsed` |
//!
//! Completing progress removes the interval and declares the settle timeout
//! in the same update, so the confirm dwell can only be armed after the
//! completion tick has run.

use crate::config::{LandingConfig, LandingConfigError};
use crate::destination::{Destination, Destinations};
use crate::phase::{TransitionController, TransitionPhase};
use crate::program::Model;
use crate::progress::{LoadProgress, ProgressSimulator, RandomSource, TickOutcome};
use crate::subscription::{SubId, Subscription};
use crate::view::{View, render};
use crate::viewport::{ViewportClass, classify_with};

pub const VIEWPORT_SUB: SubId = 1;
pub const PROGRESS_SUB: SubId = 2;
pub const SETTLE_SUB: SubId = 3;
pub const CONFIRM_SUB: SubId = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingMsg {
    /// Viewport measured (on mount) or resized.
    Resized(u32),
    /// Progress timer fired.
    ProgressTick,
    /// Settle delay after progress completion elapsed.
    LoadSettled,
    /// Confirm dwell elapsed.
    ConfirmElapsed,
}

/// State machine behind the landing screen.
pub struct Orchestrator {
    config: LandingConfig,
    destinations: Destinations,
    class: ViewportClass,
    width: Option<u32>,
    simulator: ProgressSimulator,
    transition: TransitionController,
    rng: Box<dyn RandomSource>,
}

impl Orchestrator {
    /// Build an orchestrator in `Loading` at 0%.
    ///
    /// `config` is validated first: a non-positive increment would let
    /// progress run backwards, and a NaN one would never complete.
    pub fn new(
        config: LandingConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, LandingConfigError> {
        config.validate()?;
        let destinations = config.destinations();
        let simulator = ProgressSimulator::new(config.max_increment);
        Ok(Self {
            config,
            destinations,
            class: ViewportClass::default(),
            width: None,
            simulator,
            transition: TransitionController::new(),
            rng,
        })
    }

    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    #[must_use]
    pub const fn viewport_class(&self) -> ViewportClass {
        self.class
    }

    /// Last width observed, `None` before the first measurement.
    #[must_use]
    pub const fn last_width(&self) -> Option<u32> {
        self.width
    }

    #[must_use]
    pub const fn progress(&self) -> LoadProgress {
        self.simulator.progress()
    }

    /// Destination selected on entering `Embedded`.
    #[must_use]
    pub fn destination(&self) -> Option<&Destination> {
        self.transition.destination()
    }

    fn on_resize(&mut self, width: u32) {
        if self.phase().is_terminal() {
            tracing::trace!(target: "landing.viewport", width, "resize ignored after embed");
            return;
        }
        self.width = Some(width);
        let class = classify_with(width, self.config.breakpoint_px);
        if class != self.class {
            tracing::debug!(
                target: "landing.viewport",
                width,
                class = %class,
                "viewport class changed"
            );
        }
        self.class = class;
    }

    fn on_progress_tick(&mut self) {
        if self.phase() != TransitionPhase::Loading {
            return;
        }
        if let TickOutcome::Completed = self.simulator.tick(&mut self.rng) {
            tracing::debug!(
                target: "landing.phase",
                settle_ms = self.config.settle_delay_ms,
                "loading complete, settling"
            );
        }
    }

    fn on_settled(&mut self) {
        if !self.simulator.is_complete() {
            return;
        }
        self.transition.begin_confirming();
    }

    fn on_confirm_elapsed(&mut self) {
        self.transition.enter_embedded(self.class, &self.destinations);
    }
}

impl core::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("phase", &self.phase())
            .field("class", &self.class)
            .field("width", &self.width)
            .field("progress", &self.progress())
            .field("destination", &self.destination())
            .finish_non_exhaustive()
    }
}

impl Model for Orchestrator {
    type Message = LandingMsg;
    type View = View;

    fn update(&mut self, msg: LandingMsg) {
        match msg {
            LandingMsg::Resized(width) => self.on_resize(width),
            LandingMsg::ProgressTick => self.on_progress_tick(),
            LandingMsg::LoadSettled => self.on_settled(),
            LandingMsg::ConfirmElapsed => self.on_confirm_elapsed(),
        }
    }

    fn view(&self) -> View {
        render(self.phase(), self.class, self.progress(), &self.destinations)
    }

    fn subscriptions(&self) -> Vec<Subscription<LandingMsg>> {
        let mut subs = Vec::with_capacity(2);
        match self.phase() {
            TransitionPhase::Loading => {
                subs.push(Subscription::Resize {
                    id: VIEWPORT_SUB,
                    on_resize: LandingMsg::Resized,
                });
                if self.simulator.is_complete() {
                    subs.push(Subscription::After {
                        id: SETTLE_SUB,
                        delay: self.config.settle_delay(),
                        message: LandingMsg::LoadSettled,
                    });
                } else {
                    subs.push(Subscription::Every {
                        id: PROGRESS_SUB,
                        interval: self.config.tick_interval(),
                        message: LandingMsg::ProgressTick,
                    });
                }
            }
            TransitionPhase::Confirming => {
                subs.push(Subscription::Resize {
                    id: VIEWPORT_SUB,
                    on_resize: LandingMsg::Resized,
                });
                subs.push(Subscription::After {
                    id: CONFIRM_SUB,
                    delay: self.config.confirm_dwell(),
                    message: LandingMsg::ConfirmElapsed,
                });
            }
            TransitionPhase::Embedded => {}
        }
        subs
    }
}
