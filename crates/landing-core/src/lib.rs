#![forbid(unsafe_code)]

//! Core: viewport classification, simulated loading and the phase machine.
//!
//! # Role in the landing orchestrator
//! `landing-core` holds everything that decides *what* the landing screen
//! shows and *when*. It performs no I/O and binds to no platform: hosts
//! (`landing-web` for deterministic stepping, `landing-wasm` for the
//! browser) push viewport widths and timer firings in, and pull views out.
//!
//! # Primary responsibilities
//! - **Viewport**: `mobile` below the breakpoint, `desktop` at or above it.
//! - **Progress**: random increments on a fixed cadence, pinned at 100.
//! - **Phase**: `Loading → Confirming → Embedded`, forward only.
//! - **View**: pure selection of one of three views from state.
//! - **Orchestrator**: the [`Model`] tying the above together and declaring
//!   which timers and listeners must be live.

pub mod config;
pub mod destination;
pub mod orchestrator;
pub mod phase;
pub mod program;
pub mod progress;
pub mod subscription;
pub mod view;
pub mod viewport;

pub use config::{LandingConfig, LandingConfigError};
pub use destination::{Destination, Destinations, EmbedPermissions};
pub use orchestrator::{LandingMsg, Orchestrator};
pub use phase::{TransitionController, TransitionPhase};
pub use program::Model;
pub use progress::{LoadProgress, ProgressSimulator, RandomSource, StatusCaption, TickOutcome};
pub use subscription::{SubId, Subscription, SubscriptionDiff, SubscriptionLedger};
pub use view::View;
pub use viewport::{ViewportClass, classify, classify_with};
