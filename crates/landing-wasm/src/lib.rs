#![forbid(unsafe_code)]

//! Browser host for the landing orchestrator.
//!
//! `LandingApp` (wasm32 only) mounts the landing screen into a DOM
//! element, drives it with real `setInterval`/`setTimeout` timers and the
//! window `resize` event, and tears all of them down on `destroy()`.
//!
//! The element tree for each view is built by [`markup`], which has no
//! browser dependency and is tested natively.

pub mod error;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::HostError;
pub use markup::{Element, Node, render_markup};

#[cfg(target_arch = "wasm32")]
pub use wasm::LandingApp;
