#![forbid(unsafe_code)]

//! Elm-style model contract shared by every host.
//!
//! A host owns the model, feeds it messages produced by the subscriptions it
//! declares, and asks it for a view after each update:
//!
//! ```text
//! host event ─▶ update(msg) ─▶ reconcile(subscriptions()) ─▶ view()
//! ```

use core::fmt;

use crate::subscription::Subscription;

/// Application state and behavior.
pub trait Model {
    /// Messages delivered by subscriptions.
    type Message: Clone + fmt::Debug + 'static;

    /// What the model renders to.
    type View;

    /// Apply one message. This is the only place state changes.
    fn update(&mut self, msg: Self::Message);

    /// Render the current state.
    fn view(&self) -> Self::View;

    /// Subscriptions that should be live for the current state.
    ///
    /// Called after every update; see [`crate::subscription`] for the
    /// reconciliation rules.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>>;
}
