#![forbid(unsafe_code)]

//! Transition phases and the controller that owns them.

use core::fmt;

use crate::destination::{Destination, Destinations};
use crate::viewport::ViewportClass;

/// The three mutually exclusive stages of the landing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TransitionPhase {
    #[default]
    Loading,
    Confirming,
    Embedded,
}

impl TransitionPhase {
    /// The phase that may follow this one, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::Confirming),
            Self::Confirming => Some(Self::Embedded),
            Self::Embedded => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Embedded)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Confirming => "confirming",
            Self::Embedded => "embedded",
        }
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the current phase and, once embedded, the frozen destination.
///
/// Transitions only ever move to the immediate successor. Anything else is
/// refused (and logged) so the phase can neither regress nor skip.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    phase: TransitionPhase,
    destination: Option<Destination>,
}

impl TransitionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Destination chosen on entering `Embedded`.
    #[must_use]
    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    /// Loading → Confirming. Returns `false` if not currently loading.
    pub fn begin_confirming(&mut self) -> bool {
        self.advance_to(TransitionPhase::Confirming)
    }

    /// Confirming → Embedded, sampling `class` to pick the destination.
    ///
    /// Returns `false` (and leaves the destination untouched) if not
    /// currently confirming.
    pub fn enter_embedded(&mut self, class: ViewportClass, destinations: &Destinations) -> bool {
        if !self.advance_to(TransitionPhase::Embedded) {
            return false;
        }
        let destination = destinations.select(class);
        tracing::info!(
            target: "landing.embed",
            url = %destination.url(),
            class = %class,
            "embedded destination selected"
        );
        self.destination = Some(destination);
        true
    }

    fn advance_to(&mut self, to: TransitionPhase) -> bool {
        let from = self.phase;
        if from.successor() != Some(to) {
            tracing::warn!(
                target: "landing.phase",
                from = %from,
                to = %to,
                "phase transition refused"
            );
            return false;
        }
        self.phase = to;
        tracing::info!(target: "landing.phase", from = %from, to = %to, "phase transition");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::{DEFAULT_DESKTOP_URL, DEFAULT_MOBILE_URL};

    #[test]
    fn successors_are_forward_only() {
        assert_eq!(
            TransitionPhase::Loading.successor(),
            Some(TransitionPhase::Confirming)
        );
        assert_eq!(
            TransitionPhase::Confirming.successor(),
            Some(TransitionPhase::Embedded)
        );
        assert_eq!(TransitionPhase::Embedded.successor(), None);
        assert!(TransitionPhase::Loading < TransitionPhase::Embedded);
    }

    #[test]
    fn full_sequence_selects_destination() {
        let destinations = Destinations::default();
        let mut controller = TransitionController::new();
        assert!(controller.begin_confirming());
        assert!(controller.enter_embedded(ViewportClass::Mobile, &destinations));
        assert_eq!(controller.phase(), TransitionPhase::Embedded);
        assert_eq!(
            controller.destination().map(Destination::url),
            Some(DEFAULT_MOBILE_URL)
        );
    }

    #[test]
    fn cannot_skip_confirming() {
        let destinations = Destinations::default();
        let mut controller = TransitionController::new();
        assert!(!controller.enter_embedded(ViewportClass::Desktop, &destinations));
        assert_eq!(controller.phase(), TransitionPhase::Loading);
        assert!(controller.destination().is_none());
    }

    #[test]
    fn embedded_is_terminal_and_destination_frozen() {
        let destinations = Destinations::default();
        let mut controller = TransitionController::new();
        controller.begin_confirming();
        controller.enter_embedded(ViewportClass::Desktop, &destinations);

        assert!(!controller.begin_confirming());
        assert!(!controller.enter_embedded(ViewportClass::Mobile, &destinations));
        assert_eq!(controller.phase(), TransitionPhase::Embedded);
        assert_eq!(
            controller.destination().map(Destination::url),
            Some(DEFAULT_DESKTOP_URL)
        );
    }
}
