#![forbid(unsafe_code)]

//! The three presentable views and the pure function that picks one.

use crate::destination::{Destinations, EmbedPermissions, FRAME_TITLE};
use crate::phase::TransitionPhase;
use crate::progress::{LoadProgress, StatusCaption};
use crate::viewport::ViewportClass;

/// Decorative icon shown by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sparkles,
    Smartphone,
    Monitor,
    ArrowRight,
}

impl Icon {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sparkles => "sparkles",
            Self::Smartphone => "smartphone",
            Self::Monitor => "monitor",
            Self::ArrowRight => "arrow-right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingView {
    /// Bar fill, `0.0..=100.0`.
    pub percent: f64,
    pub caption: StatusCaption,
}

impl LoadingView {
    pub const ICON: Icon = Icon::Sparkles;
    pub const HEADLINE: &'static str = "Loading Portfolio";
    pub const SUBTITLE: &'static str = "Preparing your personalized experience...";
}

/// Class-specific copy of the confirmation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationCopy {
    pub icon: Icon,
    pub detected: &'static str,
    pub body: &'static str,
    pub hint: Option<&'static str>,
}

impl ConfirmationCopy {
    #[must_use]
    pub const fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Mobile => Self {
                icon: Icon::Smartphone,
                detected: "Detected mobile device",
                body: "We're preparing the mobile-optimized portfolio",
                hint: Some("View on laptop to get an entirely different experience!"),
            },
            ViewportClass::Desktop => Self {
                icon: Icon::Monitor,
                detected: "Detected wide screen device",
                body: "We're preparing the desktop experience for wider screens",
                hint: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
    pub class: ViewportClass,
    pub copy: ConfirmationCopy,
}

impl ConfirmationView {
    pub const HEADING: &'static str = "Welcome!";
    pub const CALL_OUT: &'static str = "Loading Portfolio";
    pub const FOOTER: &'static str = "Transitioning seamlessly...";
}

/// Full-viewport frame hosting the chosen destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedView {
    pub url: String,
    pub title: &'static str,
    pub permissions: EmbedPermissions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading(LoadingView),
    Confirming(ConfirmationView),
    Embedded(EmbeddedView),
}

impl View {
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        match self {
            Self::Loading(_) => TransitionPhase::Loading,
            Self::Confirming(_) => TransitionPhase::Confirming,
            Self::Embedded(_) => TransitionPhase::Embedded,
        }
    }
}

/// Select and fill the view for the given state.
///
/// In `Embedded` the caller passes the class frozen at the transition, so
/// the URL here always matches the destination that was selected then.
#[must_use]
pub fn render(
    phase: TransitionPhase,
    class: ViewportClass,
    progress: LoadProgress,
    destinations: &Destinations,
) -> View {
    match phase {
        TransitionPhase::Loading => View::Loading(LoadingView {
            percent: progress.value(),
            caption: StatusCaption::for_progress(progress),
        }),
        TransitionPhase::Confirming => View::Confirming(ConfirmationView {
            class,
            copy: ConfirmationCopy::for_class(class),
        }),
        TransitionPhase::Embedded => View::Embedded(EmbeddedView {
            url: destinations.select(class).url().to_owned(),
            title: FRAME_TITLE,
            permissions: EmbedPermissions::GRANTED,
        }),
    }
}
