#![forbid(unsafe_code)]

//! Embedded destinations and the sandbox grant they are loaded with.

use bitflags::bitflags;

use crate::viewport::ViewportClass;

pub const DEFAULT_MOBILE_URL: &str = "https://reabotlives.netlify.app";
pub const DEFAULT_DESKTOP_URL: &str = "https://portfolio-wine-kappa-99.vercel.app/";

/// Title given to the embedded frame.
pub const FRAME_TITLE: &str = "Portfolio Experience";

bitflags! {
    /// Capabilities granted to embedded content through the frame sandbox.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmbedPermissions: u8 {
        const SCRIPTS = 0b0001;
        const SAME_ORIGIN = 0b0010;
        const POPUPS = 0b0100;
        const FORMS = 0b1000;
    }
}

impl EmbedPermissions {
    /// The grant every embedded destination receives.
    pub const GRANTED: Self = Self::SCRIPTS
        .union(Self::SAME_ORIGIN)
        .union(Self::POPUPS)
        .union(Self::FORMS);

    /// Render as an HTML `sandbox` attribute value, tokens in canonical order.
    #[must_use]
    pub fn sandbox_attr(self) -> String {
        let tokens: Vec<&str> = [
            (Self::SCRIPTS, "allow-scripts"),
            (Self::SAME_ORIGIN, "allow-same-origin"),
            (Self::POPUPS, "allow-popups"),
            (Self::FORMS, "allow-forms"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, token)| token)
        .collect();
        tokens.join(" ")
    }
}

/// A chosen destination: the class it was chosen for and its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    class: ViewportClass,
    url: String,
}

impl Destination {
    #[must_use]
    pub const fn class(&self) -> ViewportClass {
        self.class
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The pair of destinations, one per viewport class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub mobile: String,
    pub desktop: String,
}

impl Destinations {
    #[must_use]
    pub fn select(&self, class: ViewportClass) -> Destination {
        let url = match class {
            ViewportClass::Mobile => &self.mobile,
            ViewportClass::Desktop => &self.desktop,
        };
        Destination {
            class,
            url: url.clone(),
        }
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            mobile: DEFAULT_MOBILE_URL.to_owned(),
            desktop: DEFAULT_DESKTOP_URL.to_owned(),
        }
    }
}
