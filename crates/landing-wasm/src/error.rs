#![forbid(unsafe_code)]

//! Errors raised while mounting or driving the browser host.

use landing_core::LandingConfigError;

#[derive(Debug)]
pub enum HostError {
    /// No global `window` (not running on the main browser thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// No element with the given id exists.
    MissingRoot(String),
    /// The configuration JSON was rejected.
    Config(LandingConfigError),
    /// A DOM or timer call threw.
    Js(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingRoot(id) => write!(f, "root element #{id} not found"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Js(msg) => write!(f, "browser call failed: {msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LandingConfigError> for HostError {
    fn from(e: LandingConfigError) -> Self {
        Self::Config(e)
    }
}
