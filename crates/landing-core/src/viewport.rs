#![forbid(unsafe_code)]

//! Viewport classification.
//!
//! The only device signal the orchestrator uses is the viewport width. A
//! width strictly below the breakpoint is `Mobile`; the breakpoint itself and
//! everything above it is `Desktop`. There is no hysteresis: every resize is
//! classified from scratch.

use core::fmt;

/// Default width (in CSS pixels) at which a viewport stops being mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Binary device classification derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewportClass {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportClass {
    /// Stable lowercase label, used in logs and the JS API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `width` against the default 768px breakpoint.
#[inline]
#[must_use]
pub const fn classify(width: u32) -> ViewportClass {
    classify_with(width, MOBILE_BREAKPOINT_PX)
}

/// Classify `width` against an explicit breakpoint.
#[inline]
#[must_use]
pub const fn classify_with(width: u32, breakpoint: u32) -> ViewportClass {
    if width < breakpoint {
        ViewportClass::Mobile
    } else {
        ViewportClass::Desktop
    }
}

/// Convert a host-reported width (e.g. `window.innerWidth`) to whole pixels.
///
/// Fractional widths truncate; negative, NaN and infinite inputs map to `0`
/// and oversized inputs saturate at `u32::MAX`.
#[must_use]
pub fn width_from_host(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    if raw >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    raw as u32
}
