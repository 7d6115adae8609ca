//! Mapping absolute EMU placement onto slide-relative layout.
//!
//! PowerPoint positions pictures in absolute EMU on a fixed canvas. Beamer
//! frames have no such canvas, so the emitter only needs to know how much of
//! the slide a picture covers, and whether it is a decorative full-bleed
//! background that should be left out.

use crate::types::{Position, RelativePosition, SlideSize, DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH};

/// Default tolerance for full-slide background detection (2% of a dimension).
pub const DEFAULT_BACKGROUND_TOLERANCE: f64 = 0.02;

impl SlideSize {
    /// Build a slide size, falling back to the 16:9 default for any
    /// dimension that is missing or not positive.
    pub fn from_declared(width: Option<i64>, height: Option<i64>) -> Self {
        Self {
            width: width.filter(|w| *w > 0).unwrap_or(DEFAULT_SLIDE_WIDTH),
            height: height.filter(|h| *h > 0).unwrap_or(DEFAULT_SLIDE_HEIGHT),
        }
    }

    /// Express an absolute position as fractions of this slide.
    pub fn relative(&self, position: &Position) -> RelativePosition {
        let width = self.width as f64;
        let height = self.height as f64;
        RelativePosition {
            x: position.x as f64 / width,
            y: position.y as f64 / height,
            width: position.width as f64 / width,
            height: position.height as f64 / height,
        }
    }
}

/// Full-slide background detection settings.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundPolicy {
    tolerance: f64,
    enabled: bool,
}

impl Default for BackgroundPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BACKGROUND_TOLERANCE,
            enabled: true,
        }
    }
}

impl BackgroundPolicy {
    /// Create a policy with the default 0.02 tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom tolerance, clamped to [0, 0.5].
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = if tolerance.is_finite() {
            tolerance.clamp(0.0, 0.5)
        } else {
            DEFAULT_BACKGROUND_TOLERANCE
        };
        self
    }

    /// Turn background suppression on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether a picture at this relative position should be dropped.
    pub fn suppresses(&self, rel: &RelativePosition) -> bool {
        self.enabled && is_full_slide_background(rel, self.tolerance)
    }
}

/// Heuristic: a picture anchored at the top-left corner that covers the
/// whole canvas is a decorative background.
pub fn is_full_slide_background(rel: &RelativePosition, tolerance: f64) -> bool {
    rel.x <= tolerance
        && rel.y <= tolerance
        && rel.width >= 1.0 - tolerance
        && rel.height >= 1.0 - tolerance
}
