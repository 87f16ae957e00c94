//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of slides in the presentation.
pub const TOTAL_SLIDES: usize = 20;

/// Configuration for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Number of slide regions
    pub total_slides: usize,
    /// Delay between navigation and chart construction, lets layout settle
    pub load_delay: Duration,
    /// Quiet period after the last resize before a chart is redrawn
    pub resize_debounce: Duration,
    /// Minimum horizontal travel in pixels for a touch gesture to count as a swipe
    pub swipe_threshold: f64,
    /// Fraction of a slide that must be visible before it becomes current
    pub visibility_threshold: f64,
    /// Opacity of a disabled navigation button
    pub disabled_opacity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            total_slides: TOTAL_SLIDES,
            load_delay: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(250),
            swipe_threshold: 50.0,
            visibility_threshold: 0.5,
            disabled_opacity: 0.5,
        }
    }
}

impl ControllerConfig {
    /// Check that the configuration describes a usable deck.
    pub fn validate(&self) -> Result<()> {
        if self.total_slides == 0 {
            return Err(Error::InvalidConfig("total_slides must be at least 1".into()));
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(Error::InvalidConfig(format!(
                "visibility_threshold must be within 0..=1, got {}",
                self.visibility_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.disabled_opacity) {
            return Err(Error::InvalidConfig(format!(
                "disabled_opacity must be within 0..=1, got {}",
                self.disabled_opacity
            )));
        }
        Ok(())
    }
}
