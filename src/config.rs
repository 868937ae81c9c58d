use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    CASCADE_STEP, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DOUBLE_CLICK_MILLIS,
    SNAP_EDGE_THRESHOLD, SNAP_MIDDLE_BAND, SNAP_TOP_BAND,
};
use crate::geometry::Size;
use crate::layout::hit_test::ChromeMetrics;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("snap edge threshold must not be negative (got {0})")]
    NegativeSnapThreshold(i32),
    #[error("snap bands must satisfy 0 < top <= middle <= 1 (got top={top}, middle={middle})")]
    SnapBands { top: f32, middle: f32 },
    #[error("minimum {axis} {min} exceeds maximum {max}")]
    ResizeLimits {
        axis: &'static str,
        min: i32,
        max: i32,
    },
    #[error("chrome metric {0} must not be negative")]
    NegativeChrome(&'static str),
    #[error("default window size must be positive (got {width}x{height})")]
    DefaultSize { width: i32, height: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    pub enabled: bool,
    pub edge_threshold: i32,
    pub top_band: f32,
    pub middle_band: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_threshold: SNAP_EDGE_THRESHOLD,
            top_band: SNAP_TOP_BAND,
            middle_band: SNAP_MIDDLE_BAND,
        }
    }
}

impl SnapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_threshold < 0 {
            return Err(ConfigError::NegativeSnapThreshold(self.edge_threshold));
        }
        let bands_ok = self.top_band > 0.0
            && self.top_band <= self.middle_band
            && self.middle_band <= 1.0;
        if !bands_ok {
            return Err(ConfigError::SnapBands {
                top: self.top_band,
                middle: self.middle_band,
            });
        }
        Ok(())
    }
}

/// Optional size clamp applied while a resize gesture is live.
///
/// Unbounded by default: windows can be resized freely, down to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeLimits {
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
}

impl ResizeLimits {
    pub fn clamp_width(&self, width: i32) -> i32 {
        clamp_opt(width, self.min_width, self.max_width)
    }

    pub fn clamp_height(&self, height: i32) -> i32 {
        clamp_opt(height, self.min_height, self.max_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_width, self.max_width)
            && min > max
        {
            return Err(ConfigError::ResizeLimits {
                axis: "width",
                min,
                max,
            });
        }
        if let (Some(min), Some(max)) = (self.min_height, self.max_height)
            && min > max
        {
            return Err(ConfigError::ResizeLimits {
                axis: "height",
                min,
                max,
            });
        }
        Ok(())
    }
}

fn clamp_opt(value: i32, min: Option<i32>, max: Option<i32>) -> i32 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

#[derive(Debug, Clone, PartialEq)]
pub struct WmConfig {
    pub snap: SnapConfig,
    pub resize: ResizeLimits,
    pub chrome: ChromeMetrics,
    pub cascade_step: i32,
    pub default_size: Size,
    pub double_click_interval: Duration,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            resize: ResizeLimits::default(),
            chrome: ChromeMetrics::default(),
            cascade_step: CASCADE_STEP,
            default_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            double_click_interval: Duration::from_millis(DOUBLE_CLICK_MILLIS),
        }
    }
}

impl WmConfig {
    /// Configuration scaled for a character-cell container, where one cell
    /// stands in for one pixel.
    pub fn terminal() -> Self {
        Self {
            snap: SnapConfig {
                edge_threshold: 3,
                ..SnapConfig::default()
            },
            chrome: ChromeMetrics::terminal(),
            cascade_step: 2,
            default_size: Size::new(40, 12),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snap.validate()?;
        self.resize.validate()?;
        self.chrome.validate()?;
        if self.default_size.width <= 0 || self.default_size.height <= 0 {
            return Err(ConfigError::DefaultSize {
                width: self.default_size.width,
                height: self.default_size.height,
            });
        }
        Ok(())
    }
}
