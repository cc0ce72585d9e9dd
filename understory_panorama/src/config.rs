// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use peniko::Color;
use understory_gesture::GestureConfig;
use understory_parallax::{BackgroundScaling, ParallaxParams, SlidingStyle};
use understory_scroll::PhysicsConfig;

use crate::error::ConfigError;

bitflags::bitflags! {
    /// Debug and demo toggles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanoramaFlags: u8 {
        /// Draw section edges, the scroll offset, and the gesture state.
        const DEBUG_OVERLAY   = 0b0000_0001;
        /// Draw a circle under every pointer that is down.
        const TOUCH_INDICATOR = 0b0000_0010;
    }
}

impl Default for PanoramaFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Initial visibility of the container's header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HeaderVisibility {
    /// Drawn and measured.
    #[default]
    Visible,
    /// Measured but not drawn.
    Invisible,
    /// Neither drawn nor given any height.
    Collapsed,
}

impl HeaderVisibility {
    /// The configuration name of this visibility.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Invisible => "invisible",
            Self::Collapsed => "collapsed",
        }
    }
}

impl fmt::Display for HeaderVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeaderVisibility {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visible" => Ok(Self::Visible),
            "invisible" => Ok(Self::Invisible),
            "collapsed" => Ok(Self::Collapsed),
            other => Err(ConfigError::InvalidValue {
                attribute: "headerVisibility".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Layout and gesture constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanoramaMetrics {
    /// Strip of the next section always kept in view.
    pub peeking_width: f64,
    /// Gap after every visible section.
    pub section_margin: f64,
    /// Space left of the header.
    pub header_margin_left: f64,
    /// Space right of the header, and between the header and its wrap
    /// duplicate.
    pub header_margin_right: f64,
    /// Distance from a wide section's edge within which a slow release snaps
    /// to that edge.
    pub trapping_radius: f64,
    /// Release speed, in pixels per second, above which a release flings.
    pub fling_threshold: f64,
    /// Cap on release speed, in pixels per second.
    pub max_velocity: f64,
    /// Net drag that commits a slow release to a neighbouring section.
    pub scroll_trigger: f64,
    /// Part of the background that trails behind under the towed style.
    pub background_trailing_width: f64,
    /// Distance a pointer travels before a drag moves content.
    pub touch_slop: f64,
    /// Snap animation length.
    pub snap_duration_ms: u64,
    /// Wrap animation length.
    pub wrap_duration_ms: u64,
    /// Fling deceleration, in pixels per second squared.
    pub fling_deceleration: f64,
}

impl Default for PanoramaMetrics {
    fn default() -> Self {
        Self {
            peeking_width: 48.0,
            section_margin: 12.0,
            header_margin_left: 10.0,
            header_margin_right: 10.0,
            trapping_radius: 128.0,
            fling_threshold: 600.0,
            max_velocity: 8000.0,
            scroll_trigger: 200.0,
            background_trailing_width: 210.0,
            touch_slop: 8.0,
            snap_duration_ms: 300,
            wrap_duration_ms: 400,
            fling_deceleration: 4000.0,
        }
    }
}

impl PanoramaMetrics {
    /// Gesture tuning derived from these metrics.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            touch_slop: self.touch_slop,
            fling_threshold: self.fling_threshold,
            max_velocity: self.max_velocity,
            scroll_trigger: self.scroll_trigger,
            trapping_radius: self.trapping_radius,
            peeking_width: self.peeking_width,
            snap_duration_ms: self.snap_duration_ms,
            wrap_duration_ms: self.wrap_duration_ms,
            physics: PhysicsConfig {
                deceleration: self.fling_deceleration,
                ..PhysicsConfig::default()
            },
        }
    }

    /// Parallax parameters for `style` derived from these metrics.
    #[must_use]
    pub fn parallax_params(&self, style: SlidingStyle) -> ParallaxParams {
        ParallaxParams {
            style,
            peeking_width: self.peeking_width,
            background_trailing_width: self.background_trailing_width,
            header_gap: self.header_margin_right + self.header_margin_left,
        }
    }
}

/// Construction-time configuration of a [`PanoramaView`](crate::PanoramaView).
///
/// Values are fixed once the view is built.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PanoramaConfig {
    /// How the header and background follow the content.
    pub sliding_style: SlidingStyle,
    /// How the background is sized against the viewport height.
    pub background_scaling: BackgroundScaling,
    /// Title of the generated header.
    pub title: Option<String>,
    /// Title color; the style context's color when `None`.
    pub title_color: Option<Color>,
    /// Key of the child to use as the header instead of a generated one.
    pub custom_header: Option<String>,
    /// Debug and demo toggles.
    pub flags: PanoramaFlags,
    /// Initial header visibility.
    pub header_visibility: HeaderVisibility,
    /// Layout and gesture constants.
    pub metrics: PanoramaMetrics,
}

impl PanoramaConfig {
    /// Applies one named attribute.
    ///
    /// Recognized names are `slidingStyle`, `backgroundScaling`, `title`,
    /// `customHeader`, `debug`, `demoTouch`, and `headerVisibility`. Boolean
    /// attributes take `true` or `false`.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "slidingStyle" => self.sliding_style = value.parse()?,
            "backgroundScaling" => self.background_scaling = value.parse()?,
            "title" => self.title = Some(value.to_string()),
            "customHeader" => self.custom_header = Some(value.to_string()),
            "debug" => self
                .flags
                .set(PanoramaFlags::DEBUG_OVERLAY, parse_bool(name, value)?),
            "demoTouch" => self
                .flags
                .set(PanoramaFlags::TOUCH_INDICATOR, parse_bool(name, value)?),
            "headerVisibility" => self.header_visibility = value.parse()?,
            other => return Err(ConfigError::UnknownAttribute(other.to_string())),
        }
        Ok(())
    }

    /// Builds a configuration from attribute pairs, failing on the first bad
    /// one.
    pub fn from_attributes<'a>(
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (name, value) in attributes {
            config.set_attribute(name, value)?;
        }
        Ok(config)
    }
}

fn parse_bool(attribute: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }),
    }
}
