// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use kurbo::Size;

/// How a parallax layer follows the content scroll offset.
///
/// This enum is consumed by [`crate::ParallaxLayoutEngine`] for both the header
/// and the background layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SlidingStyle {
    /// The layer's trip is clamped to the viewport's trip: when the viewport
    /// reaches the end of the content, so does the layer's far edge.
    Bounded,
    /// The layer trails the content at a related but distinct rate that keeps
    /// going past the nominal bound, leaving a parallax peek.
    #[default]
    Towed,
    /// The layer is pinned to the content origin and scrolls 1:1 with it.
    Synced,
}

impl SlidingStyle {
    /// The configuration name of this style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bounded => "bounded",
            Self::Towed => "towed",
            Self::Synced => "synced",
        }
    }
}

impl fmt::Display for SlidingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlidingStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bounded" => Ok(Self::Bounded),
            "towed" => Ok(Self::Towed),
            "synced" => Ok(Self::Synced),
            other => Err(ParseStyleError::new("sliding style", other)),
        }
    }
}

/// How the background image is sized against the viewport height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BackgroundScaling {
    /// Intrinsic size.
    None,
    /// Height stretched to the viewport, width kept intrinsic.
    VerticalStretch,
    /// Uniform scale so the height matches the viewport.
    #[default]
    VerticalFill,
}

impl BackgroundScaling {
    /// The configuration name of this style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::VerticalStretch => "vertical_stretch",
            Self::VerticalFill => "vertical_fill",
        }
    }

    /// Size of a background with `intrinsic` size in a viewport `viewport_height`
    /// tall.
    ///
    /// An intrinsic height of zero cannot be scaled and is returned unchanged.
    #[must_use]
    pub fn scaled_size(self, intrinsic: Size, viewport_height: f64) -> Size {
        match self {
            Self::None => intrinsic,
            Self::VerticalStretch => Size::new(intrinsic.width, viewport_height),
            Self::VerticalFill => {
                if intrinsic.height <= 0.0 {
                    intrinsic
                } else {
                    Size::new(
                        intrinsic.width * viewport_height / intrinsic.height,
                        viewport_height,
                    )
                }
            }
        }
    }
}

impl fmt::Display for BackgroundScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackgroundScaling {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "vertical_stretch" => Ok(Self::VerticalStretch),
            "vertical_fill" => Ok(Self::VerticalFill),
            other => Err(ParseStyleError::new("background scaling", other)),
        }
    }
}

/// Error returned when a style name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseStyleError {
    /// Which setting was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseStyleError {
    /// Creates an error for `kind` rejecting `value`.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
