// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use understory_flip::TransitionError;
use understory_parallax::ParseStyleError;
use understory_sections::SectionId;

/// A malformed configuration or child structure.
///
/// These are raised while building a [`PanoramaView`](crate::PanoramaView) and
/// no view is produced.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An attribute name the container does not know.
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),
    /// An attribute value that does not parse.
    #[error("invalid value {value:?} for attribute {attribute:?}")]
    InvalidValue {
        /// Attribute name.
        attribute: String,
        /// Offending value.
        value: String,
    },
    /// A sliding style or background scaling name that does not parse.
    #[error(transparent)]
    Style(#[from] ParseStyleError),
    /// The configured custom header names no child.
    #[error("no valid custom header found: {0:?}")]
    MissingCustomHeader(String),
    /// The configured custom header is a child, but not the first one.
    #[error("custom header {key:?} must be the first child, found at {position}")]
    CustomHeaderNotFirst {
        /// Key of the custom header.
        key: String,
        /// Position among the container's children.
        position: usize,
    },
    /// A plain element among the container's children that is not its custom
    /// header.
    #[error("child {0} is neither the custom header nor a section")]
    UnexpectedElement(usize),
    /// A section declared more than one content element.
    #[error("section {section} has {count} content elements, at most one is allowed")]
    TooManyContentElements {
        /// Position of the section among the sections.
        section: usize,
        /// Number of content elements declared.
        count: usize,
    },
    /// A section's own sliding style does not parse.
    #[error("section {section}: {source}")]
    SectionStyle {
        /// Position of the section among the sections.
        section: usize,
        /// Parse failure.
        source: ParseStyleError,
    },
}

/// Failures of a live [`PanoramaView`](crate::PanoramaView).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PanoramaError {
    /// Building the view failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The section id belongs to no section of this view.
    #[error("unknown section {0:?}")]
    UnknownSection(SectionId),
    /// A flip transition could not start.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
