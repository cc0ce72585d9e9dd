// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative structure of a panorama and its validation.
//!
//! A panorama is declared as an ordered list of children: an optional custom
//! header element followed by sections. Each section is in turn an ordered
//! list of elements: an optional custom header followed by at most one content
//! element. [`PanoramaBuilder::build`] checks that structure and turns it into
//! a [`PanoramaView`] with typed slots per role.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use peniko::Color;
use understory_parallax::SlidingStyle;

use crate::config::PanoramaConfig;
use crate::error::ConfigError;
use crate::host::ViewHost;
use crate::style::{GeneratedHeader, PANORAMA_TITLE_SIZE, SECTION_TITLE_SIZE, StyleContext, Weight};
use crate::view::{HeaderSlot, PanoramaView, SectionSlot};

/// An element with an optional key that custom header references name.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<E> {
    /// Key custom header references match against.
    pub key: Option<String>,
    /// The element.
    pub element: E,
}

impl<E> Node<E> {
    /// A node without a key.
    #[must_use]
    pub fn new(element: E) -> Self {
        Self { key: None, element }
    }

    /// A node with a key.
    #[must_use]
    pub fn keyed(key: &str, element: E) -> Self {
        Self {
            key: Some(key.to_string()),
            element,
        }
    }
}

/// A declared section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBuilder<E> {
    title: Option<String>,
    title_color: Option<Color>,
    icon: Option<E>,
    custom_header: Option<String>,
    sliding_style: Option<String>,
    children: Vec<Node<E>>,
}

impl<E> Default for SectionBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SectionBuilder<E> {
    /// An empty section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            title_color: None,
            icon: None,
            custom_header: None,
            sliding_style: None,
            children: Vec::new(),
        }
    }

    /// Sets the generated header's title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Sets the generated header's title color.
    #[must_use]
    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = Some(color);
        self
    }

    /// Sets the generated header's icon.
    #[must_use]
    pub fn icon(mut self, icon: E) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Uses the child keyed `key` as the header.
    #[must_use]
    pub fn custom_header(mut self, key: &str) -> Self {
        self.custom_header = Some(key.to_string());
        self
    }

    /// Sets the section's sliding style by name.
    ///
    /// The name is validated by [`PanoramaBuilder::build`].
    #[must_use]
    pub fn sliding_style(mut self, name: &str) -> Self {
        self.sliding_style = Some(name.to_string());
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, node: Node<E>) -> Self {
        self.children.push(node);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Child<E> {
    Element(Node<E>),
    Section(SectionBuilder<E>),
}

/// Declares a panorama and validates it into a [`PanoramaView`].
#[derive(Clone, Debug)]
pub struct PanoramaBuilder<E, T> {
    config: PanoramaConfig,
    style: StyleContext<T>,
    icon: Option<E>,
    background: Option<E>,
    children: Vec<Child<E>>,
}

impl<E, T> PanoramaBuilder<E, T> {
    /// Starts a panorama with the given configuration and style context.
    #[must_use]
    pub fn new(config: PanoramaConfig, style: StyleContext<T>) -> Self {
        Self {
            config,
            style,
            icon: None,
            background: None,
            children: Vec::new(),
        }
    }

    /// Sets the generated header's icon.
    #[must_use]
    pub fn icon(mut self, icon: E) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the background element.
    #[must_use]
    pub fn background(mut self, background: E) -> Self {
        self.background = Some(background);
        self
    }

    /// Appends a plain child element. Only a custom header may be one.
    #[must_use]
    pub fn child(mut self, node: Node<E>) -> Self {
        self.children.push(Child::Element(node));
        self
    }

    /// Appends a section.
    #[must_use]
    pub fn section(mut self, section: SectionBuilder<E>) -> Self {
        self.children.push(Child::Section(section));
        self
    }

    /// Validates the structure and builds the view.
    ///
    /// Generated headers are created through `host`. Nothing is measured yet;
    /// call [`PanoramaView::measure`] before the first frame.
    pub fn build<H>(self, host: &mut H) -> Result<PanoramaView<E, H::Snapshot>, ConfigError>
    where
        H: ViewHost<Element = E, Typeface = T>,
    {
        let Self {
            config,
            style,
            icon,
            background,
            children,
        } = self;

        let custom = take_custom_header(
            config.custom_header.as_deref(),
            children.iter().enumerate().map(|(i, c)| match c {
                Child::Element(node) => (i, node.key.as_deref()),
                Child::Section(_) => (i, None),
            }),
        )?;

        let mut header = None;
        let mut sections = Vec::new();
        for (position, child) in children.into_iter().enumerate() {
            match child {
                Child::Element(node) if Some(position) == custom => header = Some(node.element),
                Child::Element(_) => return Err(ConfigError::UnexpectedElement(position)),
                Child::Section(section) => sections.push(section),
            }
        }

        let header = match header {
            Some(element) => element,
            None => {
                let color = config.title_color.unwrap_or(style.title_color);
                let generated = GeneratedHeader::generate(
                    config.title.as_deref(),
                    icon,
                    PANORAMA_TITLE_SIZE,
                    Weight::Light,
                    color,
                );
                host.create_header(&generated, &style)
            }
        };

        let mut slots = Vec::with_capacity(sections.len());
        for (index, section) in sections.into_iter().enumerate() {
            slots.push(build_section(index, section, host, &style)?);
        }

        log::debug!(
            "built panorama with {} sections, style {}",
            slots.len(),
            config.sliding_style
        );
        let visibility = config.header_visibility;
        Ok(PanoramaView::from_parts(
            config,
            HeaderSlot::new(header, visibility),
            background,
            slots,
        ))
    }
}

fn build_section<H: ViewHost>(
    index: usize,
    section: SectionBuilder<H::Element>,
    host: &mut H,
    style: &StyleContext<H::Typeface>,
) -> Result<SectionSlot<H::Element>, ConfigError> {
    let sliding_style = section
        .sliding_style
        .as_deref()
        .map(str::parse::<SlidingStyle>)
        .transpose()
        .map_err(|source| ConfigError::SectionStyle {
            section: index,
            source,
        })?;

    let custom = take_custom_header(
        section.custom_header.as_deref(),
        section
            .children
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.key.as_deref())),
    )?;

    let mut header = None;
    let mut content = Vec::new();
    for (position, node) in section.children.into_iter().enumerate() {
        if Some(position) == custom {
            header = Some(node.element);
        } else {
            content.push(node.element);
        }
    }
    if content.len() > 1 {
        return Err(ConfigError::TooManyContentElements {
            section: index,
            count: content.len(),
        });
    }

    let header = match header {
        Some(element) => element,
        None => {
            let color = section.title_color.unwrap_or(style.title_color);
            let generated = GeneratedHeader::generate(
                section.title.as_deref(),
                section.icon,
                SECTION_TITLE_SIZE,
                Weight::Semilight,
                color,
            );
            host.create_header(&generated, style)
        }
    };
    Ok(SectionSlot::new(header, content.pop(), sliding_style))
}

/// Finds the position of the custom header `key` among `(position, key)`
/// pairs, requiring it to be first.
fn take_custom_header<'a>(
    key: Option<&str>,
    mut children: impl Iterator<Item = (usize, Option<&'a str>)>,
) -> Result<Option<usize>, ConfigError> {
    let Some(key) = key else {
        return Ok(None);
    };
    match children.find(|(_, k)| *k == Some(key)) {
        Some((0, _)) => Ok(Some(0)),
        Some((position, _)) => Err(ConfigError::CustomHeaderNotFirst {
            key: key.to_string(),
            position,
        }),
        None => Err(ConfigError::MissingCustomHeader(key.to_string())),
    }
}
