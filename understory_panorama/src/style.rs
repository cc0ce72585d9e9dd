// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::Size;
use peniko::Color;

/// Font size of the container's generated title.
pub const PANORAMA_TITLE_SIZE: f64 = 125.0;

/// Font size of a section's generated title.
pub const SECTION_TITLE_SIZE: f64 = 48.0;

/// Horizontal padding around generated titles.
pub const TITLE_PADDING: f64 = 10.0;

/// Weight of a typeface in the style context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Heaviest.
    Black,
    /// Bold.
    Bold,
    /// Semibold.
    Semibold,
    /// Regular.
    Normal,
    /// Semilight.
    Semilight,
    /// Lightest.
    Light,
}

/// Typefaces and colors shared by everything a panorama generates.
///
/// Hosts load the typefaces once and pass the context to
/// [`PanoramaBuilder::new`](crate::PanoramaBuilder::new). `T` is whatever
/// handle the host uses for a loaded font.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleContext<T> {
    /// Black weight.
    pub black: T,
    /// Bold weight.
    pub bold: T,
    /// Semibold weight.
    pub semibold: T,
    /// Regular weight.
    pub normal: T,
    /// Semilight weight.
    pub semilight: T,
    /// Light weight.
    pub light: T,
    /// Color of generated titles.
    pub title_color: Color,
}

impl<T: Clone> StyleContext<T> {
    /// A context using `typeface` for every weight and white titles.
    #[must_use]
    pub fn uniform(typeface: T) -> Self {
        Self {
            black: typeface.clone(),
            bold: typeface.clone(),
            semibold: typeface.clone(),
            normal: typeface.clone(),
            semilight: typeface.clone(),
            light: typeface,
            title_color: Color::WHITE,
        }
    }
}

impl<T> StyleContext<T> {
    /// The typeface for `weight`.
    #[must_use]
    pub fn typeface(&self, weight: Weight) -> &T {
        match weight {
            Weight::Black => &self.black,
            Weight::Bold => &self.bold,
            Weight::Semibold => &self.semibold,
            Weight::Normal => &self.normal,
            Weight::Semilight => &self.semilight,
            Weight::Light => &self.light,
        }
    }
}

/// Text of a generated title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleText {
    /// The text.
    pub text: String,
    /// Font size.
    pub size: f64,
    /// Weight to draw it in.
    pub weight: Weight,
    /// Color to draw it in.
    pub color: Color,
    /// Horizontal padding on each side.
    pub padding: f64,
}

/// Header the container builds when no custom header is given.
///
/// Hosts turn it into an element with
/// [`ViewHost::create_header`](crate::ViewHost::create_header).
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratedHeader<E> {
    /// A title alone.
    Title(TitleText),
    /// An icon alone.
    Icon(E),
    /// An icon followed by a title.
    TitleAndIcon {
        /// The title.
        title: TitleText,
        /// The icon element.
        icon: E,
    },
    /// Neither title nor icon: an empty box one title tall.
    Placeholder(Size),
}

impl<E> GeneratedHeader<E> {
    /// Picks the header shape for the given title and icon.
    ///
    /// An empty title counts as no title.
    #[must_use]
    pub fn generate(
        title: Option<&str>,
        icon: Option<E>,
        size: f64,
        weight: Weight,
        color: Color,
    ) -> Self {
        let title = title.filter(|t| !t.is_empty()).map(|text| TitleText {
            text: text.into(),
            size,
            weight,
            color,
            padding: TITLE_PADDING,
        });
        match (title, icon) {
            (Some(title), Some(icon)) => Self::TitleAndIcon { title, icon },
            (Some(title), None) => Self::Title(title),
            (None, Some(icon)) => Self::Icon(icon),
            (None, None) => Self::Placeholder(Size::new(1.0, size)),
        }
    }

    /// The title, if the header has one.
    #[must_use]
    pub fn title(&self) -> Option<&TitleText> {
        match self {
            Self::Title(title) | Self::TitleAndIcon { title, .. } => Some(title),
            Self::Icon(_) | Self::Placeholder(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use peniko::Color;

    use super::{GeneratedHeader, PANORAMA_TITLE_SIZE, StyleContext, Weight};

    #[test]
    fn header_shape_follows_inputs() {
        let gen_header = |title: Option<&str>, icon: Option<u8>| {
            GeneratedHeader::generate(title, icon, PANORAMA_TITLE_SIZE, Weight::Light, Color::WHITE)
        };
        assert!(matches!(
            gen_header(Some("a"), Some(1)),
            GeneratedHeader::TitleAndIcon { icon: 1, .. }
        ));
        assert!(matches!(gen_header(Some("a"), None), GeneratedHeader::Title(_)));
        assert_eq!(gen_header(None, Some(2)), GeneratedHeader::Icon(2));
        let placeholder = gen_header(Some(""), None);
        assert!(placeholder.title().is_none());
        assert!(matches!(placeholder, GeneratedHeader::Placeholder(s) if s.height == 125.0));
    }

    #[test]
    fn uniform_context_has_white_titles() {
        let style = StyleContext::uniform("segoe");
        assert_eq!(style.title_color, Color::WHITE);
        assert_eq!(*style.typeface(Weight::Semilight), "segoe");
    }
}
