// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styling and measurement hooks.
//!
//! Layout has to know how tall a label will be to decide whether it fits inside its segment.
//! Shaping stays downstream: the caller passes a [`TextMeasurer`] that reports sizes in whatever
//! unit its label-cutoff was tuned for (typically pixels).

extern crate alloc;

use alloc::sync::Arc;

use peniko::Color;

/// Font family selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family.
    Serif,
    /// A generic sans-serif family.
    #[default]
    SansSerif,
    /// A generic monospace family.
    Monospace,
    /// A named family (e.g. `"DejaVu Sans"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the family as a CSS `font-family` value.
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// Styling for one kind of label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    /// Font family.
    pub font_family: FontFamily,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Text color.
    pub fill: Color,
}

impl TextStyle {
    /// Creates a plain black sans-serif style at `font_size`.
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            bold: false,
            italic: false,
            fill: Color::BLACK,
        }
    }

    /// Sets the italic flag.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Sets the bold flag.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Horizontal anchoring of a label relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position is the left edge of the text.
    #[default]
    Start,
    /// The position is the horizontal center of the text.
    Middle,
    /// The position is the right edge of the text.
    End,
}

/// Vertical anchoring of a label relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position is the vertical center of the text.
    #[default]
    Middle,
    /// The position is the bottom of the text.
    Bottom,
    /// The position is the top of the text.
    Top,
}

/// Measured size of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Line height (ascent + descent + leading).
    pub height: f64,
}

/// Reports text sizes to the layout pass.
///
/// Measurement is treated as infallible; a backend that can fail should decide on a fallback
/// size itself.
pub trait TextMeasurer {
    /// Measures `text` as a single line.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// A rough measurer: ~0.6em per glyph, 1em line height, times `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicTextMeasurer {
    /// Output units per point (e.g. pixels per point).
    pub scale: f64,
}

impl HeuristicTextMeasurer {
    /// Creates a measurer reporting `scale` units per point.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = style.font_size * self.scale;
        TextMetrics {
            width: 0.6 * em * text.chars().count() as f64,
            height: em,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_scales_with_font_size_and_scale() {
        let m = HeuristicTextMeasurer::default();
        let got = m.measure("abcde", &TextStyle::new(10.0));
        assert_eq!(
            got,
            TextMetrics {
                width: 30.0,
                height: 10.0,
            }
        );

        let half = HeuristicTextMeasurer::new(0.5).measure("ab", &TextStyle::new(20.0));
        assert_eq!(half.height, 10.0);
        assert_eq!(half.width, 12.0);
    }

    #[test]
    fn style_builders_set_their_fields() {
        let style = TextStyle::new(12.0)
            .bold(true)
            .italic(true)
            .with_fill(Color::WHITE);
        assert!(style.bold && style.italic, "{style:?}");
        assert_eq!(style.fill, Color::WHITE);
        assert_eq!(style.font_size, 12.0);
        assert!(!TextStyle::default().bold, "regular weight by default");
    }
}
