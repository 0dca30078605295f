// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style configuration.
//!
//! A [`StyleConfig`] is an immutable value passed into every layout call. Its defaults reproduce
//! the classic look of the chart for a default-sized figure. All lengths are in data units:
//! x is measured in stack slots (one slot per stack) and y in segment-value units.

use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::text::TextStyle;
use crate::z_order;

/// Border and width settings for segment boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStyle {
    /// Box width in stack slots.
    pub width: f64,
    /// Border stroke width.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

/// A stroked line style.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Dash pattern as alternating on/off lengths; empty for a solid line.
    pub dashes: SmallVec<[f64; 4]>,
}

impl LineStyle {
    /// A solid line.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashes: SmallVec::new(),
        }
    }

    /// Sets the dash pattern.
    #[must_use]
    pub fn with_dashes(mut self, dashes: &[f64]) -> Self {
        self.dashes = dashes.iter().copied().collect();
        self
    }
}

/// Label toggles and offsets for the text inside segment boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxLabelStyle {
    /// Whether box labels are drawn at all.
    pub enabled: bool,
    /// Text styling.
    pub text: TextStyle,
    /// Horizontal offset from the left edge of the stack.
    pub offset: f64,
    /// A label is dropped when `measured height * cutoff > segment value`.
    ///
    /// The measured height is in the [`crate::TextMeasurer`]'s units, so this factor converts
    /// those units into data units.
    pub cutoff: f64,
}

/// The label drawn above each stack.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLabelStyle {
    /// Whether stack labels are drawn at all.
    pub enabled: bool,
    /// Text styling.
    pub text: TextStyle,
    /// Horizontal offset from the left edge of the stack.
    pub offset: f64,
}

/// The thin bar showing each stack's size relative to the first stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativeBarStyle {
    /// Whether the bar is drawn.
    pub enabled: bool,
    /// Bar width in stack slots.
    pub width: f64,
    /// Horizontal offset from the left edge of the stack.
    pub x_offset: f64,
    /// Fill color.
    pub fill: Color,
}

/// Placement of the labels on either side of a wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct WedgeLabelStyle {
    /// Whether wedge labels are drawn at all.
    pub enabled: bool,
    /// Text styling.
    pub text: TextStyle,
    /// Horizontal offset of the left label from the left stack's slot origin.
    pub offset_left: f64,
    /// Magnitude of the slope correction for the left label; `0.0` disables it.
    pub v_offset_left: f64,
    /// Horizontal offset of the right label from the left stack's slot origin.
    pub offset_right: f64,
    /// Magnitude of the slope correction for the right label; `0.0` disables it.
    pub v_offset_right: f64,
}

/// The shaded quadrilateral between a wedge's lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WedgeFillStyle {
    /// Whether the background is drawn.
    pub enabled: bool,
    /// Shift applied to every vertex's x.
    pub x_offset: f64,
    /// Shift applied to the bottom vertices' y (scaled by 100 in percentage mode).
    pub y_offset: f64,
    /// Fill color.
    pub fill: Color,
}

/// Everything that controls how a cascade looks.
///
/// None of these settings change the wedge endpoints or segment extents; they only decide what
/// gets drawn around them.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    /// Style for segments outside every emphasis range.
    pub normal_box: BoxStyle,
    /// Style for emphasized segments.
    pub emphasis_box: BoxStyle,
    /// Border darkening factor: each RGB channel of the fill is multiplied by this.
    pub box_border_gradient: f64,
    /// Labels inside segment boxes.
    pub box_label: BoxLabelStyle,
    /// Labels above stacks.
    pub stack_label: StackLabelStyle,
    /// Relative-size indicator bar.
    pub relative_bar: RelativeBarStyle,
    /// Explosion line style.
    pub wedge_line: LineStyle,
    /// Wedge labels.
    pub wedge_label: WedgeLabelStyle,
    /// Wedge background.
    pub wedge_fill: WedgeFillStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            normal_box: BoxStyle {
                width: 0.5,
                stroke_width: 1.0,
                z_index: z_order::SEGMENT,
            },
            emphasis_box: BoxStyle {
                width: 0.5,
                stroke_width: 2.5,
                z_index: z_order::SEGMENT_EMPHASIS,
            },
            box_border_gradient: 0.2,
            box_label: BoxLabelStyle {
                enabled: true,
                text: TextStyle::new(10.0),
                offset: 0.2,
                cutoff: 1.0,
            },
            stack_label: StackLabelStyle {
                enabled: true,
                text: TextStyle::new(15.0),
                offset: 0.15,
            },
            relative_bar: RelativeBarStyle {
                enabled: true,
                width: 0.04,
                x_offset: -0.005,
                fill: Color::BLACK,
            },
            wedge_line: LineStyle {
                color: Color::BLACK,
                width: 1.0,
                dashes: smallvec![3.7, 1.6],
            },
            wedge_label: WedgeLabelStyle {
                enabled: true,
                text: TextStyle::new(13.0).italic(true),
                offset_left: 0.52,
                v_offset_left: 0.15,
                offset_right: 0.83,
                v_offset_right: 0.6,
            },
            wedge_fill: WedgeFillStyle {
                enabled: true,
                x_offset: 0.009,
                y_offset: 0.0013,
                fill: Color::from_rgb8(0xee, 0xee, 0xee),
            },
        }
    }
}

impl StyleConfig {
    /// Sets the box-label cutoff factor.
    #[must_use]
    pub fn with_box_label_cutoff(mut self, cutoff: f64) -> Self {
        self.box_label.cutoff = cutoff;
        self
    }

    /// Enables or disables box labels.
    #[must_use]
    pub fn with_box_labels(mut self, enabled: bool) -> Self {
        self.box_label.enabled = enabled;
        self
    }

    /// Enables or disables stack labels.
    #[must_use]
    pub fn with_stack_labels(mut self, enabled: bool) -> Self {
        self.stack_label.enabled = enabled;
        self
    }

    /// Enables or disables the relative-size bar.
    #[must_use]
    pub fn with_relative_bar(mut self, enabled: bool) -> Self {
        self.relative_bar.enabled = enabled;
        self
    }

    /// Sets the explosion line style.
    #[must_use]
    pub fn with_wedge_line(mut self, line: LineStyle) -> Self {
        self.wedge_line = line;
        self
    }

    /// Enables or disables wedge labels.
    #[must_use]
    pub fn with_wedge_labels(mut self, enabled: bool) -> Self {
        self.wedge_label.enabled = enabled;
        self
    }

    /// Enables or disables the wedge background.
    #[must_use]
    pub fn with_wedge_fill(mut self, enabled: bool) -> Self {
        self.wedge_fill.enabled = enabled;
        self
    }

    /// Border color for a segment filled with `fill`.
    pub fn border_color(&self, fill: Color) -> Color {
        darken(fill, self.box_border_gradient)
    }
}

/// Multiplies each RGB channel by `factor`, truncating and saturating at 255. Alpha is kept.
pub fn darken(color: Color, factor: f64) -> Color {
    let rgba = color.to_rgba8();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "clamped to the u8 range before the cast"
    )]
    let scale = |c: u8| (f64::from(c) * factor).clamp(0.0, 255.0) as u8;
    Color::from_rgba8(scale(rgba.r), scale(rgba.g), scale(rgba.b), rgba.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_truncates_each_channel() {
        let c = darken(Color::from_rgb8(0x3f, 0x80, 0x80), 0.2);
        let rgba = c.to_rgba8();
        // 63 * 0.2 = 12.6, 128 * 0.2 = 25.6
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (12, 25, 25, 255));
    }

    #[test]
    fn darken_saturates_when_lightening() {
        let rgba = darken(Color::from_rgb8(200, 10, 0), 2.0).to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (255, 20, 0));
    }

    #[test]
    fn defaults_emphasize_with_a_thicker_border_above_plain_boxes() {
        let style = StyleConfig::default();
        assert!(style.emphasis_box.stroke_width > style.normal_box.stroke_width, "thicker");
        assert!(style.emphasis_box.z_index > style.normal_box.z_index, "drawn above");
        assert_eq!(style.normal_box.width, style.emphasis_box.width);
    }
}
