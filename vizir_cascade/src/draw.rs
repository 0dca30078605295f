// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw instructions and the renderer capability they are replayed into.
//!
//! Layout produces a [`DrawList`]: plain data in chart coordinates (x in stack slots, y in
//! segment-value units, y up). A [`Renderer`] maps those into its own surface.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use peniko::Color;

use crate::style::LineStyle;
use crate::text::{TextAnchor, TextBaseline, TextStyle};

/// What to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A filled, bordered box (a stack segment or the relative-size bar).
    Segment {
        /// Box extent; `y0` is the bottom.
        rect: Rect,
        /// Fill color.
        fill: Color,
        /// Border color.
        stroke: Color,
        /// Border width; `0.0` for no border.
        stroke_width: f64,
    },
    /// A single line of text.
    Text {
        /// Anchor position.
        pos: Point,
        /// Text content (unshaped).
        text: String,
        /// Font and color.
        style: TextStyle,
        /// Horizontal anchoring.
        anchor: TextAnchor,
        /// Vertical anchoring.
        baseline: TextBaseline,
    },
    /// A stroked line segment.
    Line {
        /// Endpoints.
        line: Line,
        /// Stroke style.
        style: LineStyle,
    },
    /// A filled, closed polygon without a border.
    Polygon {
        /// Vertices; the last connects back to the first.
        points: [Point; 4],
        /// Fill color.
        fill: Color,
    },
}

/// What a [`DrawInstruction`] depicts, for renderers that want to group or style output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Segment `segment` of stack `stack`.
    Segment {
        /// Stack index.
        stack: usize,
        /// Segment index.
        segment: usize,
    },
    /// Label inside segment `segment` of stack `stack`.
    SegmentLabel {
        /// Stack index.
        stack: usize,
        /// Segment index.
        segment: usize,
    },
    /// Label above stack `stack`.
    StackLabel {
        /// Stack index.
        stack: usize,
    },
    /// Relative-size bar of stack `stack`.
    RelativeBar {
        /// Stack index.
        stack: usize,
    },
    /// Background of link `link` in gap `gap`.
    WedgeFill {
        /// Gap index.
        gap: usize,
        /// Link index within the gap.
        link: usize,
    },
    /// One of the two explosion lines of a link.
    WedgeLine {
        /// Gap index.
        gap: usize,
        /// Link index within the gap.
        link: usize,
    },
    /// One of the two labels of a link.
    WedgeLabel {
        /// Gap index.
        gap: usize,
        /// Link index within the gap.
        link: usize,
    },
}

/// One positioned primitive with an explicit paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawInstruction {
    /// Emission sequence number, unique within a [`DrawList`].
    pub id: u64,
    /// Rendering order hint; see [`crate::z_order`].
    pub z_index: i32,
    /// What this instruction depicts.
    pub role: Role,
    /// What to draw.
    pub primitive: Primitive,
}

/// An ordered list of draw instructions produced by one layout call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    instructions: Vec<DrawInstruction>,
}

impl DrawList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive, assigning it the next sequence id.
    pub fn push(&mut self, z_index: i32, role: Role, primitive: Primitive) {
        let id = self.instructions.len() as u64;
        self.instructions.push(DrawInstruction {
            id,
            z_index,
            role,
            primitive,
        });
    }

    /// Instructions in emission order.
    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in paint order: by `z_index`, then by emission id.
    pub fn sorted(&self) -> Vec<&DrawInstruction> {
        let mut out: Vec<_> = self.instructions.iter().collect();
        out.sort_by_key(|i| (i.z_index, i.id));
        out
    }

    /// Bounding box of all geometry (text positions count as points).
    pub fn bounds(&self) -> Option<Rect> {
        self.instructions
            .iter()
            .map(|i| match &i.primitive {
                Primitive::Segment { rect, .. } => *rect,
                Primitive::Text { pos, .. } => Rect::from_points(*pos, *pos),
                Primitive::Line { line, .. } => Rect::from_points(line.p0, line.p1),
                Primitive::Polygon { points, .. } => points
                    .iter()
                    .fold(Rect::from_points(points[0], points[0]), |r, p| {
                        r.union_pt(*p)
                    }),
            })
            .reduce(|a, b| a.union(b))
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawInstruction;
    type IntoIter = core::slice::Iter<'a, DrawInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// The drawing capability a cascade is rendered through.
///
/// Text measurement is a separate capability ([`crate::TextMeasurer`]) because it is needed
/// during layout, before anything is drawn.
pub trait Renderer {
    /// Error reported by the drawing surface.
    type Error;

    /// Draws a filled, bordered box.
    fn draw_segment(
        &mut self,
        rect: Rect,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
        z_index: i32,
    ) -> Result<(), Self::Error>;

    /// Draws one line of text.
    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        z_index: i32,
    ) -> Result<(), Self::Error>;

    /// Strokes a line.
    fn draw_line(&mut self, line: Line, style: &LineStyle, z_index: i32)
    -> Result<(), Self::Error>;

    /// Fills a closed polygon.
    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Color,
        z_index: i32,
    ) -> Result<(), Self::Error>;
}

/// Replays `list` into `renderer`, one call per instruction, in emission order.
///
/// Stops at the first renderer error and returns it unchanged.
pub fn render<R: Renderer + ?Sized>(list: &DrawList, renderer: &mut R) -> Result<(), R::Error> {
    for i in list {
        match &i.primitive {
            Primitive::Segment {
                rect,
                fill,
                stroke,
                stroke_width,
            } => renderer.draw_segment(*rect, *fill, *stroke, *stroke_width, i.z_index)?,
            Primitive::Text {
                pos,
                text,
                style,
                anchor,
                baseline,
            } => renderer.draw_text(*pos, text, style, *anchor, *baseline, i.z_index)?,
            Primitive::Line { line, style } => renderer.draw_line(*line, style, i.z_index)?,
            Primitive::Polygon { points, fill } => {
                renderer.draw_polygon(points, *fill, i.z_index)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&mut self, call: &'static str) -> Result<(), &'static str> {
            if self.fail_on == Some(call) {
                return Err(call);
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl Renderer for Recorder {
        type Error = &'static str;

        fn draw_segment(
            &mut self,
            _: Rect,
            _: Color,
            _: Color,
            _: f64,
            _: i32,
        ) -> Result<(), Self::Error> {
            self.record("segment")
        }

        fn draw_text(
            &mut self,
            _: Point,
            _: &str,
            _: &TextStyle,
            _: TextAnchor,
            _: TextBaseline,
            _: i32,
        ) -> Result<(), Self::Error> {
            self.record("text")
        }

        fn draw_line(&mut self, _: Line, _: &LineStyle, _: i32) -> Result<(), Self::Error> {
            self.record("line")
        }

        fn draw_polygon(&mut self, _: &[Point], _: Color, _: i32) -> Result<(), Self::Error> {
            self.record("polygon")
        }
    }

    fn sample() -> DrawList {
        let mut list = DrawList::new();
        let role = Role::StackLabel { stack: 0 };
        list.push(
            5,
            role,
            Primitive::Segment {
                rect: Rect::new(0.0, 0.0, 1.0, 2.0),
                fill: Color::WHITE,
                stroke: Color::BLACK,
                stroke_width: 1.0,
            },
        );
        list.push(
            1,
            role,
            Primitive::Polygon {
                points: [Point::new(2.0, -1.0); 4],
                fill: Color::WHITE,
            },
        );
        list.push(
            5,
            role,
            Primitive::Line {
                line: Line::new((0.0, 0.0), (1.0, 3.0)),
                style: LineStyle::solid(Color::BLACK, 1.0),
            },
        );
        list
    }

    #[test]
    fn replay_follows_emission_order() {
        let mut r = Recorder::default();
        render(&sample(), &mut r).unwrap();
        assert_eq!(r.calls, vec!["segment", "polygon", "line"]);
    }

    #[test]
    fn renderer_errors_stop_the_replay() {
        let mut r = Recorder {
            fail_on: Some("polygon"),
            ..Recorder::default()
        };
        assert_eq!(render(&sample(), &mut r), Err("polygon"));
        assert_eq!(r.calls, vec!["segment"]);
    }

    #[test]
    fn sorted_orders_by_z_then_id() {
        let list = sample();
        let ids: Vec<u64> = list.sorted().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn bounds_cover_all_primitives() {
        assert_eq!(sample().bounds(), Some(Rect::new(0.0, -1.0, 2.0, 3.0)));
        assert_eq!(DrawList::new().bounds(), None);
    }
}
