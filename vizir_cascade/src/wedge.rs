// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of the explosion wedge between two adjacent stacks.
//!
//! A wedge connects the emphasized span of the left stack (at its right edge) to the emphasized
//! span of the right stack (at its left edge) with a bottom and a top line, optionally shading the
//! quadrilateral in between. All coordinates are in data space: x in stack slots, y in segment
//! value units.

use kurbo::{Line, Point};

use crate::emphasis::{EmphasisLink, Extent, Span, resolve_extent};
use crate::error::CascadeError;
use crate::model::{Representation, Stack};
use crate::style::StyleConfig;

/// x of a wedge's left end, relative to the gap index.
pub const WEDGE_LEFT_X: f64 = 0.50;
/// x of a wedge's right end, relative to the gap index.
pub const WEDGE_RIGHT_X: f64 = 0.99;

/// Resolved geometry of one wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct WedgeGeometry {
    /// Gap index: the wedge sits between stack `gap` and stack `gap + 1`.
    pub gap: usize,
    /// Line joining the bottoms of the two spans.
    pub bottom: Line,
    /// Line joining the tops of the two spans.
    pub top: Line,
    /// Whether the left stack had emphasis; if not its end is degenerate at `y = 0`.
    pub source_emphasized: bool,
    /// Whether the right stack had emphasis; if not its end is degenerate at `y = 0`.
    pub dest_emphasized: bool,
}

/// A positioned wedge label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WedgeLabelPos {
    /// Anchor position of the left label.
    pub left: Point,
    /// Anchor position of the right label.
    pub right: Point,
}

impl WedgeGeometry {
    /// The emphasized span at the left end.
    pub fn left_span(&self) -> Span {
        Span {
            bottom: self.bottom.p0.y,
            top: self.top.p0.y,
        }
    }

    /// The emphasized span at the right end.
    pub fn right_span(&self) -> Span {
        Span {
            bottom: self.bottom.p1.y,
            top: self.top.p1.y,
        }
    }

    /// Returns `true` if only one side had emphasis.
    pub fn is_one_sided(&self) -> bool {
        self.source_emphasized != self.dest_emphasized
    }

    /// The shaded background: `[bottom-left, top-left, top-right, bottom-right]`, closed.
    ///
    /// Every vertex is shifted right by `x_offset`, and the two bottom vertices are shifted up by
    /// `y_offset * mode.offset_scale()`, so the fill edge does not sit exactly under the lines.
    pub fn polygon(&self, x_offset: f64, y_offset: f64, mode: Representation) -> [Point; 4] {
        let dy = y_offset * mode.offset_scale();
        let shift = |p: Point, dy: f64| Point::new(p.x + x_offset, p.y + dy);
        [
            shift(self.bottom.p0, dy),
            shift(self.top.p0, 0.0),
            shift(self.top.p1, 0.0),
            shift(self.bottom.p1, dy),
        ]
    }

    /// Positions for the left and right labels.
    ///
    /// Each label sits at its side's vertical midpoint, nudged along the slope of the midline
    /// between the two sides so that labels on steep wedges stay on the shaded area.
    pub fn label_positions(
        &self,
        offset_left: f64,
        v_offset_left: f64,
        offset_right: f64,
        v_offset_right: f64,
    ) -> WedgeLabelPos {
        let gap = self.gap as f64;
        let mid_left = self.left_span().mid();
        let mid_right = self.right_span().mid();
        let dx = mid_right - mid_left;

        let correction_left = v_offset_left * (offset_left / 0.5) * dx;
        let correction_right = -v_offset_right * ((1.0 - offset_right) / 0.5) * dx;

        WedgeLabelPos {
            left: Point::new(gap + offset_left, mid_left + correction_left),
            right: Point::new(gap + offset_right, mid_right + correction_right),
        }
    }
}

/// Builds the wedge for `link` between `left` (stack `gap`) and `right` (stack `gap + 1`).
///
/// Returns `Ok(None)` if neither side has emphasis. If only one side has emphasis the other end
/// collapses to `y = 0` and the geometry is flagged as one-sided.
pub fn build_wedge(
    left: &Stack,
    right: &Stack,
    link: &EmphasisLink,
    gap: usize,
) -> Result<Option<WedgeGeometry>, CascadeError> {
    let source = resolve_extent(left, gap, &link.source)?;
    let dest = resolve_extent(right, gap + 1, &link.dest)?;

    if source == Extent::NoEmphasis && dest == Extent::NoEmphasis {
        return Ok(None);
    }

    let source_emphasized = source != Extent::NoEmphasis;
    let dest_emphasized = dest != Extent::NoEmphasis;
    let l = source.span().unwrap_or(Span::DEGENERATE);
    let r = dest.span().unwrap_or(Span::DEGENERATE);

    let base = gap as f64;
    let x0 = base + WEDGE_LEFT_X;
    let x1 = base + WEDGE_RIGHT_X;

    Ok(Some(WedgeGeometry {
        gap,
        bottom: Line::new((x0, l.bottom), (x1, r.bottom)),
        top: Line::new((x0, l.top), (x1, r.top)),
        source_emphasized,
        dest_emphasized,
    }))
}

/// Convenience for [`WedgeGeometry::polygon`] using the configured fill offsets.
pub fn wedge_polygon(
    wedge: &WedgeGeometry,
    style: &StyleConfig,
    mode: Representation,
) -> [Point; 4] {
    wedge.polygon(style.wedge_fill.x_offset, style.wedge_fill.y_offset, mode)
}

/// Convenience for [`WedgeGeometry::label_positions`] using the configured label offsets.
pub fn wedge_labels(wedge: &WedgeGeometry, style: &StyleConfig) -> WedgeLabelPos {
    let l = &style.wedge_label;
    wedge.label_positions(l.offset_left, l.v_offset_left, l.offset_right, l.v_offset_right)
}

#[cfg(test)]
mod tests {
    use peniko::Color;

    use super::*;
    use crate::emphasis::{Emphasis, EmphasisRange};
    use crate::model::Segment;

    fn stack(values: &[f64]) -> Stack {
        values
            .iter()
            .map(|&v| Segment::new(v, "", Color::BLACK))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn endpoints_follow_the_resolved_spans_at_fixed_x() {
        let left = stack(&[2.0, 3.0, 5.0]);
        let right = stack(&[1.0, 1.0, 1.0, 1.0]);
        let link = EmphasisLink::new(EmphasisRange::new(1, 2), EmphasisRange::up_to(1));

        let w = build_wedge(&left, &right, &link, 2).unwrap().unwrap();
        assert!(close(w.bottom.p0.x, 2.5) && close(w.top.p0.x, 2.5), "{w:?}");
        assert!(close(w.bottom.p1.x, 2.99) && close(w.top.p1.x, 2.99), "{w:?}");
        assert_eq!(
            w.left_span(),
            Span {
                bottom: 2.0,
                top: 10.0,
            }
        );
        assert_eq!(
            w.right_span(),
            Span {
                bottom: 0.0,
                top: 2.0,
            }
        );
        assert!(!w.is_one_sided(), "both sides emphasized");
    }

    #[test]
    fn no_emphasis_on_either_side_builds_nothing() {
        let s = stack(&[1.0, 1.0]);
        let link = EmphasisLink::new(Emphasis::Absent, Emphasis::Absent);
        assert_eq!(build_wedge(&s, &s, &link, 0), Ok(None));
    }

    #[test]
    fn one_sided_emphasis_degenerates_at_the_base() {
        let s = stack(&[1.0, 2.0]);
        let link = EmphasisLink::new(EmphasisRange::ALL, Emphasis::Absent);
        let w = build_wedge(&s, &s, &link, 0).unwrap().unwrap();
        assert!(w.source_emphasized && !w.dest_emphasized, "{w:?}");
        assert_eq!(w.right_span(), Span::DEGENERATE);
        assert_eq!(
            w.left_span(),
            Span {
                bottom: 0.0,
                top: 3.0,
            }
        );
    }

    #[test]
    fn invalid_range_names_the_offending_stack() {
        let s = stack(&[1.0, 2.0]);
        let link = EmphasisLink::new(EmphasisRange::ALL, EmphasisRange::new(0, 5));
        assert!(matches!(
            build_wedge(&s, &s, &link, 3),
            Err(CascadeError::InvalidRange { stack: 4, .. })
        ));
    }

    #[test]
    fn polygon_shifts_x_everywhere_and_y_only_at_the_bottom() {
        let s = stack(&[2.0, 3.0, 5.0]);
        let link = EmphasisLink::new(EmphasisRange::new(1, 1), EmphasisRange::new(2, 2));
        let w = build_wedge(&s, &s, &link, 0).unwrap().unwrap();

        let raw = w.polygon(0.01, 0.5, Representation::Raw);
        assert!(close(raw[0].x, 0.51) && close(raw[0].y, 2.5), "{:?}", raw[0]);
        assert!(close(raw[1].x, 0.51) && close(raw[1].y, 5.0), "{:?}", raw[1]);
        assert!(close(raw[2].x, 1.0) && close(raw[2].y, 10.0), "{:?}", raw[2]);
        assert!(close(raw[3].x, 1.0) && close(raw[3].y, 5.5), "{:?}", raw[3]);

        let pct = w.polygon(0.01, 0.5, Representation::Percentage);
        assert!(close(pct[0].y, 52.0), "y offset is scaled by 100: {:?}", pct[0]);
        assert!(close(pct[1].y, 5.0), "top vertices are not shifted: {:?}", pct[1]);
    }

    #[test]
    fn label_correction_follows_the_midline_slope() {
        let left = stack(&[4.0]);
        let right = stack(&[1.0, 1.0, 8.0]);
        // mid_left = 2, mid_right = (2 + 10) / 2 = 6, dx = 4
        let link = EmphasisLink::new(EmphasisRange::ALL, EmphasisRange::new(2, 2));
        let w = build_wedge(&left, &right, &link, 1).unwrap().unwrap();

        let pos = wedge_labels(&w, &StyleConfig::default());
        assert!(close(pos.left.x, 1.52), "{:?}", pos.left);
        // 2 + 0.15 * (0.52 / 0.5) * 4
        assert!(close(pos.left.y, 2.0 + 0.15 * 1.04 * 4.0), "{:?}", pos.left);
        assert!(close(pos.right.x, 1.83), "{:?}", pos.right);
        // 6 - 0.6 * ((1 - 0.83) / 0.5) * 4
        assert!(close(pos.right.y, 6.0 - 0.6 * ((1.0 - 0.83) / 0.5) * 4.0), "{:?}", pos.right);

        let flat = w.label_positions(0.52, 0.0, 0.83, 0.0);
        assert_eq!((flat.left.y, flat.right.y), (2.0, 6.0));
    }
}
