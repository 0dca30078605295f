// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and geometry for cascaded exploding bar charts.
//!
//! A cascade is a row of stacked bars. Between neighbouring bars, "explosion" wedges map a range
//! of emphasized segments in the left stack onto a range of segments in the right one:
//!
//! ```text
//!     _________     _________
//!     | 3     |     | 3     |
//!     |=======|_ _ _|=======|
//!     | 2     |.....|=2=====|
//!     |       |.....|=1=====|
//!     |       |..../| 0     |
//!     |=======|.../ |       |
//!     | 1     |../  |       |
//!     |=======|./   |       |
//!     | 0     |/    |       |
//!     |_______|     |_______|
//! ```
//!
//! This crate computes everything numeric about such a chart:
//! - **Normalization** of segment heights ([`normalize`], [`Representation`]).
//! - **Emphasis resolution** from index ranges to y-extents ([`resolve_extent`]).
//! - **Wedge geometry**: connecting lines, the shaded polygon, label anchors ([`build_wedge`]).
//! - **Layout**: an ordered, z-indexed [`DrawList`] for a whole cascade ([`CascadeChartSpec`]).
//!
//! Pixels are somebody else's job: a [`Renderer`] receives the draw list via [`render`], and a
//! [`TextMeasurer`] answers "how tall is this label" during layout.
//!
//! ```
//! use peniko::Color;
//! use vizir_cascade::{
//!     CascadeChartSpec, Chart, EmphasisLink, EmphasisRange, HeuristicTextMeasurer,
//!     Representation, Segment, Stack,
//! };
//!
//! let stack = || {
//!     Stack::new(vec![
//!         Segment::new(1.0, "a", Color::from_rgb8(0x3f, 0x80, 0x80)),
//!         Segment::new(1.0, "b", Color::from_rgb8(0xcf, 0xa0, 0x80)),
//!     ])
//! };
//! let spec = CascadeChartSpec::new(Chart::new(vec![stack(), stack()]))
//!     .with_link(0, EmphasisLink::new(EmphasisRange::new(1, 1), EmphasisRange::ALL))
//!     .with_representation(Representation::Percentage);
//!
//! let list = spec.layout(&HeuristicTextMeasurer::default()).unwrap();
//! assert!(!list.is_empty());
//! ```

#![no_std]

extern crate alloc;

mod draw;
mod emphasis;
mod error;
mod layout;
mod model;
mod normalize;
mod style;
mod text;
mod wedge;
pub mod z_order;

pub use draw::{DrawInstruction, DrawList, Primitive, Renderer, Role, render};
pub use emphasis::{Emphasis, EmphasisLink, EmphasisRange, Extent, Span, resolve_extent};
pub use error::CascadeError;
pub use layout::{CascadeChartSpec, layout};
pub use model::{Chart, Representation, Segment, Stack};
pub use normalize::{Normalized, normalize};
pub use style::{
    BoxLabelStyle, BoxStyle, LineStyle, RelativeBarStyle, StackLabelStyle, StyleConfig,
    WedgeFillStyle, WedgeLabelStyle, darken,
};
pub use text::{
    FontFamily, HeuristicTextMeasurer, TextAnchor, TextBaseline, TextMeasurer, TextMetrics,
    TextStyle,
};
pub use wedge::{
    WEDGE_LEFT_X, WEDGE_RIGHT_X, WedgeGeometry, WedgeLabelPos, build_wedge, wedge_labels,
    wedge_polygon,
};
