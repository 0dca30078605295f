// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data: segments, stacks and charts.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

/// One colored, labeled box inside a stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Height of the segment in data units. Must be finite and non-negative.
    pub value: f64,
    /// Text drawn inside the box.
    pub label: String,
    /// Fill color. The border is derived from it.
    pub color: Color,
}

impl Segment {
    /// Creates a segment.
    pub fn new(value: f64, label: impl Into<String>, color: Color) -> Self {
        Self {
            value,
            label: label.into(),
            color,
        }
    }
}

/// A vertical bar of segments, ordered bottom to top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    /// Segments; index 0 is the bottom-most.
    pub segments: Vec<Segment>,
}

impl Stack {
    /// Creates a stack from bottom-to-top segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the stack has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Cumulative sum of the values of segments `0..=index`.
    ///
    /// Indices past the top saturate at [`Stack::total`].
    pub fn extent(&self, index: usize) -> f64 {
        self.segments
            .iter()
            .take(index.saturating_add(1))
            .map(|s| s.value)
            .sum()
    }

    /// Sum of the values of segments `0..index`, i.e. the bottom edge of segment `index`.
    pub fn base(&self, index: usize) -> f64 {
        self.segments.iter().take(index).map(|s| s.value).sum()
    }

    /// Sum of all segment values.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}

impl FromIterator<Segment> for Stack {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An ordered sequence of stacks; a stack's position is its x-slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    /// Stacks, left to right.
    pub stacks: Vec<Stack>,
}

impl Chart {
    /// Creates a chart from left-to-right stacks.
    pub fn new(stacks: Vec<Stack>) -> Self {
        Self { stacks }
    }

    /// Number of stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns `true` if the chart has no stacks.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Number of gaps between adjacent stacks (`len - 1`, or 0 for an empty chart).
    pub fn gap_count(&self) -> usize {
        self.stacks.len().saturating_sub(1)
    }
}

impl FromIterator<Stack> for Chart {
    fn from_iter<T: IntoIterator<Item = Stack>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// How segment heights are presented.
///
/// This is applied to a whole chart at layout time; it is a transform, not stored state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Values as given. Stacks may have different heights.
    #[default]
    Raw,
    /// Each stack scaled to sum to `1.0`.
    Normalized,
    /// Each stack scaled to sum to `100.0`.
    Percentage,
}

impl Representation {
    /// The height every stack is scaled to, or `None` for [`Representation::Raw`].
    pub fn full_scale(self) -> Option<f64> {
        match self {
            Self::Raw => None,
            Self::Normalized => Some(1.0),
            Self::Percentage => Some(100.0),
        }
    }

    /// Multiplier applied to fixed data-space offsets so they stay visually proportionate.
    pub fn offset_scale(self) -> f64 {
        match self {
            Self::Percentage => 100.0,
            Self::Raw | Self::Normalized => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use peniko::Color;

    use super::*;

    fn stack(values: &[f64]) -> Stack {
        values
            .iter()
            .map(|&v| Segment::new(v, "", Color::BLACK))
            .collect()
    }

    #[test]
    fn extent_is_inclusive_cumulative_sum() {
        let s = stack(&[2.0, 3.0, 5.0]);
        assert_eq!(s.extent(0), 2.0);
        assert_eq!(s.extent(1), 5.0);
        assert_eq!(s.extent(2), 10.0);
        assert_eq!(s.extent(7), 10.0, "extent saturates at the total");
        assert_eq!(s.extent(usize::MAX), 10.0, "no overflow at the largest index");
        assert_eq!(s.total(), 10.0);
    }

    #[test]
    fn base_excludes_the_indexed_segment() {
        let s = stack(&[2.0, 3.0, 5.0]);
        assert_eq!(s.base(0), 0.0);
        assert_eq!(s.base(2), 5.0);
    }

    #[test]
    fn gap_count_is_one_less_than_stacks() {
        let c = Chart::new(vec![stack(&[1.0]), stack(&[1.0]), stack(&[1.0])]);
        assert_eq!(c.gap_count(), 2);
        assert_eq!(Chart::default().gap_count(), 0);
    }

    #[test]
    fn only_percentage_scales_offsets() {
        assert_eq!(Representation::Raw.offset_scale(), 1.0);
        assert_eq!(Representation::Normalized.offset_scale(), 1.0);
        assert_eq!(Representation::Percentage.offset_scale(), 100.0);
    }
}
