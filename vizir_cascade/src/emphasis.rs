// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emphasis ranges and their resolution to vertical extents.

extern crate alloc;

use alloc::string::String;

use crate::error::CascadeError;
use crate::model::Stack;

/// An inclusive range of segment indices within one stack.
///
/// `low: None` means "from the bottom" and `high: None` means "to the top", so
/// `EmphasisRange::ALL` covers the whole stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmphasisRange {
    /// Lowest emphasized index, or `None` for index 0.
    pub low: Option<usize>,
    /// Highest emphasized index, or `None` for the top segment.
    pub high: Option<usize>,
}

impl EmphasisRange {
    /// The whole stack.
    pub const ALL: Self = Self {
        low: None,
        high: None,
    };

    /// A closed range `low..=high`.
    pub fn new(low: usize, high: usize) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// Everything from the bottom up to and including `high`.
    pub fn up_to(high: usize) -> Self {
        Self {
            low: None,
            high: Some(high),
        }
    }

    /// Everything from `low` up to the top.
    pub fn starting_at(low: usize) -> Self {
        Self {
            low: Some(low),
            high: None,
        }
    }

    /// Resolves open bounds against a stack of `len` segments.
    ///
    /// Returns `None` if the range is inverted, out of bounds, or the stack is empty.
    pub fn indices(&self, len: usize) -> Option<(usize, usize)> {
        let top = len.checked_sub(1)?;
        let low = self.low.unwrap_or(0);
        let high = self.high.unwrap_or(top);
        (low <= high && high <= top).then_some((low, high))
    }

    /// Returns `true` if `index` lies in this range for a stack of `len` segments.
    pub fn contains(&self, index: usize, len: usize) -> bool {
        self.indices(len)
            .is_some_and(|(low, high)| (low..=high).contains(&index))
    }
}

/// Whether one side of a link emphasizes anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// The given range is emphasized.
    Present(EmphasisRange),
    /// Nothing is emphasized on this side.
    #[default]
    Absent,
}

impl Emphasis {
    /// Returns the range if present.
    pub fn range(&self) -> Option<&EmphasisRange> {
        match self {
            Self::Present(range) => Some(range),
            Self::Absent => None,
        }
    }
}

impl From<EmphasisRange> for Emphasis {
    fn from(range: EmphasisRange) -> Self {
        Self::Present(range)
    }
}

impl From<Option<EmphasisRange>> for Emphasis {
    fn from(range: Option<EmphasisRange>) -> Self {
        range.map_or(Self::Absent, Self::Present)
    }
}

/// One wedge between stack `k` (source) and stack `k + 1` (destination).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmphasisLink {
    /// Emphasis in the left stack.
    pub source: Emphasis,
    /// Emphasis in the right stack.
    pub dest: Emphasis,
    /// Label drawn next to the left end of the wedge.
    pub source_label: Option<String>,
    /// Label drawn next to the right end of the wedge.
    pub dest_label: Option<String>,
}

impl EmphasisLink {
    /// Creates an unlabeled link.
    pub fn new(source: impl Into<Emphasis>, dest: impl Into<Emphasis>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            source_label: None,
            dest_label: None,
        }
    }

    /// Sets both wedge labels.
    pub fn with_labels(mut self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.source_label = Some(source.into());
        self.dest_label = Some(dest.into());
        self
    }

    /// Sets the left wedge label.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    /// Sets the right wedge label.
    pub fn with_dest_label(mut self, label: impl Into<String>) -> Self {
        self.dest_label = Some(label.into());
        self
    }
}

/// Vertical span of an emphasized sub-stack, in data units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    /// Bottom edge of the lowest emphasized segment.
    pub bottom: f64,
    /// Top edge of the highest emphasized segment.
    pub top: f64,
}

impl Span {
    /// Zero-height span at the base of the stack.
    pub const DEGENERATE: Self = Self {
        bottom: 0.0,
        top: 0.0,
    };

    /// `top - bottom`.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Vertical midpoint.
    pub fn mid(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// The result of resolving an [`Emphasis`] against a stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    /// The emphasized range covers this span.
    Span(Span),
    /// No emphasis was declared.
    NoEmphasis,
}

impl Extent {
    /// Returns the span, or `None` for [`Extent::NoEmphasis`].
    pub fn span(self) -> Option<Span> {
        match self {
            Self::Span(span) => Some(span),
            Self::NoEmphasis => None,
        }
    }
}

/// Resolves `emphasis` to the bottom/top y of the emphasized segments of `stack`.
///
/// `stack_ix` is only used for error reporting. Bounds are validated, never clamped.
pub fn resolve_extent(
    stack: &Stack,
    stack_ix: usize,
    emphasis: &Emphasis,
) -> Result<Extent, CascadeError> {
    let Emphasis::Present(range) = emphasis else {
        return Ok(Extent::NoEmphasis);
    };
    let (low, high) = range
        .indices(stack.len())
        .ok_or(CascadeError::InvalidRange {
            stack: stack_ix,
            low: range.low,
            high: range.high,
            len: stack.len(),
        })?;
    Ok(Extent::Span(Span {
        bottom: stack.base(low),
        top: stack.extent(high),
    }))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use peniko::Color;

    use super::*;
    use crate::model::Segment;

    fn stack(values: &[f64]) -> Stack {
        values
            .iter()
            .map(|&v| Segment::new(v, "", Color::BLACK))
            .collect()
    }

    fn span(stack: &Stack, range: EmphasisRange) -> Span {
        resolve_extent(stack, 0, &range.into())
            .unwrap()
            .span()
            .unwrap()
    }

    #[test]
    fn closed_range_spans_from_low_base_to_high_top() {
        let s = stack(&[2.0, 3.0, 5.0]);
        assert_eq!(
            span(&s, EmphasisRange::new(1, 2)),
            Span {
                bottom: 2.0,
                top: 10.0,
            }
        );
    }

    #[test]
    fn open_low_starts_at_the_bottom() {
        let s = stack(&[2.0, 3.0, 5.0]);
        assert_eq!(
            span(&s, EmphasisRange::up_to(0)),
            Span {
                bottom: 0.0,
                top: 2.0,
            }
        );
        assert_eq!(
            span(&s, EmphasisRange::starting_at(1)),
            Span {
                bottom: 2.0,
                top: 10.0,
            }
        );
    }

    #[test]
    fn fully_open_range_covers_the_stack() {
        for values in [&[1.0][..], &[2.0, 3.0, 5.0], &[0.5, 0.0, 7.0, 1.5]] {
            let s = stack(values);
            assert_eq!(
                span(&s, EmphasisRange::ALL),
                Span {
                    bottom: 0.0,
                    top: s.total(),
                }
            );
        }
    }

    #[test]
    fn span_height_is_the_sum_of_the_range() {
        let values = [1.5, 0.25, 4.0, 2.0, 0.75];
        let s = stack(&values);
        for low in 0..values.len() {
            for high in low..values.len() {
                let expected: f64 = values[low..=high].iter().sum();
                let got = span(&s, EmphasisRange::new(low, high)).height();
                assert!((got - expected).abs() < 1e-12, "{low}..={high}: {got} != {expected}");
            }
        }
    }

    #[test]
    fn absent_emphasis_is_distinct_from_a_zero_span() {
        let s = stack(&[2.0, 3.0]);
        assert_eq!(resolve_extent(&s, 0, &Emphasis::Absent), Ok(Extent::NoEmphasis));
    }

    #[test]
    fn invalid_ranges_fail_fast() {
        let s = stack(&[2.0, 3.0, 5.0]);
        let bad: Vec<EmphasisRange> = alloc::vec![
            EmphasisRange::new(2, 1),
            EmphasisRange::new(0, 3),
            EmphasisRange::starting_at(3),
            EmphasisRange::up_to(9),
        ];
        for range in bad {
            assert_eq!(
                resolve_extent(&s, 4, &range.into()),
                Err(CascadeError::InvalidRange {
                    stack: 4,
                    low: range.low,
                    high: range.high,
                    len: 3,
                }),
                "{range:?} should be rejected"
            );
        }
        assert!(
            resolve_extent(&Stack::default(), 0, &EmphasisRange::ALL.into()).is_err(),
            "an empty stack has no valid range"
        );
    }

    #[test]
    fn contains_respects_open_bounds() {
        assert!(EmphasisRange::starting_at(2).contains(4, 5), "open high reaches the top");
        assert!(!EmphasisRange::starting_at(2).contains(1, 5), "below low");
        assert!(!EmphasisRange::new(3, 1).contains(2, 5), "inverted ranges contain nothing");
    }

    #[test]
    fn optional_ranges_map_to_absent_emphasis() {
        assert_eq!(Emphasis::from(None::<EmphasisRange>), Emphasis::Absent);
        let range = EmphasisRange::up_to(2);
        assert_eq!(Emphasis::from(Some(range)), Emphasis::Present(range));
        assert_eq!(Emphasis::from(Some(range)).range(), Some(&range));
    }

    #[test]
    fn links_can_be_labeled_on_one_side() {
        let link =
            EmphasisLink::new(EmphasisRange::ALL, None::<EmphasisRange>).with_source_label("30");
        assert_eq!(link.dest, Emphasis::Absent);
        assert_eq!(link.source_label.as_deref(), Some("30"));
        assert_eq!(link.dest_label, None);

        let link = link.with_dest_label("60");
        assert_eq!(link.source_label.as_deref(), Some("30"));
        assert_eq!(link.dest_label.as_deref(), Some("60"));
    }
}
