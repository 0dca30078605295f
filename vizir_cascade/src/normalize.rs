// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment height normalization.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::CascadeError;
use crate::model::{Chart, Representation};

/// A chart rescaled for a [`Representation`], plus the per-stack size used by the
/// relative-size indicator bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    /// The rescaled chart (a new value; the input chart is untouched).
    pub chart: Chart,
    /// Per-stack relative size.
    ///
    /// For [`Representation::Raw`] this is the literal stack total. Otherwise it is the stack's
    /// total relative to the first stack's total, in the representation's scale.
    pub totals: Vec<f64>,
}

/// Rescales every stack of `chart` independently.
///
/// Segment values must be finite and non-negative in every mode. Under
/// [`Representation::Normalized`] and [`Representation::Percentage`] a stack summing to zero is an
/// error, since its segments cannot be divided by the total.
pub fn normalize(chart: &Chart, mode: Representation) -> Result<Normalized, CascadeError> {
    for (stack_ix, stack) in chart.stacks.iter().enumerate() {
        for (segment, s) in stack.segments.iter().enumerate() {
            if !s.value.is_finite() || s.value < 0.0 {
                return Err(CascadeError::InvalidValue {
                    stack: stack_ix,
                    segment,
                    value: s.value,
                });
            }
        }
    }

    let raw_totals: Vec<f64> = chart.stacks.iter().map(|s| s.total()).collect();

    let Some(scale) = mode.full_scale() else {
        return Ok(Normalized {
            chart: chart.clone(),
            totals: raw_totals,
        });
    };

    if let Some(stack) = raw_totals.iter().position(|&t| t == 0.0) {
        return Err(CascadeError::EmptyStackTotal { stack });
    }

    let mut out = chart.clone();
    for (stack, &total) in out.stacks.iter_mut().zip(&raw_totals) {
        for s in &mut stack.segments {
            s.value = s.value / total * scale;
        }
    }

    let first = raw_totals.first().copied().unwrap_or(1.0);
    let totals = raw_totals.iter().map(|t| t / first * scale).collect();

    Ok(Normalized { chart: out, totals })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use peniko::Color;

    use super::*;
    use crate::model::{Segment, Stack};

    fn chart(stacks: &[&[f64]]) -> Chart {
        stacks
            .iter()
            .map(|values| {
                values
                    .iter()
                    .map(|&v| Segment::new(v, "s", Color::WHITE))
                    .collect::<Stack>()
            })
            .collect()
    }

    #[test]
    fn raw_keeps_values_bit_identical() {
        let input = chart(&[&[0.1, 0.2, 0.3], &[1e-300, 7.25]]);
        let out = normalize(&input, Representation::Raw).unwrap();
        for (a, b) in input.stacks.iter().zip(&out.chart.stacks) {
            for (x, y) in a.segments.iter().zip(&b.segments) {
                assert_eq!(x.value.to_bits(), y.value.to_bits());
            }
        }
        assert_eq!(out.totals, vec![input.stacks[0].total(), 7.25 + 1e-300]);
    }

    #[test]
    fn percentage_stacks_sum_to_one_hundred() {
        let input = chart(&[&[2.0, 2.0, 3.0, 4.0, 4.0, 5.0], &[2.0, 0.2, 0.3, 0.4]]);
        let out = normalize(&input, Representation::Percentage).unwrap();
        for stack in &out.chart.stacks {
            assert!((stack.total() - 100.0).abs() < 1e-9, "{}", stack.total());
        }
    }

    #[test]
    fn normalized_totals_are_relative_to_the_first_stack() {
        let input = chart(&[&[2.0, 2.0], &[1.0], &[6.0, 2.0]]);
        let out = normalize(&input, Representation::Normalized).unwrap();
        assert_eq!(out.totals, vec![1.0, 0.25, 2.0]);
        assert_eq!(out.chart.stacks[0].segments[0].value, 0.5);
        assert_eq!(out.chart.stacks[1].segments[0].value, 1.0);

        let pct = normalize(&input, Representation::Percentage).unwrap();
        assert_eq!(pct.totals, vec![100.0, 25.0, 200.0]);
    }

    #[test]
    fn zero_total_fails_only_when_scaling() {
        let input = chart(&[&[1.0], &[0.0, 0.0]]);
        assert!(normalize(&input, Representation::Raw).is_ok(), "raw never divides");
        assert_eq!(
            normalize(&input, Representation::Percentage),
            Err(CascadeError::EmptyStackTotal { stack: 1 })
        );
        assert_eq!(
            normalize(&input, Representation::Normalized),
            Err(CascadeError::EmptyStackTotal { stack: 1 })
        );
    }

    #[test]
    fn negative_and_nan_values_are_rejected() {
        let input = chart(&[&[1.0, -2.0]]);
        assert!(matches!(
            normalize(&input, Representation::Raw),
            Err(CascadeError::InvalidValue {
                stack: 0,
                segment: 1,
                ..
            })
        ));
        let input = chart(&[&[1.0], &[f64::NAN]]);
        assert!(matches!(
            normalize(&input, Representation::Raw),
            Err(CascadeError::InvalidValue { stack: 1, .. })
        ));
    }
}
