// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout errors.

/// Errors returned while laying out a cascade.
///
/// All of these are detected before the first draw instruction is produced, so a failed layout
/// never yields a partial instruction list.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CascadeError {
    /// The chart has no stacks.
    #[error("a cascade needs at least one stack")]
    EmptyChart,
    /// An input list does not match the number of stacks or gaps.
    #[error("expected {expected} {what}, found {found}")]
    ArityMismatch {
        /// Which input list is mismatched (`"gap link lists"` or `"stack labels"`).
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// A stack sums to zero and cannot be normalized.
    #[error("stack {stack} has a zero total and cannot be normalized")]
    EmptyStackTotal {
        /// Stack index.
        stack: usize,
    },
    /// An emphasis range is inverted or out of bounds for its stack.
    #[error("emphasis range {low:?}..={high:?} is invalid for stack {stack} with {len} segments")]
    InvalidRange {
        /// Stack index.
        stack: usize,
        /// Requested lower bound (`None` means the bottom).
        low: Option<usize>,
        /// Requested upper bound (`None` means the top).
        high: Option<usize>,
        /// Number of segments in the stack.
        len: usize,
    },
    /// A segment value is negative, NaN or infinite.
    #[error("segment {segment} of stack {stack} has invalid value {value}")]
    InvalidValue {
        /// Stack index.
        stack: usize,
        /// Segment index within the stack.
        segment: usize,
        /// The offending value.
        value: f64,
    },
}
