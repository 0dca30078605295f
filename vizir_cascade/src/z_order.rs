// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for cascade draw instructions.
//!
//! Every [`crate::DrawInstruction`] carries an explicit `z_index`, so renderers do not have to
//! infer paint order from emission order. Renderers should sort by `(z_index, id)` for a
//! deterministic tie-break (see [`crate::DrawList::sorted`]).
//!
//! Emphasis borders sit above plain borders so a thick top edge is never overdrawn by the next
//! segment in the stack.

/// Shaded wedge backgrounds, behind everything else.
pub const WEDGE_FILL: i32 = 10;
/// Plain segment boxes.
pub const SEGMENT: i32 = 20;
/// Emphasized segment boxes.
pub const SEGMENT_EMPHASIS: i32 = 30;
/// Explosion lines.
pub const WEDGE_LINES: i32 = 40;
/// In-box labels, stack labels and wedge labels.
pub const LABELS: i32 = 40;
/// The relative-size indicator bar.
pub const RELATIVE_BAR: i32 = 50;
