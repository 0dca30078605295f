// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass: turns a chart, its links and a style into an ordered [`DrawList`].
//!
//! Work happens in two phases. Validation (arity, normalization, every emphasis range) runs to
//! completion first, so an error never leaves a partial list behind. Emission then walks the
//! stacks left to right: `stack 0`, then for every gap `k` its wedges followed by `stack k + 1`.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::draw::{DrawList, Primitive, Role};
use crate::emphasis::{EmphasisLink, EmphasisRange};
use crate::error::CascadeError;
use crate::model::{Chart, Representation, Stack};
use crate::normalize::normalize;
use crate::style::StyleConfig;
use crate::text::{TextAnchor, TextBaseline, TextMeasurer};
use crate::wedge::{WedgeGeometry, build_wedge, wedge_labels, wedge_polygon};
use crate::z_order;

/// A complete cascade description.
///
/// This owns its inputs; [`CascadeChartSpec::layout`] borrows them and never mutates them.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeChartSpec {
    /// Stacks, left to right.
    pub chart: Chart,
    /// One list of links per gap (`chart.len() - 1` lists).
    pub links: Vec<Vec<EmphasisLink>>,
    /// Optional label above each stack (`chart.len()` entries when set).
    pub stack_labels: Option<Vec<Option<String>>>,
    /// Representation mode.
    pub mode: Representation,
    /// Styling.
    pub style: StyleConfig,
}

impl CascadeChartSpec {
    /// Creates a spec with no links, no stack labels, raw values and the default style.
    pub fn new(chart: Chart) -> Self {
        let gaps = chart.gap_count();
        Self {
            chart,
            links: vec![Vec::new(); gaps],
            stack_labels: None,
            mode: Representation::Raw,
            style: StyleConfig::default(),
        }
    }

    /// Sets the per-gap link lists.
    pub fn with_links(mut self, links: Vec<Vec<EmphasisLink>>) -> Self {
        self.links = links;
        self
    }

    /// Adds one link to gap `gap`, growing the link table if needed.
    pub fn with_link(mut self, gap: usize, link: EmphasisLink) -> Self {
        if self.links.len() <= gap {
            self.links.resize(gap.saturating_add(1), Vec::new());
        }
        self.links[gap].push(link);
        self
    }

    /// Sets the labels drawn above each stack.
    pub fn with_stack_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.stack_labels = Some(labels.into_iter().map(|l| l.map(Into::into)).collect());
        self
    }

    /// Sets the representation mode.
    pub fn with_representation(mut self, mode: Representation) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Lays out the cascade.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> Result<DrawList, CascadeError> {
        layout(
            &self.chart,
            &self.links,
            self.stack_labels.as_deref(),
            self.mode,
            &self.style,
            measurer,
        )
    }
}

/// Lays out a cascade of `chart.len()` stacks.
///
/// `links[k]` holds the wedges between stack `k` and stack `k + 1`. `stack_labels`, when given,
/// must have one entry per stack. Label suppression inside boxes asks `measurer` for each label's
/// height.
pub fn layout(
    chart: &Chart,
    links: &[Vec<EmphasisLink>],
    stack_labels: Option<&[Option<String>]>,
    mode: Representation,
    style: &StyleConfig,
    measurer: &dyn TextMeasurer,
) -> Result<DrawList, CascadeError> {
    if chart.is_empty() {
        return Err(CascadeError::EmptyChart);
    }
    if links.len() != chart.gap_count() {
        return Err(CascadeError::ArityMismatch {
            what: "gap link lists",
            expected: chart.gap_count(),
            found: links.len(),
        });
    }
    if let Some(labels) = stack_labels
        && labels.len() != chart.len()
    {
        return Err(CascadeError::ArityMismatch {
            what: "stack labels",
            expected: chart.len(),
            found: labels.len(),
        });
    }

    let normalized = normalize(chart, mode)?;
    let stacks = &normalized.chart.stacks;

    let mut wedges: Vec<Vec<(usize, WedgeGeometry)>> = Vec::with_capacity(links.len());
    for (gap, gap_links) in links.iter().enumerate() {
        let mut resolved = Vec::with_capacity(gap_links.len());
        for (ix, link) in gap_links.iter().enumerate() {
            let Some(wedge) = build_wedge(&stacks[gap], &stacks[gap + 1], link, gap)? else {
                tracing::trace!(gap, link = ix, "link has no emphasis on either side");
                continue;
            };
            if wedge.is_one_sided() {
                tracing::warn!(
                    gap,
                    link = ix,
                    source = wedge.source_emphasized,
                    dest = wedge.dest_emphasized,
                    "wedge has emphasis on one side only; the other end collapses to the base"
                );
            }
            tracing::trace!(gap, link = ix, ?wedge, "resolved wedge");
            resolved.push((ix, wedge));
        }
        wedges.push(resolved);
    }

    let mut emitter = Emitter {
        list: DrawList::new(),
        style,
        mode,
        measurer,
    };
    let label = |k: usize| stack_labels.and_then(|l| l[k].as_deref());
    let no_links: &[EmphasisLink] = &[];

    let outgoing = |k: usize| links.get(k).map_or(no_links, Vec::as_slice);

    emitter.stack(0, &stacks[0], normalized.totals[0], label(0), outgoing(0));
    for (gap, resolved) in wedges.iter().enumerate() {
        emitter.wedges(gap, resolved, &links[gap]);
        let k = gap + 1;
        emitter.stack(k, &stacks[k], normalized.totals[k], label(k), outgoing(k));
    }

    tracing::debug!(
        stacks = chart.len(),
        wedges = wedges.iter().map(Vec::len).sum::<usize>(),
        instructions = emitter.list.len(),
        ?mode,
        "laid out cascade"
    );
    Ok(emitter.list)
}

struct Emitter<'a> {
    list: DrawList,
    style: &'a StyleConfig,
    mode: Representation,
    measurer: &'a dyn TextMeasurer,
}

impl Emitter<'_> {
    /// Emits stack `k`. `outgoing` are the links of gap `k`; their source ranges are emphasized.
    fn stack(
        &mut self,
        k: usize,
        stack: &Stack,
        relative: f64,
        label: Option<&str>,
        outgoing: &[EmphasisLink],
    ) {
        let style = self.style;
        let x0 = k as f64;
        let emphasized: Vec<&EmphasisRange> =
            outgoing.iter().filter_map(|l| l.source.range()).collect();

        let mut base = 0.0;
        for (segment, s) in stack.segments.iter().enumerate() {
            let is_emphasized = emphasized.iter().any(|r| r.contains(segment, stack.len()));
            let box_style = if is_emphasized {
                style.emphasis_box
            } else {
                style.normal_box
            };
            self.list.push(
                box_style.z_index,
                Role::Segment { stack: k, segment },
                Primitive::Segment {
                    rect: Rect::new(x0, base, x0 + box_style.width, base + s.value),
                    fill: s.color,
                    stroke: style.border_color(s.color),
                    stroke_width: box_style.stroke_width,
                },
            );

            if style.box_label.enabled && !s.label.is_empty() {
                let metrics = self.measurer.measure(&s.label, &style.box_label.text);
                if metrics.height * style.box_label.cutoff > s.value {
                    tracing::debug!(
                        stack = k,
                        segment,
                        height = metrics.height,
                        value = s.value,
                        "box label does not fit; skipped"
                    );
                } else {
                    self.list.push(
                        z_order::LABELS,
                        Role::SegmentLabel { stack: k, segment },
                        Primitive::Text {
                            pos: Point::new(x0 + style.box_label.offset, base + 0.5 * s.value),
                            text: s.label.clone(),
                            style: style.box_label.text.clone(),
                            anchor: TextAnchor::Middle,
                            baseline: TextBaseline::Middle,
                        },
                    );
                }
            }

            base += s.value;
        }

        if style.stack_label.enabled
            && let Some(label) = label
        {
            self.list.push(
                z_order::LABELS,
                Role::StackLabel { stack: k },
                Primitive::Text {
                    pos: Point::new(x0 + style.stack_label.offset, base),
                    text: String::from(label),
                    style: style.stack_label.text.clone(),
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Bottom,
                },
            );
        }

        let bar = style.relative_bar;
        if bar.enabled {
            let x = x0 + bar.x_offset;
            self.list.push(
                z_order::RELATIVE_BAR,
                Role::RelativeBar { stack: k },
                Primitive::Segment {
                    rect: Rect::new(x, 0.0, x + bar.width, relative),
                    fill: bar.fill,
                    stroke: bar.fill,
                    stroke_width: 0.0,
                },
            );
        }
    }

    /// Emits every resolved wedge of gap `gap`.
    fn wedges(&mut self, gap: usize, resolved: &[(usize, WedgeGeometry)], links: &[EmphasisLink]) {
        let style = self.style;
        for (link, wedge) in resolved {
            let link_ix = *link;
            let link = &links[link_ix];

            if style.wedge_fill.enabled {
                self.list.push(
                    z_order::WEDGE_FILL,
                    Role::WedgeFill { gap, link: link_ix },
                    Primitive::Polygon {
                        points: wedge_polygon(wedge, style, self.mode),
                        fill: style.wedge_fill.fill,
                    },
                );
            }

            for line in [wedge.bottom, wedge.top] {
                self.list.push(
                    z_order::WEDGE_LINES,
                    Role::WedgeLine { gap, link: link_ix },
                    Primitive::Line {
                        line,
                        style: style.wedge_line.clone(),
                    },
                );
            }

            if style.wedge_label.enabled {
                let pos = wedge_labels(wedge, style);
                let sides = [
                    (pos.left, link.source_label.as_ref()),
                    (pos.right, link.dest_label.as_ref()),
                ];
                for (pos, text) in sides {
                    let Some(text) = text else { continue };
                    self.list.push(
                        z_order::LABELS,
                        Role::WedgeLabel { gap, link: link_ix },
                        Primitive::Text {
                            pos,
                            text: text.clone(),
                            style: style.wedge_label.text.clone(),
                            anchor: TextAnchor::Start,
                            baseline: TextBaseline::Middle,
                        },
                    );
                }
            }
        }
    }
}
