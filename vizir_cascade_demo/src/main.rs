// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascaded exploding bar chart demo for `vizir_cascade`.
//!
//! Writes one SVG per representation mode. Set `RUST_LOG=vizir_cascade=debug` to see layout
//! decisions such as skipped box labels.

mod svg;

use anyhow::Context as _;
use kurbo::Rect;
use peniko::Color;
use tracing_subscriber::EnvFilter;
use vizir_cascade::{
    CascadeChartSpec, Chart, EmphasisLink, EmphasisRange, HeuristicTextMeasurer, Representation,
    Segment, Stack, StyleConfig, normalize, render,
};

/// Vertical size of the tallest stack, in pixels.
const PLOT_HEIGHT: f64 = 420.0;
/// Width of one stack slot, in pixels.
const SLOT_WIDTH: f64 = 220.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    for (mode, name) in [
        (Representation::Raw, "raw"),
        (Representation::Normalized, "normalized"),
        (Representation::Percentage, "percentage"),
    ] {
        let svg = render_cascade(mode)?;
        let path = format!("vizir_cascade_demo_{name}.svg");
        std::fs::write(&path, svg).with_context(|| format!("writing {path}"))?;
        tracing::info!(%path, ?mode, "wrote cascade");
    }
    Ok(())
}

fn render_cascade(mode: Representation) -> anyhow::Result<String> {
    let chart = demo_chart();

    // Size the y axis to the tallest stack so the label cutoff can be expressed in pixels.
    let normalized = normalize(&chart, mode)?;
    let max_total = normalized
        .chart
        .stacks
        .iter()
        .map(Stack::total)
        .chain(normalized.totals.iter().copied())
        .fold(0.0_f64, f64::max);
    let px_per_unit = PLOT_HEIGHT / max_total;

    let spec = CascadeChartSpec::new(chart)
        .with_links(vec![
            vec![
                EmphasisLink::new(EmphasisRange::new(1, 2), EmphasisRange::new(1, 2))
                    .with_labels("30", "60"),
                EmphasisLink::new(EmphasisRange::new(4, 5), EmphasisRange::new(4, 5))
                    .with_labels("30", "10"),
            ],
            vec![
                EmphasisLink::new(EmphasisRange::new(1, 2), EmphasisRange::new(1, 2))
                    .with_labels("40", "10"),
            ],
        ])
        .with_stack_labels([Some("140"), Some("90"), Some("60")])
        .with_representation(mode)
        .with_style(StyleConfig::default().with_box_label_cutoff(0.6));

    // Report text heights in data units.
    let measurer = HeuristicTextMeasurer::new(1.0 / px_per_unit);
    let list = spec.layout(&measurer)?;

    let bounds = list
        .bounds()
        .unwrap_or(Rect::new(0.0, 0.0, 1.0, max_total));
    // Leave room for the stack labels above the tallest stack.
    let headroom = spec.style.stack_label.text.font_size * 1.5 / px_per_unit;
    let data = Rect::new(-0.2, bounds.y0.min(0.0), bounds.x1 + 0.2, bounds.y1 + headroom);

    let mut canvas = svg::SvgCanvas::new(svg::Frame::new(data, SLOT_WIDTH, px_per_unit, 20.0));
    render(&list, &mut canvas).context("rendering SVG")?;
    Ok(canvas.to_svg_string())
}

fn demo_chart() -> Chart {
    let foo_bar = |values: [f64; 6]| -> Stack {
        const LABELS: [&str; 6] = ["foo_1", "foo_2", "foo_3", "bar_1", "bar_2", "bar_3"];
        const COLORS: [u32; 6] = [0x3F8080, 0x346080, 0x30A280, 0xCFA080, 0xC08080, 0xCB8060];
        values
            .into_iter()
            .zip(LABELS)
            .zip(COLORS)
            .map(|((v, label), rgb)| Segment::new(v, label, rgb_color(rgb)))
            .collect()
    };
    Chart::new(vec![
        foo_bar([2.0, 2.0, 3.0, 4.0, 4.0, 5.0]),
        foo_bar([2.0, 2.0, 3.0, 0.4, 0.4, 0.5]),
        foo_bar([2.0, 0.2, 0.3, 0.4, 0.4, 0.5]),
    ])
}

fn rgb_color(rgb: u32) -> Color {
    let [_, r, g, b] = rgb.to_be_bytes();
    Color::from_rgb8(r, g, b)
}
