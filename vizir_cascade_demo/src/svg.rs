// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal SVG [`Renderer`] for `vizir_cascade_demo`.

use std::fmt::{self, Write as _};

use kurbo::{Line, Point, Rect};
use peniko::Color;
use vizir_cascade::{LineStyle, Renderer, TextAnchor, TextBaseline, TextStyle};

/// Maps chart coordinates (x in stack slots, y up in value units) to SVG pixels (y down).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    data: Rect,
    px_per_slot: f64,
    px_per_unit: f64,
    pad: f64,
}

impl Frame {
    pub(crate) fn new(data: Rect, px_per_slot: f64, px_per_unit: f64, pad: f64) -> Self {
        Self {
            data,
            px_per_slot,
            px_per_unit,
            pad,
        }
    }

    fn map(&self, p: Point) -> Point {
        Point::new(
            self.pad + (p.x - self.data.x0) * self.px_per_slot,
            self.pad + (self.data.y1 - p.y) * self.px_per_unit,
        )
    }

    fn size(&self) -> (f64, f64) {
        (
            self.data.width() * self.px_per_slot + 2.0 * self.pad,
            self.data.height() * self.px_per_unit + 2.0 * self.pad,
        )
    }
}

/// Collects SVG elements and writes them out in `(z_index, arrival)` order.
#[derive(Debug)]
pub(crate) struct SvgCanvas {
    frame: Frame,
    elements: Vec<(i32, String)>,
}

impl SvgCanvas {
    pub(crate) fn new(frame: Frame) -> Self {
        Self {
            frame,
            elements: Vec::new(),
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let (w, h) = self.frame.size();
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="sans-serif">"#
        ));
        out.push('\n');

        // `sort_by_key` is stable, so equal z keeps arrival order.
        let mut sorted: Vec<&(i32, String)> = self.elements.iter().collect();
        sorted.sort_by_key(|(z, _)| *z);
        for (_, el) in sorted {
            out.push_str(el);
            out.push('\n');
        }

        out.push_str("</svg>\n");
        out
    }
}

impl Renderer for SvgCanvas {
    type Error = fmt::Error;

    fn draw_segment(
        &mut self,
        rect: Rect,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
        z_index: i32,
    ) -> Result<(), Self::Error> {
        let p0 = self.frame.map(Point::new(rect.x0, rect.y1));
        let p1 = self.frame.map(Point::new(rect.x1, rect.y0));
        let mut el = String::new();
        write!(
            el,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            p0.x,
            p0.y,
            p1.x - p0.x,
            p1.y - p0.y
        )?;
        write_paint_attr(&mut el, "fill", fill)?;
        if stroke_width > 0.0 {
            write_paint_attr(&mut el, "stroke", stroke)?;
            write!(el, r#" stroke-width="{stroke_width}""#)?;
        }
        el.push_str("/>");
        self.elements.push((z_index, el));
        Ok(())
    }

    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        z_index: i32,
    ) -> Result<(), Self::Error> {
        let p = self.frame.map(pos);
        let baseline = match baseline {
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "text-after-edge",
            TextBaseline::Top => "hanging",
        };
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let mut el = String::new();
        write!(
            el,
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
            p.x,
            p.y,
            style.font_size,
            style.font_family.as_css_family(),
        )?;
        if style.italic {
            el.push_str(r#" font-style="italic""#);
        }
        if style.bold {
            el.push_str(r#" font-weight="bold""#);
        }
        write_paint_attr(&mut el, "fill", style.fill)?;
        write!(el, ">{}</text>", escape_xml(text))?;
        self.elements.push((z_index, el));
        Ok(())
    }

    fn draw_line(
        &mut self,
        line: Line,
        style: &LineStyle,
        z_index: i32,
    ) -> Result<(), Self::Error> {
        let a = self.frame.map(line.p0);
        let b = self.frame.map(line.p1);
        let mut el = String::new();
        write!(
            el,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
            a.x, a.y, b.x, b.y, style.width
        )?;
        write_paint_attr(&mut el, "stroke", style.color)?;
        if !style.dashes.is_empty() {
            let dashes: Vec<String> = style
                .dashes
                .iter()
                .map(|d| (d * style.width).to_string())
                .collect();
            write!(el, r#" stroke-dasharray="{}""#, dashes.join(" "))?;
        }
        el.push_str("/>");
        self.elements.push((z_index, el));
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Color,
        z_index: i32,
    ) -> Result<(), Self::Error> {
        let mut el = String::from(r#"<polygon points=""#);
        for (i, p) in points.iter().enumerate() {
            let p = self.frame.map(*p);
            if i > 0 {
                el.push(' ');
            }
            write!(el, "{},{}", p.x, p.y)?;
        }
        el.push('"');
        write_paint_attr(&mut el, "fill", fill)?;
        el.push_str("/>");
        self.elements.push((z_index, el));
        Ok(())
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) -> fmt::Result {
    let rgba = color.to_rgba8();
    write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    )?;
    if rgba.a != 255 {
        write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0)?;
    }
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
