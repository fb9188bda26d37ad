// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG rendering of laid-out time axes.

use std::fmt::Write as _;

use chronaxis_scale::{Position, TimeScale};
use chronaxis_text::{FontFamily, HeuristicTextMeasurer, LabelMeasurer, LabelStyle};
use kurbo::{Point, Rect};

const TICK_LENGTH: f64 = 6.0;

/// One axis plus a caption, stacked vertically in the output.
#[derive(Debug)]
pub(crate) struct SvgAxes {
    out: String,
    bounds: Option<Rect>,
    family: FontFamily,
    measurer: HeuristicTextMeasurer,
}

impl SvgAxes {
    pub(crate) fn new(family: FontFamily) -> Self {
        Self {
            out: String::new(),
            bounds: None,
            family,
            measurer: HeuristicTextMeasurer::default(),
        }
    }

    pub(crate) fn push_axis(&mut self, caption: &str, scale: &TimeScale) {
        let Some(rect) = scale.bounds() else {
            return;
        };
        let font_size = scale.options().ticks.font_size;
        let style = LabelStyle::new(font_size).with_family(self.family.clone());
        let horizontal = scale.options().position.is_horizontal();

        let _ = writeln!(
            self.out,
            r#"<text x="{}" y="{}" font-size="{}" font-weight="bold">{}</text>"#,
            rect.x0,
            rect.y0 - 4.0,
            font_size,
            escape_xml(caption)
        );

        let (a, b) = match scale.options().position {
            Position::Top => (Point::new(rect.x0, rect.y1), Point::new(rect.x1, rect.y1)),
            Position::Bottom => (Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y0)),
            Position::Left => (Point::new(rect.x1, rect.y0), Point::new(rect.x1, rect.y1)),
            Position::Right => (Point::new(rect.x0, rect.y0), Point::new(rect.x0, rect.y1)),
        };
        let _ = writeln!(
            self.out,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#444"/>"##,
            a.x, a.y, b.x, b.y
        );

        for (index, tick) in scale.ticks().iter().enumerate() {
            let Some(px) = scale.pixel_for_tick(index) else {
                continue;
            };
            let line_height = self.measurer.measure(&tick.label, &style).height;
            let (from, to, label_at, anchor) = if horizontal {
                let dir = if scale.options().position == Position::Top { -1.0 } else { 1.0 };
                let to = Point::new(px, a.y + dir * TICK_LENGTH);
                (Point::new(px, a.y), to, Point::new(px, to.y + dir * line_height), "middle")
            } else {
                let dir = if scale.options().position == Position::Left { -1.0 } else { 1.0 };
                let to = Point::new(a.x + dir * TICK_LENGTH, px);
                let anchor = if dir < 0.0 { "end" } else { "start" };
                (Point::new(a.x, px), to, Point::new(to.x + dir * 2.0, px), anchor)
            };
            let _ = writeln!(
                self.out,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#444"/>"##,
                from.x, from.y, to.x, to.y
            );
            let _ = writeln!(
                self.out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                label_at.x,
                label_at.y,
                font_size,
                anchor,
                escape_xml(&tick.label)
            );
        }

        self.bounds = Some(match self.bounds {
            Some(r) => r.union(rect),
            None => rect,
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        // Leave room for labels hanging off the axis box.
        let pad = 80.0;
        let view = self
            .bounds
            .map_or(Rect::new(0.0, 0.0, 100.0, 100.0), |r| r.inflate(pad, pad));
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="{}">"#,
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            view.width(),
            view.height(),
            escape_xml(self.family.as_css_family())
        );
        out.push_str(&self.out);
        out.push_str("</svg>\n");
        out
    }
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chronaxis_scale::{ChartData, ScaleOptions};

    use super::*;

    #[test]
    fn named_family_reaches_the_document() {
        let data = ChartData::from_labels(["2015-01-01T20:00:00", "2015-01-10T12:00:00"]);
        let mut scale = TimeScale::new("x", ScaleOptions::default(), Arc::new(data));
        scale.update(400.0, 30.0).unwrap();

        let mut svg = SvgAxes::new(FontFamily::Named("Inter & Co".into()));
        svg.push_axis("weeks", &scale);
        let doc = svg.to_svg_string();
        assert!(doc.contains(r#"font-family="Inter &amp; Co""#), "{doc}");
        assert!(doc.contains(">Jan 4, 2015</text>"), "{doc}");
        // 6px tick plus one 12px line below the axis.
        assert!(doc.contains(r#"y="18""#), "{doc}");
    }
}
