//! Vector document model.
//!
//! The rendering routines emit retained drawing elements into a
//! [`VectorDocument`]; `to_svg` serializes the whole document as
//! self-contained SVG text for the external rasterization step.

use std::fmt::Write;

use serde::Serialize;

/// Horizontal anchoring of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A vertical or arbitrary linear gradient definition, referenced from
/// elements via `url(#id)` fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub id: String,
    pub from: String,
    pub to: String,
    pub from_opacity: f64,
    pub to_opacity: f64,
}

/// One drawing element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: String,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: String,
        opacity: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Path {
        d: String,
        fill: Option<String>,
        stroke: Option<String>,
        width: f64,
        opacity: f64,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        fill: String,
        anchor: TextAnchor,
        bold: bool,
    },
}

/// A complete vector-graphic document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorDocument {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub gradients: Vec<Gradient>,
    pub elements: Vec<Element>,
}

impl VectorDocument {
    /// Create a new document with a solid background.
    pub fn new(width: f64, height: f64, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            gradients: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Register a gradient and return its fill reference.
    pub fn add_gradient(&mut self, gradient: Gradient) -> String {
        let fill = format!("url(#{})", gradient.id);
        self.gradients.push(gradient);
        fill
    }

    /// Serialize the document as a standalone SVG string.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(1024 + self.elements.len() * 96);

        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">",
            w = num(self.width),
            h = num(self.height),
        );

        if !self.gradients.is_empty() {
            svg.push_str("<defs>");
            for g in &self.gradients {
                let _ = write!(
                    svg,
                    "<linearGradient id=\"{}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">\
                     <stop offset=\"0%\" stop-color=\"{}\" stop-opacity=\"{}\"/>\
                     <stop offset=\"100%\" stop-color=\"{}\" stop-opacity=\"{}\"/>\
                     </linearGradient>",
                    escape(&g.id),
                    escape(&g.from),
                    num(g.from_opacity),
                    escape(&g.to),
                    num(g.to_opacity),
                );
            }
            svg.push_str("</defs>");
        }

        let _ = write!(
            svg,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            num(self.width),
            num(self.height),
            escape(&self.background),
        );

        for element in &self.elements {
            write_element(&mut svg, element);
        }

        svg.push_str("</svg>");
        svg
    }
}

fn write_element(svg: &mut String, element: &Element) {
    match element {
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            dashed,
        } => {
            let dash = if *dashed { " stroke-dasharray=\"4 3\"" } else { "" };
            let _ = write!(
                svg,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" \
                 stroke-width=\"{}\"{}/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                escape(stroke),
                num(*width),
                dash,
            );
        }
        Element::Polyline {
            points,
            stroke,
            width,
        } => {
            let _ = write!(svg, "<polyline points=\"");
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    svg.push(' ');
                }
                let _ = write!(svg, "{},{}", num(*x), num(*y));
            }
            let _ = write!(
                svg,
                "\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" \
                 stroke-linejoin=\"round\"/>",
                escape(stroke),
                num(*width),
            );
        }
        Element::Rect {
            x,
            y,
            w,
            h,
            fill,
            opacity,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
                num(*x),
                num(*y),
                num(*w),
                num(*h),
                escape(fill),
            );
            if *opacity < 1.0 {
                let _ = write!(svg, " fill-opacity=\"{}\"", num(*opacity));
            }
            svg.push_str("/>");
        }
        Element::Circle { cx, cy, r, fill } => {
            let _ = write!(
                svg,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                num(*cx),
                num(*cy),
                num(*r),
                escape(fill),
            );
        }
        Element::Path {
            d,
            fill,
            stroke,
            width,
            opacity,
        } => {
            let _ = write!(svg, "<path d=\"{}\"", d);
            match fill {
                Some(fill) => {
                    let _ = write!(svg, " fill=\"{}\"", escape(fill));
                }
                None => svg.push_str(" fill=\"none\""),
            }
            if let Some(stroke) = stroke {
                let _ = write!(
                    svg,
                    " stroke=\"{}\" stroke-width=\"{}\"",
                    escape(stroke),
                    num(*width),
                );
            }
            if *opacity < 1.0 {
                let _ = write!(svg, " opacity=\"{}\"", num(*opacity));
            }
            svg.push_str("/>");
        }
        Element::Text {
            x,
            y,
            content,
            size,
            fill,
            anchor,
            bold,
        } => {
            let weight = if *bold { " font-weight=\"bold\"" } else { "" };
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" \
                 fill=\"{}\" text-anchor=\"{}\"{}>{}</text>",
                num(*x),
                num(*y),
                num(*size),
                escape(fill),
                anchor.as_svg(),
                weight,
                escape(content),
            );
        }
    }
}

/// Format a coordinate with two decimals, trimming a trailing ".00".
fn num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    match formatted.strip_suffix(".00") {
        Some(trimmed) => trimmed.to_string(),
        None => formatted,
    }
}

/// Escape XML-special characters in attribute and text content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
