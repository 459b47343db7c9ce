//! Minimal SVG document builder

use crate::error::{PipelineError, Result};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// RGB fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0, 113, 188);
    pub const GREEN: Color = Color::rgb(0, 170, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const GREY: Color = Color::rgb(96, 96, 96);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Horizontal anchor of a text element
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Accumulates shapes and renders them into a standalone SVG file
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    elements: Vec<String>,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    /// Centered heading at the top of the canvas
    pub fn title(&mut self, text: &str) -> &mut Self {
        let x = self.width() / 2.0;
        self.text(x, 24.0, text, 16, Anchor::Middle)
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Color) -> &mut Self {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="1"/>"#,
            x,
            y,
            w.max(0.0),
            h.max(0.0),
            fill.hex(),
            fill.hex()
        ));
        self
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color) -> &mut Self {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            x1,
            y1,
            x2,
            y2,
            stroke.hex()
        ));
        self
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Color) -> &mut Self {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="white" stroke-width="1"/>"#,
            cx,
            cy,
            r,
            fill.hex()
        ));
        self
    }

    /// Raw path data, e.g. a pie slice
    pub fn path(&mut self, d: &str, fill: Color) -> &mut Self {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="white" stroke-width="1"/>"#,
            escape(d),
            fill.hex()
        ));
        self
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: u32, anchor: Anchor) -> &mut Self {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            size,
            anchor.as_str(),
            escape(content)
        ));
        self
    }

    /// Text rotated by -90 degrees around its anchor point
    pub fn vertical_text(&mut self, x: f64, y: f64, content: &str, size: u32) -> &mut Self {
        self.elements.push(format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="{}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
            size,
            escape(content),
        ));
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
        for element in &self.elements {
            let _ = writeln!(out, "{}", element);
        }
        out.push_str("</svg>\n");
        out
    }

    /// Render to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render()).map_err(|e| {
            PipelineError::VisualizationError(format!("{}: {}", path.display(), e))
        })
    }
}
