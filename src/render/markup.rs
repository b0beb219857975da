//! A small SVG writer used by the layouts.

use std::fmt::Write;

use palette::Srgb;

use crate::theme::hex;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font settings for one `<text>` element.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Srgb<u8>,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn new(size: f32, color: Srgb<u8>) -> Self {
        Self {
            size,
            bold: false,
            color,
            anchor: Anchor::Start,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Generic font stack; resolved against the rasterizer's font database.
pub const FONT_FAMILY: &str = "Helvetica Neue, Helvetica, Arial, sans-serif";

/// Accumulates SVG elements and hands out deterministic element ids.
///
/// Two builders fed the same calls produce byte-identical markup.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    defs: String,
    body: String,
    next_id: u32,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, fill: Srgb<u8>) {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            num(radius),
            hex(fill)
        );
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Srgb<u8>, opacity: f32) {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
            num(cx),
            num(cy),
            num(r),
            hex(fill)
        );
        if opacity < 1.0 {
            let _ = write!(self.body, r#" fill-opacity="{}""#, num(opacity));
        }
        self.body.push_str("/>");
    }

    pub fn ring(&mut self, cx: f32, cy: f32, r: f32, stroke: Srgb<u8>, width: f32) {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            num(cx),
            num(cy),
            num(r),
            hex(stroke),
            num(width)
        );
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, stroke: Srgb<u8>) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            num(x1),
            num(y),
            num(x2),
            num(y),
            hex(stroke)
        );
    }

    /// Draws path data defined on a 24x24 grid, scaled to `size`.
    pub fn icon_path(&mut self, d: &str, x: f32, y: f32, size: f32, color: Srgb<u8>, filled: bool) {
        let scale = size / 24.0;
        let paint = if filled {
            format!(r#"fill="{}" stroke="none""#, hex(color))
        } else {
            format!(
                r#"fill="none" stroke="{}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#,
                hex(color)
            )
        };
        let _ = write!(
            self.body,
            r#"<path d="{d}" {paint} transform="translate({} {}) scale({})"/>"#,
            num(x),
            num(y),
            num(scale)
        );
    }

    /// Writes a single line of text with its baseline at `y`.
    pub fn text(&mut self, x: f32, y: f32, style: TextStyle, content: &str) {
        if content.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}" xml:space="preserve">{}</text>"#,
            num(x),
            num(y),
            FONT_FAMILY,
            num(style.size),
            if style.bold { "bold" } else { "normal" },
            hex(style.color),
            style.anchor.as_str(),
            escape(content)
        );
    }

    /// Places an image from a URL (usually a data URL) inside a rectangle,
    /// cropped to fill it.
    pub fn image(&mut self, x: f32, y: f32, w: f32, h: f32, href: &str) {
        let _ = write!(
            self.body,
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" xlink:href="{}"/>"#,
            num(x),
            num(y),
            num(w),
            num(h),
            escape(href)
        );
    }

    /// Places an image clipped to a circle.
    pub fn round_image(&mut self, cx: f32, cy: f32, r: f32, href: &str) {
        let id = self.fresh_id("clip");
        let _ = write!(
            self.defs,
            r#"<clipPath id="{id}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            num(cx),
            num(cy),
            num(r)
        );
        let _ = write!(self.body, r#"<g clip-path="url(#{id})">"#);
        self.image(cx - r, cy - r, r * 2.0, r * 2.0, href);
        self.body.push_str("</g>");
    }

    /// Fills a rectangle with a vertical fade from transparent to `color`.
    pub fn fade(&mut self, x: f32, y: f32, w: f32, h: f32, color: Srgb<u8>, max_opacity: f32) {
        let id = self.fresh_id("fade");
        let _ = write!(
            self.defs,
            r#"<linearGradient id="{id}" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{c}" stop-opacity="0"/><stop offset="1" stop-color="{c}" stop-opacity="{}"/></linearGradient>"#,
            num(max_opacity),
            c = hex(color),
        );
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="url(#{id})"/>"#,
            num(x),
            num(y),
            num(w),
            num(h)
        );
    }

    /// Wraps everything drawn so far in a document of the given size, on a
    /// rounded backdrop covering the whole document.
    pub fn finish(self, width: u32, height: u32, fill: Srgb<u8>, radius: f32) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{width}" height="{height}" rx="{}" fill="{}"/>"#,
            num(radius),
            hex(fill)
        );
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

/// Formats a coordinate with at most two decimals.
fn num(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Escapes text for use in SVG character data and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &apos;Jerry&apos;&lt;/b&gt;");
        assert_eq!(escape("a\u{0}b"), "ab");
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-4.0), "-4");
    }

    #[test]
    fn ids_are_deterministic() {
        let build = || {
            let mut b = SvgBuilder::new();
            b.round_image(10.0, 10.0, 5.0, "data:image/png;base64,AAAA");
            b.round_image(30.0, 10.0, 5.0, "data:image/png;base64,AAAA");
            b.finish(40, 20, Srgb::new(255, 255, 255), 0.0)
        };
        let svg = build();
        assert_eq!(svg, build());
        assert!(svg.contains(r#"id="clip0""#));
        assert!(svg.contains(r#"id="clip1""#));
    }

    #[test]
    fn backdrop_precedes_body() {
        let mut b = SvgBuilder::new();
        b.circle(5.0, 5.0, 2.0, Srgb::new(255, 0, 0), 1.0);
        let svg = b.finish(10, 10, Srgb::new(0, 0, 0), 4.0);
        let rect = svg.find("<rect").unwrap();
        let circle = svg.find("<circle").unwrap();
        assert!(rect < circle);
        assert!(svg.contains(r##"rx="4" fill="#000000""##));
    }

    #[test]
    fn empty_text_is_skipped() {
        let mut b = SvgBuilder::new();
        b.text(0.0, 0.0, TextStyle::new(12.0, Srgb::new(0, 0, 0)), "");
        assert!(!b.finish(1, 1, Srgb::new(0, 0, 0), 0.0).contains("<text"));
    }
}
