//! Text measurement, wrapping and emoji segmentation.
//!
//! Glyph advances are estimated from character classes rather than read from
//! a font, so layout is identical on every machine regardless of which fonts
//! the rasterizer later finds.

use super::markup::{Anchor, SvgBuilder, TextStyle};
use crate::data_url::DataUrl;

/// Returns the estimated advance of `c` in ems.
pub fn advance(c: char) -> f32 {
    match c {
        ' ' => 0.28,
        'i' | 'j' | 'l' | '!' | '|' | '.' | ',' | ':' | ';' | '\'' => 0.26,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.84,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.66,
        c if c.is_ascii() => 0.52,
        c if is_wide(c) => 1.0,
        _ => 0.6,
    }
}

/// CJK ideographs, Hangul, fullwidth forms and pictographs take a full em.
fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2600..=0x27BF
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F000..=0x1FAFF
            | 0x20000..=0x3FFFD
    )
}

/// Zero-width joiners and variation selectors carry no advance.
fn is_invisible(c: char) -> bool {
    matches!(c as u32, 0x200D | 0xFE0E | 0xFE0F)
}

/// Estimated width of `text` at `size` pixels.
pub fn measure(text: &str, size: f32) -> f32 {
    text.chars()
        .filter(|c| !is_invisible(*c))
        .map(advance)
        .sum::<f32>()
        * size
}

/// Wraps text the way `white-space: pre-line` does.
///
/// Newlines are kept, runs of other whitespace collapse to a single space and
/// words are packed greedily. The first line is `indent` pixels narrower (used
/// when a bold author name precedes a caption). Words wider than a line are
/// broken between characters. A single final line break adds no line.
pub fn wrap(text: &str, size: f32, max_width: f32, indent: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = advance(' ') * size;
    let text = text
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(text);

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let limit = line_limit(lines.len(), max_width, indent);
            let word_width = measure(word, size);

            if !line.is_empty() && line_width + space + word_width <= limit {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            let limit = line_limit(lines.len(), max_width, indent);
            if word_width <= limit {
                line.push_str(word);
                line_width = word_width;
            } else {
                let (full, rest) = break_word(word, size, limit, max_width);
                lines.extend(full);
                line_width = measure(&rest, size);
                line = rest;
            }
        }

        lines.push(line);
    }

    lines
}

/// Wraps text the way `white-space: normal` does: newlines collapse to
/// spaces along with every other whitespace run.
pub fn wrap_collapsed(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    wrap(&flat, size, max_width, 0.0)
}

fn line_limit(index: usize, max_width: f32, indent: f32) -> f32 {
    if index == 0 {
        (max_width - indent).max(0.0)
    } else {
        max_width
    }
}

/// Splits an over-long word into full-width chunks plus a remainder.
fn break_word(word: &str, size: f32, first_limit: f32, max_width: f32) -> (Vec<String>, String) {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut limit = first_limit;

    for c in word.chars() {
        let w = if is_invisible(c) { 0.0 } else { advance(c) * size };
        if !current.is_empty() && width + w > limit {
            chunks.push(std::mem::take(&mut current));
            width = 0.0;
            limit = max_width;
        }
        current.push(c);
        width += w;
    }

    (chunks, current)
}

/// Shortens `text` with an ellipsis so it fits in `max_width`.
pub fn truncate(text: &str, size: f32, max_width: f32) -> String {
    if measure(text, size) <= max_width {
        return text.to_string();
    }

    let budget = max_width - measure("…", size);
    let mut out = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let w = if is_invisible(c) { 0.0 } else { advance(c) * size };
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

// ============================================================================
// Emoji
// ============================================================================

/// A piece of a text line: plain text, or an emoji drawn from an SVG asset.
#[derive(Debug, Clone, PartialEq)]
pub enum Span<'a> {
    Text(&'a str),
    Emoji(&'static str),
}

/// Looks up the Twemoji artwork for a single-codepoint emoji.
#[cfg(feature = "twemoji")]
fn emoji_svg(c: char) -> Option<&'static str> {
    use twemoji_assets::svg::SvgTwemojiAsset;

    if c.is_ascii() {
        return None;
    }
    let mut buf = [0u8; 4];
    let asset = SvgTwemojiAsset::from_emoji(c.encode_utf8(&mut buf))?;
    Some(asset.as_ref())
}

#[cfg(not(feature = "twemoji"))]
fn emoji_svg(_c: char) -> Option<&'static str> {
    None
}

/// Splits a line into text and emoji spans.
///
/// Without the `twemoji` feature the whole line is one text span and emoji
/// are left to the font database.
pub fn spans(line: &str) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut start = 0;

    for (i, c) in line.char_indices() {
        if let Some(svg) = emoji_svg(c) {
            if start < i {
                out.push(Span::Text(&line[start..i]));
            }
            out.push(Span::Emoji(svg));
            start = i + c.len_utf8();
        } else if is_invisible(c) && out.last().is_some_and(|s| matches!(s, Span::Emoji(_))) && start == i {
            // Selector or joiner trailing an emoji image.
            start = i + c.len_utf8();
        }
    }

    if start < line.len() {
        out.push(Span::Text(&line[start..]));
    }
    out
}

/// Draws one line of left-aligned text, replacing emoji with images.
pub fn draw_line(b: &mut SvgBuilder, x: f32, baseline: f32, style: TextStyle, line: &str) {
    let parts = spans(line);
    if parts.iter().all(|s| matches!(s, Span::Text(_))) || style.anchor != Anchor::Start {
        b.text(x, baseline, style, line);
        return;
    }

    let mut cursor = x;
    for part in parts {
        match part {
            Span::Text(t) => {
                b.text(cursor, baseline, style, t);
                cursor += measure(t, style.size);
            }
            Span::Emoji(svg) => {
                let size = style.size * 1.1;
                let href = DataUrl::from_bytes("image/svg+xml", svg.as_bytes()).to_string();
                b.image(cursor, baseline - style.size * 0.9, size, size, &href);
                cursor += style.size;
            }
        }
    }
}

/// Draws wrapped lines starting with the first baseline at `top + size`.
///
/// Returns the total height used.
pub fn draw_block(
    b: &mut SvgBuilder,
    x: f32,
    top: f32,
    style: TextStyle,
    line_height: f32,
    lines: &[String],
) -> f32 {
    let lead = (line_height - style.size) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let baseline = top + i as f32 * line_height + lead + style.size * 0.8;
        draw_line(b, x, baseline, style, line);
    }
    lines.len() as f32 * line_height
}
