//! Vertical video frame: TikTok.

use palette::Srgb;

use super::glyph::Glyph;
use super::markup::{Anchor, SvgBuilder, TextStyle};
use super::text::{draw_block, measure, truncate, wrap_collapsed};
use super::{draw_avatar, draw_verified_badge, metric_label};
use crate::record::{FieldId, ImageRef, PostRecord};
use crate::theme::ThemeTokens;

const RAIL: f32 = 64.0;
const PAD: f32 = 16.0;
const DISC: f32 = 24.0;
const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);
const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);

/// Draws the frame and returns its height; the frame is always 9:16.
pub(super) fn draw(b: &mut SvgBuilder, record: &PostRecord, tokens: &ThemeTokens, width: u32) -> f32 {
    let width = width as f32;
    let height = width * 16.0 / 9.0;

    b.rect(0.0, 0.0, width, height, 12.0, tokens.surface);
    match record.image(FieldId::Thumbnail).and_then(ImageRef::data_url) {
        Some(url) => {
            b.image(0.0, 0.0, width, height, &url.to_string());
            b.circle(width / 2.0, height / 2.0, 40.0, BLACK, 0.3);
            Glyph::Play.draw_filled(b, width / 2.0 - 24.0, height / 2.0 - 24.0, 48.0, WHITE);
        }
        None => {
            Glyph::Play.draw(b, width / 2.0 - 32.0, height / 2.0 - 32.0, 64.0, tokens.muted);
        }
    }
    b.fade(0.0, height - 240.0, width, 240.0, BLACK, 0.45);

    draw_caption(b, record, tokens, width - RAIL, height);
    draw_rail(b, record, tokens, width - RAIL / 2.0, height);

    height
}

/// Author, description and sound line, bottom-aligned in the left column.
fn draw_caption(b: &mut SvgBuilder, record: &PostRecord, tokens: &ThemeTokens, column: f32, height: f32) {
    let inner = column - PAD * 2.0;

    let sound_baseline = height - PAD - 4.0;
    Glyph::Music.draw(b, PAD, sound_baseline - 10.0, 12.0, WHITE);
    let sound = truncate(record.text(FieldId::Sound), 12.0, inner - 18.0);
    b.text(PAD + 18.0, sound_baseline, TextStyle::new(12.0, WHITE), &sound);

    let description = wrap_collapsed(record.content(), 14.0, inner);
    let line = 22.75;
    let block = description.len() as f32 * line;
    let top = sound_baseline - 12.0 - 12.0 - block;
    draw_block(b, PAD, top, TextStyle::new(14.0, tokens.text), line, &description);

    let row = top - 12.0 - 16.0;
    draw_avatar(b, record.image(FieldId::Avatar), PAD + 16.0, row, 16.0, tokens);
    b.ring(PAD + 16.0, row, 15.0, WHITE, 2.0);

    let handle = truncate(
        &format!("@{}", record.text(FieldId::Username)),
        14.0 * 1.05,
        inner - 40.0 - 20.0,
    );
    let x = PAD + 40.0;
    b.text(x, row + 5.0, TextStyle::new(14.0, WHITE).bold(), &handle);
    if record.flag(FieldId::Verified) {
        let end = x + measure(&handle, 14.0 * 1.05) + 4.0;
        draw_verified_badge(b, end, row, 16.0, tokens.accent);
    }
}

/// Metric discs stacked above a spinning-record avatar on the right.
fn draw_rail(b: &mut SvgBuilder, record: &PostRecord, tokens: &ThemeTokens, cx: f32, height: f32) {
    let record_cy = height - PAD - DISC;
    draw_avatar(b, record.image(FieldId::Avatar), cx, record_cy, DISC, tokens);
    b.ring(cx, record_cy, DISC - 1.0, WHITE, 2.0);

    let count_style = TextStyle::new(12.0, WHITE).anchor(Anchor::Middle);
    let mut bottom = record_cy - DISC - 24.0;
    for spec in record.descriptor().metrics.iter().rev() {
        let count_baseline = bottom - 4.0;
        let cy = count_baseline - 12.0 - 4.0 - DISC;
        b.circle(cx, cy, DISC, Srgb::new(31, 41, 55), 0.5);
        Glyph::for_metric(spec.id).draw(b, cx - 12.0, cy - 12.0, 24.0, WHITE);
        b.text(cx, count_baseline, count_style, &metric_label(record, spec));
        bottom = cy - DISC - 24.0;
    }
}
