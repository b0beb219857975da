//! Text-post card: LinkedIn, X and Facebook.

use super::glyph::Glyph;
use super::markup::{Anchor, SvgBuilder, TextStyle};
use super::text::{draw_block, measure, truncate, wrap};
use super::{draw_avatar, draw_verified_badge, metric_label};
use crate::platform::{CardStyle, Engagement};
use crate::record::{FieldId, PostRecord};
use crate::theme::ThemeTokens;

const PAD: f32 = 16.0;
const AVATAR: f32 = 48.0;
const NAME_SIZE: f32 = 15.0;
const SUB_SIZE: f32 = 13.0;
const META_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 14.0;
const BODY_LINE: f32 = 20.0;
const ACTION_ROW: f32 = 44.0;

/// Draws the card and returns its height.
pub(super) fn draw(
    b: &mut SvgBuilder,
    record: &PostRecord,
    style: &CardStyle,
    tokens: &ThemeTokens,
    width: u32,
) -> f32 {
    let width = width as f32;
    let header = draw_header(b, record, style, tokens, width);

    let mut y = PAD + header + 12.0;
    let body = wrap(record.content(), BODY_SIZE, width - PAD * 2.0, 0.0);
    y += draw_block(b, PAD, y, TextStyle::new(BODY_SIZE, tokens.text), BODY_LINE, &body);

    y += match style.engagement {
        Engagement::Summary => draw_summary(b, record, tokens, width, y + 8.0) + 8.0,
        Engagement::Counters => draw_counters(b, record, tokens, width, y + 12.0) + 12.0,
    };

    y + 4.0
}

/// Avatar, name line and the lines under it. Returns the header height.
fn draw_header(
    b: &mut SvgBuilder,
    record: &PostRecord,
    style: &CardStyle,
    tokens: &ThemeTokens,
    width: f32,
) -> f32 {
    let r = AVATAR / 2.0;
    draw_avatar(b, record.image(FieldId::Avatar), PAD + r, PAD + r, r, tokens);

    let x = PAD + AVATAR + 12.0;
    let available = width - x - PAD;
    let mut baseline = PAD + NAME_SIZE;

    let name_style = TextStyle::new(NAME_SIZE, tokens.text).bold();
    let name = truncate(record.text(FieldId::Name), NAME_SIZE * 1.05, available - 24.0);
    b.text(x, baseline, name_style, &name);
    if record.flag(FieldId::Verified) {
        let name_width = measure(&name, NAME_SIZE * 1.05);
        draw_verified_badge(b, x + name_width + 4.0, baseline - NAME_SIZE * 0.35, 16.0, tokens.accent);
    }

    if let Some(subtitle) = style.subtitle {
        let value = record.text(subtitle.field);
        let line = truncate(&format!("{}{value}", subtitle.prefix), SUB_SIZE, available);
        baseline += SUB_SIZE + 5.0;
        b.text(x, baseline, TextStyle::new(SUB_SIZE, tokens.secondary), &line);
    }

    if !style.meta.is_empty() {
        let meta = style
            .meta
            .iter()
            .map(|id| record.text(*id))
            .filter(|s| !s.is_empty())
            .map(|s| format!("{s} {}", style.separator))
            .collect::<Vec<_>>()
            .join(" ");
        baseline += META_SIZE + 6.0;
        let meta_style = TextStyle::new(META_SIZE, tokens.muted);
        b.text(x, baseline, meta_style, &meta);
        let globe_x = x + measure(&meta, META_SIZE) + if meta.is_empty() { 0.0 } else { 6.0 };
        Glyph::Globe.draw(b, globe_x, baseline - META_SIZE * 0.85, META_SIZE, tokens.muted);
    }

    AVATAR.max(baseline + 4.0 - PAD)
}

/// Reaction count on the left, other counts on the right, then an action
/// row. Returns the height used from `top`.
fn draw_summary(
    b: &mut SvgBuilder,
    record: &PostRecord,
    tokens: &ThemeTokens,
    width: f32,
    top: f32,
) -> f32 {
    let metrics = record.descriptor().metrics;
    let style = TextStyle::new(META_SIZE, tokens.muted);
    let baseline = top + 14.0;

    if let Some((first, rest)) = metrics.split_first() {
        b.circle(PAD + 8.0, baseline - 4.0, 8.0, tokens.accent, 1.0);
        Glyph::ThumbsUp.draw_filled(b, PAD + 3.0, baseline - 9.0, 10.0, tokens.background);
        b.text(PAD + 22.0, baseline, style, &metric_label(record, first));

        let right = rest
            .iter()
            .map(|spec| format!("{} {}", metric_label(record, spec), spec.label.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" • ");
        b.text(width - PAD, baseline, style.anchor(Anchor::End), &right);
    }

    let mut height = 24.0;
    let actions = record.descriptor().actions;
    if !actions.is_empty() {
        let line_y = top + height;
        b.hline(PAD, width - PAD, line_y, tokens.divider);

        let slot = (width - PAD * 2.0) / actions.len() as f32;
        let label_style = TextStyle::new(13.0, tokens.secondary).bold();
        for (i, label) in actions.iter().enumerate() {
            let center = PAD + slot * (i as f32 + 0.5);
            let label_width = measure(label, 13.0 * 1.05);
            let start = center - (18.0 + 6.0 + label_width) / 2.0;
            let mid = line_y + ACTION_ROW / 2.0;
            Glyph::for_action(label).draw(b, start, mid - 9.0, 18.0, tokens.secondary);
            b.text(start + 24.0, mid + 4.5, label_style, label);
        }
        height += ACTION_ROW;
    }

    height
}

/// One icon-and-count pair per metric spread across the row. Returns the
/// height used from `top`.
fn draw_counters(
    b: &mut SvgBuilder,
    record: &PostRecord,
    tokens: &ThemeTokens,
    width: f32,
    top: f32,
) -> f32 {
    let metrics = record.descriptor().metrics;
    if metrics.is_empty() {
        return 0.0;
    }

    b.hline(PAD, width - PAD, top, tokens.divider);
    let slot = (width - PAD * 2.0) / metrics.len() as f32;
    let mid = top + 22.0;
    let style = TextStyle::new(13.0, tokens.secondary);

    for (i, spec) in metrics.iter().enumerate() {
        let x = PAD + slot * i as f32;
        Glyph::for_metric(spec.id).draw(b, x, mid - 9.0, 18.0, tokens.secondary);
        b.text(x + 24.0, mid + 4.5, style, &metric_label(record, spec));
    }

    44.0
}

#[cfg(test)]
mod tests {
    use crate::platform::Platform;
    use crate::record::{FieldId, FieldPatch, MetricId, PostRecord};
    use crate::render::render_preview;

    #[test]
    fn linkedin_shows_headline_and_actions() {
        let markup = render_preview(&PostRecord::sample(Platform::LinkedIn)).into_markup();
        assert!(markup.contains("Product Manager | Tech Enthusiast | Speaker"));
        assert!(markup.contains(">Repost<"));
        assert!(markup.contains("37 comments • 18 reposts"));
    }

    #[test]
    fn x_shows_handle_and_counters() {
        let markup = render_preview(&PostRecord::sample(Platform::X)).into_markup();
        assert!(markup.contains(">@johnsmith<"));
        assert!(markup.contains(">1.2K<"));
        assert!(!markup.contains(">Repost<"));
    }

    #[test]
    fn x_counts_are_shown_as_typed() {
        let record = PostRecord::sample(Platform::X)
            .apply(&FieldPatch::metric(MetricId::Likes, "1500"))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        assert!(markup.contains(">1500<"));
        assert!(!markup.contains(">1.5K<"));
    }

    #[test]
    fn facebook_meta_is_time_and_dot() {
        let markup = render_preview(&PostRecord::sample(Platform::Facebook)).into_markup();
        assert!(markup.contains(">2h ·<"));
        assert!(!markup.contains("Public"));
    }

    #[test]
    fn linkedin_meta_is_time_and_bullet() {
        let markup = render_preview(&PostRecord::sample(Platform::LinkedIn)).into_markup();
        assert!(markup.contains(">2h •<"));
    }

    #[test]
    fn longer_content_makes_taller_card() {
        let short = PostRecord::sample(Platform::LinkedIn)
            .apply(&FieldPatch::content("hi"))
            .unwrap();
        let long = short
            .apply(&FieldPatch::content("line\n".repeat(20)))
            .unwrap();
        assert!(render_preview(&long).size().height > render_preview(&short).size().height);
    }

    #[test]
    fn empty_name_still_renders() {
        let record = PostRecord::sample(Platform::X)
            .apply(&FieldPatch::text(FieldId::Name, ""))
            .unwrap();
        let preview = render_preview(&record);
        assert!(preview.markup().starts_with("<svg"));
    }
}
