//! Photo post: Instagram.

use super::glyph::Glyph;
use super::markup::{SvgBuilder, TextStyle};
use super::text::{draw_line, measure, truncate, wrap};
use super::{draw_avatar, draw_verified_badge};
use crate::record::{FieldId, MetricId, PostRecord};
use crate::theme::ThemeTokens;

const PAD: f32 = 16.0;
const HEADER: f32 = 64.0;
const TEXT_SIZE: f32 = 14.0;
const LINE: f32 = 20.0;
const ICON: f32 = 24.0;

/// Draws the post and returns its height.
///
/// Sections run top to bottom: header, caption, posted time, icon row,
/// likes, comments link.
pub(super) fn draw(b: &mut SvgBuilder, record: &PostRecord, tokens: &ThemeTokens, width: u32) -> f32 {
    let width = width as f32;
    let username = record.text(FieldId::Username);
    let bold = TextStyle::new(TEXT_SIZE, tokens.text).bold();

    draw_header(b, record, tokens, width);

    // Caption, prefixed with the bold username on its first line
    let mut y = HEADER + PAD;
    let indent = if username.is_empty() {
        0.0
    } else {
        measure(username, TEXT_SIZE * 1.05) + 8.0
    };
    let lines = wrap(record.content(), TEXT_SIZE, width - PAD * 2.0, indent);
    let body = TextStyle::new(TEXT_SIZE, tokens.text);
    for (i, line) in lines.iter().enumerate() {
        let baseline = y + LINE - 5.0;
        if i == 0 {
            b.text(PAD, baseline, bold, username);
            draw_line(b, PAD + indent, baseline, body, line);
        } else {
            draw_line(b, PAD, baseline, body, line);
        }
        y += LINE;
    }

    y += 12.0;
    let time = record.text(FieldId::TimeAgo).to_uppercase();
    b.text(PAD, y + 9.0, TextStyle::new(12.0, tokens.muted), &time);
    y += 16.0 + PAD;

    // Icon row
    let mut x = PAD;
    for glyph in [Glyph::Heart, Glyph::MessageCircle, Glyph::Send] {
        glyph.draw(b, x, y, ICON, tokens.secondary);
        x += ICON + 16.0;
    }
    Glyph::Bookmark.draw(b, width - PAD - ICON, y, ICON, tokens.secondary);
    y += ICON + 12.0;

    let likes = record.metric(MetricId::Likes);
    b.text(PAD, y + LINE - 5.0, bold, &format!("{likes} likes"));
    y += LINE + 4.0;

    let comments = record.metric(MetricId::Comments);
    b.text(
        PAD,
        y + LINE - 5.0,
        TextStyle::new(TEXT_SIZE, tokens.muted),
        &format!("View all {comments} comments"),
    );
    y += LINE;

    y + 12.0
}

/// Avatar, username with badge, optional location and a menu glyph above a
/// divider.
fn draw_header(b: &mut SvgBuilder, record: &PostRecord, tokens: &ThemeTokens, width: f32) {
    draw_avatar(b, record.image(FieldId::Avatar), PAD + 16.0, HEADER / 2.0, 16.0, tokens);

    let x = PAD + 32.0 + 12.0;
    let location = record.text(FieldId::Location);
    let name_baseline = if location.is_empty() { 37.0 } else { 29.0 };
    let handle = truncate(record.text(FieldId::Username), TEXT_SIZE * 1.05, width - x - 72.0);
    b.text(x, name_baseline, TextStyle::new(TEXT_SIZE, tokens.text).bold(), &handle);
    if record.flag(FieldId::Verified) {
        let end = x + measure(&handle, TEXT_SIZE * 1.05) + 4.0;
        draw_verified_badge(b, end, name_baseline - 5.0, 12.0, tokens.accent);
    }
    if !location.is_empty() {
        let location = truncate(location, 12.0, width - x - 48.0);
        b.text(x, 45.0, TextStyle::new(12.0, tokens.secondary), &location);
    }
    Glyph::More.draw(b, width - PAD - 20.0, HEADER / 2.0 - 10.0, 20.0, tokens.secondary);

    b.hline(0.0, width, HEADER, tokens.divider);
}

#[cfg(test)]
mod tests {
    use crate::platform::Platform;
    use crate::record::{FieldId, FieldPatch, MetricId, PostRecord};
    use crate::render::render_preview;

    #[test]
    fn sample_shows_likes_comments_and_location() {
        let markup = render_preview(&PostRecord::sample(Platform::Instagram)).into_markup();
        assert!(markup.contains(">1,234 likes<"));
        assert!(markup.contains(">View all 89 comments<"));
        assert!(markup.contains(">New York, NY<"));
        assert!(markup.contains(">2 HOURS AGO<"));
    }

    #[test]
    fn time_is_uppercased() {
        let record = PostRecord::sample(Platform::Instagram)
            .apply(&FieldPatch::text(FieldId::TimeAgo, "3 days ago"))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        assert!(markup.contains(">3 DAYS AGO<"));
    }

    #[test]
    fn caption_comes_before_likes() {
        let record = PostRecord::sample(Platform::Instagram)
            .apply(&FieldPatch::content("Sunset"))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        let caption = markup.find(">Sunset<").unwrap();
        let time = markup.find(">2 HOURS AGO<").unwrap();
        let likes = markup.find(">1,234 likes<").unwrap();
        let comments = markup.find(">View all 89 comments<").unwrap();
        assert!(caption < time && time < likes && likes < comments);
    }

    #[test]
    fn icons_carry_no_counts() {
        let record = PostRecord::sample(Platform::Instagram)
            .apply(&FieldPatch::metric(MetricId::Shares, "4321"))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        assert!(!markup.contains("4321"));
        assert!(!markup.contains(">1,234<"));
        assert!(!markup.contains(">89<"));
    }

    #[test]
    fn height_follows_caption_without_photo_area() {
        let short = PostRecord::sample(Platform::Instagram)
            .apply(&FieldPatch::content("hi"))
            .unwrap();
        let preview = render_preview(&short);
        assert!(preview.size().height < 468);
        let long = short.apply(&FieldPatch::content("line\n".repeat(10))).unwrap();
        assert!(render_preview(&long).size().height > preview.size().height);
    }
}
