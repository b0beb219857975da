//! Preview rendering.
//!
//! A [`Preview`] is an SVG replica of a post, produced by a pure function of
//! the [`PostRecord`]. The same record always yields byte-identical markup.
//!
//! Each platform descriptor selects one of three layouts:
//!
//! - `card`: header, text body and engagement (LinkedIn, X, Facebook)
//! - `photo`: header, caption, icon row, likes and comments (Instagram)
//! - `video`: vertical frame with overlaid counters (TikTok)

mod card;
mod glyph;
mod markup;
mod photo;
pub(crate) mod raster;
mod text;
mod video;

use palette::Srgb;

use crate::format::display_metric;
use crate::platform::{Layout, MetricSpec, Platform};
use crate::record::{ImageRef, PostRecord};
use crate::theme::{Theme, ThemeTokens, luminance, shade};

use markup::SvgBuilder;

/// Dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scales both dimensions, rounding up.
    pub fn scaled(&self, factor: f32) -> SizePx {
        SizePx::new(
            (self.width as f32 * factor).ceil() as u32,
            (self.height as f32 * factor).ceil() as u32,
        )
    }
}

/// A rendered post preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    platform: Platform,
    theme: Theme,
    size: SizePx,
    markup: String,
}

impl Preview {
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Logical size; the exported bitmap is this times the pixel ratio.
    pub fn size(&self) -> SizePx {
        self.size
    }

    /// The SVG document.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

/// Renders a record into its platform's layout.
///
/// ```
/// use postmock::{Platform, PostRecord, render_preview};
///
/// let preview = render_preview(&PostRecord::sample(Platform::X));
/// assert_eq!(preview.size().width, 552);
/// assert!(preview.markup().contains("John Smith"));
/// ```
pub fn render_preview(record: &PostRecord) -> Preview {
    let descriptor = record.descriptor();
    let tokens = descriptor.tokens(record.theme());
    let width = descriptor.width;
    let mut b = SvgBuilder::new();

    let (height, radius) = match descriptor.layout {
        Layout::Card(style) => (card::draw(&mut b, record, &style, tokens, width), 8.0),
        Layout::Photo => (photo::draw(&mut b, record, tokens, width), 0.0),
        Layout::Video => (video::draw(&mut b, record, tokens, width), 12.0),
    };
    let height = height.ceil() as u32;

    Preview {
        platform: record.platform(),
        theme: record.theme(),
        size: SizePx::new(width, height),
        markup: b.finish(width, height, tokens.background, radius),
    }
}

// ============================================================================
// Shared Pieces
// ============================================================================

/// Draws a round avatar, or a silhouette placeholder when none is set.
fn draw_avatar(
    b: &mut SvgBuilder,
    image: Option<&ImageRef>,
    cx: f32,
    cy: f32,
    r: f32,
    tokens: &ThemeTokens,
) {
    match image.and_then(ImageRef::data_url) {
        Some(url) => b.round_image(cx, cy, r, &url.to_string()),
        None => draw_avatar_placeholder(b, cx, cy, r, tokens.surface),
    }
}

fn draw_avatar_placeholder(
    b: &mut SvgBuilder,
    cx: f32,
    cy: f32,
    r: f32,
    fill: Srgb<u8>,
) {
    let figure = if luminance(fill) > 0.5 {
        shade(fill, -0.25)
    } else {
        shade(fill, 0.25)
    };
    b.circle(cx, cy, r, fill, 1.0);
    b.circle(cx, cy - r * 0.25, r * 0.33, figure, 1.0);
    b.icon_path("M4.5 20.5a7.5 7 0 0 1 15 0Z", cx - r, cy - r, r * 2.0, figure, true);
}

/// Draws the verified check badge with its left edge at `x`.
fn draw_verified_badge(b: &mut SvgBuilder, x: f32, cy: f32, size: f32, accent: Srgb<u8>) {
    let r = size / 2.0;
    b.circle(x + r, cy, r, accent, 1.0);
    b.icon_path(
        "M7 12.5l3.2 3.2L17 9",
        x,
        cy - r,
        size,
        shade(accent, 0.6),
        false,
    );
}

/// The text shown for a metric, compacted when the platform asks for it.
fn metric_label(record: &PostRecord, spec: &MetricSpec) -> String {
    display_metric(record.metric(spec.id), spec.compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::DataUrl;
    use crate::record::{FieldId, FieldPatch, MetricId};

    #[test]
    fn rendering_is_deterministic() {
        for platform in Platform::ALL {
            let record = PostRecord::sample(platform);
            assert_eq!(render_preview(&record), render_preview(&record), "{platform}");
        }
    }

    #[test]
    fn preview_width_follows_descriptor() {
        for platform in Platform::ALL {
            let preview = render_preview(&PostRecord::sample(platform));
            assert_eq!(preview.size().width, platform.descriptor().width);
            assert!(preview.size().height > 0);
            assert_eq!(preview.platform(), platform);
        }
    }

    #[test]
    fn video_frame_is_portrait() {
        let preview = render_preview(&PostRecord::sample(Platform::TikTok));
        assert_eq!(preview.size(), SizePx::new(360, 640));
    }

    #[test]
    fn theme_changes_colors_only() {
        let light = PostRecord::sample(Platform::LinkedIn);
        let dark = light.with_theme(Theme::Dark);
        let a = render_preview(&light);
        let b = render_preview(&dark);
        assert_ne!(a.markup(), b.markup());
        assert_eq!(a.size(), b.size());
        assert!(a.markup().contains("#f3f2ef"));
        assert!(b.markup().contains("#1a1a1a"));
    }

    #[test]
    fn edits_show_up_in_markup() {
        let record = PostRecord::sample(Platform::Facebook)
            .apply(&FieldPatch::text(FieldId::Name, "Ada <Lovelace>"))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        assert!(markup.contains("Ada &lt;Lovelace&gt;"));
        assert!(!markup.contains("John Doe"));
    }

    #[test]
    fn metrics_are_shown_verbatim() {
        for platform in Platform::ALL {
            let record = PostRecord::sample(platform)
                .apply(&FieldPatch::metric(MetricId::Likes, "15300"))
                .unwrap();
            let markup = render_preview(&record).into_markup();
            assert!(markup.contains("15300"), "{platform}");
            assert!(!markup.contains("15K"), "{platform}");
        }
    }

    #[test]
    fn uploaded_avatar_is_embedded() {
        let url = DataUrl::from_bytes("image/png", &[1, 2, 3]);
        let record = PostRecord::sample(Platform::Instagram)
            .apply(&FieldPatch::image(FieldId::Avatar, ImageRef::Embedded(url.clone())))
            .unwrap();
        let markup = render_preview(&record).into_markup();
        assert!(markup.contains(&url.to_string()));
        assert!(markup.contains("clipPath"));
    }

    #[test]
    fn verified_badge_is_conditional() {
        let verified = PostRecord::sample(Platform::X);
        let plain = verified
            .apply(&FieldPatch::flag(FieldId::Verified, false))
            .unwrap();
        let with_badge = render_preview(&verified).into_markup();
        let without = render_preview(&plain).into_markup();
        assert!(with_badge.contains("M7 12.5l3.2 3.2L17 9"));
        assert!(!without.contains("M7 12.5l3.2 3.2L17 9"));
    }

    #[test]
    fn scaled_size_rounds_up() {
        assert_eq!(SizePx::new(552, 301).scaled(2.0), SizePx::new(1104, 602));
        assert_eq!(SizePx::new(3, 3).scaled(1.5), SizePx::new(5, 5));
    }
}
