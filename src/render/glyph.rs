//! Line icons drawn on a 24x24 grid.

use palette::Srgb;

use super::markup::SvgBuilder;
use crate::record::MetricId;

/// An icon used in headers, action rows and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Heart,
    MessageCircle,
    MessageSquare,
    Repeat,
    Send,
    Share,
    Bookmark,
    BarChart,
    ThumbsUp,
    Globe,
    Play,
    Music,
    More,
}

impl Glyph {
    /// The icon shown next to a metric's count.
    pub fn for_metric(metric: MetricId) -> Self {
        match metric {
            MetricId::Likes => Self::Heart,
            MetricId::Comments => Self::MessageCircle,
            MetricId::Replies => Self::MessageSquare,
            MetricId::Reposts => Self::Repeat,
            MetricId::Shares => Self::Share,
            MetricId::Views => Self::BarChart,
            MetricId::Saves => Self::Bookmark,
        }
    }

    /// The icon for an action button label such as "Like" or "Send".
    pub fn for_action(label: &str) -> Self {
        match label {
            "Like" => Self::ThumbsUp,
            "Comment" => Self::MessageSquare,
            "Repost" => Self::Repeat,
            "Send" => Self::Send,
            "Share" => Self::Share,
            _ => Self::More,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Heart => {
                "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z"
            }
            Self::MessageCircle => "M7.9 20A9 9 0 1 0 4 16.1L2 22Z",
            Self::MessageSquare => "M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z",
            Self::Repeat => "M17 2l4 4-4 4M3 11v-1a4 4 0 0 1 4-4h14M7 22l-4-4 4-4M21 13v1a4 4 0 0 1-4 4H3",
            Self::Send => "M22 2L11 13M22 2l-7 20-4-9-9-4Z",
            Self::Share => "M4 12v8a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2v-8M16 6l-4-4-4 4M12 2v13",
            Self::Bookmark => "M19 21l-7-4-7 4V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2Z",
            Self::BarChart => "M12 20V10M18 20V4M6 20v-4",
            Self::ThumbsUp => {
                "M7 10v12M15 5.88L14 10h5.83a2 2 0 0 1 1.92 2.56l-2.33 8A2 2 0 0 1 17.5 22H4a2 2 0 0 1-2-2v-8a2 2 0 0 1 2-2h2.76a2 2 0 0 0 1.79-1.11L12 2a3.13 3.13 0 0 1 3 3.88Z"
            }
            Self::Globe => "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20M2 12h20M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10Z",
            Self::Play => "M6 3l14 9-14 9Z",
            Self::Music => "M9 18V5l12-2v13M9 18a3 3 0 1 1-6 0a3 3 0 1 1 6 0M21 16a3 3 0 1 1-6 0a3 3 0 1 1 6 0",
            Self::More => "M12 11a1 1 0 1 0 0 2a1 1 0 1 0 0-2M19 11a1 1 0 1 0 0 2a1 1 0 1 0 0-2M5 11a1 1 0 1 0 0 2a1 1 0 1 0 0-2",
        }
    }

    /// Draws the outline with its top-left corner at (`x`, `y`).
    pub fn draw(self, b: &mut SvgBuilder, x: f32, y: f32, size: f32, color: Srgb<u8>) {
        b.icon_path(self.path(), x, y, size, color, false);
    }

    /// Draws the glyph as a solid shape.
    pub fn draw_filled(self, b: &mut SvgBuilder, x: f32, y: f32, size: f32, color: Srgb<u8>) {
        b.icon_path(self.path(), x, y, size, color, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_has_a_glyph() {
        for metric in MetricId::ALL {
            let _ = Glyph::for_metric(metric);
        }
        assert_eq!(Glyph::for_metric(MetricId::Views), Glyph::BarChart);
    }

    #[test]
    fn unknown_action_falls_back() {
        assert_eq!(Glyph::for_action("Send"), Glyph::Send);
        assert_eq!(Glyph::for_action("Poke"), Glyph::More);
    }

    #[test]
    fn paths_start_with_move() {
        let all = [
            Glyph::Heart,
            Glyph::MessageCircle,
            Glyph::MessageSquare,
            Glyph::Repeat,
            Glyph::Send,
            Glyph::Share,
            Glyph::Bookmark,
            Glyph::BarChart,
            Glyph::ThumbsUp,
            Glyph::Globe,
            Glyph::Play,
            Glyph::Music,
            Glyph::More,
        ];
        for glyph in all {
            assert!(glyph.path().starts_with('M'), "{glyph:?}");
        }
    }
}
