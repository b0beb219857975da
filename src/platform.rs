//! Declarative per-platform descriptors.
//!
//! Every platform is rendered and edited by the same generic code; the
//! differences (which fields exist, their sample values, labels, layout and
//! colors) live in the static [`PlatformDescriptor`] tables below.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::record::{FieldId, FieldKind, MetricId};
use crate::theme::{Theme, ThemePair, ThemeTokens};

// ============================================================================
// Platform
// ============================================================================

/// The simulated social network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Platform {
    /// Professional network.
    #[cfg_attr(feature = "clap", value(name = "linkedin"))]
    LinkedIn,
    /// Microblog.
    X,
    /// Photo feed.
    Instagram,
    /// Short-video feed.
    #[cfg_attr(feature = "clap", value(name = "tiktok"))]
    TikTok,
    /// General feed.
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Self::LinkedIn,
        Self::X,
        Self::Instagram,
        Self::TikTok,
        Self::Facebook,
    ];

    /// Returns the static descriptor for this platform.
    pub fn descriptor(self) -> &'static PlatformDescriptor {
        match self {
            Self::LinkedIn => &LINKEDIN,
            Self::X => &XCOM,
            Self::Instagram => &INSTAGRAM,
            Self::TikTok => &TIKTOK,
            Self::Facebook => &FACEBOOK,
        }
    }

    /// Returns the lowercase key used in documents and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::X => "x",
            Self::Instagram => "instagram",
            Self::TikTok => "tiktok",
            Self::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().display_name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform `{s}`"))
    }
}

// ============================================================================
// Descriptor Types
// ============================================================================

/// Sample value a field starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Text(&'static str),
    Flag(bool),
    Placeholder,
}

/// A profile field a platform exposes in its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

/// The post body's form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSpec {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub default: &'static str,
}

/// An engagement counter a platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub id: MetricId,
    pub label: &'static str,
    pub default: &'static str,
    /// Whether plain integers are shown in compact notation.
    pub compact: bool,
}

/// A subtitle line under the author name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtitle {
    pub field: FieldId,
    pub prefix: &'static str,
}

/// How a card layout shows its metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    /// First metric as a reaction count on the left, the rest as
    /// "N label" entries on the right, followed by an action row.
    Summary,
    /// One icon-and-count pair per metric in a single row.
    Counters,
}

/// Options for the text-post card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub subtitle: Option<Subtitle>,
    /// Fields under the name, each followed by `separator`, then a globe
    /// glyph.
    pub meta: &'static [FieldId],
    pub separator: &'static str,
    pub engagement: Engagement,
}

/// The preview's overall structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Header, text body, engagement (LinkedIn, X, Facebook).
    Card(CardStyle),
    /// Header, caption, time, icon row, likes and comments (Instagram).
    Photo,
    /// Vertical video frame with overlaid counters (TikTok).
    Video,
}

/// Everything the generic editor needs to know about one platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformDescriptor {
    pub platform: Platform,
    pub display_name: &'static str,
    pub export_filename: &'static str,
    pub default_theme: Theme,
    /// Preview width in logical pixels.
    pub width: u32,
    pub layout: Layout,
    pub fields: &'static [FieldSpec],
    pub content: ContentSpec,
    pub metrics: &'static [MetricSpec],
    /// Labels of the action buttons under the post, if any.
    pub actions: &'static [&'static str],
    pub themes: ThemePair,
}

impl PlatformDescriptor {
    pub fn field(&self, id: FieldId) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.id == id)
    }

    pub fn metric(&self, id: MetricId) -> Option<&MetricSpec> {
        self.metrics.iter().find(|spec| spec.id == id)
    }

    pub fn has_field(&self, id: FieldId) -> bool {
        self.field(id).is_some()
    }

    pub fn tokens(&self, theme: Theme) -> &ThemeTokens {
        self.themes.get(theme)
    }
}

// ============================================================================
// Field Helpers
// ============================================================================

const fn text(id: FieldId, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::Text,
        default: FieldDefault::Text(default),
    }
}

const fn flag(id: FieldId, label: &'static str, default: bool) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::Flag,
        default: FieldDefault::Flag(default),
    }
}

const fn image(id: FieldId, label: &'static str) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::Image,
        default: FieldDefault::Placeholder,
    }
}

const fn metric(id: MetricId, label: &'static str, default: &'static str, compact: bool) -> MetricSpec {
    MetricSpec {
        id,
        label,
        default,
        compact,
    }
}

const fn rgb(hex: u32) -> Srgb<u8> {
    Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

// ============================================================================
// Descriptors
// ============================================================================

static LINKEDIN: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::LinkedIn,
    display_name: "LinkedIn",
    export_filename: "linkedin-post.png",
    default_theme: Theme::Light,
    width: 552,
    layout: Layout::Card(CardStyle {
        subtitle: Some(Subtitle {
            field: FieldId::Headline,
            prefix: "",
        }),
        meta: &[FieldId::TimeAgo],
        separator: "•",
        engagement: Engagement::Summary,
    }),
    fields: &[
        text(FieldId::Name, "Name", "Jane Doe"),
        text(
            FieldId::Headline,
            "Title/Headline",
            "Product Manager | Tech Enthusiast | Speaker",
        ),
        text(FieldId::TimeAgo, "Posted Time", "2h"),
        image(FieldId::Avatar, "Profile Picture"),
    ],
    content: ContentSpec {
        label: "Content",
        placeholder: "Write your LinkedIn post...",
        default: "I'm excited to share that our team just launched a new feature that will revolutionize how you interact with our platform! 🚀\n\nAfter months of hard work and collaboration, we've created something truly special. I'm incredibly proud of what we've accomplished.\n\n#ProductDevelopment #Innovation #TechNews",
    },
    metrics: &[
        metric(MetricId::Likes, "Likes", "243", false),
        metric(MetricId::Comments, "Comments", "37", false),
        metric(MetricId::Reposts, "Reposts", "18", false),
    ],
    actions: &["Like", "Comment", "Repost", "Send"],
    themes: ThemePair {
        light: ThemeTokens {
            background: rgb(0xf3f2ef),
            surface: rgb(0xe0e0e0),
            text: rgb(0x000000),
            secondary: rgb(0x666666),
            muted: rgb(0x666666),
            divider: rgb(0xe5e7eb),
            accent: rgb(0x0a66c2),
            export_background: rgb(0xf3f2ef),
        },
        dark: ThemeTokens {
            background: rgb(0x1a1a1a),
            surface: rgb(0x38434f),
            text: rgb(0xffffff),
            secondary: rgb(0xd1d5db),
            muted: rgb(0x9ca3af),
            divider: rgb(0x1f2937),
            accent: rgb(0x70b5f9),
            export_background: rgb(0x1a1a1a),
        },
    },
};

static XCOM: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::X,
    display_name: "X",
    export_filename: "x-post.png",
    default_theme: Theme::Dark,
    width: 552,
    layout: Layout::Card(CardStyle {
        subtitle: Some(Subtitle {
            field: FieldId::Username,
            prefix: "@",
        }),
        meta: &[],
        separator: "•",
        engagement: Engagement::Counters,
    }),
    fields: &[
        text(FieldId::Name, "Name", "John Smith"),
        text(FieldId::Username, "Username", "johnsmith"),
        flag(FieldId::Verified, "Verified Account", true),
        image(FieldId::Avatar, "Profile Picture"),
    ],
    content: ContentSpec {
        label: "Content",
        placeholder: "What's happening?",
        default: "I built a 1-doc system for Bolt/Lovable/Replit to one-shot applications.\n\nA hybrid of PRD + implementation plan to provide detailed context in just 1 document.\n\nI call it \"Unified Project Documentation\"\n\nSimple steps:\n1/ Open @CodeGuidedev\n2/ New Project \"Write your app idea\"\n3/ Select AI tools (Replit, Lovable, Bolt etc)\n4/ Copy unified project doc by clicking \"copy prompt\"\n5/ Paste the prompt in any selected tool\n6/ Start building your app",
    },
    metrics: &[
        metric(MetricId::Replies, "Replies", "8", false),
        metric(MetricId::Reposts, "Reposts", "12", false),
        metric(MetricId::Likes, "Likes", "65", false),
        metric(MetricId::Views, "Views", "1.2K", false),
    ],
    actions: &[],
    themes: ThemePair {
        light: ThemeTokens {
            background: rgb(0xffffff),
            surface: rgb(0xe5e7eb),
            text: rgb(0x000000),
            secondary: rgb(0x4b5563),
            muted: rgb(0x4b5563),
            divider: rgb(0xe5e7eb),
            accent: rgb(0x3b82f6),
            export_background: rgb(0xffffff),
        },
        dark: ThemeTokens {
            background: rgb(0x000000),
            surface: rgb(0x374151),
            text: rgb(0xffffff),
            secondary: rgb(0x9ca3af),
            muted: rgb(0x9ca3af),
            divider: rgb(0x2f3336),
            accent: rgb(0x60a5fa),
            export_background: rgb(0x000000),
        },
    },
};

static INSTAGRAM: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Instagram,
    display_name: "Instagram",
    export_filename: "instagram-post.png",
    default_theme: Theme::Light,
    width: 468,
    layout: Layout::Photo,
    fields: &[
        text(FieldId::Name, "Name", "Jane Smith"),
        text(FieldId::Username, "Username", "janesmith"),
        text(FieldId::Location, "Location", "New York, NY"),
        flag(FieldId::Verified, "Verified Account", false),
        image(FieldId::Avatar, "Profile Picture"),
        text(FieldId::TimeAgo, "Posted Time", "2 HOURS AGO"),
    ],
    content: ContentSpec {
        label: "Caption",
        placeholder: "Write a caption...",
        default: "Excited to share my latest project! 🚀 Working on something amazing that will change how we think about social media. Can't wait to show you all what we've been building! ✨\n\n#innovation #tech #startup #excited #newproject",
    },
    metrics: &[
        metric(MetricId::Likes, "Likes", "1,234", false),
        metric(MetricId::Comments, "Comments", "89", false),
        metric(MetricId::Shares, "Shares", "45", false),
    ],
    actions: &[],
    themes: ThemePair {
        light: ThemeTokens {
            background: rgb(0xffffff),
            surface: rgb(0xf3f4f6),
            text: rgb(0x000000),
            secondary: rgb(0x4b5563),
            muted: rgb(0x6b7280),
            divider: rgb(0xe5e7eb),
            accent: rgb(0x3b82f6),
            export_background: rgb(0xffffff),
        },
        dark: ThemeTokens {
            background: rgb(0x000000),
            surface: rgb(0x111827),
            text: rgb(0xffffff),
            secondary: rgb(0x9ca3af),
            muted: rgb(0x9ca3af),
            divider: rgb(0x262626),
            accent: rgb(0x3b82f6),
            export_background: rgb(0x000000),
        },
    },
};

static TIKTOK: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::TikTok,
    display_name: "TikTok",
    export_filename: "tiktok-post.png",
    default_theme: Theme::Dark,
    width: 360,
    layout: Layout::Video,
    fields: &[
        text(FieldId::Name, "Display Name", "Sarah Johnson"),
        text(FieldId::Username, "Username", "sarahjohnson"),
        text(FieldId::Sound, "Sound/Music", "Original sound - sarahjohnson"),
        flag(FieldId::Verified, "Verified Account", false),
        image(FieldId::Avatar, "Profile Picture"),
        image(FieldId::Thumbnail, "Video Thumbnail"),
    ],
    content: ContentSpec {
        label: "Video Description",
        placeholder: "Describe your video...",
        default: "Just vibing and creating content! ✨",
    },
    metrics: &[
        metric(MetricId::Likes, "Likes", "12.3K", false),
        metric(MetricId::Comments, "Comments", "847", false),
        metric(MetricId::Shares, "Shares", "234", false),
        metric(MetricId::Saves, "Saves", "156", false),
    ],
    actions: &[],
    themes: ThemePair {
        light: ThemeTokens {
            background: rgb(0xffffff),
            surface: rgb(0xf3f4f6),
            text: rgb(0xffffff),
            secondary: rgb(0xffffff),
            muted: rgb(0x9ca3af),
            divider: rgb(0xe5e7eb),
            accent: rgb(0x3b82f6),
            export_background: rgb(0xffffff),
        },
        dark: ThemeTokens {
            background: rgb(0x000000),
            surface: rgb(0x111827),
            text: rgb(0xffffff),
            secondary: rgb(0xffffff),
            muted: rgb(0x4b5563),
            divider: rgb(0x1f2937),
            accent: rgb(0x3b82f6),
            export_background: rgb(0x000000),
        },
    },
};

static FACEBOOK: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Facebook,
    display_name: "Facebook",
    export_filename: "facebook-post.png",
    default_theme: Theme::Light,
    width: 552,
    layout: Layout::Card(CardStyle {
        subtitle: None,
        meta: &[FieldId::TimeAgo],
        separator: "·",
        engagement: Engagement::Summary,
    }),
    fields: &[
        text(FieldId::Name, "Name", "John Doe"),
        text(FieldId::TimeAgo, "Posted Time", "2h"),
        text(FieldId::Privacy, "Privacy", "Public"),
        image(FieldId::Avatar, "Profile Picture"),
    ],
    content: ContentSpec {
        label: "What's on your mind?",
        placeholder: "What's on your mind?",
        default: "Excited to share some amazing news! 🎉 Just launched my new project and couldn't be happier with the results. Thank you to everyone who supported me along the way! 💙\n\nWhat do you think? Let me know in the comments below! 👇\n\n#NewProject #Excited #Grateful #Community",
    },
    metrics: &[
        metric(MetricId::Likes, "Likes", "127", false),
        metric(MetricId::Comments, "Comments", "23", false),
        metric(MetricId::Shares, "Shares", "8", false),
    ],
    actions: &["Like", "Comment", "Share"],
    themes: ThemePair {
        light: ThemeTokens {
            background: rgb(0xffffff),
            surface: rgb(0xf0f2f5),
            text: rgb(0x1c1e21),
            secondary: rgb(0x65676b),
            muted: rgb(0x65676b),
            divider: rgb(0xced0d4),
            accent: rgb(0x1877f2),
            export_background: rgb(0xffffff),
        },
        dark: ThemeTokens {
            background: rgb(0x18191a),
            surface: rgb(0x3a3b3c),
            text: rgb(0xe4e6ea),
            secondary: rgb(0xb0b3b8),
            muted: rgb(0xb0b3b8),
            divider: rgb(0x3e4042),
            accent: rgb(0x1877f2),
            export_background: rgb(0x18191a),
        },
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::hex;

    #[test]
    fn descriptors_match_their_platform() {
        for platform in Platform::ALL {
            assert_eq!(platform.descriptor().platform, platform);
        }
    }

    #[test]
    fn export_filenames_are_fixed() {
        assert_eq!(Platform::LinkedIn.descriptor().export_filename, "linkedin-post.png");
        assert_eq!(Platform::X.descriptor().export_filename, "x-post.png");
        assert_eq!(Platform::Instagram.descriptor().export_filename, "instagram-post.png");
        assert_eq!(Platform::TikTok.descriptor().export_filename, "tiktok-post.png");
        assert_eq!(Platform::Facebook.descriptor().export_filename, "facebook-post.png");
    }

    #[test]
    fn export_backgrounds_follow_theme() {
        let linkedin = Platform::LinkedIn.descriptor();
        assert_eq!(hex(linkedin.tokens(Theme::Light).export_background), "#f3f2ef");
        assert_eq!(hex(linkedin.tokens(Theme::Dark).export_background), "#1a1a1a");

        let facebook = Platform::Facebook.descriptor();
        assert_eq!(hex(facebook.tokens(Theme::Dark).export_background), "#18191a");
    }

    #[test]
    fn every_platform_has_name_and_avatar() {
        for platform in Platform::ALL {
            let desc = platform.descriptor();
            assert!(desc.has_field(FieldId::Name), "{platform}");
            assert_eq!(desc.field(FieldId::Avatar).unwrap().kind, FieldKind::Image);
        }
    }

    #[test]
    fn field_ids_are_unique_per_platform() {
        for platform in Platform::ALL {
            let fields = platform.descriptor().fields;
            for (i, a) in fields.iter().enumerate() {
                assert!(fields[i + 1..].iter().all(|b| b.id != a.id), "{platform}: {}", a.id);
            }
        }
    }

    #[test]
    fn platform_parses_from_key() {
        assert_eq!("linkedin".parse::<Platform>(), Ok(Platform::LinkedIn));
        assert_eq!("TikTok".parse::<Platform>(), Ok(Platform::TikTok));
        assert!("myspace".parse::<Platform>().is_err());
        assert_eq!(
            serde_json::to_string(&Platform::LinkedIn).unwrap(),
            "\"linkedin\""
        );
    }
}
