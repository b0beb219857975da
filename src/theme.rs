//! Light/dark preview themes and color helpers.

use std::fmt;

use palette::{Hsl, IntoColor, LinSrgb, Srgb};
use serde::{Deserialize, Serialize};

/// The preview color scheme.
///
/// The theme only affects how the preview is drawn and the export
/// background; the editor's form is theme independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Colors used to draw one theme of a platform's preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTokens {
    /// Card background.
    pub background: Srgb<u8>,
    /// Secondary fills: media placeholders, avatar placeholder, icon discs.
    pub surface: Srgb<u8>,
    /// Names and body text.
    pub text: Srgb<u8>,
    /// Handles, headlines and counters.
    pub secondary: Srgb<u8>,
    /// Timestamps and hints.
    pub muted: Srgb<u8>,
    /// Separator lines.
    pub divider: Srgb<u8>,
    /// Verified badge and reaction accents.
    pub accent: Srgb<u8>,
    /// Solid fill behind the exported bitmap.
    pub export_background: Srgb<u8>,
}

/// A light/dark pair of [`ThemeTokens`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePair {
    pub light: ThemeTokens,
    pub dark: ThemeTokens,
}

impl ThemePair {
    pub fn get(&self, theme: Theme) -> &ThemeTokens {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

// ============================================================================
// Color Utilities
// ============================================================================

/// Formats a color as `#rrggbb` for SVG attributes.
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Shifts a color's lightness by `amount` (negative darkens).
///
/// Used for hover-free "pressed" shades such as icon discs and the verified
/// badge's checkmark.
pub fn shade(color: Srgb<u8>, amount: f32) -> Srgb<u8> {
    let rgb: Srgb<f32> = color.into_format();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    let shaded: Srgb<f32> = hsl.into_color();
    shaded.into_format()
}

/// Returns the relative luminance of a color (0 = black, 1 = white).
pub fn luminance(color: Srgb<u8>) -> f32 {
    let linear: LinSrgb<f32> = color.into_format::<f32>().into_linear();
    0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(hex(Srgb::new(0xf3, 0xf2, 0xef)), "#f3f2ef");
        assert_eq!(hex(Srgb::new(0, 10, 255)), "#000aff");
    }

    #[test]
    fn shade_darkens_and_lightens() {
        let base = Srgb::new(200u8, 100, 100);
        assert!(luminance(shade(base, -0.2)) < luminance(base));
        assert!(luminance(shade(base, 0.2)) > luminance(base));
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
