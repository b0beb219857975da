//! The Post Record bound to one editor, and the patches that update it.
//!
//! A [`PostRecord`] is never mutated in place. [`PostRecord::apply`] takes a
//! single-field [`FieldPatch`] and returns a new record in which every other
//! field is carried over untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data_url::DataUrl;
use crate::error::EditError;
use crate::platform::{FieldDefault, Platform, PlatformDescriptor};
use crate::theme::Theme;

// ============================================================================
// Field and Metric Identifiers
// ============================================================================

/// Identifies a profile field. Each platform declares a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum FieldId {
    Name,
    Username,
    Headline,
    TimeAgo,
    Privacy,
    Location,
    Sound,
    Verified,
    Avatar,
    Thumbnail,
}

impl FieldId {
    pub const ALL: [FieldId; 10] = [
        Self::Name,
        Self::Username,
        Self::Headline,
        Self::TimeAgo,
        Self::Privacy,
        Self::Location,
        Self::Sound,
        Self::Verified,
        Self::Avatar,
        Self::Thumbnail,
    ];

    /// Returns the key used in documents and `key=value` assignments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Headline => "headline",
            Self::TimeAgo => "timeAgo",
            Self::Privacy => "privacy",
            Self::Location => "location",
            Self::Sound => "sound",
            Self::Verified => "verified",
            Self::Avatar => "avatar",
            Self::Thumbnail => "thumbnail",
        }
    }

    /// Looks up a field by key. Matching ignores ASCII case.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies an engagement counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum MetricId {
    Likes,
    Comments,
    Reposts,
    Shares,
    Replies,
    Views,
    Saves,
}

impl MetricId {
    pub const ALL: [MetricId; 7] = [
        Self::Likes,
        Self::Comments,
        Self::Reposts,
        Self::Shares,
        Self::Replies,
        Self::Views,
        Self::Saves,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Reposts => "reposts",
            Self::Shares => "shares",
            Self::Replies => "replies",
            Self::Views => "views",
            Self::Saves => "saves",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// The kind of value a profile field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    Image,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Flag => "flag",
            Self::Image => "image",
        })
    }
}

/// An avatar or thumbnail reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ImageRef {
    /// No image chosen; the preview draws a neutral placeholder.
    #[default]
    Placeholder,
    /// Image bytes read from a user-selected file.
    Embedded(DataUrl),
}

impl ImageRef {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn data_url(&self) -> Option<&DataUrl> {
        match self {
            Self::Placeholder => None,
            Self::Embedded(url) => Some(url),
        }
    }
}

/// The value stored in a profile field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Image(ImageRef),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Flag(_) => FieldKind::Flag,
            Self::Image(_) => FieldKind::Image,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageRef> {
        match self {
            Self::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl From<&FieldDefault> for FieldValue {
    fn from(default: &FieldDefault) -> Self {
        match default {
            FieldDefault::Text(s) => Self::Text((*s).to_string()),
            FieldDefault::Flag(b) => Self::Flag(*b),
            FieldDefault::Placeholder => Self::Image(ImageRef::Placeholder),
        }
    }
}

// ============================================================================
// FieldPatch
// ============================================================================

/// A change to exactly one named field of a [`PostRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    /// Replace a profile field.
    Profile { field: FieldId, value: FieldValue },
    /// Replace the post body.
    Content(String),
    /// Replace a metric's text.
    Metric { metric: MetricId, value: String },
}

impl FieldPatch {
    pub fn text(field: FieldId, value: impl Into<String>) -> Self {
        Self::Profile {
            field,
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn flag(field: FieldId, value: bool) -> Self {
        Self::Profile {
            field,
            value: FieldValue::Flag(value),
        }
    }

    pub fn image(field: FieldId, value: ImageRef) -> Self {
        Self::Profile {
            field,
            value: FieldValue::Image(value),
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self::Content(value.into())
    }

    pub fn metric(metric: MetricId, value: impl Into<String>) -> Self {
        Self::Metric {
            metric,
            value: value.into(),
        }
    }

    /// Builds a patch from a textual `key=value` assignment.
    ///
    /// `key` is `content`, a metric key or a profile field key. The value is
    /// interpreted according to the field's declared kind: flags accept
    /// `true`/`false`, images accept a data URL (an empty value resets to the
    /// placeholder).
    ///
    /// ```
    /// use postmock::{FieldId, FieldPatch, MetricId, Platform};
    ///
    /// let desc = Platform::X.descriptor();
    /// assert_eq!(
    ///     FieldPatch::parse_assignment(desc, "likes", "900").unwrap(),
    ///     FieldPatch::metric(MetricId::Likes, "900"),
    /// );
    /// assert_eq!(
    ///     FieldPatch::parse_assignment(desc, "verified", "false").unwrap(),
    ///     FieldPatch::flag(FieldId::Verified, false),
    /// );
    /// ```
    pub fn parse_assignment(
        descriptor: &PlatformDescriptor,
        key: &str,
        value: &str,
    ) -> Result<Self, EditError> {
        if key.eq_ignore_ascii_case("content") {
            return Ok(Self::content(value));
        }

        if let Some(metric) = MetricId::from_key(key) {
            if descriptor.metric(metric).is_none() {
                return Err(EditError::UnknownMetric {
                    platform: descriptor.platform,
                    metric,
                });
            }
            return Ok(Self::metric(metric, value));
        }

        let field = FieldId::from_key(key).ok_or_else(|| EditError::UnknownKey(key.to_string()))?;
        let spec = descriptor.field(field).ok_or(EditError::UnknownField {
            platform: descriptor.platform,
            field,
        })?;

        match spec.kind {
            FieldKind::Text => Ok(Self::text(field, value)),
            FieldKind::Flag => match value.trim() {
                "true" => Ok(Self::flag(field, true)),
                "false" => Ok(Self::flag(field, false)),
                other => Err(EditError::InvalidFlag {
                    field,
                    value: other.to_string(),
                }),
            },
            FieldKind::Image if value.trim().is_empty() => {
                Ok(Self::image(field, ImageRef::Placeholder))
            }
            FieldKind::Image => Ok(Self::image(
                field,
                ImageRef::Embedded(DataUrl::parse(value)?),
            )),
        }
    }
}

// ============================================================================
// PostRecord
// ============================================================================

/// Profile, content, metrics and theme of one simulated post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    platform: Platform,
    profile: BTreeMap<FieldId, FieldValue>,
    content: String,
    metrics: BTreeMap<MetricId, String>,
    theme: Theme,
}

impl PostRecord {
    /// Creates a record populated with the platform's sample values.
    pub fn sample(platform: Platform) -> Self {
        let descriptor = platform.descriptor();
        Self {
            platform,
            profile: descriptor
                .fields
                .iter()
                .map(|spec| (spec.id, FieldValue::from(&spec.default)))
                .collect(),
            content: descriptor.content.default.to_string(),
            metrics: descriptor
                .metrics
                .iter()
                .map(|spec| (spec.id, spec.default.to_string()))
                .collect(),
            theme: descriptor.default_theme,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn descriptor(&self) -> &'static PlatformDescriptor {
        self.platform.descriptor()
    }

    pub fn profile(&self) -> &BTreeMap<FieldId, FieldValue> {
        &self.profile
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metrics(&self) -> &BTreeMap<MetricId, String> {
        &self.metrics
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldValue> {
        self.profile.get(&id)
    }

    /// Returns a text field, or `""` if the platform does not declare it.
    pub fn text(&self, id: FieldId) -> &str {
        self.field(id).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Returns a flag field, or `false` if the platform does not declare it.
    pub fn flag(&self, id: FieldId) -> bool {
        self.field(id).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn image(&self, id: FieldId) -> Option<&ImageRef> {
        self.field(id).and_then(FieldValue::as_image)
    }

    /// Returns a metric's text, or `""` if the platform does not declare it.
    pub fn metric(&self, id: MetricId) -> &str {
        self.metrics.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Returns a new record with `patch` applied.
    ///
    /// Only the named field changes. Patches for undeclared fields or with a
    /// value of the wrong kind are rejected.
    pub fn apply(&self, patch: &FieldPatch) -> Result<Self, EditError> {
        let descriptor = self.descriptor();
        let mut next = self.clone();

        match patch {
            FieldPatch::Profile { field, value } => {
                let spec = descriptor.field(*field).ok_or(EditError::UnknownField {
                    platform: self.platform,
                    field: *field,
                })?;
                if spec.kind != value.kind() {
                    return Err(EditError::KindMismatch {
                        field: *field,
                        expected: spec.kind,
                    });
                }
                next.profile.insert(*field, value.clone());
            }
            FieldPatch::Content(text) => next.content.clone_from(text),
            FieldPatch::Metric { metric, value } => {
                if descriptor.metric(*metric).is_none() {
                    return Err(EditError::UnknownMetric {
                        platform: self.platform,
                        metric: *metric,
                    });
                }
                next.metrics.insert(*metric, value.clone());
            }
        }

        Ok(next)
    }

    /// Returns a copy with a different theme and identical field values.
    pub fn with_theme(&self, theme: Theme) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    /// Returns true if both records hold the same profile, content and metrics.
    ///
    /// The theme is not compared.
    pub fn same_fields(&self, other: &Self) -> bool {
        self.platform == other.platform
            && self.profile == other.profile
            && self.content == other.content
            && self.metrics == other.metrics
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_defines_every_declared_field() {
        for platform in Platform::ALL {
            let record = PostRecord::sample(platform);
            let desc = platform.descriptor();
            assert_eq!(record.profile().len(), desc.fields.len());
            assert_eq!(record.metrics().len(), desc.metrics.len());
            assert_eq!(record.theme(), desc.default_theme);
        }
    }

    #[test]
    fn apply_changes_only_named_field() {
        let record = PostRecord::sample(Platform::LinkedIn);
        let next = record
            .apply(&FieldPatch::text(FieldId::Name, "Ada Lovelace"))
            .unwrap();

        assert_eq!(next.text(FieldId::Name), "Ada Lovelace");
        assert_eq!(next.text(FieldId::Headline), record.text(FieldId::Headline));
        assert_eq!(next.content(), record.content());
        assert_eq!(next.metrics(), record.metrics());
        // The source record is left alone.
        assert_eq!(record.text(FieldId::Name), "Jane Doe");
    }

    #[test]
    fn apply_is_idempotent() {
        let record = PostRecord::sample(Platform::X);
        let patch = FieldPatch::metric(MetricId::Views, "42");
        let once = record.apply(&patch).unwrap();
        let twice = once.apply(&patch).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn accepts_empty_and_non_numeric_text() {
        let record = PostRecord::sample(Platform::Facebook);
        let next = record
            .apply(&FieldPatch::metric(MetricId::Likes, "lots"))
            .unwrap()
            .apply(&FieldPatch::content(""))
            .unwrap();
        assert_eq!(next.metric(MetricId::Likes), "lots");
        assert_eq!(next.content(), "");
    }

    #[test]
    fn rejects_undeclared_field() {
        let record = PostRecord::sample(Platform::Facebook);
        let err = record
            .apply(&FieldPatch::text(FieldId::Username, "nope"))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::UnknownField {
                platform: Platform::Facebook,
                field: FieldId::Username
            }
        );

        let err = record
            .apply(&FieldPatch::metric(MetricId::Views, "1"))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownMetric { .. }));
    }

    #[test]
    fn rejects_kind_mismatch() {
        let record = PostRecord::sample(Platform::X);
        let err = record
            .apply(&FieldPatch::text(FieldId::Verified, "yes"))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::KindMismatch {
                field: FieldId::Verified,
                expected: FieldKind::Flag
            }
        );
    }

    #[test]
    fn with_theme_keeps_fields() {
        let record = PostRecord::sample(Platform::Instagram);
        let dark = record.with_theme(Theme::Dark);
        assert_eq!(dark.theme(), Theme::Dark);
        assert!(dark.same_fields(&record));
    }

    #[test]
    fn parse_assignment_reads_kinds() {
        let desc = Platform::TikTok.descriptor();
        assert_eq!(
            FieldPatch::parse_assignment(desc, "sound", "Remix").unwrap(),
            FieldPatch::text(FieldId::Sound, "Remix")
        );
        assert_eq!(
            FieldPatch::parse_assignment(desc, "thumbnail", "").unwrap(),
            FieldPatch::image(FieldId::Thumbnail, ImageRef::Placeholder)
        );
        assert!(matches!(
            FieldPatch::parse_assignment(desc, "thumbnail", "/static/a.png"),
            Err(EditError::Image(_))
        ));
        assert!(matches!(
            FieldPatch::parse_assignment(desc, "verified", "maybe"),
            Err(EditError::InvalidFlag { .. })
        ));
        assert_eq!(
            FieldPatch::parse_assignment(desc, "bogus", "x"),
            Err(EditError::UnknownKey("bogus".into()))
        );
        assert!(matches!(
            FieldPatch::parse_assignment(desc, "reposts", "1"),
            Err(EditError::UnknownMetric { .. })
        ));
    }
}
