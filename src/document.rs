//! Serializable post documents.
//!
//! A [`PostDocument`] captures a post's fields in a JSON-friendly form so a
//! post can be seeded from a file, handed across the wasm boundary, or saved
//! and restored later.
//!
//! # Example
//!
//! ```
//! use postmock::{Configurable, Platform, PostDocument, PostEditor};
//!
//! let json = r#"{
//!     "platform": "x",
//!     "theme": "light",
//!     "profile": { "name": "Grace Hopper", "verified": false },
//!     "metrics": { "likes": "15300" }
//! }"#;
//!
//! let document = PostDocument::from_json(json).unwrap();
//! let mut editor = PostEditor::new(Platform::X);
//! editor.apply_document(&document).unwrap();
//!
//! assert_eq!(editor.record().metric(postmock::MetricId::Likes), "15300");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::platform::Platform;
use crate::record::{FieldId, FieldPatch, FieldValue, ImageRef, MetricId, PostRecord};
use crate::theme::Theme;

/// A profile value in a document.
///
/// Flags are JSON booleans. Text and images are strings; an image is a data
/// URL, and an empty string stands for the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum DocumentValue {
    Flag(bool),
    Text(String),
}

impl From<&FieldValue> for DocumentValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => Self::Text(text.clone()),
            FieldValue::Flag(flag) => Self::Flag(*flag),
            FieldValue::Image(ImageRef::Placeholder) => Self::Text(String::new()),
            FieldValue::Image(ImageRef::Embedded(url)) => Self::Text(url.to_string()),
        }
    }
}

/// A serializable snapshot of a post.
///
/// Every key except `platform` is optional; applying a document leaves
/// absent keys at their current values.
///
/// # JSON Format
///
/// ```json
/// {
///   "platform": "tiktok",
///   "theme": "dark",
///   "profile": {
///     "username": "sarahjohnson",
///     "verified": true,
///     "thumbnail": "data:image/png;base64,iVBORw0KGgo..."
///   },
///   "content": "Just vibing",
///   "metrics": { "likes": "12300" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct PostDocument {
    pub platform: Platform,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profile: BTreeMap<FieldId, DocumentValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<MetricId, String>,
}

impl PostDocument {
    /// Creates an empty document for a platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            theme: None,
            profile: BTreeMap::new(),
            content: None,
            metrics: BTreeMap::new(),
        }
    }

    /// Captures every field of a record.
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            platform: record.platform(),
            theme: Some(record.theme()),
            profile: record
                .profile()
                .iter()
                .map(|(id, value)| (*id, DocumentValue::from(value)))
                .collect(),
            content: Some(record.content().to_string()),
            metrics: record.metrics().clone(),
        }
    }

    /// Sets a profile value.
    pub fn with_field(mut self, field: FieldId, value: DocumentValue) -> Self {
        self.profile.insert(field, value);
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets a metric.
    pub fn with_metric(mut self, metric: MetricId, value: impl Into<String>) -> Self {
        self.metrics.insert(metric, value.into());
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Returns the patches this document describes, in field order.
    pub fn patches(&self) -> Result<Vec<FieldPatch>, EditError> {
        let descriptor = self.platform.descriptor();
        let mut patches = Vec::with_capacity(self.profile.len() + self.metrics.len() + 1);

        for (field, value) in &self.profile {
            patches.push(match value {
                DocumentValue::Flag(flag) => FieldPatch::flag(*field, *flag),
                DocumentValue::Text(text) => {
                    FieldPatch::parse_assignment(descriptor, field.as_str(), text)?
                }
            });
        }
        if let Some(content) = &self.content {
            patches.push(FieldPatch::content(content.clone()));
        }
        for (metric, value) in &self.metrics {
            patches.push(FieldPatch::metric(*metric, value.clone()));
        }

        Ok(patches)
    }

    /// Applies this document on top of `record`.
    ///
    /// Either every entry applies or the error is returned and nothing is
    /// produced.
    pub fn apply_to(&self, record: &PostRecord) -> Result<PostRecord, EditError> {
        if self.platform != record.platform() {
            return Err(EditError::PlatformMismatch {
                expected: record.platform(),
                found: self.platform,
            });
        }

        let mut next = record.clone();
        for patch in self.patches()? {
            next = next.apply(&patch)?;
        }
        if let Some(theme) = self.theme {
            next = next.with_theme(theme);
        }
        Ok(next)
    }

    /// Serializes the document to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the document to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
