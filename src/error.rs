//! Error types for editing, uploading and exporting posts.

use thiserror::Error;

use crate::platform::Platform;
use crate::record::{FieldId, FieldKind, MetricId};

/// Errors produced when a patch or document cannot be applied to a record.
///
/// A rejected edit never changes the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The platform does not declare this profile field.
    #[error("{platform} posts have no `{field}` field")]
    UnknownField { platform: Platform, field: FieldId },

    /// The platform does not declare this metric.
    #[error("{platform} posts have no `{metric}` metric")]
    UnknownMetric { platform: Platform, metric: MetricId },

    /// The value does not match the declared field kind.
    #[error("`{field}` expects a {expected} value")]
    KindMismatch { field: FieldId, expected: FieldKind },

    /// A document for one platform was applied to another platform's editor.
    #[error("document is for {found}, editor is {expected}")]
    PlatformMismatch { expected: Platform, found: Platform },

    /// A `key=value` assignment named nothing this platform knows about.
    #[error("unknown key `{0}`")]
    UnknownKey(String),

    /// A flag assignment was neither `true` nor `false`.
    #[error("`{field}` expects true or false, got `{value}`")]
    InvalidFlag { field: FieldId, value: String },

    /// An image value was not a data URL.
    #[error(transparent)]
    Image(#[from] DataUrlError),
}

/// Errors produced when parsing or decoding a `data:` URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingScheme,

    #[error("data URL has no payload separator")]
    MissingPayload,

    #[error("only base64 data URLs are supported")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Errors produced by a file read capability.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload failed: {0}")]
    Other(String),
}

/// Errors produced while rasterizing or delivering an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The preview markup could not be parsed.
    #[error("preview markup is invalid: {0}")]
    Markup(String),

    /// The requested bitmap has a zero or oversized dimension.
    #[error("cannot allocate a {width}x{height} bitmap")]
    Allocation { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The rendered data URL could not be decoded by the sink.
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),

    /// Writing the exported file failed.
    #[error("failed to save export: {0}")]
    Io(#[from] std::io::Error),

    /// A rasterizer or sink specific failure.
    #[error("{0}")]
    Other(String),
}
