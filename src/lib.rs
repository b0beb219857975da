//! postmock: social-media post mockups rendered to SVG and PNG
//!
//! This crate fills in the profile, content and engagement fields of a
//! simulated LinkedIn, X, Instagram, TikTok or Facebook post, renders a
//! replica of the post, and exports that replica as a PNG image.
//!
//! # Example
//!
//! ```
//! use postmock::{FieldId, FieldPatch, MetricId, Platform, PostEditor};
//!
//! let mut editor = PostEditor::new(Platform::X);
//!
//! editor.edit(FieldPatch::text(FieldId::Name, "Grace Hopper")).unwrap();
//! editor.edit(FieldPatch::metric(MetricId::Likes, "15300")).unwrap();
//! editor.toggle_theme();
//!
//! let preview = editor.preview().unwrap();
//! assert!(preview.markup().contains(">15K<"));
//!
//! // Snapshot for export; the editor stays usable while it runs.
//! let request = editor.export_request().unwrap();
//! assert_eq!(request.filename, "x-post.png");
//! ```
//!
//! # Exporting
//!
//! [`export_preview`] rasterizes a request with any [`Rasterizer`] and hands
//! the PNG to a [`DownloadSink`]:
//!
//! ```no_run
//! use postmock::{DirectorySink, Platform, PostEditor, ResvgRasterizer, export_preview};
//!
//! # async fn run() {
//! let editor = PostEditor::new(Platform::Instagram);
//! let outcome = export_preview(
//!     editor.export_request(),
//!     &ResvgRasterizer::new(),
//!     &DirectorySink::new("out"),
//! )
//! .await;
//! # }
//! ```
//!
//! # Serializable Documents
//!
//! Use [`PostDocument`] with the [`Configurable`] trait to load or save a
//! post as JSON.

mod data_url;
mod document;
mod editor;
mod error;
mod export;
mod format;
mod platform;
mod record;
mod render;
mod theme;
mod upload;
mod workbench;

#[cfg(feature = "canvas")]
mod canvas;

pub use data_url::DataUrl;
pub use document::{DocumentValue, PostDocument};
pub use editor::{Configurable, FormControl, FormField, FormKey, PostEditor};
pub use error::{DataUrlError, EditError, ExportError, UploadError};
pub use export::{
    DirectorySink, DownloadSink, ExportOutcome, ExportRequest, RasterOptions, Rasterizer,
    ResvgRasterizer, export_preview,
};
pub use format::{display_metric, format_compact};
pub use platform::{
    CardStyle, ContentSpec, Engagement, FieldDefault, FieldSpec, Layout, MetricSpec, Platform,
    PlatformDescriptor, Subtitle,
};
pub use record::{FieldId, FieldKind, FieldPatch, FieldValue, ImageRef, MetricId, PostRecord};
pub use render::{Preview, SizePx, render_preview};
pub use theme::{Theme, ThemePair, ThemeTokens};
pub use upload::{FileReader, UploadSlot, read_upload};
#[cfg(not(target_arch = "wasm32"))]
pub use upload::LocalFileReader;
pub use workbench::Workbench;

#[cfg(feature = "canvas")]
pub use canvas::CanvasEditor;
