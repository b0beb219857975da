//! HTML Canvas front end for WASM environments.
//!
//! This module provides [`CanvasEditor`], a wrapper around [`PostEditor`]
//! that draws the live preview into an HTML canvas element, reads uploads
//! from `<input type="file">` and offers exports as browser downloads.
//!
//! # Feature Flag
//!
//! This module is only available with the `canvas` feature enabled:
//!
//! ```toml
//! [dependencies]
//! postmock = { version = "0.1", features = ["canvas"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { CanvasEditor } from 'postmock';
//!
//! await init();
//!
//! const canvas = document.getElementById('preview-canvas');
//! const editor = new CanvasEditor('x');
//! editor.addFont(new Uint8Array(await (await fetch('/inter.ttf')).arrayBuffer()));
//!
//! editor.setText('name', 'Grace Hopper');
//! editor.setText('likes', '15300');
//! editor.renderToCanvas(canvas, window.devicePixelRatio);
//!
//! // Uploads resolve once the file has been read.
//! await editor.uploadImage('avatar', fileInput.files[0]);
//! editor.renderToCanvas(canvas, window.devicePixelRatio);
//!
//! editor.export();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use resvg::usvg::fontdb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use wasm_bindgen_futures::{JsFuture, future_to_promise, spawn_local};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, ImageData, console};

use crate::data_url::DataUrl;
use crate::document::PostDocument;
use crate::editor::{Configurable, PostEditor};
use crate::error::{ExportError, UploadError};
use crate::export::{DownloadSink, RasterOptions, ResvgRasterizer, export_preview};
use crate::platform::Platform;
use crate::record::{FieldId, FieldPatch};
use crate::theme::Theme;
use crate::upload::{FileReader, UploadSlot, read_upload};

// ============================================================================
// Browser Capabilities
// ============================================================================

/// Reads a picked `File` through `Blob.arrayBuffer()`.
struct BrowserFileReader;

impl FileReader for BrowserFileReader {
    type File = web_sys::File;

    async fn read_data_url(&self, file: web_sys::File) -> Result<DataUrl, UploadError> {
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| UploadError::Other(format!("{e:?}")))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

        let declared = file.type_();
        let mime = if declared.is_empty() {
            image::guess_format(&bytes)
                .map(|format| format.to_mime_type().to_string())
                .unwrap_or_else(|_| "application/octet-stream".to_string())
        } else {
            declared
        };
        log::debug!("read {} ({mime}, {} bytes)", file.name(), bytes.len());
        Ok(DataUrl::from_bytes(mime, &bytes))
    }
}

/// Offers a download by clicking a temporary `<a download>` element.
struct AnchorSink;

impl DownloadSink for AnchorSink {
    fn deliver(&self, filename: &str, image: &DataUrl) -> Result<(), ExportError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Other("no document to download into".into()))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| ExportError::Other(format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| ExportError::Other("failed to cast to HtmlAnchorElement".into()))?;

        anchor.set_href(&image.to_string());
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger {
    level: LevelFilter,
}

static CONSOLE: ConsoleLogger = ConsoleLogger {
    level: LevelFilter::Info,
};

impl ConsoleLogger {
    fn line(record: &Record) -> String {
        format!("[{}] {}", record.target(), record.args())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(Self::line(record));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger unless the page already set one.
fn install_console_logger() {
    if log::set_logger(&CONSOLE).is_ok() {
        log::set_max_level(CONSOLE.level);
    }
}

// ============================================================================
// CanvasEditor
// ============================================================================

/// A wrapper around [`PostEditor`] for HTML canvas previews.
///
/// The editor sits behind `Rc<RefCell<..>>` so uploads and exports can
/// finish after the call that started them returned.
#[wasm_bindgen]
pub struct CanvasEditor {
    editor: Rc<RefCell<PostEditor>>,
    fonts: fontdb::Database,
    rasterizer: ResvgRasterizer,
}

#[wasm_bindgen]
impl CanvasEditor {
    /// Creates a mounted editor seeded with the platform's sample post.
    ///
    /// The first editor created also routes this crate's log output (such as
    /// export failures) to the browser console.
    ///
    /// # Arguments
    ///
    /// * `platform` - One of "linkedin", "x", "instagram", "tiktok", "facebook"
    #[wasm_bindgen(constructor)]
    pub fn new(platform: &str) -> Result<CanvasEditor, JsError> {
        install_console_logger();
        let platform: Platform = platform.parse().map_err(|e: String| JsError::new(&e))?;
        let fonts = fontdb::Database::new();
        Ok(Self {
            editor: Rc::new(RefCell::new(PostEditor::new(platform))),
            rasterizer: ResvgRasterizer::with_fonts(fonts.clone()),
            fonts,
        })
    }

    /// Registers a font (TTF/OTF bytes) for text rendering.
    ///
    /// Browsers expose no system fonts to WASM, so at least one font must be
    /// added before text shows up in the bitmap.
    #[wasm_bindgen(js_name = "addFont")]
    pub fn add_font(&mut self, data: &[u8]) {
        self.fonts.load_font_data(data.to_vec());
        self.rasterizer = ResvgRasterizer::with_fonts(self.fonts.clone());
    }

    pub fn platform(&self) -> String {
        self.editor.borrow().platform().to_string()
    }

    /// Increments each time the record changes.
    pub fn version(&self) -> f64 {
        self.editor.borrow().version() as f64
    }

    // ---- Editing ----

    /// Sets a text, metric, content or image field from a string.
    ///
    /// `key` is a field name such as "name", "likes" or "content". Image
    /// fields take a data URL, or an empty string for the placeholder.
    /// Returns whether the record changed.
    #[wasm_bindgen(js_name = "setText")]
    pub fn set_text(&mut self, key: &str, value: &str) -> Result<bool, JsError> {
        let mut editor = self.editor.borrow_mut();
        let patch = FieldPatch::parse_assignment(editor.descriptor(), key, value)
            .map_err(|e| JsError::new(&format!("Invalid edit: {}", e)))?;
        editor
            .edit(patch)
            .map_err(|e| JsError::new(&format!("Invalid edit: {}", e)))
    }

    /// Sets a checkbox field such as "verified".
    #[wasm_bindgen(js_name = "setFlag")]
    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<bool, JsError> {
        let field = FieldId::from_key(key)
            .ok_or_else(|| JsError::new(&format!("Unknown field: {}", key)))?;
        self.editor
            .borrow_mut()
            .edit(FieldPatch::flag(field, value))
            .map_err(|e| JsError::new(&format!("Invalid edit: {}", e)))
    }

    /// Flips between light and dark. Returns whether the new theme is dark.
    #[wasm_bindgen(js_name = "toggleTheme")]
    pub fn toggle_theme(&mut self) -> bool {
        self.editor.borrow_mut().toggle_theme().is_dark()
    }

    #[wasm_bindgen(js_name = "setDark")]
    pub fn set_dark(&mut self, dark: bool) -> bool {
        let theme = if dark { Theme::Dark } else { Theme::Light };
        self.editor.borrow_mut().set_theme(theme)
    }

    #[wasm_bindgen(js_name = "isDark")]
    pub fn is_dark(&self) -> bool {
        self.editor.borrow().theme().is_dark()
    }

    /// Reads a picked file into the "avatar" or "thumbnail" slot.
    ///
    /// Resolves to `true` once the image is in place, or `false` if the read
    /// failed and the record was left alone.
    #[wasm_bindgen(js_name = "uploadImage")]
    pub fn upload_image(&self, slot: &str, file: web_sys::File) -> Result<js_sys::Promise, JsError> {
        let slot = match slot {
            "avatar" => UploadSlot::Avatar,
            "thumbnail" => UploadSlot::Thumbnail,
            other => return Err(JsError::new(&format!("Unknown upload slot: {}", other))),
        };

        let editor = Rc::clone(&self.editor);
        Ok(future_to_promise(async move {
            let Some(patch) = read_upload(&BrowserFileReader, slot, file).await else {
                return Ok(JsValue::FALSE);
            };
            editor
                .borrow_mut()
                .edit(patch)
                .map(JsValue::from_bool)
                .map_err(|e| JsValue::from(JsError::new(&e.to_string())))
        }))
    }

    // ---- Rendering ----

    /// Returns the preview as SVG markup.
    #[wasm_bindgen(js_name = "previewSvg")]
    pub fn preview_svg(&self) -> Result<String, JsError> {
        self.editor
            .borrow()
            .preview()
            .map(|preview| preview.markup().to_string())
            .ok_or_else(|| JsError::new("No preview mounted"))
    }

    /// Draws the preview into an HTML canvas element.
    ///
    /// Redrawing an unchanged preview at the same scale reuses the cached
    /// bitmap.
    ///
    /// # Arguments
    ///
    /// * `canvas` - The target canvas element; it is resized to fit
    /// * `scale` - Device pixel ratio (1.0 for @1x, 2.0 for @2x, etc.)
    #[wasm_bindgen(js_name = "renderToCanvas")]
    pub fn render_to_canvas(&self, canvas: &HtmlCanvasElement, scale: f32) -> Result<(), JsError> {
        let editor = self.editor.borrow();
        let preview = editor
            .preview()
            .ok_or_else(|| JsError::new("No preview mounted"))?;
        let options = RasterOptions {
            pixel_ratio: scale,
            cache_bust: false,
            ..RasterOptions::for_preview(preview)
        };
        let rendered = self
            .rasterizer
            .render_pixels(preview, &options)
            .map_err(|e| JsError::new(&format!("Failed to render preview: {}", e)))?;

        let width = rendered.width();
        let height = rendered.height();

        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| JsError::new("Failed to get 2d context"))?
            .ok_or_else(|| JsError::new("Canvas 2d context is null"))?
            .dyn_into()
            .map_err(|_| JsError::new("Failed to cast to CanvasRenderingContext2d"))?;

        let image_data =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(rendered.as_raw().as_slice()), width, height)
                .map_err(|_| JsError::new("Failed to create ImageData"))?;

        ctx.put_image_data(&image_data, 0.0, 0.0)
            .map_err(|_| JsError::new("Failed to put image data"))?;

        Ok(())
    }

    /// Starts a PNG download of the preview.
    ///
    /// Runs in the background; failures are logged and never surface here.
    pub fn export(&self) {
        let request = self.editor.borrow().export_request();
        let rasterizer = self.rasterizer.clone();
        spawn_local(async move {
            export_preview(request, &rasterizer, &AnchorSink).await;
        });
    }

    // ---- Document Import/Export ----

    /// Exports the current post as a JSON string.
    #[wasm_bindgen(js_name = "exportJson")]
    pub fn export_json(&self) -> Result<String, JsError> {
        self.editor
            .borrow()
            .export_document()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize document: {}", e)))
    }

    /// Exports the current post as a plain JavaScript object.
    #[wasm_bindgen(js_name = "exportDocument")]
    pub fn export_document(&self) -> Result<JsValue, JsError> {
        let document = self.editor.borrow().export_document();
        serde_wasm_bindgen::to_value(&document)
            .map_err(|e| JsError::new(&format!("Failed to serialize document: {}", e)))
    }

    /// Applies a JSON document. Returns whether the record changed.
    #[wasm_bindgen(js_name = "importJson")]
    pub fn import_json(&mut self, json: &str) -> Result<bool, JsError> {
        let document = PostDocument::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse document: {}", e)))?;
        self.editor
            .borrow_mut()
            .apply_document(&document)
            .map_err(|e| JsError::new(&format!("Failed to apply document: {}", e)))
    }
}
