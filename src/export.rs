//! Exporting a preview as a PNG download.
//!
//! Export is split in two so it never holds a borrow of the editor:
//!
//! 1. [`PostEditor::export_request`](crate::PostEditor::export_request)
//!    snapshots the mounted preview into an owned [`ExportRequest`].
//! 2. [`export_preview`] awaits a [`Rasterizer`] and hands the result to a
//!    [`DownloadSink`].
//!
//! Failures are logged and reported as an [`ExportOutcome`]; they never
//! reach the editor.

use std::collections::HashMap;
use std::future::Future;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use image::{ImageFormat, RgbaImage};
use palette::Srgb;
use resvg::usvg::fontdb;

use crate::data_url::DataUrl;
use crate::error::ExportError;
use crate::platform::Platform;
use crate::render::Preview;
use crate::render::raster::{flatten_onto, rasterize_svg};
use crate::theme::hex;

// ============================================================================
// Options
// ============================================================================

/// Settings handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Output pixels per logical pixel.
    pub pixel_ratio: f32,
    /// Opaque fill behind the preview.
    pub background: Srgb<u8>,
    /// Skip any cached result and render afresh.
    pub cache_bust: bool,
    /// Encoder quality in `0.0..=1.0`. PNG is lossless, so the built-in
    /// rasterizer ignores it.
    pub quality: f32,
}

impl RasterOptions {
    /// Export settings for a preview: 2x pixel ratio, the theme's export
    /// background, cache bypassed, full quality.
    pub fn for_preview(preview: &Preview) -> Self {
        let tokens = preview.platform().descriptor().tokens(preview.theme());
        Self {
            pixel_ratio: 2.0,
            background: tokens.export_background,
            cache_bust: true,
            quality: 1.0,
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Turns a preview into an encoded bitmap.
pub trait Rasterizer {
    fn rasterize(
        &self,
        preview: &Preview,
        options: &RasterOptions,
    ) -> impl Future<Output = Result<DataUrl, ExportError>>;
}

/// Offers a finished bitmap to the user under a file name.
pub trait DownloadSink {
    fn deliver(&self, filename: &str, image: &DataUrl) -> Result<(), ExportError>;
}

/// Writes exports into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, filename: &str, image: &DataUrl) -> Result<(), ExportError> {
        let bytes = image.decode()?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

// ============================================================================
// ResvgRasterizer
// ============================================================================

const CACHE_LIMIT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    markup: u64,
    pixel_ratio: u32,
    background: [u8; 3],
}

impl CacheKey {
    fn new(preview: &Preview, options: &RasterOptions) -> Self {
        let mut hasher = DefaultHasher::new();
        preview.markup().hash(&mut hasher);
        Self {
            markup: hasher.finish(),
            pixel_ratio: options.pixel_ratio.to_bits(),
            background: [
                options.background.red,
                options.background.green,
                options.background.blue,
            ],
        }
    }
}

/// Rasterizes previews with resvg and encodes them as PNG.
///
/// Rendered bitmaps are cached by markup, pixel ratio and background, so
/// redrawing an unchanged preview skips rendering. Requests with
/// `cache_bust` set neither read nor fill the cache. Clones share the font
/// database and the cache.
#[derive(Clone)]
pub struct ResvgRasterizer {
    fonts: Arc<fontdb::Database>,
    cache: Arc<Mutex<HashMap<CacheKey, Arc<RgbaImage>>>>,
}

impl ResvgRasterizer {
    /// Creates a rasterizer using the fonts installed on this system.
    pub fn new() -> Self {
        let mut fonts = fontdb::Database::new();
        fonts.load_system_fonts();
        log::debug!("loaded {} font faces", fonts.len());
        Self::with_fonts(fonts)
    }

    /// Creates a rasterizer with a prepared font database.
    pub fn with_fonts(fonts: fontdb::Database) -> Self {
        Self {
            fonts: Arc::new(fonts),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Renders the preview onto an opaque RGBA bitmap.
    pub fn render_pixels(
        &self,
        preview: &Preview,
        options: &RasterOptions,
    ) -> Result<Arc<RgbaImage>, ExportError> {
        let key = (!options.cache_bust).then(|| CacheKey::new(preview, options));
        if let Some(key) = &key {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = cache.get(key) {
                log::debug!("raster cache hit for {}", preview.platform());
                return Ok(Arc::clone(hit));
            }
        }

        let mut img = rasterize_svg(preview.markup(), options.pixel_ratio, self.fonts.clone())?;
        flatten_onto(&mut img, options.background);
        log::debug!(
            "rasterized {} at {}x{} on {}",
            preview.platform(),
            img.width(),
            img.height(),
            hex(options.background)
        );
        let img = Arc::new(img);

        if let Some(key) = key {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if cache.len() >= CACHE_LIMIT {
                cache.clear();
            }
            cache.insert(key, Arc::clone(&img));
        }

        Ok(img)
    }

    /// Renders and encodes synchronously.
    pub fn rasterize_blocking(
        &self,
        preview: &Preview,
        options: &RasterOptions,
    ) -> Result<DataUrl, ExportError> {
        let img = self.render_pixels(preview, options)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(DataUrl::from_bytes("image/png", &bytes))
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    async fn rasterize(
        &self,
        preview: &Preview,
        options: &RasterOptions,
    ) -> Result<DataUrl, ExportError> {
        self.rasterize_blocking(preview, options)
    }
}

// ============================================================================
// Export
// ============================================================================

/// An owned snapshot of everything an export needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub preview: Preview,
    pub options: RasterOptions,
    pub filename: &'static str,
}

impl ExportRequest {
    /// Builds a request with the platform's file name and default options.
    pub fn new(preview: Preview) -> Self {
        let options = RasterOptions::for_preview(&preview);
        let filename = preview.platform().descriptor().export_filename;
        Self {
            preview,
            options,
            filename,
        }
    }

    pub fn platform(&self) -> Platform {
        self.preview.platform()
    }
}

/// How an export ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// There was no mounted preview; nothing happened.
    NoPreview,
    /// Rasterization or delivery failed; the error was logged.
    Failed,
    /// The bitmap was handed to the sink under this name.
    Saved(String),
}

/// Rasterizes the request and delivers the bitmap.
///
/// `None` stands for a missing preview and returns
/// [`ExportOutcome::NoPreview`] without touching either capability.
pub async fn export_preview<R, S>(
    request: Option<ExportRequest>,
    rasterizer: &R,
    sink: &S,
) -> ExportOutcome
where
    R: Rasterizer,
    S: DownloadSink + ?Sized,
{
    let Some(request) = request else {
        log::debug!("export requested without a mounted preview");
        return ExportOutcome::NoPreview;
    };

    let image = match rasterizer.rasterize(&request.preview, &request.options).await {
        Ok(image) => image,
        Err(e) => {
            log::error!("error generating image for {}: {e}", request.platform());
            return ExportOutcome::Failed;
        }
    };

    match sink.deliver(request.filename, &image) {
        Ok(()) => ExportOutcome::Saved(request.filename.to_string()),
        Err(e) => {
            log::error!("error saving {}: {e}", request.filename);
            ExportOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::record::PostRecord;
    use crate::render::render_preview;
    use crate::theme::Theme;

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        async fn rasterize(
            &self,
            _preview: &Preview,
            _options: &RasterOptions,
        ) -> Result<DataUrl, ExportError> {
            Err(ExportError::Other("canvas tainted".into()))
        }
    }

    struct FixedRasterizer;

    impl Rasterizer for FixedRasterizer {
        async fn rasterize(
            &self,
            _preview: &Preview,
            _options: &RasterOptions,
        ) -> Result<DataUrl, ExportError> {
            Ok(DataUrl::from_bytes("image/png", b"png"))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: RefCell<Vec<String>>,
        fail: bool,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&self, filename: &str, _image: &DataUrl) -> Result<(), ExportError> {
            if self.fail {
                return Err(ExportError::Other("disk full".into()));
            }
            self.delivered.borrow_mut().push(filename.to_string());
            Ok(())
        }
    }

    fn request(platform: Platform, theme: Theme) -> ExportRequest {
        let record = PostRecord::sample(platform).with_theme(theme);
        ExportRequest::new(render_preview(&record))
    }

    #[test]
    fn options_follow_theme() {
        let light = request(Platform::LinkedIn, Theme::Light);
        assert_eq!(hex(light.options.background), "#f3f2ef");
        assert_eq!(light.options.pixel_ratio, 2.0);
        assert!(light.options.cache_bust);

        let dark = request(Platform::X, Theme::Dark);
        assert_eq!(hex(dark.options.background), "#000000");
        assert_eq!(dark.filename, "x-post.png");
    }

    #[tokio::test]
    async fn missing_preview_is_silent() {
        let sink = RecordingSink::default();
        let outcome = export_preview(None, &FixedRasterizer, &sink).await;
        assert_eq!(outcome, ExportOutcome::NoPreview);
        assert!(sink.delivered.borrow().is_empty());
    }

    #[tokio::test]
    async fn rasterizer_failure_is_contained() {
        let sink = RecordingSink::default();
        let outcome = export_preview(
            Some(request(Platform::Facebook, Theme::Light)),
            &FailingRasterizer,
            &sink,
        )
        .await;
        assert_eq!(outcome, ExportOutcome::Failed);
        assert!(sink.delivered.borrow().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_contained() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let outcome = export_preview(
            Some(request(Platform::TikTok, Theme::Dark)),
            &FixedRasterizer,
            &sink,
        )
        .await;
        assert_eq!(outcome, ExportOutcome::Failed);
    }

    #[tokio::test]
    async fn saved_under_platform_filename() {
        let sink = RecordingSink::default();
        let outcome = export_preview(
            Some(request(Platform::Instagram, Theme::Light)),
            &FixedRasterizer,
            &sink,
        )
        .await;
        assert_eq!(outcome, ExportOutcome::Saved("instagram-post.png".into()));
        assert_eq!(*sink.delivered.borrow(), vec!["instagram-post.png"]);
    }

    #[test]
    fn resvg_produces_png_at_pixel_ratio() {
        let rasterizer = ResvgRasterizer::with_fonts(fontdb::Database::new());
        let req = request(Platform::TikTok, Theme::Dark);
        let url = rasterizer.rasterize_blocking(&req.preview, &req.options).unwrap();
        assert_eq!(url.mime(), "image/png");

        let bytes = url.decode().unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (720, 1280));
    }

    #[test]
    fn redraws_hit_the_cache() {
        let rasterizer = ResvgRasterizer::with_fonts(fontdb::Database::new());
        let req = request(Platform::X, Theme::Dark);
        let options = RasterOptions {
            cache_bust: false,
            pixel_ratio: 0.5,
            ..req.options
        };
        let first = rasterizer.render_pixels(&req.preview, &options).unwrap();
        assert_eq!(rasterizer.cached(), 1);
        let second = rasterizer.render_pixels(&req.preview, &options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(rasterizer.cached(), 1);
    }

    #[test]
    fn busted_requests_skip_the_cache() {
        let rasterizer = ResvgRasterizer::with_fonts(fontdb::Database::new());
        let mut req = request(Platform::Facebook, Theme::Light);
        req.options.pixel_ratio = 0.5;
        assert!(req.options.cache_bust);

        rasterizer.rasterize_blocking(&req.preview, &req.options).unwrap();
        assert_eq!(rasterizer.cached(), 0);
    }

    #[test]
    fn cache_is_keyed_by_pixel_ratio() {
        let rasterizer = ResvgRasterizer::with_fonts(fontdb::Database::new());
        let req = request(Platform::LinkedIn, Theme::Light);
        let small = RasterOptions {
            cache_bust: false,
            pixel_ratio: 0.25,
            ..req.options
        };
        let large = RasterOptions {
            pixel_ratio: 0.5,
            ..small
        };
        let a = rasterizer.render_pixels(&req.preview, &small).unwrap();
        let b = rasterizer.render_pixels(&req.preview, &large).unwrap();
        assert_eq!(b.width(), a.width() * 2);
        assert_eq!(rasterizer.cached(), 2);
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("postmock-sink-{}", std::process::id()));
        let sink = DirectorySink::new(&dir);
        let url = DataUrl::from_bytes("image/png", b"not really a png");
        sink.deliver("x-post.png", &url).unwrap();
        assert_eq!(std::fs::read(dir.join("x-post.png")).unwrap(), b"not really a png");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
