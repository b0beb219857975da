//! Reading user-selected image files into data URLs.

use std::future::Future;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use image::ImageFormat;

use crate::data_url::DataUrl;
use crate::error::UploadError;
use crate::record::{FieldId, FieldPatch, ImageRef};

/// Which image field an upload fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadSlot {
    Avatar,
    Thumbnail,
}

impl UploadSlot {
    pub fn field(self) -> FieldId {
        match self {
            Self::Avatar => FieldId::Avatar,
            Self::Thumbnail => FieldId::Thumbnail,
        }
    }
}

/// Reads a selected file and encodes it as a data URL.
pub trait FileReader {
    /// The handle the file picker produces.
    type File;

    fn read_data_url(&self, file: Self::File) -> impl Future<Output = Result<DataUrl, UploadError>>;
}

/// Reads files from the local filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileReader;

#[cfg(not(target_arch = "wasm32"))]
impl FileReader for LocalFileReader {
    type File = PathBuf;

    async fn read_data_url(&self, file: PathBuf) -> Result<DataUrl, UploadError> {
        let bytes = tokio::fs::read(&file).await?;
        let mime = image::guess_format(&bytes)
            .or_else(|_| ImageFormat::from_path(&file))
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");
        log::debug!("read {} ({mime}, {} bytes)", file.display(), bytes.len());
        Ok(DataUrl::from_bytes(mime, &bytes))
    }
}

/// Reads `file` and returns a patch placing it in `slot`.
///
/// A failed read is logged and yields `None`, leaving the record as it was.
/// The returned patch is not applied here; when several reads overlap, the
/// caller applies them in completion order and the last one wins.
pub async fn read_upload<R: FileReader>(
    reader: &R,
    slot: UploadSlot,
    file: R::File,
) -> Option<FieldPatch> {
    match reader.read_data_url(file).await {
        Ok(url) => Some(FieldPatch::image(slot.field(), ImageRef::Embedded(url))),
        Err(e) => {
            log::warn!("upload for {} failed: {e}", slot.field());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("postmock-{}-{name}", std::process::id()));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_file_as_data_url() {
        let path = temp_file("avatar.bin", PNG_MAGIC);
        let patch = read_upload(&LocalFileReader, UploadSlot::Avatar, path.clone())
            .await
            .unwrap();

        let FieldPatch::Profile { field, value } = patch else {
            panic!("expected a profile patch");
        };
        assert_eq!(field, FieldId::Avatar);
        let url = value.as_image().and_then(ImageRef::data_url).unwrap();
        assert_eq!(url.mime(), "image/png");
        assert_eq!(url.decode().unwrap(), PNG_MAGIC);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn falls_back_to_extension() {
        let path = temp_file("thumb.jpg", b"not sniffable");
        let patch = read_upload(&LocalFileReader, UploadSlot::Thumbnail, path.clone())
            .await
            .unwrap();
        let FieldPatch::Profile { value, .. } = patch else {
            panic!("expected a profile patch");
        };
        let url = value.as_image().and_then(ImageRef::data_url).unwrap();
        assert_eq!(url.mime(), "image/jpeg");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn missing_file_yields_none() {
        let path = std::env::temp_dir().join("postmock-definitely-missing.png");
        assert!(read_upload(&LocalFileReader, UploadSlot::Avatar, path).await.is_none());
    }
}
