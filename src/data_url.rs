//! Base64 `data:` URLs for embedded images and exported bitmaps.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DataUrlError;

/// A parsed `data:<mime>;base64,<payload>` URL.
///
/// The payload is kept in its encoded form so the URL can be embedded in
/// preview markup without re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUrl {
    mime: String,
    payload: String,
}

impl DataUrl {
    /// Encodes raw bytes as a data URL with the given mime type.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Parses a base64 data URL.
    ///
    /// ```
    /// use postmock::DataUrl;
    ///
    /// let url = DataUrl::parse("data:image/png;base64,iVBORw0K").unwrap();
    /// assert_eq!(url.mime(), "image/png");
    /// ```
    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(DataUrlError::NotBase64)?;

        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Returns the mime type (may be empty).
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns the base64 payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl FromStr for DataUrl {
    type Err = DataUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
