//! Employee photo encoding.
//!
//! Photos are stored inline in `employees.image` as Base64 `data:` URIs.
//!
//! # Invariants
//! - Only `jpg` and `png` uploads are accepted (case-sensitive suffix match).
//! - Each extension maps to exactly one MIME string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATA_URI_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Declared extension of an uploaded employee photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageExtension {
    Jpg,
    Png,
}

/// Rejection reasons for an uploaded photo filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageExtensionError {
    /// The upload carried no filename at all.
    MissingFilename,
    /// The filename contains no `.`.
    MissingExtension(String),
    /// The suffix after the last `.` is not `jpg` or `png`.
    Unsupported(String),
}

impl Display for ImageExtensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFilename => write!(f, "image filename is missing"),
            Self::MissingExtension(name) => {
                write!(f, "image filename `{name}` has no extension")
            }
            Self::Unsupported(ext) => {
                write!(f, "unsupported image extension `{ext}`; only jpg or png")
            }
        }
    }
}

impl Error for ImageExtensionError {}

impl ImageExtension {
    /// Derives the extension from the suffix after the final `.`.
    pub fn from_filename(filename: Option<&str>) -> Result<Self, ImageExtensionError> {
        let filename = filename.ok_or(ImageExtensionError::MissingFilename)?;
        let (_, suffix) = filename
            .rsplit_once('.')
            .ok_or_else(|| ImageExtensionError::MissingExtension(filename.to_string()))?;
        Self::parse(suffix)
    }

    /// Parses an already isolated suffix (`"jpg"` or `"png"`).
    pub fn parse(value: &str) -> Result<Self, ImageExtensionError> {
        match value {
            "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            other => Err(ImageExtensionError::Unsupported(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Failure to split a stored image value back into MIME type and bytes.
#[derive(Debug)]
pub enum DataUriError {
    /// Value does not look like `data:<mime>;base64,<payload>`.
    Malformed,
    InvalidBase64(base64::DecodeError),
}

impl Display for DataUriError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "value is not a base64 data uri"),
            Self::InvalidBase64(err) => write!(f, "invalid base64 payload: {err}"),
        }
    }
}

impl Error for DataUriError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed => None,
            Self::InvalidBase64(err) => Some(err),
        }
    }
}

/// Encodes raw photo bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_uri(extension: ImageExtension, bytes: &[u8]) -> String {
    format!(
        "{DATA_URI_SCHEME}{}{BASE64_MARKER}{}",
        extension.mime_type(),
        STANDARD.encode(bytes)
    )
}

/// Splits a Base64 data URI into its MIME type and decoded bytes.
pub fn decode_data_uri(value: &str) -> Result<(String, Vec<u8>), DataUriError> {
    let rest = value
        .strip_prefix(DATA_URI_SCHEME)
        .ok_or(DataUriError::Malformed)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(DataUriError::Malformed)?;
    if mime.is_empty() {
        return Err(DataUriError::Malformed);
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(DataUriError::InvalidBase64)?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::{decode_data_uri, encode_data_uri, DataUriError, ImageExtension, ImageExtensionError};

    #[test]
    fn extension_is_taken_after_last_dot() {
        assert_eq!(
            ImageExtension::from_filename(Some("me.final.png")),
            Ok(ImageExtension::Png)
        );
        assert_eq!(
            ImageExtension::from_filename(Some("portrait.jpg")),
            Ok(ImageExtension::Jpg)
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(
            ImageExtension::from_filename(Some("portrait.JPG")),
            Err(ImageExtensionError::Unsupported("JPG".to_string()))
        );
        assert_eq!(
            ImageExtension::from_filename(Some("portrait.jpeg")),
            Err(ImageExtensionError::Unsupported("jpeg".to_string()))
        );
    }

    #[test]
    fn missing_filename_or_dot_is_rejected() {
        assert_eq!(
            ImageExtension::from_filename(None),
            Err(ImageExtensionError::MissingFilename)
        );
        assert_eq!(
            ImageExtension::from_filename(Some("portrait")),
            Err(ImageExtensionError::MissingExtension("portrait".to_string()))
        );
        assert_eq!(
            ImageExtension::from_filename(Some("portrait.")),
            Err(ImageExtensionError::Unsupported(String::new()))
        );
    }

    #[test]
    fn jpg_data_uri_uses_image_jpeg_and_decodes_back() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let uri = encode_data_uri(ImageExtension::Jpg, &bytes);
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let (mime, decoded) = decode_data_uri(&uri).expect("uri should decode");
        assert_eq!(mime, "image/jpeg");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn png_data_uri_keeps_payload_separator() {
        let bytes = b"\x89PNG\r\n\x1a\n";
        let uri = encode_data_uri(ImageExtension::Png, bytes);
        assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn decode_rejects_plain_filenames() {
        let err = decode_data_uri("portrait.png").expect_err("filename is not a data uri");
        assert!(matches!(err, DataUriError::Malformed));
    }
}
