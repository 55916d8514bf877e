//! # Image Formats
//!
//! Uploads are stored verbatim. This module only answers two questions:
//! is an upload's file name on the allow-list, and what content type should
//! stored bytes be served with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// File extensions accepted by the upload control.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Image formats the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Resolves the format from an upload's file name extension.
    ///
    /// ```rust
    /// use knitcraft_core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_filename("scarf.JPG").unwrap(), ImageFormat::Jpeg);
    /// assert!(ImageFormat::from_filename("scarf.gif").is_err());
    /// ```
    pub fn from_filename(filename: &str) -> Result<Self, ValidationError> {
        let ext = Path::new(filename.trim())
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            Some("png") => Ok(ImageFormat::Png),
            _ => Err(ValidationError::NotAllowed {
                field: "image".to_string(),
                allowed: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            }),
        }
    }

    /// Detects the format of stored bytes from their magic number.
    ///
    /// Returns `None` for anything else; nothing is validated at upload time
    /// beyond the file name, so stored bytes may be arbitrary.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    /// MIME type for HTTP responses.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}
