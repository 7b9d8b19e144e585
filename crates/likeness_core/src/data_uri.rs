//! Self-contained `data:` URIs for images and video.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use likeness_error::{MediaError, MediaErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Media payload in the form `data:<mimetype>;base64,<encoded_data>`.
///
/// Parsing decodes the payload; formatting re-encodes it, so a parsed URI
/// displays back to the same string.
///
/// # Examples
///
/// ```
/// use likeness_core::DataUri;
///
/// let uri: DataUri = "data:image/png;base64,iVBORw0K".parse().unwrap();
/// assert_eq!(uri.mime_type(), "image/png");
/// assert_eq!(uri.to_string(), "data:image/png;base64,iVBORw0K");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri {
    /// MIME type of the payload
    mime_type: String,
    /// Decoded payload bytes
    data: Vec<u8>,
}

impl DataUri {
    /// Wrap raw bytes with their MIME type.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Payload as standard base64.
    pub fn encoded_data(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// True when the MIME type is `video/*`.
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// True when the MIME type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl FromStr for DataUri {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.trim().strip_prefix(PREFIX).ok_or_else(|| {
            MediaError::new(MediaErrorKind::InvalidDataUri(
                "missing 'data:' prefix".to_string(),
            ))
        })?;

        let (mime_type, encoded) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            MediaError::new(MediaErrorKind::InvalidDataUri(
                "missing ';base64,' marker".to_string(),
            ))
        })?;

        if mime_type.is_empty() {
            return Err(MediaError::new(MediaErrorKind::MissingContentType));
        }

        let data = STANDARD
            .decode(encoded)
            .map_err(|e| MediaError::new(MediaErrorKind::Base64Decode(e.to_string())))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }
}

impl TryFrom<String> for DataUri {
    type Error = MediaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataUri> for String {
    fn from(uri: DataUri) -> Self {
        uri.to_string()
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            PREFIX,
            self.mime_type,
            BASE64_MARKER,
            self.encoded_data()
        )
    }
}
