//! Inline image payloads.
//!
//! Browsers hand us images as `FileReader.readAsDataURL` output, e.g.
//! `data:image/png;base64,iVBORw0...`. The vision model wants the bare
//! base64 payload plus a mime type, so [`InlineImage::parse`] strips the
//! prefix and checks that the bytes really are an image before anything is
//! sent upstream.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Errors that can occur when parsing an [`InlineImage`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// No payload at all.
    #[error("image is required")]
    Missing,
    /// A `data:` URL that is not a base64 image.
    #[error("unsupported data URL: {0}")]
    UnsupportedDataUrl(String),
    /// Payload is not valid base64.
    #[error("image is not valid base64")]
    InvalidBase64,
    /// Decoded bytes carry no known image signature.
    #[error("payload is not a PNG, JPEG, GIF or WebP image")]
    NotAnImage,
}

/// Image container formats accepted by the vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Identify a format from its leading magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// A validated base64 image ready to be inlined into a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    format: ImageFormat,
    data: String,
}

impl InlineImage {
    /// Parse a data URL or a bare base64 string.
    ///
    /// The format is taken from the decoded bytes, not from the declared
    /// prefix, so a mislabelled upload still gets the right mime type.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the input is empty, carries a non-image
    /// `data:` prefix, is not base64, or does not decode to a known image
    /// format.
    pub fn parse(input: &str) -> Result<Self, ImageError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ImageError::Missing);
        }

        let payload = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| ImageError::UnsupportedDataUrl("missing ','".to_owned()))?;
                let subtype = header
                    .strip_suffix(";base64")
                    .and_then(|mime| mime.strip_prefix("image/"))
                    .ok_or_else(|| ImageError::UnsupportedDataUrl(header.to_owned()))?;
                if ImageFormat::from_subtype(subtype).is_none() {
                    return Err(ImageError::UnsupportedDataUrl(header.to_owned()));
                }
                payload
            }
            None => input,
        };

        // MIME encoders wrap base64 at 76 columns.
        let payload: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if payload.is_empty() {
            return Err(ImageError::Missing);
        }

        let bytes = STANDARD
            .decode(&payload)
            .map_err(|_| ImageError::InvalidBase64)?;
        let format = ImageFormat::sniff(&bytes).ok_or(ImageError::NotAnImage)?;

        Ok(Self {
            format,
            data: payload,
        })
    }

    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// The base64 payload without any `data:` prefix.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Size of the base64 payload in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.data.len()
    }
}
