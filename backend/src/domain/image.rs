//! Validated image attachment payloads.
//!
//! Posts may carry one optional image. The domain stores the raw bytes and
//! only admits payloads whose leading signature matches a recognized image
//! container; deeper decoding is left to consumers of the media bytes.

use serde::Serialize;

/// Validation errors returned by [`ImagePayload::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageValidationError {
    /// Payload is empty.
    #[error("image payload must not be empty")]
    Empty,
    /// Payload does not start with a recognized image signature.
    #[error("image payload is not a recognized image format")]
    UnrecognizedFormat,
}

/// Image container formats admitted as post attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

/// A validated image attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ImagePayload {
    /// Validate raw bytes as an image payload.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ImageValidationError> {
        if bytes.is_empty() {
            return Err(ImageValidationError::Empty);
        }
        let format = sniff_format(&bytes).ok_or(ImageValidationError::UnrecognizedFormat)?;
        Ok(Self { bytes, format })
    }

    /// The detected container format.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the payload, yielding its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(ImageFormat::Png);
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some(ImageFormat::Gif);
    }
    // RIFF container with a WEBP fourcc at offset 8.
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some(ImageFormat::Webp);
    }
    None
}

/// The smallest well-formed GIF header, handy for tests and fixtures.
#[must_use]
pub fn tiny_gif() -> Vec<u8> {
    b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00], ImageFormat::Png)]
    #[case(vec![0xFF, 0xD8, 0xFF, 0xE0], ImageFormat::Jpeg)]
    #[case(tiny_gif(), ImageFormat::Gif)]
    fn recognized_signatures_are_accepted(#[case] bytes: Vec<u8>, #[case] format: ImageFormat) {
        let payload = ImagePayload::new(bytes).expect("valid image");
        assert_eq!(payload.format(), format);
    }

    #[test]
    fn webp_requires_the_riff_fourcc() {
        let mut bytes = b"RIFF\x00\x00\x00\x00WEBP".to_vec();
        assert!(ImagePayload::new(bytes.clone()).is_ok());
        bytes.truncate(8);
        assert_eq!(
            ImagePayload::new(bytes),
            Err(ImageValidationError::UnrecognizedFormat)
        );
    }

    #[test]
    fn arbitrary_bytes_are_rejected() {
        assert_eq!(
            ImagePayload::new(b"not an image".to_vec()),
            Err(ImageValidationError::UnrecognizedFormat)
        );
        assert_eq!(ImagePayload::new(Vec::new()), Err(ImageValidationError::Empty));
    }
}
