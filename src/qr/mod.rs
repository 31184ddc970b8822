use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

/// Pixels per QR module in the rendered image.
const MODULE_PIXELS: u32 = 8;

#[derive(Debug, Error)]
pub enum QrEncodeError {
    #[error("QR payload rejected: {0}")]
    Payload(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encode `url` as a PNG QR image.
///
/// Pure function: the same URL always produces the same bytes. Uses
/// error-correction level L and a standard quiet zone.
pub fn encode(url: &str) -> Result<Vec<u8>, QrEncodeError> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_produces_png() {
        let bytes = encode("https://placard.example/e/00000000-0000-0000-0000-000000000000")
            .expect("encoding a short URL should succeed");
        assert!(bytes.len() > PNG_SIGNATURE.len());
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let url = "https://placard.example/e/7d3f2b1a-5c68-4e4f-9a2d-1f0e8c6b4a92";
        assert_eq!(encode(url).unwrap(), encode(url).unwrap());
    }

    #[test]
    fn test_different_urls_produce_different_images() {
        let a = encode("https://placard.example/e/aaaa").unwrap();
        let b = encode("https://placard.example/e/bbbb").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let payload = "x".repeat(8000);
        assert!(matches!(
            encode(&payload),
            Err(QrEncodeError::Payload(_))
        ));
    }
}
