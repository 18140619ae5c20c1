use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use thiserror::Error;

/// Failures while rendering a link into a scannable image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The QR symbol could not be constructed (e.g. data too long).
    #[error("qr construction failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// PNG serialization of the rendered symbol failed.
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Render an absolute URL into a self-contained `data:image/png;base64,...`
/// URI suitable for inline display and scanning.
///
/// Deterministic for a given URL; never checks that the URL is reachable.
pub fn data_uri(url: &str) -> Result<String, EncodeError> {
    let code = QrCode::new(url.as_bytes())?;
    let img = code
        .render::<image::Luma<u8>>()
        .min_dimensions(240, 240)
        .build();

    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
