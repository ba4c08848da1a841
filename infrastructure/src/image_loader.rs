use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use domain::attachment::ImageAttachment;
use domain::{SvgError, SvgResult};
use shared::utils::image_mime_type;
use std::path::Path;

/// Reads a PNG or JPEG attachment into a `data:` URI.
pub fn load_image_data_uri(path: &Path) -> SvgResult<String> {
    let mime = image_mime_type(path).ok_or_else(|| {
        SvgError::InvalidImage(format!(
            "{} (only PNG and JPEG files are accepted)",
            path.display()
        ))
    })?;
    let bytes = std::fs::read(path)
        .map_err(|e| SvgError::InvalidImage(format!("{}: {}", path.display(), e)))?;
    Ok(encode_data_uri(mime, &bytes))
}

fn encode_data_uri(mime_type: &'static str, bytes: &[u8]) -> String {
    ImageAttachment {
        mime_type,
        data: STANDARD.encode(bytes),
    }
    .to_data_uri()
}
