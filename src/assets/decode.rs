use image::RgbaImage;

use crate::foundation::error::{LenticularError, LenticularResult};

/// Decode encoded image bytes into straight RGBA8.
///
/// `name` is only used to label a [`LenticularError::Decode`].
pub fn decode_image(name: &str, bytes: &[u8]) -> LenticularResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| LenticularError::decode(name, e))?;
    Ok(dyn_img.into_rgba8())
}

/// Composite every pixel over opaque white and force alpha to 255.
///
/// Works on straight RGBA8, so it commutes with linear resampling of the
/// equivalent premultiplied data.
pub(crate) fn flatten_over_white_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        let inv = 255 - a;
        px[0] = ((px[0] as u16 * a + 255 * inv + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 255 * inv + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 255 * inv + 127) / 255) as u8;
        px[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
