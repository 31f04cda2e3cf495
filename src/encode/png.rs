use std::path::Path;

use anyhow::Context as _;
use image::{ExtendedColorType, ImageEncoder as _, codecs::png::PngEncoder};
use tracing::{info, instrument};

use crate::{
    foundation::core::Surface, foundation::error::LenticularResult,
    settings::LenticularSettings,
};

/// Encode a surface as an 8-bit RGBA PNG (lossless).
pub fn encode_png(surface: &Surface) -> LenticularResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            surface.as_bytes(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .context("encode png")?;
    Ok(buf)
}

/// Write a surface to `path` as PNG, creating parent directories.
#[instrument(skip(surface), fields(path = %path.display(), width = surface.width(), height = surface.height()))]
pub fn write_png(path: &Path, surface: &Surface) -> LenticularResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        surface.as_bytes(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    info!("wrote print");
    Ok(())
}

/// `lenticular_{width}x{height}_{lpi}lpi.png`, with the print size in inches.
pub fn suggested_file_name(settings: &LenticularSettings) -> String {
    format!(
        "lenticular_{}x{}_{}lpi.png",
        settings.width_inches, settings.height_inches, settings.lpi
    )
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
