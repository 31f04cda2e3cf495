use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Orientation};
use crate::foundation::error::{LenticularError, LenticularResult};
use crate::foundation::math::ceil_px;

/// Hard per-dimension ceiling on the output canvas, in pixels.
pub const MAX_CANVAS_PX: u32 = 16_000;

/// Print and lens parameters for one generation request.
///
/// Deserializes from JSON with camelCase keys; missing keys take the defaults
/// (60 lpi, 4 x 6 inches, 300 dpi, vertical).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LenticularSettings {
    /// Lenses per inch of the lens sheet.
    pub lpi: f64,
    /// Physical print width in inches.
    pub width_inches: f64,
    /// Physical print height in inches.
    pub height_inches: f64,
    /// Output resolution in dots per inch.
    pub dpi: f64,
    /// Axis the lenses run along.
    pub orientation: Orientation,
}

impl Default for LenticularSettings {
    fn default() -> Self {
        Self {
            lpi: 60.0,
            width_inches: 4.0,
            height_inches: 6.0,
            dpi: 300.0,
            orientation: Orientation::Vertical,
        }
    }
}

/// Derived figures for a print, shown before generating.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PrintSummary {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Width (vertical) or height (horizontal) of one lens cycle in pixels.
    pub lens_pitch_px: f64,
    /// Per-image strip width, when the image count is known.
    pub strip_width_px: Option<f64>,
    /// Lens cycles needed to cover the interlacing axis.
    pub total_lenses: u64,
}

impl LenticularSettings {
    /// Load settings from a JSON file.
    pub fn from_path(path: &Path) -> LenticularResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse settings JSON '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject non-finite or non-positive values.
    pub fn validate(&self) -> LenticularResult<()> {
        for (name, v) in [
            ("lpi", self.lpi),
            ("dpi", self.dpi),
            ("widthInches", self.width_inches),
            ("heightInches", self.height_inches),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(LenticularError::validation(format!(
                    "{name} must be a finite number > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// `dpi / lpi`, the pixel length of one lens cycle.
    pub fn lens_pitch_px(&self) -> f64 {
        self.dpi / self.lpi
    }

    /// Output canvas size, `ceil(inches * dpi)` per axis.
    ///
    /// Fails with [`LenticularError::SizeLimit`] when either side exceeds
    /// [`MAX_CANVAS_PX`]; nothing is allocated here.
    pub fn canvas(&self) -> LenticularResult<Canvas> {
        self.validate()?;
        let (width, height) = match (
            ceil_px(self.width_inches, self.dpi),
            ceil_px(self.height_inches, self.dpi),
        ) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(LenticularError::validation(
                    "canvas size is not representable",
                ));
            }
        };
        let max = u64::from(MAX_CANVAS_PX);
        if width > max || height > max {
            return Err(LenticularError::SizeLimit {
                width,
                height,
                max: MAX_CANVAS_PX,
            });
        }
        Ok(Canvas {
            width: width as u32,
            height: height as u32,
        })
    }

    /// Canvas size, pitch and lens count; strip width when `image_count` is given.
    pub fn summary(&self, image_count: Option<usize>) -> LenticularResult<PrintSummary> {
        let canvas = self.canvas()?;
        let lens_pitch_px = self.lens_pitch_px();
        let primary = f64::from(self.orientation.primary_len(canvas));
        Ok(PrintSummary {
            canvas,
            lens_pitch_px,
            strip_width_px: image_count
                .filter(|&n| n > 0)
                .map(|n| lens_pitch_px / n as f64),
            total_lenses: (primary / lens_pitch_px).ceil() as u64,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
