use tracing::{debug, instrument};

use crate::{
    foundation::core::{OPAQUE_WHITE, Orientation, Surface},
    foundation::error::{LenticularError, LenticularResult},
    render::blit::blit_region,
    render::layout::StripLayout,
};

/// Composite `surfaces` into one interlaced canvas of the same size.
///
/// Strip `j` of every lens is revealed in place from `surfaces[j]`: the source and
/// destination regions coincide, so each surface only contributes where its strips
/// fall. Pixels go to the strip holding their center; adjacent pixels with the same
/// owner are copied as one run. The canvas starts opaque white and is returned only
/// if every run copied.
#[instrument(skip(surfaces), fields(count = surfaces.len()))]
pub fn interlace(
    surfaces: &[Surface],
    orientation: Orientation,
    lens_pitch_px: f64,
) -> LenticularResult<Surface> {
    let Some(first) = surfaces.first() else {
        return Err(LenticularError::InsufficientImages { count: 0 });
    };
    let canvas = first.canvas();
    if let Some((i, s)) = surfaces
        .iter()
        .enumerate()
        .find(|(_, s)| s.canvas() != canvas)
    {
        return Err(LenticularError::surface(format!(
            "surface {i} is {}x{}, expected {}x{}",
            s.width(),
            s.height(),
            canvas.width,
            canvas.height
        )));
    }

    let layout = StripLayout::new(
        orientation.primary_len(canvas),
        lens_pitch_px,
        surfaces.len(),
    )?;
    debug!(
        total_lenses = layout.total_lenses(),
        strip_width_px = layout.strip_width_px(),
        "strip layout"
    );

    let mut out = Surface::filled(canvas, OPAQUE_WHITE)?;
    for (image, pixels) in layout.runs() {
        let rect = orientation.strip_rect(f64::from(pixels.start), f64::from(pixels.end), canvas);
        blit_region(&surfaces[image], rect, &mut out, rect)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/interlace.rs"]
mod tests;
