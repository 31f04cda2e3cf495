use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{info, instrument};

use crate::{
    assets::normalize::{LoadOpts, normalize_sources},
    foundation::core::Surface,
    foundation::error::{LenticularError, LenticularResult},
    render::interlace::interlace,
    sequence::SourceImage,
    settings::LenticularSettings,
};

/// Options for a generation beyond the print settings.
#[derive(Clone, Debug, Default)]
pub struct GenerateOpts {
    /// Decoding/resampling threading.
    pub load: LoadOpts,
}

/// Interlace `images` into one print-sized canvas.
///
/// Pipeline:
/// 1. check there are at least two frames and that the settings are valid
/// 2. compute the canvas size (size ceiling enforced before any allocation)
/// 3. [`normalize_sources`](crate::normalize_sources) into a per-call arena
/// 4. [`interlace`](crate::interlace) the arena into a fresh canvas
///
/// `images` are used in the order given. The arena is dropped before returning on
/// every path; no partially composited canvas is ever returned.
pub fn generate(images: &[SourceImage], settings: &LenticularSettings) -> LenticularResult<Surface> {
    generate_with_opts(images, settings, &GenerateOpts::default())
}

/// [`generate`] with explicit loader threading.
pub fn generate_with_opts(
    images: &[SourceImage],
    settings: &LenticularSettings,
    opts: &GenerateOpts,
) -> LenticularResult<Surface> {
    run_generation(images, settings, opts, None)
}

/// Shared body of the sync and session paths; `cancel` is checked between phases.
#[instrument(skip_all, fields(count = images.len(), orientation = %settings.orientation))]
pub(crate) fn run_generation(
    images: &[SourceImage],
    settings: &LenticularSettings,
    opts: &GenerateOpts,
    cancel: Option<&AtomicBool>,
) -> LenticularResult<Surface> {
    let t0 = Instant::now();
    if images.len() < 2 {
        return Err(LenticularError::InsufficientImages {
            count: images.len(),
        });
    }
    let canvas = settings.canvas()?;
    check_cancel(cancel)?;

    let arena = normalize_sources(images, canvas, &opts.load)?;
    check_cancel(cancel)?;

    let out = interlace(arena.surfaces(), settings.orientation, settings.lens_pitch_px())?;
    drop(arena);
    check_cancel(cancel)?;

    info!(
        width = out.width(),
        height = out.height(),
        lens_pitch_px = settings.lens_pitch_px(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "generated lenticular print"
    );
    Ok(out)
}

fn check_cancel(cancel: Option<&AtomicBool>) -> LenticularResult<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Acquire) => Err(LenticularError::Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
