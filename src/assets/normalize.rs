use anyhow::Context;
use image::imageops::{self, FilterType};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    assets::decode::{decode_image, flatten_over_white_in_place},
    foundation::core::{Canvas, Surface},
    foundation::error::{LenticularError, LenticularResult},
    sequence::SourceImage,
    settings::MAX_CANVAS_PX,
};

/// Threading controls for decoding and resampling.
#[derive(Clone, Debug, Default)]
pub struct LoadOpts {
    /// Normalize images concurrently on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

impl LoadOpts {
    /// Dedicated pool for one normalization pass.
    ///
    /// `threads == Some(0)` is a settings mistake and reported as
    /// [`LenticularError::Validation`]; a pool the OS refuses to start is wrapped
    /// as [`LenticularError::Other`].
    pub(crate) fn thread_pool(&self) -> LenticularResult<rayon::ThreadPool> {
        let builder = match self.threads {
            Some(0) => {
                return Err(LenticularError::validation(
                    "loader threading 'threads' must be >= 1 when set",
                ));
            }
            Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n),
            None => rayon::ThreadPoolBuilder::new(),
        };
        let pool = builder
            .thread_name(|i| format!("lenticulate-load-{i}"))
            .build()
            .context("start loader thread pool")?;
        Ok(pool)
    }
}

/// Normalized surfaces owned by a single generation call.
///
/// Dropping the arena releases every surface; the interlacer only borrows it.
#[derive(Debug)]
pub struct SurfaceArena {
    canvas: Canvas,
    surfaces: Vec<Surface>,
}

impl SurfaceArena {
    /// Shared size of every surface.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Surfaces in input order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// `true` when the arena holds no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Decode every source and stretch it to exactly `canvas`, preserving input order.
///
/// Fails with [`LenticularError::SizeLimit`] before decoding anything when the canvas
/// exceeds [`MAX_CANVAS_PX`]. On a decode failure every surface produced so far is
/// dropped before the error is returned.
#[instrument(skip_all, fields(count = sources.len(), width = canvas.width, height = canvas.height))]
pub fn normalize_sources(
    sources: &[SourceImage],
    canvas: Canvas,
    opts: &LoadOpts,
) -> LenticularResult<SurfaceArena> {
    if canvas.width > MAX_CANVAS_PX || canvas.height > MAX_CANVAS_PX {
        return Err(LenticularError::SizeLimit {
            width: u64::from(canvas.width),
            height: u64::from(canvas.height),
            max: MAX_CANVAS_PX,
        });
    }
    if canvas.width == 0 || canvas.height == 0 {
        return Err(LenticularError::validation(format!(
            "canvas must be non-empty (got {}x{})",
            canvas.width, canvas.height
        )));
    }

    let surfaces = if opts.parallel {
        let pool = opts.thread_pool()?;
        pool.install(|| {
            sources
                .par_iter()
                .map(|src| normalize_one(src, canvas))
                .collect::<LenticularResult<Vec<_>>>()
        })?
    } else {
        sources
            .iter()
            .map(|src| normalize_one(src, canvas))
            .collect::<LenticularResult<Vec<_>>>()?
    };

    Ok(SurfaceArena { canvas, surfaces })
}

fn normalize_one(src: &SourceImage, canvas: Canvas) -> LenticularResult<Surface> {
    let mut rgba = decode_image(&src.name, &src.bytes)?;
    debug!(
        name = %src.name,
        from_w = rgba.width(),
        from_h = rgba.height(),
        "decoded source"
    );
    flatten_over_white_in_place(&mut rgba);

    let resized = if rgba.dimensions() == (canvas.width, canvas.height) {
        rgba
    } else {
        imageops::resize(&rgba, canvas.width, canvas.height, FilterType::Triangle)
    };
    Surface::from_raw(canvas.width, canvas.height, resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/normalize.rs"]
mod tests;
