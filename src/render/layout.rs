use std::ops::Range;

use crate::{
    foundation::error::{LenticularError, LenticularResult},
    foundation::math::covered_pixels,
};

/// One image's slice of one lens cycle, in real-valued pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    /// Lens cycle index.
    pub lens: u64,
    /// Source image index.
    pub image: usize,
    /// Inclusive start on the interlacing axis.
    pub start: f64,
    /// Exclusive end on the interlacing axis.
    pub end: f64,
}

/// Partition of the interlacing axis into lens cycles and per-image strips.
///
/// Boundaries are computed fresh from `(lens, image)` and never accumulated. A strip
/// ends exactly where the next one starts (the last strip of a lens ends at the
/// next lens's start), so the half-open strips tile the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripLayout {
    primary_len: u32,
    lens_pitch_px: f64,
    image_count: usize,
    total_lenses: u64,
}

impl StripLayout {
    /// Layout for `image_count` frames over `primary_len` pixels.
    pub fn new(primary_len: u32, lens_pitch_px: f64, image_count: usize) -> LenticularResult<Self> {
        if image_count < 2 {
            return Err(LenticularError::InsufficientImages { count: image_count });
        }
        if !lens_pitch_px.is_finite() || lens_pitch_px <= 0.0 {
            return Err(LenticularError::surface(format!(
                "lens pitch must be a finite number > 0 (got {lens_pitch_px})"
            )));
        }
        let total_lenses = (f64::from(primary_len) / lens_pitch_px).ceil() as u64;
        Ok(Self {
            primary_len,
            lens_pitch_px,
            image_count,
            total_lenses,
        })
    }

    /// Lens cycles needed to cover the axis; the last may extend past it.
    pub fn total_lenses(&self) -> u64 {
        self.total_lenses
    }

    /// Pixel length of one lens cycle.
    pub fn lens_pitch_px(&self) -> f64 {
        self.lens_pitch_px
    }

    /// Pixel length of one strip.
    pub fn strip_width_px(&self) -> f64 {
        self.lens_pitch_px / self.image_count as f64
    }

    /// Number of frames per lens.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Axis length in pixels.
    pub fn primary_len(&self) -> u32 {
        self.primary_len
    }

    /// Strip `image` of lens `lens`.
    pub fn strip(&self, lens: u64, image: usize) -> Strip {
        let start = self.boundary(lens, image);
        let end = if image + 1 < self.image_count {
            self.boundary(lens, image + 1)
        } else {
            self.boundary(lens + 1, 0)
        };
        Strip {
            lens,
            image,
            start,
            end,
        }
    }

    /// Pixels of the axis claimed by `strip` (clipped to the axis).
    pub fn pixels(&self, strip: &Strip) -> Range<u32> {
        covered_pixels(strip.start, strip.end, self.primary_len)
    }

    /// Every strip, lens-major then image order.
    ///
    /// Yields `total_lenses * image_count` strips; with a sub-pixel pitch most of them
    /// claim no pixel. Use [`Self::runs`] to walk the axis in pixel order instead.
    pub fn strips(&self) -> impl Iterator<Item = Strip> + '_ {
        (0..self.total_lenses)
            .flat_map(move |lens| (0..self.image_count).map(move |image| self.strip(lens, image)))
    }

    /// The strip whose half-open span contains the center of pixel `p`.
    pub fn strip_at(&self, p: u32) -> Strip {
        let center = f64::from(p) + 0.5;
        let pitch = self.lens_pitch_px;

        let mut lens = (center / pitch).floor().max(0.0);
        if lens > 0.0 && lens * pitch > center {
            lens -= 1.0;
        } else if (lens + 1.0) * pitch <= center {
            lens += 1.0;
        }
        let lens_start = lens * pitch;

        let last = self.image_count - 1;
        let mut image = ((center - lens_start) / self.strip_width_px())
            .floor()
            .clamp(0.0, last as f64) as usize;
        let at = |image: usize| lens_start + image as f64 * self.strip_width_px();
        if image > 0 && at(image) > center {
            image -= 1;
        } else if image < last && at(image + 1) <= center {
            image += 1;
        }

        self.strip(lens as u64, image)
    }

    /// Maximal runs of axis pixels drawn from the same image, in pixel order.
    ///
    /// Work is bounded by the axis length regardless of pitch; each run is the union of
    /// the (clipped) strips of one image that touch it.
    pub fn runs(&self) -> Vec<(usize, Range<u32>)> {
        let mut runs: Vec<(usize, Range<u32>)> = Vec::new();
        for p in 0..self.primary_len {
            let image = self.strip_at(p).image;
            match runs.last_mut() {
                Some((owner, range)) if *owner == image => range.end = p + 1,
                _ => runs.push((image, p..p + 1)),
            }
        }
        runs
    }

    fn boundary(&self, lens: u64, image: usize) -> f64 {
        lens as f64 * self.lens_pitch_px + image as f64 * self.strip_width_px()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
