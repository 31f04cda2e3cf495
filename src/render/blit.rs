use crate::{
    foundation::core::{Rect, Surface},
    foundation::error::{LenticularError, LenticularResult},
    foundation::math::{covered_pixels, map_pixel_center},
};

/// Resample the real-valued `src_rect` of `src` into `dst_rect` of `dst`.
///
/// Every destination pixel whose center lies in `dst_rect` (half-open on both axes) is
/// overwritten with the source pixel its center maps to; nothing is blended. Both
/// rectangles may have fractional bounds and may extend past their surfaces: the
/// destination is clipped and source lookups are clamped.
pub(crate) fn blit_region(
    src: &Surface,
    src_rect: Rect,
    dst: &mut Surface,
    dst_rect: Rect,
) -> LenticularResult<()> {
    for (label, r) in [("source", src_rect), ("destination", dst_rect)] {
        let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
        if !finite || r.x1 < r.x0 || r.y1 < r.y0 {
            return Err(LenticularError::surface(format!(
                "invalid {label} rect {r:?}"
            )));
        }
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(LenticularError::surface("cannot sample from an empty surface"));
    }

    let xs = covered_pixels(dst_rect.x0, dst_rect.x1, dst.width());
    let ys = covered_pixels(dst_rect.y0, dst_rect.y1, dst.height());
    if xs.is_empty() || ys.is_empty() {
        return Ok(());
    }

    let src_x: Vec<u32> = xs
        .clone()
        .map(|x| {
            map_pixel_center(
                x,
                (dst_rect.x0, dst_rect.x1),
                (src_rect.x0, src_rect.x1),
                src.width(),
            )
        })
        .collect();
    // Contiguous runs copy whole row slices.
    let contiguous = src_x.windows(2).all(|w| w[1] == w[0] + 1);

    let src_bytes = src.as_bytes();
    for y in ys {
        let sy = map_pixel_center(
            y,
            (dst_rect.y0, dst_rect.y1),
            (src_rect.y0, src_rect.y1),
            src.height(),
        );
        let d0 = dst.offset(xs.start, y);
        let d1 = dst.offset(xs.end - 1, y) + 4;
        if contiguous {
            let s0 = src.offset(src_x[0], sy);
            let s1 = s0 + (d1 - d0);
            dst.bytes_mut()[d0..d1].copy_from_slice(&src_bytes[s0..s1]);
        } else {
            let row = &mut dst.bytes_mut()[d0..d1];
            for (px, &sx) in row.chunks_exact_mut(4).zip(&src_x) {
                let s = src.offset(sx, sy);
                px.copy_from_slice(&src_bytes[s..s + 4]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
