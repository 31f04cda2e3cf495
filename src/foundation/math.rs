use std::ops::Range;

/// Pixels whose centers fall in the half-open interval `[start, end)`, clipped to `[0, limit)`.
///
/// A pixel `p` is covered iff `start <= p + 0.5 < end`. Adjacent intervals sharing a
/// boundary therefore never share or skip a pixel.
pub(crate) fn covered_pixels(start: f64, end: f64, limit: u32) -> Range<u32> {
    let lo = clamp_to_axis((start - 0.5).ceil(), limit);
    let hi = clamp_to_axis((end - 0.5).ceil(), limit);
    if hi <= lo { lo..lo } else { lo..hi }
}

/// Map the center of destination pixel `p` from `[dst_start, dst_end)` into
/// `[src_start, src_end)` and return the source pixel it lands in, clamped to `[0, limit)`.
pub(crate) fn map_pixel_center(
    p: u32,
    (dst_start, dst_end): (f64, f64),
    (src_start, src_end): (f64, f64),
    limit: u32,
) -> u32 {
    let dst_len = dst_end - dst_start;
    let center = f64::from(p) + 0.5;
    let s = if dst_len > 0.0 {
        src_start + (center - dst_start) * (src_end - src_start) / dst_len
    } else {
        src_start
    };
    let idx = s.floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as u64).min(u64::from(limit.saturating_sub(1))) as u32
    }
}

/// `ceil(inches * dpi)` as a pixel count; `None` for non-finite or negative products.
pub(crate) fn ceil_px(inches: f64, dpi: f64) -> Option<u64> {
    let v = (inches * dpi).ceil();
    if !v.is_finite() || v < 0.0 || v > u64::MAX as f64 {
        return None;
    }
    Some(v as u64)
}

fn clamp_to_axis(v: f64, limit: u32) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= f64::from(limit) {
        limit
    } else {
        v as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
