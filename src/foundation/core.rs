use crate::foundation::error::{LenticularError, LenticularResult};

pub use kurbo::Rect;

/// Straight (non-premultiplied) RGBA8 sample.
pub type Rgba8 = [u8; 4];

/// Opaque white, the canvas background before any strip is drawn.
pub const OPAQUE_WHITE: Rgba8 = [255, 255, 255, 255];

/// Pixel dimensions of a canvas or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
    }

    /// Swap width and height.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Axis the lenses run along.
///
/// Vertical lenses give a left-right (depth) effect through vertical strips;
/// horizontal lenses give a top-bottom (flip) effect through horizontal strips.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Vertical strips, interlaced along x.
    #[default]
    Vertical,
    /// Horizontal strips, interlaced along y.
    Horizontal,
}

impl Orientation {
    /// Canvas extent along the interlacing axis.
    pub fn primary_len(self, canvas: Canvas) -> u32 {
        match self {
            Self::Vertical => canvas.width,
            Self::Horizontal => canvas.height,
        }
    }

    /// Canvas extent across the interlacing axis.
    pub fn secondary_len(self, canvas: Canvas) -> u32 {
        match self {
            Self::Vertical => canvas.height,
            Self::Horizontal => canvas.width,
        }
    }

    /// Real-valued rectangle covering `[start, end)` on the primary axis and the
    /// full secondary extent.
    pub fn strip_rect(self, start: f64, end: f64, canvas: Canvas) -> Rect {
        let secondary = f64::from(self.secondary_len(canvas));
        match self {
            Self::Vertical => Rect::new(start, 0.0, end, secondary),
            Self::Horizontal => Rect::new(0.0, start, secondary, end),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Owned RGBA8 pixel buffer, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a surface filled with a single color.
    pub fn filled(canvas: Canvas, color: Rgba8) -> LenticularResult<Self> {
        let len = canvas
            .rgba8_len()
            .ok_or_else(|| LenticularError::surface("surface byte size overflow"))?;
        Ok(Self {
            canvas,
            data: color.repeat(len / 4),
        })
    }

    /// Wrap an existing RGBA8 buffer; its length must be `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> LenticularResult<Self> {
        let canvas = Canvas { width, height };
        if canvas.rgba8_len() != Some(data.len()) {
            return Err(LenticularError::surface(format!(
                "rgba8 buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self { canvas, data })
    }

    /// Pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Sample at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = self.offset(x, y);
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the surface and return its RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
