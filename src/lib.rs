//! lenticulate turns an ordered sequence of aligned frames into one interlaced
//! raster for printing behind a lenticular lens sheet.
//!
//! # Pipeline overview
//!
//! 1. **Size**: `LenticularSettings -> Canvas` (`ceil(inches * dpi)`, capped at
//!    [`MAX_CANVAS_PX`] per side)
//! 2. **Normalize**: `[SourceImage] -> SurfaceArena` (decode, flatten over white,
//!    stretch to the canvas)
//! 3. **Interlace**: `SurfaceArena -> Surface` (one strip per frame per lens, laid
//!    out by [`StripLayout`])
//! 4. **Export** (optional): [`encode_png`] / [`write_png`]
//!
//! [`generate`] runs steps 1-3 synchronously. [`GenerationSession`] wraps it in a
//! tokio blocking task with cancellation for hosts that must stay responsive.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give byte-identical canvases.
//! - **No partial output**: any failure discards the canvas.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod render;
mod sequence;
mod session;
mod settings;

pub use assets::decode::decode_image;
pub use assets::normalize::{LoadOpts, SurfaceArena, normalize_sources};
pub use encode::png::{encode_png, suggested_file_name, write_png};
pub use foundation::core::{Canvas, OPAQUE_WHITE, Orientation, Rect, Rgba8, Surface};
pub use foundation::error::{ErrorKind, LenticularError, LenticularResult};
pub use render::interlace::interlace;
pub use render::layout::{Strip, StripLayout};
pub use render::pipeline::{GenerateOpts, generate, generate_with_opts};
pub use sequence::{ImageSequence, SourceId, SourceImage, natural_cmp};
pub use session::{CancelToken, GenerationHandle, GenerationSession};
pub use settings::{LenticularSettings, MAX_CANVAS_PX, PrintSummary};
