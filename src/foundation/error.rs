/// Convenience result type used across lenticulate.
pub type LenticularResult<T> = Result<T, LenticularError>;

/// Stable classification of a [`LenticularError`], independent of its message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A source blob could not be decoded as an image.
    Decode,
    /// The computed canvas exceeds the pixel ceiling.
    SizeLimit,
    /// Fewer than two images were supplied.
    InsufficientImages,
    /// An internal compositing precondition was violated.
    Surface,
    /// Invalid settings or options.
    Validation,
    /// The generation was cancelled and its output discarded.
    Cancelled,
    /// Lower-level IO or dependency failure.
    Other,
}

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is terminal for the current generation attempt.
#[derive(thiserror::Error, Debug)]
pub enum LenticularError {
    /// A source image could not be interpreted as an image.
    #[error("decode error: image '{name}': {detail}")]
    Decode {
        /// Display name of the offending image.
        name: String,
        /// Decoder message.
        detail: String,
    },

    /// The canvas computed from the settings is larger than the supported ceiling.
    #[error("size limit error: canvas {width}x{height} px exceeds the {max} px limit")]
    SizeLimit {
        /// Computed canvas width in pixels.
        width: u64,
        /// Computed canvas height in pixels.
        height: u64,
        /// Per-dimension ceiling.
        max: u32,
    },

    /// Interlacing needs at least two frames.
    #[error("insufficient images: {count} supplied, at least 2 required")]
    InsufficientImages {
        /// Number of images actually supplied.
        count: usize,
    },

    /// Compositing precondition violated (mismatched surfaces, bad pitch).
    #[error("surface error: {0}")]
    Surface(String),

    /// Invalid user-provided settings or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// The generation was cancelled before its output was delivered.
    #[error("generation cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LenticularError {
    /// Build a [`LenticularError::Decode`] value.
    pub fn decode(name: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Decode {
            name: name.into(),
            detail: detail.to_string(),
        }
    }

    /// Build a [`LenticularError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`LenticularError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::SizeLimit { .. } => ErrorKind::SizeLimit,
            Self::InsufficientImages { .. } => ErrorKind::InsufficientImages,
            Self::Surface(_) => ErrorKind::Surface,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
