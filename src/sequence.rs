//! Ordered frame sequence fed to the engine.
//!
//! Order is compositing order: index 0 fills the first strip of every lens.
//! [`ImageSequence`] keeps frames sorted by [`natural_cmp`] on their display names;
//! the engine itself never re-sorts what it is given.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::LenticularResult;

/// Stable unique identifier of one ingested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub uuid::Uuid);

impl SourceId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One encoded source frame.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Stable identifier.
    pub id: SourceId,
    /// Display name, also the natural sort key.
    pub name: String,
    /// Encoded image bytes (PNG, JPEG, ...), shared and never mutated.
    pub bytes: Arc<[u8]>,
}

impl SourceImage {
    /// Wrap encoded bytes under a display name.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: SourceId::new(),
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file; the display name is the file name.
    pub fn from_path(path: &Path) -> LenticularResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

/// Frames kept in natural name order.
#[derive(Clone, Debug, Default)]
pub struct ImageSequence {
    images: Vec<SourceImage>,
}

impl ImageSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add frames and re-sort the whole sequence.
    pub fn extend(&mut self, images: impl IntoIterator<Item = SourceImage>) {
        self.images.extend(images);
        self.images.sort_by(|a, b| {
            natural_cmp(&a.name, &b.name)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Add one frame at its sorted position.
    pub fn push(&mut self, image: SourceImage) {
        self.extend(std::iter::once(image));
    }

    /// Remove and return the frame with `id`, releasing its bytes when dropped.
    pub fn remove(&mut self, id: SourceId) -> Option<SourceImage> {
        let idx = self.images.iter().position(|img| img.id == id)?;
        Some(self.images.remove(idx))
    }

    /// Drop every frame.
    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Frames in compositing order.
    pub fn as_slice(&self) -> &[SourceImage] {
        &self.images
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when no frames are loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate in compositing order.
    pub fn iter(&self) -> std::slice::Iter<'_, SourceImage> {
        self.images.iter()
    }
}

impl FromIterator<SourceImage> for ImageSequence {
    fn from_iter<T: IntoIterator<Item = SourceImage>>(iter: T) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

/// Numeric-aware, case-insensitive name comparison (`"img2" < "img10"`, `"A" == "a"`).
///
/// Digit runs compare by value; equal values with different zero padding compare equal.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let da = take_digits(&mut a);
                let db = take_digits(&mut b);
                let ord = cmp_digit_runs(&da, &db);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                let ord = ca.to_lowercase().cmp(cb.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
