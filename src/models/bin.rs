//! Capacity-bounded groups of chunks.

use serde::Serialize;

use super::Chunk;

/// One cargo load: an ordered group of chunks whose sizes never sum past the
/// capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    number: usize,
    chunks: Vec<Chunk>,
}

impl Bin {
    pub(crate) fn new(number: usize, chunks: Vec<Chunk>) -> Self {
        Self { number, chunks }
    }

    /// Sequential bin number (1-based, creation order).
    pub fn number(&self) -> usize {
        self.number
    }

    /// Chunks in placement order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Units loaded in this bin.
    pub fn load(&self) -> u32 {
        self.chunks.iter().map(|c| c.size).sum()
    }

    /// Number of chunks in this bin.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if this bin holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
