//! Load allocation: cutting demand into chunks and packing chunks into bins.
//!
//! - [`build_chunks`]: capacity-bounded chunking, O(total / capacity)
//! - [`BinPacker`]: affinity-guided best-bin heuristic, O(n · bins)

mod bin_packer;
mod chunking;

pub use bin_packer::BinPacker;
pub use chunking::build_chunks;
