//! Affinity-guided best-bin packing.
//!
//! # Algorithm
//!
//! Chunks are placed one at a time into the open bin with the best score,
//! opening a new bin when none has room. A bin's score for a chunk is its
//! fit score `1 - size / remaining`, blended with the co-occurrence between
//! the chunk's commodity and the bin's contents when that is positive:
//! `0.7 * co + 0.3 * fit`.
//!
//! With affinity data, commodities are first grouped by their representative
//! affinity key and groups are packed largest-first, so commodities bought at
//! the same kind of location tend to share a load. Without it, chunks are
//! packed largest-first.
//!
//! This is a greedy heuristic, not an optimal packing.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::catalog::AffinityTable;
use crate::index::CoOccurrence;
use crate::models::{Bin, Chunk};

const CO_OCCURRENCE_WEIGHT: f64 = 0.7;
const FIT_WEIGHT: f64 = 0.3;

/// Packs chunks into capacity-bounded bins.
///
/// # Examples
///
/// ```
/// use cargo_planner::models::DemandRecord;
/// use cargo_planner::packing::{build_chunks, BinPacker};
///
/// let mut chunks = build_chunks(&[DemandRecord::new("Gold", 15)], 10);
/// let bins = BinPacker::new(10).pack(&mut chunks);
/// assert_eq!(bins.len(), 2);
/// assert!(bins.iter().all(|b| b.load() <= 10));
/// assert_eq!(chunks[0].bin, Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinPacker<'a> {
    capacity: u32,
    affinity: Option<&'a AffinityTable>,
    co_occurrence: Option<&'a CoOccurrence>,
}

/// A bin under construction: indices into the chunk slice.
struct OpenBin {
    members: Vec<usize>,
    remaining: u32,
}

impl<'a> BinPacker<'a> {
    /// A packer without affinity data.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            affinity: None,
            co_occurrence: None,
        }
    }

    /// Groups commodities by affinity key before packing.
    pub fn with_affinity(mut self, affinity: &'a AffinityTable) -> Self {
        self.affinity = Some(affinity);
        self
    }

    /// Prefers bins already holding commodities stocked alongside the chunk's.
    pub fn with_co_occurrence(mut self, co_occurrence: &'a CoOccurrence) -> Self {
        self.co_occurrence = Some(co_occurrence);
        self
    }

    /// Cargo capacity per bin.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Packs every chunk into exactly one bin and records the assignment on
    /// the chunk. Bins are numbered from 1 in creation order.
    pub fn pack(&self, chunks: &mut [Chunk]) -> Vec<Bin> {
        let order = match self.affinity.filter(|a| !a.is_empty()) {
            Some(affinity) => self.grouped_order(chunks, affinity),
            None => {
                let mut order: Vec<usize> = (0..chunks.len()).collect();
                order.sort_by_key(|&i| Reverse(chunks[i].size));
                order
            }
        };

        let mut bins: Vec<OpenBin> = Vec::new();
        for idx in order {
            self.place_in_best_bin(idx, chunks, &mut bins);
        }

        let packed: Vec<Bin> = bins
            .into_iter()
            .enumerate()
            .map(|(i, open)| {
                let number = i + 1;
                let members = open
                    .members
                    .into_iter()
                    .map(|m| {
                        chunks[m].bin = Some(number);
                        chunks[m].clone()
                    })
                    .collect();
                Bin::new(number, members)
            })
            .collect();

        info!(chunks = chunks.len(), bins = packed.len(), "packed chunks into bins");
        packed
    }

    /// Placement order when affinity data is available: affinity groups by
    /// total size descending, then the ungrouped commodities.
    fn grouped_order(&self, chunks: &[Chunk], affinity: &AffinityTable) -> Vec<usize> {
        let commodities: BTreeSet<&str> = chunks.iter().map(|c| c.commodity.as_str()).collect();

        let mut groups: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut ungrouped: BTreeSet<&str> = BTreeSet::new();
        for &commodity in &commodities {
            match affinity.representative_key(commodity) {
                Some(key) => {
                    groups.entry(key).or_default().insert(commodity);
                }
                None => {
                    ungrouped.insert(commodity);
                }
            }
        }

        let members_of = |names: &BTreeSet<&str>| -> Vec<usize> {
            (0..chunks.len())
                .filter(|&i| names.contains(chunks[i].commodity.as_str()))
                .collect()
        };

        // Keys ascend out of the BTreeMap; the stable sort keeps that as the tie order.
        let mut sorted_groups: Vec<(&str, Vec<usize>)> = groups
            .iter()
            .map(|(&key, names)| (key, members_of(names)))
            .collect();
        sorted_groups.sort_by_key(|(_, members)| {
            Reverse(members.iter().map(|&i| u64::from(chunks[i].size)).sum::<u64>())
        });

        let mut order = Vec::with_capacity(chunks.len());
        for (key, mut members) in sorted_groups {
            debug!(key, chunks = members.len(), "packing affinity group");
            sort_largest_first(&mut members, chunks);
            order.extend(members);
        }

        let mut rest = members_of(&ungrouped);
        sort_largest_first(&mut rest, chunks);
        order.extend(rest);
        order
    }

    fn place_in_best_bin(&self, idx: usize, chunks: &[Chunk], bins: &mut Vec<OpenBin>) {
        let chunk = &chunks[idx];
        let mut best: Option<(usize, f64)> = None;

        for (b, bin) in bins.iter().enumerate() {
            if bin.remaining < chunk.size {
                continue;
            }
            let fit = 1.0 - f64::from(chunk.size) / f64::from(bin.remaining);
            let co = self.co_occurrence.map_or(0.0, |co| {
                bin.members
                    .iter()
                    .map(|&m| f64::from(co.count(&chunks[m].commodity, &chunk.commodity)))
                    .sum()
            });
            let score = if co > 0.0 {
                co * CO_OCCURRENCE_WEIGHT + fit * FIT_WEIGHT
            } else {
                fit
            };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((b, score));
            }
        }

        match best {
            Some((b, _)) => {
                bins[b].members.push(idx);
                bins[b].remaining -= chunk.size;
            }
            None => bins.push(OpenBin {
                members: vec![idx],
                remaining: self.capacity.saturating_sub(chunk.size),
            }),
        }
    }
}

/// Size descending, then commodity name, then input position.
fn sort_largest_first(indices: &mut [usize], chunks: &[Chunk]) {
    indices.sort_by(|&a, &b| {
        chunks[b]
            .size
            .cmp(&chunks[a].size)
            .then_with(|| chunks[a].commodity.cmp(&chunks[b].commodity))
            .then_with(|| a.cmp(&b))
    });
}
