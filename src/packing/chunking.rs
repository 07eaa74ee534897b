//! Splitting demand into capacity-bounded chunks.

use tracing::debug;

use crate::models::{Chunk, DemandRecord};

/// Splits each demand record into chunks no larger than `capacity`.
///
/// A record of quantity `q > 0` yields `⌈q / capacity⌉` chunks: all full
/// except the last, which holds the remainder (or a full load on an exact
/// multiple). Records with `q <= 0` yield nothing. Output keeps input order
/// and every chunk starts unassigned. A zero capacity yields no chunks.
///
/// # Examples
///
/// ```
/// use cargo_planner::models::DemandRecord;
/// use cargo_planner::packing::build_chunks;
///
/// let chunks = build_chunks(&[DemandRecord::new("Gold", 15)], 10);
/// let sizes: Vec<u32> = chunks.iter().map(|c| c.size).collect();
/// assert_eq!(sizes, vec![10, 5]);
/// ```
pub fn build_chunks(records: &[DemandRecord], capacity: u32) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    if capacity == 0 {
        return chunks;
    }
    let cap = i64::from(capacity);

    for record in records {
        let mut remaining = record.quantity_needed;
        while remaining > cap {
            chunks.push(Chunk::new(record.commodity.as_str(), capacity));
            remaining -= cap;
        }
        if remaining > 0 {
            // remaining <= cap here, so it fits in u32
            chunks.push(Chunk::new(record.commodity.as_str(), remaining as u32));
        }
    }

    debug!(
        chunks = chunks.len(),
        records = records.len(),
        capacity,
        "built chunks from demand"
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sizes(chunks: &[Chunk]) -> Vec<u32> {
        chunks.iter().map(|c| c.size).collect()
    }

    #[test]
    fn test_remainder_last() {
        let chunks = build_chunks(&[DemandRecord::new("Gold", 15)], 10);
        assert_eq!(sizes(&chunks), vec![10, 5]);
        assert!(chunks.iter().all(|c| c.commodity == "Gold" && c.bin.is_none()));
    }

    #[test]
    fn test_exact_multiple() {
        let chunks = build_chunks(&[DemandRecord::new("Steel", 30)], 10);
        assert_eq!(sizes(&chunks), vec![10, 10, 10]);
    }

    #[test]
    fn test_smaller_than_capacity() {
        let chunks = build_chunks(&[DemandRecord::new("Water", 3)], 704);
        assert_eq!(sizes(&chunks), vec![3]);
    }

    #[test]
    fn test_non_positive_ignored() {
        let chunks = build_chunks(
            &[
                DemandRecord::new("Gold", 0),
                DemandRecord::new("Silver", -20),
                DemandRecord::new("Water", 4),
            ],
            10,
        );
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].commodity, "Water");
    }

    #[test]
    fn test_order_preserved() {
        let chunks = build_chunks(
            &[DemandRecord::new("B", 12), DemandRecord::new("A", 3)],
            10,
        );
        let names: Vec<&str> = chunks.iter().map(|c| c.commodity.as_str()).collect();
        assert_eq!(names, vec!["B", "B", "A"]);
    }

    #[test]
    fn test_zero_capacity() {
        assert!(build_chunks(&[DemandRecord::new("Gold", 15)], 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_chunks_conserve_quantity(
            quantities in prop::collection::vec(-50i64..5_000, 0..20),
            capacity in 1u32..1_000,
        ) {
            let records: Vec<DemandRecord> = quantities
                .iter()
                .enumerate()
                .map(|(i, &q)| DemandRecord::new(format!("C{i}"), q))
                .collect();
            let chunks = build_chunks(&records, capacity);

            let expected: i64 = quantities.iter().filter(|&&q| q > 0).sum();
            let total: i64 = chunks.iter().map(|c| i64::from(c.size)).sum();
            prop_assert_eq!(total, expected);
            prop_assert!(chunks.iter().all(|c| c.size >= 1 && c.size <= capacity));

            for (i, &q) in quantities.iter().enumerate() {
                let name = format!("C{i}");
                let n = chunks.iter().filter(|c| c.commodity == name).count() as i64;
                let want = if q > 0 { (q + i64::from(capacity) - 1) / i64::from(capacity) } else { 0 };
                prop_assert_eq!(n, want);
            }
        }
    }
}
