//! Demand records and the capacity-bounded chunks cut from them.

use serde::{Deserialize, Serialize};

/// A required quantity of one commodity.
///
/// Quantities at or below zero are ignored by the chunk builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandRecord {
    pub commodity: String,
    pub quantity_needed: i64,
}

impl DemandRecord {
    /// Creates a demand record.
    pub fn new(commodity: impl Into<String>, quantity_needed: i64) -> Self {
        Self {
            commodity: commodity.into(),
            quantity_needed,
        }
    }
}

/// A slice of a commodity's demand no larger than the cargo capacity.
///
/// `bin` stays `None` until the packer assigns the chunk to a bin.
///
/// # Examples
///
/// ```
/// use cargo_planner::models::Chunk;
///
/// let chunk = Chunk::new("Gold", 10);
/// assert_eq!(chunk.size, 10);
/// assert!(chunk.bin.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub commodity: String,
    pub size: u32,
    pub bin: Option<usize>,
}

impl Chunk {
    /// Creates an unassigned chunk.
    pub fn new(commodity: impl Into<String>, size: u32) -> Self {
        Self {
            commodity: commodity.into(),
            size,
            bin: None,
        }
    }
}
