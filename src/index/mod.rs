//! Supply index: where each commodity can be picked up, and which commodities
//! go together.
//!
//! - [`SupplyIndex`]: commodity → supply points for one filter setting
//! - [`CoOccurrence`]: symmetric pair counts over the whole catalog
//! - [`preference_penalty`]: type-based scoring penalty

mod penalty;
mod supply_index;

pub use penalty::{is_large_hull_only, preference_penalty};
pub use supply_index::{CoOccurrence, SupplyFilters, SupplyIndex};
