//! Commodity → supply points, plus the affinity data that guides packing.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use super::penalty::{is_large_hull_only, preference_penalty};
use crate::catalog::{AffinityTable, Catalog, Location};
use crate::models::SupplyPoint;

/// Location filters applied when building an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupplyFilters {
    /// Exclude carriers and other large-hull-only locations.
    pub skip_large_hulls: bool,
    /// Exclude locations without a large landing pad.
    pub large_pad_only: bool,
}

impl SupplyFilters {
    /// Creates a filter pair.
    pub fn new(skip_large_hulls: bool, large_pad_only: bool) -> Self {
        Self {
            skip_large_hulls,
            large_pad_only,
        }
    }

    /// Returns `true` if a location survives these filters.
    pub fn admits(&self, location: &Location) -> bool {
        if self.skip_large_hulls && is_large_hull_only(&location.location_type) {
            return false;
        }
        if self.large_pad_only && location.pads("large") < 1 {
            return false;
        }
        true
    }
}

/// Symmetric count of locations stocking each pair of commodities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoOccurrence {
    counts: HashMap<String, HashMap<String, u32>>,
}

impl CoOccurrence {
    /// Counts, over every location in the catalog, each unordered pair of
    /// distinct commodities stocked with positive supply.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut co = Self::default();
        for location in catalog.systems().iter().flat_map(|s| &s.stations) {
            let stocked: BTreeSet<&str> = location
                .listings()
                .iter()
                .filter(|c| c.supply > 0 && !c.name.is_empty())
                .map(|c| c.name.as_str())
                .collect();
            let stocked: Vec<&str> = stocked.into_iter().collect();
            for (i, a) in stocked.iter().enumerate() {
                for b in &stocked[i + 1..] {
                    co.increment(a, b);
                    co.increment(b, a);
                }
            }
        }
        co
    }

    fn increment(&mut self, a: &str, b: &str) {
        *self
            .counts
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_insert(0) += 1;
    }

    /// Number of locations stocking both commodities.
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Commodities with at least one partner.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no pair was ever observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Immutable lookup structure built from the catalog for one filter setting.
///
/// Shared read-only between requests; a different filter setting gets its
/// own, independently built instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cargo_planner::catalog::{AffinityTable, Catalog};
/// use cargo_planner::index::{SupplyFilters, SupplyIndex};
///
/// let catalog = Catalog::from_json_str(r#"[{
///     "name": "Sol", "coords": {"x": 0, "y": 0, "z": 0}, "economy": "Industrial",
///     "stations": [{"name": "Galileo", "type": "Ocellus Starport",
///                   "landingPads": {"large": 2},
///                   "market": {"commodities": [{"name": "Steel", "supply": 500}]}}]
/// }]"#).unwrap();
///
/// let index = SupplyIndex::build(&catalog, SupplyFilters::new(true, true), Arc::new(AffinityTable::empty()));
/// let points = index.supply_points("Steel");
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].affinity_key, "Ocellus Starport Industrial");
/// ```
#[derive(Debug, Clone)]
pub struct SupplyIndex {
    filters: SupplyFilters,
    supply: HashMap<String, Vec<SupplyPoint>>,
    affinity: Arc<AffinityTable>,
    co_occurrence: CoOccurrence,
}

impl SupplyIndex {
    /// Builds the index for the given filters.
    pub fn build(catalog: &Catalog, filters: SupplyFilters, affinity: Arc<AffinityTable>) -> Self {
        let mut supply: HashMap<String, Vec<SupplyPoint>> = HashMap::new();
        let mut locations = 0usize;

        for system in catalog.systems() {
            for location in &system.stations {
                if !filters.admits(location) {
                    continue;
                }
                locations += 1;

                let economy = location
                    .economy
                    .clone()
                    .unwrap_or_else(|| system.economy.clone());
                let affinity_key = format!("{} {}", location.location_type, economy);
                let penalty = preference_penalty(&location.location_type);

                for listing in location.listings() {
                    if listing.name.is_empty() || listing.supply < 1 {
                        continue;
                    }
                    supply
                        .entry(listing.name.clone())
                        .or_default()
                        .push(SupplyPoint {
                            system: system.name.clone(),
                            location: location.name.clone(),
                            coords: system.coords,
                            penalty,
                            location_type: location.location_type.clone(),
                            economy: economy.clone(),
                            affinity_key: affinity_key.clone(),
                        });
                }
            }
        }

        let co_occurrence = CoOccurrence::from_catalog(catalog);
        info!(
            skip_large_hulls = filters.skip_large_hulls,
            large_pad_only = filters.large_pad_only,
            locations,
            commodities = supply.len(),
            affinity_commodities = affinity.len(),
            "built supply index"
        );

        Self {
            filters,
            supply,
            affinity,
            co_occurrence,
        }
    }

    /// Filters this index was built with.
    pub fn filters(&self) -> SupplyFilters {
        self.filters
    }

    /// Supply points for a commodity, in catalog order.
    pub fn supply_points(&self, commodity: &str) -> &[SupplyPoint] {
        self.supply.get(commodity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of commodities with at least one supply point.
    pub fn num_commodities(&self) -> usize {
        self.supply.len()
    }

    /// The commodity → affinity keys table.
    pub fn affinity(&self) -> &AffinityTable {
        &self.affinity
    }

    /// Pairwise co-occurrence counts.
    pub fn co_occurrence(&self) -> &CoOccurrence {
        &self.co_occurrence
    }

    /// Returns `true` when affinity keys are available for economy-aware planning.
    pub fn has_affinity_data(&self) -> bool {
        !self.affinity.is_empty()
    }
}
