//! Greedy best-next-stop pickup route construction.
//!
//! # Algorithm
//!
//! Starting from home, repeatedly score every supply point that stocks at
//! least one still-needed commodity and lies within the maximum leg distance:
//!
//! ```text
//! score = covered / (distance + penalty + 1)
//! ```
//!
//! boosted by `1 + 0.5 * match_ratio` when affinity data is available, where
//! `match_ratio` is the share of still-needed commodities whose affinity keys
//! include the stop's key. Visit the best stop, collect everything it covers,
//! and repeat. Commodities that no reachable stop covers are reported as
//! `UNREACHABLE`. The route always closes with a `RETURN` leg home.
//!
//! # Complexity
//!
//! O(k · s) per bin where k = distinct commodities and s = supply points per
//! commodity.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::catalog::AffinityTable;
use crate::index::SupplyIndex;
use crate::models::{round_distance, Bin, Coordinates, Route, RouteLeg, StopKey};

const AFFINITY_BOOST: f64 = 0.5;

/// Builds the pickup route for one bin.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cargo_planner::catalog::{AffinityTable, Catalog};
/// use cargo_planner::constructive::PickupRoutePlanner;
/// use cargo_planner::index::{SupplyFilters, SupplyIndex};
/// use cargo_planner::models::{Coordinates, DemandRecord};
/// use cargo_planner::packing::{build_chunks, BinPacker};
///
/// let catalog = Catalog::from_json_str(r#"[{
///     "name": "Lave", "coords": {"x": 3, "y": 4, "z": 0}, "economy": "Agriculture",
///     "stations": [{"name": "Lave Station", "type": "Coriolis Starport",
///                   "market": {"commodities": [{"name": "Grain", "supply": 900}]}}]
/// }]"#).unwrap();
/// let index = SupplyIndex::build(&catalog, SupplyFilters::new(false, false), Arc::new(AffinityTable::empty()));
///
/// let mut chunks = build_chunks(&[DemandRecord::new("Grain", 50)], 100);
/// let bins = BinPacker::new(100).pack(&mut chunks);
///
/// let planner = PickupRoutePlanner::new(&index, Coordinates::origin(), 20.0);
/// let (route, total) = planner.plan(&bins[0]);
/// assert_eq!(route.len(), 2); // pickup + return
/// assert!((total - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PickupRoutePlanner<'a> {
    index: &'a SupplyIndex,
    home: Coordinates,
    max_leg_distance: f64,
    affinity: Option<&'a AffinityTable>,
}

impl<'a> PickupRoutePlanner<'a> {
    /// A planner without the affinity boost.
    pub fn new(index: &'a SupplyIndex, home: Coordinates, max_leg_distance: f64) -> Self {
        Self {
            index,
            home,
            max_leg_distance,
            affinity: None,
        }
    }

    /// Boosts stops whose affinity key suits the remaining commodities.
    pub fn with_affinity(mut self, affinity: &'a AffinityTable) -> Self {
        self.affinity = Some(affinity).filter(|a| !a.is_empty());
        self
    }

    /// Builds the route for a bin.
    ///
    /// Returns the route (leg and total distances rounded to two decimals)
    /// and the unrounded total distance for aggregation.
    pub fn plan(&self, bin: &Bin) -> (Route, f64) {
        let mut needed: BTreeSet<String> =
            bin.chunks().iter().map(|c| c.commodity.clone()).collect();
        let mut route = Route::new(bin.number());
        let mut position = self.home;
        let mut total = 0.0;

        while !needed.is_empty() {
            let candidates = self.candidates(&needed);
            let Some((stop, covered)) = self.best_stop(&candidates, position, &needed) else {
                debug!(
                    bin = bin.number(),
                    candidates = candidates.len(),
                    remaining = needed.len(),
                    "no supply point in range"
                );
                for commodity in &needed {
                    route.push_leg(RouteLeg::unreachable(position, commodity));
                }
                needed.clear();
                break;
            };

            let distance = position.distance_to(&stop.coords);
            route.push_leg(RouteLeg::pickup(
                position,
                stop.coords,
                &stop.system,
                &stop.location,
                covered,
                round_distance(distance),
            ));
            position = stop.coords;
            total += distance;
            for commodity in covered {
                needed.remove(commodity);
            }
        }

        let back = position.distance_to(&self.home);
        route.push_leg(RouteLeg::return_home(position, self.home, round_distance(back)));
        total += back;
        route.set_total_distance(round_distance(total));

        (route, total)
    }

    /// Every stop stocking at least one needed commodity, with the needed
    /// commodities it covers.
    fn candidates(&self, needed: &BTreeSet<String>) -> BTreeMap<StopKey, BTreeSet<String>> {
        let mut candidates: BTreeMap<StopKey, BTreeSet<String>> = BTreeMap::new();
        for commodity in needed {
            for point in self.index.supply_points(commodity) {
                candidates
                    .entry(point.stop())
                    .or_default()
                    .insert(commodity.clone());
            }
        }
        candidates
    }

    /// The highest-scoring stop within range. Ties keep the smallest key.
    fn best_stop<'c>(
        &self,
        candidates: &'c BTreeMap<StopKey, BTreeSet<String>>,
        position: Coordinates,
        needed: &BTreeSet<String>,
    ) -> Option<(&'c StopKey, &'c BTreeSet<String>)> {
        let mut best: Option<(&StopKey, &BTreeSet<String>, f64)> = None;
        for (stop, covered) in candidates {
            let Some(score) = self.score(stop, covered, position, needed) else {
                continue;
            };
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((stop, covered, score));
            }
        }
        best.map(|(stop, covered, _)| (stop, covered))
    }

    /// Score of a stop, or `None` when it lies beyond the maximum leg distance.
    fn score(
        &self,
        stop: &StopKey,
        covered: &BTreeSet<String>,
        position: Coordinates,
        needed: &BTreeSet<String>,
    ) -> Option<f64> {
        let distance = position.distance_to(&stop.coords);
        if distance > self.max_leg_distance {
            return None;
        }

        let mut score = covered.len() as f64 / (distance + f64::from(stop.penalty) + 1.0);

        if let Some(affinity) = self.affinity {
            if let Some(key) = self.affinity_key_at(stop, covered) {
                let matches = needed
                    .iter()
                    .filter(|c| affinity.matches(c, key))
                    .count();
                let ratio = matches as f64 / needed.len().max(1) as f64;
                score *= 1.0 + AFFINITY_BOOST * ratio;
            }
        }
        Some(score)
    }

    /// Affinity key of the stop, taken from the first covered commodity's
    /// supply entry at this location.
    fn affinity_key_at(&self, stop: &StopKey, covered: &BTreeSet<String>) -> Option<&'a str> {
        covered.iter().find_map(|commodity| {
            self.index
                .supply_points(commodity)
                .iter()
                .find(|p| p.is_at(&stop.system, &stop.location))
                .map(|p| p.affinity_key.as_str())
        })
    }
}
