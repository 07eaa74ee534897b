//! End-to-end planning: demand in, per-bin pickup routes out.
//!
//! # Pipeline
//!
//! 1. Resolve the home location.
//! 2. Fetch the [`SupplyIndex`] for the requested filters (the default pair
//!    is built once and shared; any other pair is built for the request).
//! 3. Cut demand into chunks, pack chunks into bins.
//! 4. Route each bin and sum the unrounded bin totals.
//! 5. Re-check the finished plan and log any violation.

use std::sync::Arc;

use tracing::{info, warn};

use super::home::{resolve_home, HomeSpec};
use crate::catalog::{AffinityTable, Catalog, SystemMatch};
use crate::config::PlannerConfig;
use crate::constructive::PickupRoutePlanner;
use crate::error::{PlannerError, Result};
use crate::evaluation::PlanEvaluator;
use crate::index::{SupplyFilters, SupplyIndex};
use crate::models::{round_distance, DemandRecord, Plan, Strategy};
use crate::packing::{build_chunks, BinPacker};

/// One planning request.
///
/// # Examples
///
/// ```
/// use cargo_planner::config::PlannerConfig;
/// use cargo_planner::index::SupplyFilters;
/// use cargo_planner::models::DemandRecord;
/// use cargo_planner::planner::{HomeSpec, PlanRequest};
///
/// let request = PlanRequest::new(vec![DemandRecord::new("Steel", 900)], &PlannerConfig::default())
///     .with_capacity(400)
///     .with_home(HomeSpec::Named("Sol".into()))
///     .with_filters(SupplyFilters::new(false, false));
/// assert_eq!(request.cargo_capacity(), 400);
/// assert_eq!(request.max_leg_distance(), 166.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    demand: Vec<DemandRecord>,
    cargo_capacity: u32,
    max_leg_distance: f64,
    home: HomeSpec,
    filters: SupplyFilters,
}

impl PlanRequest {
    /// A request using the configured defaults.
    pub fn new(demand: Vec<DemandRecord>, config: &PlannerConfig) -> Self {
        Self {
            demand,
            cargo_capacity: config.default_cargo_capacity,
            max_leg_distance: config.default_max_leg_distance,
            home: HomeSpec::Default,
            filters: config.default_filters(),
        }
    }

    /// Sets the cargo capacity per bin.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.cargo_capacity = capacity;
        self
    }

    /// Sets the maximum distance of a single pickup leg.
    pub fn with_max_leg_distance(mut self, distance: f64) -> Self {
        self.max_leg_distance = distance;
        self
    }

    /// Sets the home location.
    pub fn with_home(mut self, home: HomeSpec) -> Self {
        self.home = home;
        self
    }

    /// Sets the location filters.
    pub fn with_filters(mut self, filters: SupplyFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Demand records in input order.
    pub fn demand(&self) -> &[DemandRecord] {
        &self.demand
    }

    /// Cargo capacity per bin.
    pub fn cargo_capacity(&self) -> u32 {
        self.cargo_capacity
    }

    /// Maximum distance of a single pickup leg.
    pub fn max_leg_distance(&self) -> f64 {
        self.max_leg_distance
    }

    /// How the home location is identified.
    pub fn home(&self) -> &HomeSpec {
        &self.home
    }

    /// Location filters for the supply index.
    pub fn filters(&self) -> SupplyFilters {
        self.filters
    }
}

/// Long-lived planner holding the catalog and the default supply index.
///
/// `Planner` is `Send + Sync`; concurrent requests share the default index
/// read-only.
///
/// # Examples
///
/// ```
/// use cargo_planner::catalog::{AffinityTable, Catalog};
/// use cargo_planner::config::PlannerConfig;
/// use cargo_planner::models::{DemandRecord, LegAction};
/// use cargo_planner::planner::{PlanRequest, Planner};
///
/// let catalog = Catalog::from_json_str(r#"[{
///     "name": "Lave", "coords": {"x": 3, "y": 4, "z": 0}, "economy": "Agriculture",
///     "stations": [{"name": "Lave Station", "type": "Coriolis Starport",
///                   "landingPads": {"large": 2},
///                   "market": {"commodities": [{"name": "Grain", "supply": 900}]}}]
/// }]"#).unwrap();
/// let config = PlannerConfig::default();
/// let planner = Planner::new(catalog, AffinityTable::empty(), config.default_filters());
///
/// let plan = planner.plan(PlanRequest::new(vec![DemandRecord::new("Grain", 1000)], &config)).unwrap();
/// assert_eq!(plan.bins_count, 2);
/// assert_eq!(plan.strategy.label(), "basic");
/// assert_eq!(plan.grand_total_distance, 20.0);
/// assert_eq!(plan.bins[0].legs()[1].action, LegAction::Return);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Arc<Catalog>,
    affinity: Arc<AffinityTable>,
    default_index: Arc<SupplyIndex>,
}

impl Planner {
    /// Builds the default index for `default_filters` up front.
    pub fn new(catalog: Catalog, affinity: AffinityTable, default_filters: SupplyFilters) -> Self {
        let affinity = Arc::new(affinity);
        let default_index = Arc::new(SupplyIndex::build(&catalog, default_filters, Arc::clone(&affinity)));
        Self {
            catalog: Arc::new(catalog),
            affinity,
            default_index,
        }
    }

    /// Loads the catalog and affinity table named by the configuration.
    ///
    /// Missing or unreadable data files degrade to empty data.
    pub fn from_config(config: &PlannerConfig) -> Self {
        let catalog = Catalog::load_or_empty(&config.catalog_path);
        let affinity = AffinityTable::load_or_empty(&config.affinity_path);
        Self::new(catalog, affinity, config.default_filters())
    }

    /// The system catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The commodity affinity table shared by every index.
    pub fn affinity(&self) -> &AffinityTable {
        &self.affinity
    }

    /// The shared index for the default filters.
    pub fn default_index(&self) -> &Arc<SupplyIndex> {
        &self.default_index
    }

    /// The index for `filters`: the shared default, or a fresh build.
    pub fn index_for(&self, filters: SupplyFilters) -> Arc<SupplyIndex> {
        if filters == self.default_index.filters() {
            Arc::clone(&self.default_index)
        } else {
            Arc::new(SupplyIndex::build(&self.catalog, filters, Arc::clone(&self.affinity)))
        }
    }

    /// Case-insensitive substring search over system names.
    pub fn search_systems(&self, query: &str, limit: usize) -> Vec<SystemMatch> {
        self.catalog.search_systems(query, limit)
    }

    /// Plans pickup routes for a request.
    ///
    /// # Errors
    ///
    /// [`PlannerError::InvalidCapacity`] when the cargo capacity is zero.
    pub fn plan(&self, request: PlanRequest) -> Result<Plan> {
        let capacity = request.cargo_capacity;
        if capacity == 0 {
            return Err(PlannerError::InvalidCapacity(capacity));
        }
        let max_leg = request.max_leg_distance;

        let home = resolve_home(&self.catalog, &request.home);
        let index = self.index_for(request.filters);
        let economy_aware = index.has_affinity_data();
        let strategy = if economy_aware {
            Strategy::EconomyAware
        } else {
            Strategy::Basic
        };

        let mut chunks = build_chunks(&request.demand, capacity);

        let mut packer = BinPacker::new(capacity);
        if economy_aware {
            packer = packer
                .with_affinity(index.affinity())
                .with_co_occurrence(index.co_occurrence());
        }
        let bins = packer.pack(&mut chunks);

        let mut route_planner = PickupRoutePlanner::new(&index, home.coords, max_leg);
        if economy_aware {
            route_planner = route_planner.with_affinity(index.affinity());
        }

        let mut grand_total = 0.0;
        let mut routes = Vec::with_capacity(bins.len());
        for bin in &bins {
            let (route, total) = route_planner.plan(bin);
            grand_total += total;
            routes.push(route);
        }

        let plan = Plan {
            success: true,
            bins_count: routes.len(),
            bins: routes,
            grand_total_distance: round_distance(grand_total),
            home_label: home.label,
            home_coordinates: home.coords,
            original_chunks: chunks,
            strategy,
            ship_capacity: capacity,
        };

        for violation in PlanEvaluator::new(max_leg).evaluate(&plan) {
            warn!(violation = ?violation.kind, "plan failed consistency check");
        }
        info!(
            strategy = %plan.strategy,
            home = %plan.home_label,
            bins = plan.bins_count,
            chunks = plan.original_chunks.len(),
            unreachable = plan.num_unreachable(),
            grand_total = plan.grand_total_distance,
            "planned pickup routes"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, LegAction};

    const CATALOG: &str = r#"[
        {
            "name": "Sol",
            "coords": {"x": 0, "y": 0, "z": 0},
            "economy": "Industrial",
            "stations": [
                {"name": "Galileo", "type": "Ocellus Starport", "landingPads": {"large": 4},
                 "market": {"commodities": [
                    {"name": "Steel", "supply": 5000},
                    {"name": "Aluminium", "supply": 3000}]}}
            ]
        },
        {
            "name": "Lave",
            "coords": {"x": 30, "y": 40, "z": 0},
            "economy": "Agriculture",
            "stations": [
                {"name": "Lave Station", "type": "Coriolis Starport", "landingPads": {"large": 2},
                 "market": {"commodities": [{"name": "Grain", "supply": 900}]}},
                {"name": "Lave Relay", "type": "Outpost", "landingPads": {"medium": 1},
                 "market": {"commodities": [{"name": "Gold", "supply": 40}]}}
            ]
        },
        {
            "name": "Far Reach",
            "coords": {"x": 1000, "y": 0, "z": 0},
            "economy": "Extraction",
            "stations": [
                {"name": "Deep Mine", "type": "Coriolis Starport", "landingPads": {"large": 1},
                 "market": {"commodities": [{"name": "Painite", "supply": 60}]}}
            ]
        }
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json_str(CATALOG).expect("valid")
    }

    fn planner(affinity: AffinityTable) -> Planner {
        Planner::new(catalog(), affinity, PlannerConfig::default().default_filters())
    }

    fn request(demand: Vec<DemandRecord>) -> PlanRequest {
        PlanRequest::new(demand, &PlannerConfig::default())
    }

    #[test]
    fn test_single_commodity_two_bins() {
        let plan = planner(AffinityTable::empty())
            .plan(request(vec![DemandRecord::new("Grain", 1000)]))
            .expect("valid");

        assert!(plan.success);
        assert_eq!(plan.strategy, Strategy::Basic);
        assert_eq!(plan.bins_count, 2);
        assert_eq!(plan.original_chunks.len(), 2);
        assert_eq!(plan.original_chunks[0].size, 704);
        assert_eq!(plan.original_chunks[1].size, 296);
        for route in &plan.bins {
            assert_eq!(route.total_distance(), 100.0);
        }
        assert_eq!(plan.grand_total_distance, 200.0);
        assert_eq!(plan.home_label, "home (default)");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = planner(AffinityTable::empty())
            .plan(request(vec![DemandRecord::new("Grain", 10)]).with_capacity(0))
            .expect_err("should fail");
        assert!(matches!(err, PlannerError::InvalidCapacity(0)));
    }

    #[test]
    fn test_empty_demand() {
        let plan = planner(AffinityTable::empty())
            .plan(request(vec![]))
            .expect("valid");
        assert_eq!(plan.bins_count, 0);
        assert!(plan.bins.is_empty());
        assert_eq!(plan.grand_total_distance, 0.0);
    }

    #[test]
    fn test_out_of_range_is_unreachable() {
        let plan = planner(AffinityTable::empty())
            .plan(request(vec![DemandRecord::new("Painite", 10)]))
            .expect("valid");
        let legs = plan.bins[0].legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].action, LegAction::Unreachable);
        assert_eq!(legs[0].commodity_label, "Painite");
        assert_eq!(legs[1].action, LegAction::Return);
        assert_eq!(plan.grand_total_distance, 0.0);
    }

    #[test]
    fn test_empty_catalog_all_unreachable() {
        let config = PlannerConfig::default();
        let planner = Planner::new(Catalog::empty(), AffinityTable::empty(), config.default_filters());
        let plan = planner
            .plan(request(vec![DemandRecord::new("Steel", 10), DemandRecord::new("Gold", 5)]))
            .expect("valid");
        assert_eq!(plan.num_unreachable(), 2);
        assert!(plan.bins.iter().all(|r| r.total_distance() == 0.0));
    }

    #[test]
    fn test_filters_change_reachability() {
        let p = planner(AffinityTable::empty());
        let gold = || request(vec![DemandRecord::new("Gold", 10)]);

        // Lave Relay has no large pad, so the default filters exclude it.
        let plan = p.plan(gold()).expect("valid");
        assert_eq!(plan.num_unreachable(), 1);

        let plan = p
            .plan(gold().with_filters(SupplyFilters::new(true, false)))
            .expect("valid");
        assert_eq!(plan.num_unreachable(), 0);
        assert_eq!(plan.bins[0].legs()[0].location_name.as_deref(), Some("Lave Relay"));

        // The alternate build leaves the shared index untouched.
        assert_eq!(p.default_index().filters(), SupplyFilters::new(true, true));
        assert!(p.default_index().supply_points("Gold").is_empty());
    }

    #[test]
    fn test_default_index_shared() {
        let p = planner(AffinityTable::empty());
        let a = p.index_for(SupplyFilters::new(true, true));
        let b = p.index_for(SupplyFilters::new(true, true));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, p.default_index()));

        let c = p.index_for(SupplyFilters::new(false, false));
        let d = p.index_for(SupplyFilters::new(false, false));
        assert!(!Arc::ptr_eq(&c, p.default_index()));
        assert!(!Arc::ptr_eq(&c, &d));
    }

    #[test]
    fn test_named_home() {
        let plan = planner(AffinityTable::empty())
            .plan(request(vec![DemandRecord::new("Grain", 10)]).with_home(HomeSpec::Named("lave".into())))
            .expect("valid");
        assert_eq!(plan.home_label, "Lave");
        assert_eq!(plan.home_coordinates, Coordinates::new(30.0, 40.0, 0.0));
        assert_eq!(plan.grand_total_distance, 0.0);
    }

    #[test]
    fn test_economy_aware_with_affinity() {
        let mut affinity = AffinityTable::empty();
        affinity.insert("Steel", ["Ocellus Starport Industrial".to_string()].into_iter().collect());
        let plan = planner(affinity)
            .plan(request(vec![
                DemandRecord::new("Steel", 300),
                DemandRecord::new("Aluminium", 300),
            ]))
            .expect("valid");

        assert_eq!(plan.strategy, Strategy::EconomyAware);
        assert_eq!(plan.bins_count, 1);
        let legs = plan.bins[0].legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].commodity_label, "{Aluminium, Steel}");
        assert_eq!(legs[0].distance, 0.0);
    }

    #[test]
    fn test_grand_total_rounded_once() {
        let p = planner(AffinityTable::empty());
        let home = HomeSpec::Coordinates(Coordinates::new(0.001, 0.0, 0.0));
        let plan = p
            .plan(
                request(vec![DemandRecord::new("Steel", 2100)])
                    .with_home(home),
            )
            .expect("valid");
        assert_eq!(plan.bins_count, 3);
        // Each bin rounds 0.002 to 0.0; the sum of 0.006 rounds to 0.01.
        assert!(plan.bins.iter().all(|r| r.total_distance() == 0.0));
        assert_eq!(plan.grand_total_distance, 0.01);
    }

    #[test]
    fn test_chunks_carry_bin_assignments() {
        let plan = planner(AffinityTable::empty())
            .plan(request(vec![DemandRecord::new("Steel", 800), DemandRecord::new("Grain", 100)]))
            .expect("valid");
        assert!(plan.original_chunks.iter().all(|c| c.bin.is_some()));
        assert!(PlanEvaluator::new(166.0).evaluate(&plan).is_empty());
    }

    #[test]
    fn test_planner_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Planner>();

        let planner = planner(AffinityTable::empty());
        let p = &planner;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(move |_| s.spawn(move || p.plan(request(vec![DemandRecord::new("Grain", 10)]))))
                .collect();
            for h in handles {
                let plan = h.join().expect("thread").expect("valid");
                assert_eq!(plan.grand_total_distance, 100.0);
            }
        });
    }
}
