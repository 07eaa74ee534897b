//! Star systems, their locations, and the markets those locations run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::models::Coordinates;

/// One commodity listed on a market.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommodityListing {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub supply: i64,
}

/// A location's market.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Market {
    #[serde(default)]
    pub commodities: Vec<CommodityListing>,
}

/// A station, outpost, settlement, or carrier inside a system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    #[serde(rename = "type", default)]
    pub location_type: String,
    /// Falls back to the owning system's economy when absent.
    #[serde(default)]
    pub economy: Option<String>,
    #[serde(default)]
    pub landing_pads: HashMap<String, u32>,
    #[serde(default)]
    pub market: Option<Market>,
}

impl Location {
    /// Number of landing pads of the given size ("small", "medium", "large").
    pub fn pads(&self, size: &str) -> u32 {
        self.landing_pads.get(size).copied().unwrap_or(0)
    }

    /// Market listings, empty when the location has no market.
    pub fn listings(&self) -> &[CommodityListing] {
        self.market
            .as_ref()
            .map(|m| m.commodities.as_slice())
            .unwrap_or(&[])
    }
}

/// A star system with its coordinates and locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarSystem {
    pub name: String,
    #[serde(default)]
    pub coords: Coordinates,
    #[serde(default)]
    pub economy: String,
    #[serde(default, alias = "locations")]
    pub stations: Vec<Location>,
}

/// A search hit: a system name and its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMatch {
    pub name: String,
    pub coords: Coordinates,
}

/// The static catalog of systems, loaded once.
///
/// # Examples
///
/// ```
/// use cargo_planner::catalog::Catalog;
///
/// let catalog = Catalog::from_json_str(
///     r#"[{"name": "Sol", "coords": {"x": 0, "y": 0, "z": 0}, "economy": "Service"}]"#,
/// ).unwrap();
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.find_system("  sol ").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: Vec<StarSystem>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from parsed systems.
    pub fn new(systems: Vec<StarSystem>) -> Self {
        let mut by_name = HashMap::with_capacity(systems.len());
        for (i, system) in systems.iter().enumerate() {
            // First occurrence wins on duplicate names.
            by_name.entry(normalize(&system.name)).or_insert(i);
        }
        Self { systems, by_name }
    }

    /// An empty catalog; every plan against it is fully unreachable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON array of systems.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let systems: Vec<StarSystem> = serde_json::from_str(json)?;
        Ok(Self::new(systems))
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            systems = catalog.len(),
            "loaded system catalog"
        );
        Ok(catalog)
    }

    /// Loads a catalog, degrading to an empty one on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "catalog unavailable, continuing with an empty catalog");
                Self::empty()
            }
        }
    }

    /// All systems in catalog order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// Number of systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if the catalog holds no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Case-insensitive, whitespace-trimmed lookup by system name.
    pub fn find_system(&self, name: &str) -> Option<&StarSystem> {
        self.by_name.get(&normalize(name)).map(|&i| &self.systems[i])
    }

    /// Coordinates of the named system, if known.
    pub fn system_coordinates(&self, name: &str) -> Option<Coordinates> {
        self.find_system(name).map(|s| s.coords)
    }

    /// Systems whose name contains `query` (case-insensitive), at most `limit`.
    pub fn search_systems(&self, query: &str, limit: usize) -> Vec<SystemMatch> {
        let needle = normalize(query);
        self.systems
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .take(limit)
            .map(|s| SystemMatch {
                name: s.name.clone(),
                coords: s.coords,
            })
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
