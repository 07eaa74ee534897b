//! Planner configuration: data file locations and request defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PlannerError, Result};
use crate::index::SupplyFilters;

/// Environment variable prefix for [`PlannerConfig::from_env`].
pub const ENV_PREFIX: &str = "CARGO_PLANNER_";

/// Settings consumed by the planner.
///
/// # Examples
///
/// ```
/// use cargo_planner::config::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.default_cargo_capacity, 704);
/// assert_eq!(config.default_max_leg_distance, 166.0);
/// assert!(config.skip_large_hulls_default && config.large_pad_only_default);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    /// JSON catalog of systems, locations, and markets.
    pub catalog_path: PathBuf,
    /// Tab-delimited commodity affinity table.
    pub affinity_path: PathBuf,
    pub default_cargo_capacity: u32,
    pub default_max_leg_distance: f64,
    pub skip_large_hulls_default: bool,
    pub large_pad_only_default: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("systems.json"),
            affinity_path: PathBuf::from("commodity_data.txt"),
            default_cargo_capacity: 704,
            default_max_leg_distance: 166.0,
            skip_large_hulls_default: true,
            large_pad_only_default: true,
        }
    }
}

impl PlannerConfig {
    /// Reads a JSON configuration file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Defaults overridden by `CARGO_PLANNER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `CARGO_PLANNER_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, v)) = var("CATALOG") {
            config.catalog_path = PathBuf::from(v);
        }
        if let Some((_, v)) = var("AFFINITY") {
            config.affinity_path = PathBuf::from(v);
        }
        if let Some((k, v)) = var("CAPACITY") {
            config.default_cargo_capacity = parse(&k, &v)?;
        }
        if let Some((k, v)) = var("MAX_RANGE") {
            config.default_max_leg_distance = parse(&k, &v)?;
        }
        if let Some((k, v)) = var("SKIP_LARGE_HULLS") {
            config.skip_large_hulls_default = parse(&k, &v)?;
        }
        if let Some((k, v)) = var("LARGE_PAD_ONLY") {
            config.large_pad_only_default = parse(&k, &v)?;
        }
        Ok(config)
    }

    /// Filter pair used for the cached default index.
    pub fn default_filters(&self) -> SupplyFilters {
        SupplyFilters::new(self.skip_large_hulls_default, self.large_pad_only_default)
    }

    /// The requested capacity, or the default when absent or not positive.
    pub fn cargo_capacity_or_default(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(c) if c > 0 => u32::try_from(c).unwrap_or(u32::MAX),
            _ => self.default_cargo_capacity,
        }
    }

    /// The requested leg limit, or the default when absent or not positive.
    pub fn max_leg_distance_or_default(&self, requested: Option<f64>) -> f64 {
        requested
            .filter(|d| *d > 0.0)
            .unwrap_or(self.default_max_leg_distance)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| PlannerError::Config {
        key: key.to_string(),
        value: value.to_string(),
    })
}
