//! Commodity → preferred location kinds ("type economy" keys).
//!
//! The table is tab-delimited text, one commodity per line:
//!
//! ```text
//! Gold<TAB>Orbis Starport Industrial, Coriolis Starport Refinery<TAB>42
//! ```
//!
//! The third column is informational. Lines with fewer than three columns
//! are skipped.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};

/// Affinity keys considered a good match for each commodity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffinityTable {
    keys: HashMap<String, BTreeSet<String>>,
}

impl AffinityTable {
    /// An empty table: planning falls back to the basic strategy.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the tab-delimited table.
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::empty();
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let parts: Vec<&str> = line.trim().split('\t').collect();
            if parts.len() < 3 {
                debug!(line = idx + 1, "skipping malformed affinity record");
                continue;
            }
            let keys: BTreeSet<String> = parts[1]
                .split(", ")
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
            table.insert(parts[0].trim(), keys);
        }
        Ok(table)
    }

    /// Loads the table from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| PlannerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(file)?;
        info!(
            path = %path.display(),
            commodities = table.len(),
            "loaded commodity affinity table"
        );
        Ok(table)
    }

    /// Loads the table, or returns an empty one when it is missing or unreadable.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "affinity table unavailable, economy boost disabled");
                Self::empty()
            }
        }
    }

    /// Replaces the key set for a commodity.
    pub fn insert(&mut self, commodity: impl Into<String>, keys: BTreeSet<String>) {
        self.keys.insert(commodity.into(), keys);
    }

    /// Keys matching a commodity, if the table lists it.
    pub fn keys_for(&self, commodity: &str) -> Option<&BTreeSet<String>> {
        self.keys.get(commodity)
    }

    /// Returns `true` if `key` is a good match for `commodity`.
    pub fn matches(&self, commodity: &str, key: &str) -> bool {
        self.keys
            .get(commodity)
            .is_some_and(|keys| keys.contains(key))
    }

    /// The lexicographically smallest key for a commodity, used to group it.
    pub fn representative_key(&self, commodity: &str) -> Option<&str> {
        self.keys
            .get(commodity)
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// Number of commodities in the table.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table has no commodities.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
