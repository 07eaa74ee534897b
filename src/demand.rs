//! Reading demand lists from CSV.
//!
//! The first record is a header naming at least the `Commodity` and
//! `QuantityNeeded` columns (any case, any order). Fields are trimmed, quoted
//! fields may span lines, and rows for the same commodity are summed.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::DemandRecord;

const COMMODITY_COLUMN: &str = "commodity";
const QUANTITY_COLUMN: &str = "quantityneeded";

/// Parses a demand CSV into aggregated records.
///
/// Records keep the order in which each commodity first appears; commodities
/// whose total is not positive are dropped.
///
/// # Errors
///
/// [`PlannerError::Demand`] naming the offending line for a missing column,
/// an empty commodity name, a non-integer quantity, or a total that
/// overflows.
///
/// # Examples
///
/// ```
/// use cargo_planner::demand::read_demand_csv;
///
/// let csv = "Commodity,QuantityNeeded\nSteel,500\nGold,20\nSteel,250\n";
/// let records = read_demand_csv(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].commodity, "Steel");
/// assert_eq!(records[0].quantity_needed, 750);
/// ```
pub fn read_demand_csv<R: Read>(reader: R) -> Result<Vec<DemandRecord>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers().map_err(csv_error)?;
    let commodity_col = column(header, COMMODITY_COLUMN)?;
    let quantity_col = column(header, QUANTITY_COLUMN)?;

    let mut totals: Vec<DemandRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rdr.records() {
        let row = row.map_err(csv_error)?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        if row.iter().all(str::is_empty) {
            continue;
        }

        let commodity = row.get(commodity_col).unwrap_or("");
        if commodity.is_empty() {
            return Err(PlannerError::Demand {
                line,
                message: "empty commodity name".to_string(),
            });
        }
        let raw = row.get(quantity_col).unwrap_or("");
        let quantity: i64 = raw.parse().map_err(|_| PlannerError::Demand {
            line,
            message: format!("quantity {raw:?} is not an integer"),
        })?;

        match positions.get(commodity) {
            Some(&i) => {
                let total = &mut totals[i].quantity_needed;
                *total = total.checked_add(quantity).ok_or_else(|| PlannerError::Demand {
                    line,
                    message: "quantity total overflows".to_string(),
                })?;
            }
            None => {
                positions.insert(commodity.to_string(), totals.len());
                totals.push(DemandRecord::new(commodity, quantity));
            }
        }
    }

    totals.retain(|r| r.quantity_needed > 0);
    info!(commodities = totals.len(), "read demand list");
    Ok(totals)
}

/// Reads a demand CSV file.
pub fn load_demand(path: &Path) -> Result<Vec<DemandRecord>> {
    let file = File::open(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_demand_csv(file)
}

/// Position of a header column, matched case-insensitively.
fn column(header: &StringRecord, name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| PlannerError::Demand {
            line: header.position().map_or(1, |p| p.line() as usize),
            message: format!("missing column {name:?}"),
        })
}

fn csv_error(err: csv::Error) -> PlannerError {
    let line = err.position().map_or(1, |p| p.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PlannerError::Read(source),
        _ => PlannerError::Demand { line, message },
    }
}
