//! Static input data: the system catalog and the commodity affinity table.

mod affinity;
mod system;

pub use affinity::AffinityTable;
pub use system::{Catalog, CommodityListing, Location, Market, StarSystem, SystemMatch};
