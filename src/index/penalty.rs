//! Location-type classification used by the index filters and scoring.

/// Marker of large-hull-only locations, alongside "carrier".
const LARGE_HULL_MARKER: &str = "drake";

/// Preference penalty for a location type.
///
/// Case-insensitive substring match, first match wins: starports 0,
/// asteroid bases 10, planetary ports 20, outposts 25, anything else 15.
///
/// # Examples
///
/// ```
/// use cargo_planner::index::preference_penalty;
///
/// assert_eq!(preference_penalty("Coriolis Starport"), 0);
/// assert_eq!(preference_penalty("Planetary Outpost"), 20);
/// assert_eq!(preference_penalty("Settlement"), 15);
/// ```
pub fn preference_penalty(location_type: &str) -> u32 {
    let t = location_type.to_lowercase();
    if t.contains("starport") {
        0
    } else if t.contains("asteroid") {
        10
    } else if t.contains("planetary") {
        20
    } else if t.contains("outpost") {
        25
    } else {
        15
    }
}

/// Returns `true` for fleet carriers and other large-hull-only locations.
pub fn is_large_hull_only(location_type: &str) -> bool {
    let t = location_type.to_lowercase();
    t.contains("carrier") || t.contains(LARGE_HULL_MARKER)
}
