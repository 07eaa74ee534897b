//! Route and leg types.

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Label carried by the final leg back home.
pub const RETURN_LABEL: &str = "RETURN_HOME";

/// What happens at the end of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegAction {
    /// Travel to a supply point and collect the listed commodities.
    Pickup,
    /// Travel from the last stop back home.
    Return,
    /// No supply point in range stocks the commodity.
    Unreachable,
}

/// One hop of a pickup route.
///
/// `end`, `system_name`, and `location_name` are absent on `UNREACHABLE`
/// legs, which never move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub start: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// A single commodity, or `{A, B}` for a multi-commodity pickup.
    pub commodity_label: String,
    /// Straight-line distance rounded to two decimals.
    pub distance: f64,
    pub action: LegAction,
}

impl RouteLeg {
    /// A pickup at `system`/`location` covering the given commodities.
    pub fn pickup<'a>(
        start: Coordinates,
        end: Coordinates,
        system: &str,
        location: &str,
        commodities: impl IntoIterator<Item = &'a String>,
        distance: f64,
    ) -> Self {
        let names: Vec<&str> = commodities.into_iter().map(String::as_str).collect();
        Self {
            start,
            end: Some(end),
            system_name: Some(system.to_string()),
            location_name: Some(location.to_string()),
            commodity_label: format!("{{{}}}", names.join(", ")),
            distance,
            action: LegAction::Pickup,
        }
    }

    /// The closing leg from the last stop back home.
    pub fn return_home(start: Coordinates, home: Coordinates, distance: f64) -> Self {
        Self {
            start,
            end: Some(home),
            system_name: None,
            location_name: None,
            commodity_label: RETURN_LABEL.to_string(),
            distance,
            action: LegAction::Return,
        }
    }

    /// A marker for a commodity that cannot be collected.
    pub fn unreachable(start: Coordinates, commodity: &str) -> Self {
        Self {
            start,
            end: None,
            system_name: None,
            location_name: None,
            commodity_label: commodity.to_string(),
            distance: 0.0,
            action: LegAction::Unreachable,
        }
    }
}

/// The ordered legs collecting one bin, starting and ending at home.
///
/// # Examples
///
/// ```
/// use cargo_planner::models::{Coordinates, Route, RouteLeg};
///
/// let mut route = Route::new(1);
/// route.push_leg(RouteLeg::return_home(Coordinates::origin(), Coordinates::origin(), 0.0));
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.bin_number(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    bin_number: usize,
    total_distance: f64,
    legs: Vec<RouteLeg>,
}

impl Route {
    /// Creates an empty route for the given bin.
    pub fn new(bin_number: usize) -> Self {
        Self {
            bin_number,
            total_distance: 0.0,
            legs: Vec::new(),
        }
    }

    /// Appends a leg.
    pub fn push_leg(&mut self, leg: RouteLeg) {
        self.legs.push(leg);
    }

    /// The bin this route collects (1-based).
    pub fn bin_number(&self) -> usize {
        self.bin_number
    }

    /// Legs in travel order.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns `true` if the route has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Total distance rounded to two decimals (set by the route planner).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sets the reported total distance.
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Returns `true` if any commodity in this route could not be collected.
    pub fn has_unreachable(&self) -> bool {
        self.legs.iter().any(|l| l.action == LegAction::Unreachable)
    }

    /// Legs with the given action.
    pub fn legs_with(&self, action: LegAction) -> impl Iterator<Item = &RouteLeg> {
        self.legs.iter().filter(move |l| l.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_label_braces() {
        let names = vec!["Gold".to_string(), "Silver".to_string()];
        let leg = RouteLeg::pickup(
            Coordinates::origin(),
            Coordinates::new(1.0, 0.0, 0.0),
            "Sol",
            "Abraham",
            &names,
            1.0,
        );
        assert_eq!(leg.commodity_label, "{Gold, Silver}");
        assert_eq!(leg.action, LegAction::Pickup);
        assert_eq!(leg.system_name.as_deref(), Some("Sol"));
    }

    #[test]
    fn test_unreachable_leg() {
        let leg = RouteLeg::unreachable(Coordinates::new(2.0, 2.0, 2.0), "Tritium");
        assert_eq!(leg.commodity_label, "Tritium");
        assert_eq!(leg.distance, 0.0);
        assert!(leg.end.is_none());
    }

    #[test]
    fn test_action_serializes_upper_case() {
        let json = serde_json::to_value(LegAction::Unreachable).expect("serialize");
        assert_eq!(json, "UNREACHABLE");
        let json = serde_json::to_value(LegAction::Pickup).expect("serialize");
        assert_eq!(json, "PICKUP");
    }

    #[test]
    fn test_leg_omits_missing_fields() {
        let json = serde_json::to_value(RouteLeg::unreachable(Coordinates::origin(), "Gold"))
            .expect("serialize");
        assert!(json.get("end").is_none());
        assert!(json.get("systemName").is_none());
        assert_eq!(json["commodityLabel"], "Gold");
    }

    #[test]
    fn test_route_accessors() {
        let mut r = Route::new(2);
        assert!(r.is_empty());
        r.push_leg(RouteLeg::unreachable(Coordinates::origin(), "Gold"));
        r.push_leg(RouteLeg::return_home(Coordinates::origin(), Coordinates::origin(), 0.0));
        r.set_total_distance(0.0);
        assert_eq!(r.len(), 2);
        assert!(r.has_unreachable());
        assert_eq!(r.legs_with(LegAction::Return).count(), 1);
    }
}
