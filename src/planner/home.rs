//! Home location resolution.

use crate::catalog::Catalog;
use crate::models::Coordinates;

/// Label used when no home is named.
pub const DEFAULT_HOME_LABEL: &str = "home (default)";

/// How the caller identifies the home location.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HomeSpec {
    /// No home given; the origin is used.
    #[default]
    Default,
    /// A system name, looked up in the catalog.
    Named(String),
    /// Explicit coordinates.
    Coordinates(Coordinates),
}

/// A resolved home: display label plus position.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeLocation {
    pub label: String,
    pub coords: Coordinates,
}

impl HomeLocation {
    fn origin(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coords: Coordinates::origin(),
        }
    }
}

/// Resolves a [`HomeSpec`] against the catalog.
///
/// A name that matches no system resolves to the origin, labelled with the
/// name as given.
///
/// # Examples
///
/// ```
/// use cargo_planner::catalog::Catalog;
/// use cargo_planner::models::Coordinates;
/// use cargo_planner::planner::{resolve_home, HomeSpec};
///
/// let catalog = Catalog::empty();
/// let home = resolve_home(&catalog, &HomeSpec::Coordinates(Coordinates::new(1.0, 2.26, -3.0)));
/// assert_eq!(home.label, "Custom (1.0, 2.3, -3.0)");
///
/// let home = resolve_home(&catalog, &HomeSpec::Named("Nowhere".into()));
/// assert_eq!(home.label, "Nowhere");
/// assert_eq!(home.coords, Coordinates::origin());
/// ```
pub fn resolve_home(catalog: &Catalog, home: &HomeSpec) -> HomeLocation {
    match home {
        HomeSpec::Coordinates(c) => HomeLocation {
            label: format!("Custom ({:.1}, {:.1}, {:.1})", c.x, c.y, c.z),
            coords: *c,
        },
        HomeSpec::Named(name) if name.trim().is_empty() => HomeLocation::origin(DEFAULT_HOME_LABEL),
        HomeSpec::Named(name) => match catalog.find_system(name) {
            Some(system) => HomeLocation {
                label: system.name.clone(),
                coords: system.coords,
            },
            None => HomeLocation::origin(name.clone()),
        },
        HomeSpec::Default => HomeLocation::origin(DEFAULT_HOME_LABEL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"[{"name": "Shinrarta Dezhra", "coords": {"x": 55.7, "y": 17.6, "z": 27.2}, "economy": "HighTech"}]"#,
        )
        .expect("valid")
    }

    #[test]
    fn test_named_lookup_uses_catalog_spelling() {
        let home = resolve_home(&catalog(), &HomeSpec::Named("  shinrarta DEZHRA ".into()));
        assert_eq!(home.label, "Shinrarta Dezhra");
        assert_eq!(home.coords, Coordinates::new(55.7, 17.6, 27.2));
    }

    #[test]
    fn test_blank_name_is_default() {
        let home = resolve_home(&catalog(), &HomeSpec::Named("   ".into()));
        assert_eq!(home.label, DEFAULT_HOME_LABEL);
        assert_eq!(home.coords, Coordinates::origin());
        assert_eq!(resolve_home(&catalog(), &HomeSpec::Default), home);
    }

    #[test]
    fn test_coordinates_take_precedence() {
        let c = Coordinates::new(-10.04, 0.0, 99.96);
        let home = resolve_home(&catalog(), &HomeSpec::Coordinates(c));
        assert_eq!(home.label, "Custom (-10.0, 0.0, 100.0)");
        assert_eq!(home.coords, c);
    }
}
