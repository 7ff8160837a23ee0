//! # Materials Catalog
//!
//! Reference properties for common bulk materials: bulk density in both unit
//! systems, angle of repose, typical particle size, abrasiveness and
//! flowability.
//!
//! Densities here are typical loose values; use them as calculator inputs
//! when a measured density is not available.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::materials;
//! use bulkflow_core::units::UnitSystem;
//!
//! let wheat = materials::find("wheat").unwrap();
//! assert_eq!(wheat.bulk_density_imperial, 48.1);
//!
//! let density = materials::bulk_density("Sand (Dry)", UnitSystem::Metric).unwrap();
//! assert_eq!(density, 1600.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

use Abrasiveness::{High, Low, Medium};
use Flowability::{Excellent, Fair, Good, Poor};
use MaterialCategory::*;

/// Relative wear a material causes on equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Abrasiveness {
    Low,
    Medium,
    High,
}

/// How readily a material flows by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flowability {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Broad industry grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Agricultural,
    Minerals,
    Chemical,
    Food,
    Construction,
    Biomass,
    Plastics,
    Metals,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 8] = [
        MaterialCategory::Agricultural,
        MaterialCategory::Minerals,
        MaterialCategory::Chemical,
        MaterialCategory::Food,
        MaterialCategory::Construction,
        MaterialCategory::Biomass,
        MaterialCategory::Plastics,
        MaterialCategory::Metals,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Agricultural => "Agricultural",
            MaterialCategory::Minerals => "Minerals",
            MaterialCategory::Chemical => "Chemical",
            MaterialCategory::Food => "Food",
            MaterialCategory::Construction => "Construction",
            MaterialCategory::Biomass => "Biomass",
            MaterialCategory::Plastics => "Plastics",
            MaterialCategory::Metals => "Metals",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub name: &'static str,
    /// kg/m³
    pub bulk_density_metric: f64,
    /// lb/ft³
    pub bulk_density_imperial: f64,
    /// Degrees
    pub angle_of_repose: f64,
    /// Typical particle size, mm
    pub particle_size: f64,
    pub abrasiveness: Abrasiveness,
    pub flowability: Flowability,
    pub category: MaterialCategory,
}

impl Material {
    /// Bulk density in `system` units (kg/m³ or lb/ft³)
    pub fn bulk_density(&self, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::Metric => self.bulk_density_metric,
            UnitSystem::Imperial => self.bulk_density_imperial,
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn material(
    name: &'static str,
    bulk_density_metric: f64,
    bulk_density_imperial: f64,
    angle_of_repose: f64,
    particle_size: f64,
    abrasiveness: Abrasiveness,
    flowability: Flowability,
    category: MaterialCategory,
) -> Material {
    Material {
        name,
        bulk_density_metric,
        bulk_density_imperial,
        angle_of_repose,
        particle_size,
        abrasiveness,
        flowability,
        category,
    }
}

static MATERIALS: [Material; 20] = [
    material("Wheat", 770.0, 48.1, 25.0, 5.0, Low, Good, Agricultural),
    material("Corn (Whole Kernel)", 720.0, 45.0, 27.0, 8.0, Low, Good, Agricultural),
    material("Soybeans", 750.0, 47.0, 26.0, 6.0, Low, Good, Agricultural),
    material("Rice", 1540.0, 96.0, 33.0, 4.0, Low, Fair, Agricultural),
    material("Sand (Dry)", 1600.0, 100.0, 35.0, 0.5, High, Excellent, Minerals),
    material("Limestone (Crushed)", 1550.0, 97.0, 37.0, 12.0, High, Good, Minerals),
    material("Coal (Bituminous)", 830.0, 52.0, 35.0, 25.0, Medium, Fair, Minerals),
    material("Salt (Granular)", 1200.0, 75.0, 32.0, 2.0, Medium, Good, Chemical),
    material("Sugar (Granulated)", 800.0, 50.0, 30.0, 0.8, Low, Good, Food),
    material("Flour (Wheat)", 590.0, 37.0, 45.0, 0.05, Low, Poor, Food),
    material("Cement (Portland)", 1500.0, 94.0, 40.0, 0.02, High, Poor, Construction),
    material("Sawdust (Dry)", 210.0, 13.0, 45.0, 2.0, Low, Fair, Biomass),
    material("Wood Pellets", 650.0, 40.6, 28.0, 6.0, Low, Excellent, Biomass),
    material("Plastic Pellets (PE)", 560.0, 35.0, 25.0, 3.0, Low, Excellent, Plastics),
    material("Iron Ore (Pellets)", 2000.0, 125.0, 30.0, 12.0, High, Good, Metals),
    material("Aluminum Oxide", 1520.0, 95.0, 38.0, 0.1, High, Fair, Chemical),
    material("Fertilizer (Granular)", 1100.0, 69.0, 30.0, 3.0, Medium, Good, Agricultural),
    material("Coffee Beans", 430.0, 27.0, 28.0, 8.0, Low, Good, Food),
    material("Cocoa Beans", 590.0, 37.0, 32.0, 12.0, Low, Good, Food),
    material("Activated Carbon", 480.0, 30.0, 40.0, 1.0, Medium, Fair, Chemical),
];

/// Every catalog entry, in catalog order
pub fn all() -> &'static [Material] {
    &MATERIALS
}

/// Find a material by name, ignoring case.
///
/// # Errors
///
/// `MaterialNotFound` if no entry has this name.
pub fn find(name: &str) -> CalcResult<&'static Material> {
    let wanted = name.trim();
    MATERIALS
        .iter()
        .find(|material| material.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CalcError::material_not_found(name))
}

/// Materials in a category, matched by display name ignoring case
pub fn by_category(category: &str) -> Vec<&'static Material> {
    let wanted = category.trim();
    MATERIALS
        .iter()
        .filter(|material| material.category.display_name().eq_ignore_ascii_case(wanted))
        .collect()
}

/// Materials whose name contains `query`, ignoring case
pub fn search(query: &str) -> Vec<&'static Material> {
    let needle = query.trim().to_lowercase();
    MATERIALS
        .iter()
        .filter(|material| material.name.to_lowercase().contains(&needle))
        .collect()
}

/// Bulk density of a named material in `system` units
pub fn bulk_density(name: &str, system: UnitSystem) -> CalcResult<f64> {
    find(name).map(|material| material.bulk_density(system))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(all().len(), 20);
        for category in MaterialCategory::ALL {
            assert!(
                !by_category(category.display_name()).is_empty(),
                "no materials in {}",
                category
            );
        }
    }

    #[test]
    fn test_find_ignores_case() {
        let corn = find("CORN (whole kernel)").unwrap();
        assert_eq!(corn.bulk_density_metric, 720.0);
        assert_eq!(corn.flowability, Flowability::Good);
    }

    #[test]
    fn test_find_miss() {
        let err = find("Unobtainium").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Unobtainium"));
    }

    #[test]
    fn test_by_category() {
        let names: Vec<&str> = by_category("food").iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Sugar (Granulated)", "Flour (Wheat)", "Coffee Beans", "Cocoa Beans"]);
        assert!(by_category("Textiles").is_empty());
    }

    #[test]
    fn test_search() {
        let names: Vec<&str> = search("pellets").iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Wood Pellets", "Plastic Pellets (PE)", "Iron Ore (Pellets)"]);
        assert_eq!(search("").len(), 20);
    }

    #[test]
    fn test_bulk_density_by_system() {
        assert_eq!(bulk_density("Iron Ore (Pellets)", UnitSystem::Imperial).unwrap(), 125.0);
        assert_eq!(bulk_density("Iron Ore (Pellets)", UnitSystem::Metric).unwrap(), 2000.0);
        assert_eq!(
            bulk_density("Gravel", UnitSystem::Metric).unwrap_err().error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_serializes_enum_names() {
        let json = serde_json::to_value(find("Cement (Portland)").unwrap()).unwrap();
        assert_eq!(json["abrasiveness"], "High");
        assert_eq!(json["category"], "Construction");
    }
}
