//! # Input Validation
//!
//! Shared checks used by every calculator's `validate` function. A
//! [`ValidationReport`] collects human-readable violation messages; checks
//! never stop at the first failure, so a caller always sees every problem at
//! once. An empty report means the input is acceptable.
//!
//! NaN never satisfies a bound, so it is always reported.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::validation::ValidationReport;
//!
//! let mut report = ValidationReport::new();
//! report
//!     .positive("Belt speed", -5.0)
//!     .within("Incline angle", 120.0, 0.0, 90.0);
//!
//! assert_eq!(report.violations().len(), 2);
//! assert!(report.into_result("belt_horsepower").is_err());
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{self, QuantityKind, UnitSystem};

/// Upper bound on bulk density in lb/ft³.
pub const MAX_BULK_DENSITY_PCF: f64 = 200.0;

/// The same bound in kg/m³ (200 lb/ft³ ≈ 3203.7 kg/m³).
pub fn max_bulk_density(system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Imperial => MAX_BULK_DENSITY_PCF,
        UnitSystem::Metric => MAX_BULK_DENSITY_PCF * units::KG_M3_PER_LB_FT3,
    }
}

/// Ordered list of violation messages from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    /// True when no check failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<String> {
        self.violations
    }

    /// Record a violation unconditionally
    pub fn push(&mut self, message: impl Into<String>) -> &mut Self {
        self.violations.push(message.into());
        self
    }

    /// Cross-field or free-form check: record `message` unless `condition` holds
    pub fn require(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.push(message);
        }
        self
    }

    /// `value > 0`
    pub fn positive(&mut self, label: &str, value: f64) -> &mut Self {
        self.require(value > 0.0, format!("{} must be greater than 0", label))
    }

    /// `min <= value <= max`
    pub fn within(&mut self, label: &str, value: f64, min: f64, max: f64) -> &mut Self {
        self.require(
            (min..=max).contains(&value),
            format!("{} must be between {} and {}", label, min, max),
        )
    }

    /// `0 < value <= max`, reported as a single message
    pub fn positive_up_to(&mut self, label: &str, value: f64, max: f64) -> &mut Self {
        if !(value > 0.0) {
            self.positive(label, value)
        } else {
            self.require(value <= max, format!("{} must not exceed {}", label, max))
        }
    }

    /// Value must be one of a fixed, enumerated set
    pub fn one_of<T>(&mut self, label: &str, value: &T, allowed: &[T]) -> &mut Self
    where
        T: PartialEq + Display,
    {
        if !allowed.contains(value) {
            let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            self.push(format!("{} must be one of: {}", label, listed.join(", ")));
        }
        self
    }

    /// Bulk density: positive and no more than 200 lb/ft³ (or 3203.7 kg/m³).
    pub fn bulk_density(&mut self, value: f64, system: UnitSystem) -> &mut Self {
        if !(value > 0.0) {
            return self.positive("Bulk density", value);
        }
        let limit = max_bulk_density(system);
        self.require(
            value <= limit,
            format!(
                "Bulk density seems too high (>{:.1} {})",
                limit,
                QuantityKind::BulkDensity.unit_label(system)
            ),
        )
    }

    /// Ok when valid, otherwise a `ValidationFailed` error for `calculator`
    pub fn into_result(self, calculator: &str) -> CalcResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CalcError::validation_failed(calculator, self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.into_result("drag_slide").is_ok());
    }

    #[test]
    fn test_collects_all_violations_in_order() {
        let mut report = ValidationReport::new();
        report
            .positive("Feed rate", 0.0)
            .within("Moisture content", 75.0, 0.0, 50.0)
            .positive_up_to("Mesh size", 150.0, 100.0)
            .require(false, "Oversize and undersize percentages cannot exceed 100%");

        assert_eq!(
            report.violations(),
            &[
                "Feed rate must be greater than 0".to_string(),
                "Moisture content must be between 0 and 50".to_string(),
                "Mesh size must not exceed 100".to_string(),
                "Oversize and undersize percentages cannot exceed 100%".to_string(),
            ]
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut report = ValidationReport::new();
        report
            .positive("A", f64::NAN)
            .within("B", f64::NAN, 0.0, 1.0)
            .positive_up_to("C", f64::NAN, 1.0)
            .bulk_density(f64::NAN, UnitSystem::Metric);
        assert_eq!(report.violations().len(), 4);
    }

    #[test]
    fn test_one_of_names_the_valid_set() {
        let mut report = ValidationReport::new();
        report.one_of("Aperture size", &275u32, &[30, 50, 70]);
        assert_eq!(report.violations(), &["Aperture size must be one of: 30, 50, 70".to_string()]);
    }

    #[test]
    fn test_bulk_density_limits_agree_across_systems() {
        let imperial = max_bulk_density(UnitSystem::Imperial);
        let metric = max_bulk_density(UnitSystem::Metric);
        assert!((metric - 3203.7).abs() < 1e-6);
        let converted = units::to_imperial(metric, QuantityKind::BulkDensity).unwrap();
        assert!((converted - imperial).abs() < 1e-9);
    }

    #[test]
    fn test_bulk_density_messages() {
        let mut report = ValidationReport::new();
        report
            .bulk_density(250.0, UnitSystem::Imperial)
            .bulk_density(3300.0, UnitSystem::Metric)
            .bulk_density(200.0, UnitSystem::Imperial)
            .bulk_density(3203.0, UnitSystem::Metric)
            .bulk_density(-1.0, UnitSystem::Metric);
        assert_eq!(
            report.violations(),
            &[
                "Bulk density seems too high (>200.0 lb/ft³)".to_string(),
                "Bulk density seems too high (>3203.7 kg/m³)".to_string(),
                "Bulk density must be greater than 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_into_result_carries_violations() {
        let mut report = ValidationReport::new();
        report.positive("X value", -1.0);
        let err = report.into_result("drag_slide").unwrap_err();
        assert_eq!(err.violations(), &["X value must be greater than 0".to_string()]);
    }
}
