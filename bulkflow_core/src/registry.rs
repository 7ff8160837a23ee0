//! # Calculator Registry
//!
//! Dispatch of JSON requests to calculators by id.
//!
//! Every calculator in [`calculations`](crate::calculations) is registered
//! here once, keyed by its id. Ids are matched with either `_` or `-` as the
//! word separator, so `gravity-flow` and `gravity_flow` name the same
//! calculator.
//!
//! Unit-aware calculators take a `use_imperial` flag. When a request omits
//! it, the flag is filled in from [`Settings::unit_system`].
//!
//! ## Usage
//!
//! ```rust
//! use bulkflow_core::registry;
//! use bulkflow_core::settings::Settings;
//! use serde_json::json;
//!
//! let response = registry::run(
//!     "drag-slide",
//!     &json!({"x_value": 3.0, "y_value": 4.0}),
//!     &Settings::default(),
//! ).unwrap();
//!
//! assert_eq!(response.calculator, "drag_slide");
//! assert_eq!(response.result["diagonal"], 5.0);
//! ```

use std::collections::BTreeMap;

use log::{debug, error, warn};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::calculations::{
    air_classifier::AirClassifier, belt_horsepower::BeltHorsepower, column_velocity::ColumnVelocity,
    cyclone_separator::CycloneSeparator, drag_slide::DragSlide, drum_burden::DrumBurden,
    gravity_flow::GravityFlow, magnetic_separator::MagneticSeparator,
    material_handling::MaterialHandling, pneumatic_conveying::PneumaticConveying,
    screen_sizing::ScreenSizing, screw_conveyor::ScrewConveyor,
    spout_requirements::SpoutRequirements, vibrating_feeder::VibratingFeeder, Calculation,
    CalculationResponse, Calculator, CalculatorInfo, Registered,
};
use crate::errors::{CalcError, CalcResult};
use crate::settings::Settings;
use crate::validation::ValidationReport;

/// Request field carrying the caller's unit system
const UNIT_FLAG: &str = "use_imperial";

type Registry = BTreeMap<&'static str, Box<dyn Calculator>>;

fn register<C: Calculation + 'static>(registry: &mut Registry) {
    registry.insert(C::ID, Box::new(Registered::<C>::new()));
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    register::<GravityFlow>(&mut registry);
    register::<ColumnVelocity>(&mut registry);
    register::<SpoutRequirements>(&mut registry);
    register::<BeltHorsepower>(&mut registry);
    register::<DragSlide>(&mut registry);
    register::<DrumBurden>(&mut registry);
    register::<ScrewConveyor>(&mut registry);
    register::<VibratingFeeder>(&mut registry);
    register::<MagneticSeparator>(&mut registry);
    register::<AirClassifier>(&mut registry);
    register::<PneumaticConveying>(&mut registry);
    register::<MaterialHandling>(&mut registry);
    register::<ScreenSizing>(&mut registry);
    register::<CycloneSeparator>(&mut registry);
    registry
});

// ============================================================================
// Lookup
// ============================================================================

/// Metadata for every registered calculator, ordered by id
pub fn all() -> Vec<CalculatorInfo> {
    REGISTRY.values().map(|calculator| calculator.info()).collect()
}

/// Calculator registered under `id` (`-` and `_` are interchangeable)
pub fn get(id: &str) -> CalcResult<&'static dyn Calculator> {
    let normalized = id.trim().replace('-', "_");
    REGISTRY
        .get(normalized.as_str())
        .map(|calculator| calculator.as_ref())
        .ok_or_else(|| CalcError::unknown_calculator(id))
}

// ============================================================================
// Dispatch
// ============================================================================

/// Parse and validate `input` without computing.
///
/// Returns the report even when it holds violations; only unknown ids and
/// malformed JSON are errors.
pub fn validate(id: &str, input: &Value, settings: &Settings) -> CalcResult<ValidationReport> {
    let calculator = get(id)?;
    let input = with_unit_flag(calculator, input, settings);
    calculator.validate_json(&input)
}

/// Run the calculator registered under `id` on a JSON request.
///
/// # Errors
///
/// * `UnknownCalculator` - no calculator has this id
/// * `SerializationError` - `input` does not match the calculator's input shape
/// * `ValidationFailed` - every rule the input breaks
pub fn run(id: &str, input: &Value, settings: &Settings) -> CalcResult<CalculationResponse> {
    let calculator = get(id)?;
    let info = calculator.info();
    debug!("dispatching {} request", info.id);

    let input = with_unit_flag(calculator, input, settings);
    let outcome = calculator.run_json(&input, settings);

    match &outcome {
        Ok(response) => debug!(
            "{} returned {} recommendation(s), chart: {}",
            info.id,
            response.recommendations.len(),
            response.chart.is_some()
        ),
        Err(err) if err.is_internal_fault() => error!("{} failed: {}", info.id, err),
        Err(err) => warn!("{} rejected request: {}", info.id, err),
    }

    outcome
}

/// Fill in `use_imperial` from settings when a unit-aware request omits it
fn with_unit_flag(calculator: &dyn Calculator, input: &Value, settings: &Settings) -> Value {
    let mut input = input.clone();
    if calculator.info().unit_aware {
        if let Value::Object(fields) = &mut input {
            fields
                .entry(UNIT_FLAG)
                .or_insert_with(|| Value::Bool(settings.unit_system.is_imperial()));
        }
    }
    input
}

// ============================================================================
// Catalog
// ============================================================================

/// Markdown reference of every registered calculator, grouped by category.
///
/// Written to `CALCULATORS.md` by the `gen-catalog` binary.
pub fn generate_catalog_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Bulkflow Calculator Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Every calculator accepts a JSON object and returns a JSON result, an optional
chart specification, and advisory recommendations.

| Id | Name | Category | Chart |
|----|------|----------|-------|
"#,
    );

    let calculators = all();
    for info in &calculators {
        output.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            info.id,
            info.name,
            info.category,
            if info.has_chart { "yes" } else { "no" }
        ));
    }
    output.push_str("\n---\n\n");

    let mut by_category: BTreeMap<&str, Vec<&CalculatorInfo>> = BTreeMap::new();
    for info in &calculators {
        by_category.entry(info.category.as_str()).or_default().push(info);
    }

    for (category, members) in by_category {
        output.push_str(&format!("## {}\n\n", category));

        for info in members {
            output.push_str(&format!("### {}\n\n", info.name));
            output.push_str(&format!("Id: `{}`\n\n", info.id));
            output.push_str(&format!("{}\n\n", info.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", info.formula));
            if info.unit_aware {
                output.push_str("Accepts `use_imperial` to select imperial or metric units.\n\n");
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_all_is_ordered_by_id() {
        let ids: Vec<String> = all().into_iter().map(|info| info.id).collect();
        assert_eq!(ids.len(), 14);

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids[0], "air_classifier");
    }

    #[test]
    fn test_get_accepts_either_separator() {
        assert_eq!(get("gravity-flow").unwrap().info().id, "gravity_flow");
        assert_eq!(get("gravity_flow").unwrap().info().id, "gravity_flow");
    }

    #[test]
    fn test_unknown_calculator() {
        let err = get("rotary_kiln").err().unwrap();
        assert_eq!(err, CalcError::unknown_calculator("rotary_kiln"));

        let err = run("rotary_kiln", &json!({}), &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_unit_flag_from_settings() {
        let input = json!({"aperture_size_mm": 150, "bulk_density": 50.0});

        let imperial = Settings {
            unit_system: UnitSystem::Imperial,
            ..Settings::default()
        };
        let response = run("gravity_flow", &input, &imperial).unwrap();
        assert_eq!(response.result["volume_unit"], "ft³/hr");

        let response = run("gravity_flow", &input, &Settings::default()).unwrap();
        assert_eq!(response.result["volume_unit"], "m³/hr");
    }

    #[test]
    fn test_explicit_unit_flag_wins() {
        let input = json!({"aperture_size_mm": 150, "bulk_density": 50.0, "use_imperial": true});
        let response = run("gravity_flow", &input, &Settings::default()).unwrap();
        assert_eq!(response.result["volume_unit"], "ft³/hr");
    }

    #[test]
    fn test_unit_flag_not_added_to_plain_calculators() {
        let calculator = get("drag_slide").unwrap();
        let input = with_unit_flag(calculator, &json!({"x_value": 1.0}), &Settings::default());
        assert!(input.get(UNIT_FLAG).is_none());
    }

    #[test]
    fn test_validate_reports_without_failing() {
        let report = validate(
            "column_velocity",
            &json!({"molder_shot_size": 0.0, "molder_cycle_time": 30.0, "material_density": 40.0, "area_inside_tube": 3.0}),
            &Settings::default(),
        )
        .unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.violations().len(), 1);
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        let err = run(
            "drag_slide",
            &json!({"x_value": 0.0, "y_value": 4.0}),
            &Settings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_catalog_markdown() {
        let markdown = generate_catalog_markdown();
        assert!(markdown.starts_with("# Bulkflow Calculator Reference"));
        assert!(markdown.contains("| `gravity_flow` | Gravity MD Flow Rate Calculator | Flow Control | yes |"));
        assert!(markdown.contains("## Separation Systems"));
        assert!(markdown.contains("### Cyclone Separator Calculator"));
    }
}
