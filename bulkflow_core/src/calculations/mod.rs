//! # Bulk Material Handling Calculations
//!
//! One module per calculator. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `validate(input) -> ValidationReport` - every violation, never just the first
//! - `calculate(input) -> CalcResult<*Result>` - validates, then computes
//!
//! Every calculator also implements [`Calculation`], which the
//! [`registry`](crate::registry) uses to dispatch JSON requests by id.
//!
//! ## Available Calculations
//!
//! - [`gravity_flow`] - Gravity flow rate through a metering aperture
//! - [`column_velocity`] - Material velocity in a vertical feed column
//! - [`spout_requirements`] - Round and square spout sizing
//! - [`belt_horsepower`] - Belt conveyor tension and horsepower
//! - [`drag_slide`] - Drag slide dimensions with and without a magnet
//! - [`drum_burden`] - Magnetic drum field force and burden depth
//! - [`screw_conveyor`] - Screw conveyor capacity, torque and power
//! - [`vibrating_feeder`] - Vibrating feeder flow rate and drive power
//! - [`magnetic_separator`] - Magnetic separation efficiency and recovery
//! - [`air_classifier`] - Air classification by terminal velocity
//! - [`pneumatic_conveying`] - Dilute phase pneumatic conveying
//! - [`material_handling`] - Residence time and bed depth
//! - [`screen_sizing`] - Screen area and efficiency
//! - [`cyclone_separator`] - Cyclone cut size and collection efficiency
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::calculations::{evaluate, drag_slide::{DragSlide, DragSlideInput}};
//!
//! let result = evaluate::<DragSlide>(&DragSlideInput { x_value: 3.0, y_value: 4.0 }).unwrap();
//! assert!((result.with_magnet.b - 33.0).abs() < 1e-9);
//! ```

pub mod air_classifier;
pub mod belt_horsepower;
pub mod column_velocity;
pub mod cyclone_separator;
pub mod drag_slide;
pub mod drum_burden;
pub mod gravity_flow;
pub mod magnetic_separator;
pub mod material_handling;
pub mod pneumatic_conveying;
pub mod screen_sizing;
pub mod screw_conveyor;
pub mod spout_requirements;
pub mod vibrating_feeder;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::{self, ChartSpec};
use crate::errors::CalcResult;
use crate::settings::Settings;
use crate::validation::ValidationReport;

// Re-export commonly used types
pub use belt_horsepower::{BeltHorsepowerInput, BeltHorsepowerResult};
pub use drag_slide::{DragSlideInput, DragSlideResult};
pub use drum_burden::{DrumBurdenInput, DrumBurdenResult};
pub use gravity_flow::{GravityFlowInput, GravityFlowResult};
pub use spout_requirements::{SpoutRequirementsInput, SpoutRequirementsResult};

/// A single calculator: typed input, validation, formula, and optional
/// chart and advisory output.
pub trait Calculation {
    type Input: DeserializeOwned + Serialize;
    type Output: Serialize;

    /// Registry id, e.g. `"gravity_flow"`
    const ID: &'static str;
    const NAME: &'static str;
    const CATEGORY: &'static str;
    const DESCRIPTION: &'static str;
    /// One-line summary of the governing relation
    const FORMULA: &'static str;
    /// Whether the input carries a `use_imperial` flag
    const UNIT_AWARE: bool = false;

    fn validate(input: &Self::Input) -> ValidationReport;

    /// Evaluate the formula. Only called on input that passed `validate`.
    fn compute(input: &Self::Input) -> CalcResult<Self::Output>;

    fn chart(_input: &Self::Input, _output: &Self::Output) -> CalcResult<Option<ChartSpec>> {
        Ok(None)
    }

    fn recommendations(_input: &Self::Input, _output: &Self::Output) -> Vec<String> {
        Vec::new()
    }
}

/// Validate, then compute. Rejected input never reaches the formula.
pub fn evaluate<C: Calculation>(input: &C::Input) -> CalcResult<C::Output> {
    C::validate(input).into_result(C::ID)?;
    C::compute(input)
}

/// Descriptive metadata for a registered calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub formula: String,
    pub unit_aware: bool,
    pub has_chart: bool,
}

/// Full response for one calculator request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub calculator: String,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    pub recommendations: Vec<String>,
}

/// Object-safe, JSON-facing view of a [`Calculation`], stored in the registry.
pub trait Calculator: Send + Sync {
    fn info(&self) -> CalculatorInfo;

    /// Parse and validate without computing
    fn validate_json(&self, input: &Value) -> CalcResult<ValidationReport>;

    /// Parse, validate, compute, and attach chart and recommendations as
    /// `settings` asks
    fn run_json(&self, input: &Value, settings: &Settings) -> CalcResult<CalculationResponse>;
}

/// Adapter from a static [`Calculation`] to a boxed [`Calculator`].
pub struct Registered<C>(PhantomData<fn() -> C>);

impl<C> Registered<C> {
    pub fn new() -> Self {
        Registered(PhantomData)
    }
}

impl<C> Default for Registered<C> {
    fn default() -> Self {
        Registered::new()
    }
}

impl<C: Calculation> Registered<C> {
    fn parse(input: &Value) -> CalcResult<C::Input> {
        Ok(serde_json::from_value(input.clone())?)
    }
}

impl<C: Calculation> Calculator for Registered<C> {
    fn info(&self) -> CalculatorInfo {
        CalculatorInfo {
            id: C::ID.to_string(),
            name: C::NAME.to_string(),
            category: C::CATEGORY.to_string(),
            description: C::DESCRIPTION.to_string(),
            formula: C::FORMULA.to_string(),
            unit_aware: C::UNIT_AWARE,
            has_chart: chart::charted_calculators().any(|id| id == C::ID),
        }
    }

    fn validate_json(&self, input: &Value) -> CalcResult<ValidationReport> {
        let parsed = Self::parse(input)?;
        Ok(C::validate(&parsed))
    }

    fn run_json(&self, input: &Value, settings: &Settings) -> CalcResult<CalculationResponse> {
        let parsed = Self::parse(input)?;
        let output = evaluate::<C>(&parsed)?;

        let chart = if settings.include_chart {
            C::chart(&parsed, &output)?
        } else {
            None
        };
        let recommendations = if settings.include_recommendations {
            C::recommendations(&parsed, &output)
        } else {
            Vec::new()
        };

        Ok(CalculationResponse {
            calculator: C::ID.to_string(),
            result: serde_json::to_value(&output)?,
            chart,
            recommendations,
        })
    }
}

/// Inclusive numeric sweep `start, start + step, ..` up to `end`, for chart axes.
pub(crate) fn sweep(start: u32, end: u32, step: usize) -> impl Iterator<Item = f64> {
    (start..=end).step_by(step).map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::drag_slide::DragSlide;
    use crate::calculations::gravity_flow::GravityFlow;
    use serde_json::json;

    #[test]
    fn test_sweep_is_inclusive() {
        let values: Vec<f64> = sweep(10, 60, 5).collect();
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 10.0);
        assert_eq!(values[10], 60.0);
    }

    #[test]
    fn test_info_reports_chart_availability() {
        assert!(Registered::<GravityFlow>::new().info().has_chart);
        assert!(!Registered::<DragSlide>::new().info().has_chart);
    }

    #[test]
    fn test_run_json_respects_settings() {
        let calc = Registered::<GravityFlow>::new();
        let input = json!({"aperture_size_mm": 50, "bulk_density": 40.0, "use_imperial": true});

        let full = calc.run_json(&input, &Settings::default()).unwrap();
        assert!(full.chart.is_some());
        assert!(!full.recommendations.is_empty());

        let bare = Settings {
            include_chart: false,
            include_recommendations: false,
            ..Settings::default()
        };
        let response = calc.run_json(&input, &bare).unwrap();
        assert!(response.chart.is_none());
        assert!(response.recommendations.is_empty());
        assert_eq!(response.result["volume_unit"], "ft³/hr");
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let calc = Registered::<DragSlide>::new();
        let err = calc.run_json(&json!({"x_value": "three"}), &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_validate_json_collects_violations() {
        let calc = Registered::<DragSlide>::new();
        let report = calc.validate_json(&json!({"x_value": -1.0, "y_value": 2000.0})).unwrap();
        assert_eq!(report.violations().len(), 2);
    }
}
