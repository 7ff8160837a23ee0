//! # Gravity Flow Rate
//!
//! Volumetric and mass flow rate of bulk material falling through a metering
//! aperture under gravity. The volumetric rate comes from a measured table
//! keyed by aperture size; mass rate scales it by bulk density.
//!
//! ## Assumptions
//!
//! - Free-flowing material, aperture fully open
//! - Tabulated rates are in ft³/hr; only the listed aperture sizes are valid
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::calculations::gravity_flow::{calculate, GravityFlowInput};
//!
//! let input = GravityFlowInput {
//!     aperture_size_mm: 150,
//!     bulk_density: 50.0,
//!     use_imperial: true,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.flow_rate_volume - 568.57).abs() < 1e-9);
//! assert_eq!(result.mass_unit, "lb/hr");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::chart::{build_chart, AxisValue, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::lookup::LookupTable;
use crate::units::{self, Measurement, QuantityKind, UnitSystem};
use crate::validation::ValidationReport;

/// Measured volumetric flow (ft³/hr) by aperture size (mm).
pub static APERTURE_FLOW_RATES: LookupTable<u32, f64> = LookupTable::new(
    "aperture_flow_rates",
    &[
        (30, 35.32),
        (50, 98.88),
        (70, 194.23),
        (90, 254.27),
        (120, 395.53),
        (150, 568.57),
        (200, 889.94),
        (250, 1528.11),
        (300, 2468.52),
        (350, 3556.22),
        (400, 6921.74),
    ],
);

/// Input parameters for gravity flow.
///
/// ## JSON Example
///
/// ```json
/// {
///   "aperture_size_mm": 150,
///   "bulk_density": 800.0,
///   "use_imperial": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityFlowInput {
    /// Aperture size in mm; must be a tabulated size
    pub aperture_size_mm: u32,

    /// Bulk density in kg/m³ (metric) or lb/ft³ (imperial)
    pub bulk_density: f64,

    #[serde(default)]
    pub use_imperial: bool,
}

impl GravityFlowInput {
    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_imperial_flag(self.use_imperial)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityFlowResult {
    /// m³/hr or ft³/hr
    pub flow_rate_volume: f64,
    /// kg/hr or lb/hr
    pub flow_rate_mass: f64,
    pub volume_unit: String,
    pub mass_unit: String,
}

fn flow_units(system: UnitSystem) -> (&'static str, &'static str) {
    match system {
        UnitSystem::Metric => ("m³/hr", "kg/hr"),
        UnitSystem::Imperial => ("ft³/hr", "lb/hr"),
    }
}

/// Collect every violation for `input`.
pub fn validate(input: &GravityFlowInput) -> ValidationReport {
    let apertures: Vec<u32> = APERTURE_FLOW_RATES.keys().copied().collect();

    let mut report = ValidationReport::new();
    report
        .one_of("Aperture size", &input.aperture_size_mm, &apertures)
        .bulk_density(input.bulk_density, input.unit_system());
    report
}

/// Validate and compute gravity flow.
pub fn calculate(input: &GravityFlowInput) -> CalcResult<GravityFlowResult> {
    evaluate::<GravityFlow>(input)
}

fn compute(input: &GravityFlowInput) -> CalcResult<GravityFlowResult> {
    let system = input.unit_system();

    let ft3_hr = *APERTURE_FLOW_RATES.lookup_exact(&input.aperture_size_mm)?;
    let density_pcf = Measurement::new(input.bulk_density, system, QuantityKind::BulkDensity)
        .in_system(UnitSystem::Imperial)?
        .value;
    let lb_hr = ft3_hr * density_pcf;

    let (flow_rate_volume, flow_rate_mass) = match system {
        UnitSystem::Imperial => (ft3_hr, lb_hr),
        UnitSystem::Metric => (
            units::to_metric(ft3_hr, QuantityKind::Volume)?,
            units::to_metric(lb_hr, QuantityKind::Mass)?,
        ),
    };
    let (volume_unit, mass_unit) = flow_units(system);

    Ok(GravityFlowResult {
        flow_rate_volume,
        flow_rate_mass,
        volume_unit: volume_unit.to_string(),
        mass_unit: mass_unit.to_string(),
    })
}

fn chart(input: &GravityFlowInput, output: &GravityFlowResult) -> CalcResult<ChartSpec> {
    let system = input.unit_system();

    let mut x: Vec<AxisValue> = Vec::with_capacity(APERTURE_FLOW_RATES.len());
    let mut y = Vec::with_capacity(APERTURE_FLOW_RATES.len());
    for (aperture, ft3_hr) in APERTURE_FLOW_RATES.entries() {
        x.push((*aperture).into());
        y.push(match system {
            UnitSystem::Imperial => *ft3_hr,
            UnitSystem::Metric => units::to_metric(*ft3_hr, QuantityKind::Volume)?,
        });
    }

    let bars = Series::bar("Flow Rate", x, y);
    let selected = HighlightPoint::selected(input.aperture_size_mm, output.flow_rate_volume);
    let (volume_unit, _) = flow_units(system);

    Ok(build_chart(GravityFlow::ID, vec![bars], Some(selected))?
        .with_y_axis_title(format!("Flow Rate ({})", volume_unit)))
}

fn recommendations(input: &GravityFlowInput, output: &GravityFlowResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.flow_rate_volume < 50.0 {
        notes.push("Low flow rate detected. Consider larger aperture size for higher throughput.");
    } else if output.flow_rate_volume > 5000.0 {
        notes.push("High flow rate. Ensure downstream equipment can handle this capacity.");
    }

    if input.aperture_size_mm < 100 {
        notes.push("Small aperture size may be prone to bridging with cohesive materials.");
    }

    let heavy = match input.unit_system() {
        UnitSystem::Imperial => 100.0,
        UnitSystem::Metric => 1600.0,
    };
    if input.bulk_density > heavy {
        notes.push("High bulk density material. Consider structural reinforcement for equipment.");
    }

    notes.into_iter().map(String::from).collect()
}

/// Registry entry for gravity flow.
pub struct GravityFlow;

impl Calculation for GravityFlow {
    type Input = GravityFlowInput;
    type Output = GravityFlowResult;

    const ID: &'static str = "gravity_flow";
    const NAME: &'static str = "Gravity MD Flow Rate Calculator";
    const CATEGORY: &'static str = "Flow Control";
    const DESCRIPTION: &'static str =
        "Calculate gravity flow rates based on aperture size and bulk density with metric/imperial conversion";
    const FORMULA: &'static str = "Q (ft³/hr) from aperture table; mass rate = Q × bulk density (lb/ft³)";
    const UNIT_AWARE: bool = true;

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        compute(input)
    }

    fn chart(input: &Self::Input, output: &Self::Output) -> CalcResult<Option<ChartSpec>> {
        chart(input, output).map(Some)
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn imperial(aperture_size_mm: u32, bulk_density: f64) -> GravityFlowInput {
        GravityFlowInput {
            aperture_size_mm,
            bulk_density,
            use_imperial: true,
        }
    }

    #[test]
    fn test_imperial_flow() {
        let result = calculate(&imperial(150, 50.0)).unwrap();
        assert!((result.flow_rate_volume - 568.57).abs() < 1e-9);
        assert!((result.flow_rate_mass - 28428.5).abs() < 1e-6);
        assert_eq!(result.volume_unit, "ft³/hr");
        assert_eq!(result.mass_unit, "lb/hr");
    }

    #[test]
    fn test_metric_flow() {
        let input = GravityFlowInput {
            aperture_size_mm: 150,
            bulk_density: 800.0,
            use_imperial: false,
        };
        let result = calculate(&input).unwrap();

        // 568.57 ft³/hr × 0.0283168 = 16.1 m³/hr
        assert!((result.flow_rate_volume - 568.57 * 0.0283168).abs() < 1e-9);
        let expected_mass = 568.57 * (800.0 / 16.0185) * 0.453592;
        assert!((result.flow_rate_mass - expected_mass).abs() < 1e-6);
        assert_eq!(result.volume_unit, "m³/hr");
    }

    #[test]
    fn test_untabulated_aperture_has_one_violation() {
        let report = validate(&imperial(275, 50.0));
        assert_eq!(
            report.violations(),
            &["Aperture size must be one of: 30, 50, 70, 90, 120, 150, 200, 250, 300, 350, 400".to_string()]
        );

        let err = calculate(&imperial(275, 50.0)).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_density_limits_follow_unit_system() {
        assert!(validate(&imperial(150, 200.0)).is_valid());
        assert!(!validate(&imperial(150, 250.0)).is_valid());

        let metric = GravityFlowInput {
            aperture_size_mm: 150,
            bulk_density: 3000.0,
            use_imperial: false,
        };
        assert!(validate(&metric).is_valid());
    }

    #[test]
    fn test_every_tabulated_aperture_computes() {
        for aperture in APERTURE_FLOW_RATES.keys() {
            assert!(calculate(&imperial(*aperture, 45.0)).is_ok());
        }
    }

    #[test]
    fn test_chart_highlights_selection() {
        let input = imperial(200, 50.0);
        let result = compute(&input).unwrap();
        let chart = chart(&input, &result).unwrap();

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].y.len(), 11);
        assert_eq!(chart.series[1].y, vec![889.94]);
        assert_eq!(chart.y_axis_title, "Flow Rate (ft³/hr)");
    }

    #[test]
    fn test_recommendations() {
        let input = imperial(30, 120.0);
        let result = compute(&input).unwrap();
        assert_eq!(
            recommendations(&input, &result),
            vec![
                "Low flow rate detected. Consider larger aperture size for higher throughput.".to_string(),
                "Small aperture size may be prone to bridging with cohesive materials.".to_string(),
                "High bulk density material. Consider structural reinforcement for equipment.".to_string(),
            ]
        );
    }

    #[test]
    fn test_use_imperial_defaults_to_metric() {
        let input: GravityFlowInput = serde_json::from_str(r#"{"aperture_size_mm": 70, "bulk_density": 700}"#).unwrap();
        assert_eq!(input.unit_system(), UnitSystem::Metric);
    }
}
