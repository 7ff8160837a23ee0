//! # Column Velocity
//!
//! Material velocity in a vertical feed column above a molding machine,
//! derived from the machine's shot size and cycle time.
//!
//! All inputs and outputs are imperial.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::errors::CalcResult;
use crate::validation::ValidationReport;

const SECONDS_PER_HOUR: f64 = 3600.0;
const CUBIC_INCHES_PER_CUBIC_FOOT: f64 = 1728.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnVelocityInput {
    /// Shot size in lb
    pub molder_shot_size: f64,
    /// Cycle time in seconds
    pub molder_cycle_time: f64,
    /// Material density in lb/ft³
    pub material_density: f64,
    /// Cross-sectional area inside the tube in in²
    pub area_inside_tube: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnVelocityResult {
    pub flow_rate_lb_hr: f64,
    pub flow_rate_ft3_hr: f64,
    pub flow_rate_in3_sec: f64,
    /// Velocity in the column, in/s
    pub material_velocity: f64,
}

pub fn validate(input: &ColumnVelocityInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive("Molder shot size", input.molder_shot_size)
        .positive("Molder cycle time", input.molder_cycle_time)
        .positive("Material density", input.material_density)
        .positive("Area inside tube", input.area_inside_tube);
    report
}

pub fn calculate(input: &ColumnVelocityInput) -> CalcResult<ColumnVelocityResult> {
    evaluate::<ColumnVelocity>(input)
}

fn compute(input: &ColumnVelocityInput) -> ColumnVelocityResult {
    let flow_rate_lb_hr = input.molder_shot_size / input.molder_cycle_time * SECONDS_PER_HOUR;
    let flow_rate_ft3_hr = flow_rate_lb_hr / input.material_density;
    let flow_rate_in3_sec = flow_rate_ft3_hr * CUBIC_INCHES_PER_CUBIC_FOOT / SECONDS_PER_HOUR;

    ColumnVelocityResult {
        flow_rate_lb_hr,
        flow_rate_ft3_hr,
        flow_rate_in3_sec,
        material_velocity: flow_rate_in3_sec / input.area_inside_tube,
    }
}

fn recommendations(input: &ColumnVelocityInput, output: &ColumnVelocityResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.material_velocity < 0.1 {
        notes.push("Very low material velocity. Check for potential bridging or flow issues.");
    } else if output.material_velocity > 10.0 {
        notes.push("High material velocity. Consider larger tube diameter to reduce velocity.");
    }

    if output.flow_rate_lb_hr < 10.0 {
        notes.push("Low throughput rate. Verify this meets production requirements.");
    } else if output.flow_rate_lb_hr > 1000.0 {
        notes.push("High throughput rate. Ensure equipment can handle this capacity.");
    }

    if input.molder_cycle_time < 10.0 {
        notes.push("Very short cycle time. Verify material can flow adequately at this rate.");
    } else if input.molder_cycle_time > 300.0 {
        notes.push("Long cycle time. Consider process optimization for better efficiency.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct ColumnVelocity;

impl Calculation for ColumnVelocity {
    type Input = ColumnVelocityInput;
    type Output = ColumnVelocityResult;

    const ID: &'static str = "column_velocity";
    const NAME: &'static str = "Column Velocity Calculator";
    const CATEGORY: &'static str = "Flow Control";
    const DESCRIPTION: &'static str = "Calculate material velocity and flow rates in vertical columns";
    const FORMULA: &'static str = "v (in/s) = (shot / cycle × 3600 ÷ density) × 1728 ÷ 3600 ÷ tube area";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute(input))
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}
