//! # Chart Specifications
//!
//! Declarative plot descriptions handed to an external renderer. Nothing
//! here draws; a [`ChartSpec`] is plain data that serializes to JSON.
//!
//! Layout (title, axis titles, bar mode) is looked up by calculator id, so
//! every calculator's chart is styled the same way. The caller supplies the
//! computed series and, optionally, the point to highlight; the highlight is
//! appended as a red marker series.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::chart::{build_chart, AxisValue, HighlightPoint, Series};
//!
//! let bars = Series::bar("Flow Rate", vec![AxisValue::from(30.0), AxisValue::from(50.0)], vec![35.32, 98.88]);
//! let chart = build_chart("gravity_flow", vec![bars], Some(HighlightPoint::selected(50.0, 98.88))).unwrap();
//!
//! assert_eq!(chart.series.len(), 2);
//! assert_eq!(chart.title, "Flow Rate Comparison by Aperture Size");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::lookup::LookupTable;

/// Default series color
pub const PRIMARY_COLOR: &str = "#1f77b4";
/// Color for a second series on the same chart
pub const SECONDARY_COLOR: &str = "#ff7f0e";
/// Color for highlights and reference lines
pub const HIGHLIGHT_COLOR: &str = "red";

/// Default chart height in pixels
pub const CHART_HEIGHT: u32 = 400;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    /// Connected line with point markers
    Line,
    /// Unconnected point markers
    Markers,
    /// Dashed horizontal reference line
    ReferenceLine,
}

/// How multiple bar series share an x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    #[default]
    Overlay,
    Group,
}

/// An x-axis value: numeric, or a category label such as `8" Dia`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Label(String),
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Number(value)
    }
}

impl From<u32> for AxisValue {
    fn from(value: u32) -> Self {
        AxisValue::Number(f64::from(value))
    }
}

impl From<&str> for AxisValue {
    fn from(label: &str) -> Self {
        AxisValue::Label(label.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(label: String) -> Self {
        AxisValue::Label(label)
    }
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub x: Vec<AxisValue>,
    pub y: Vec<f64>,
    pub color: String,
    /// Marker size in pixels, when markers are drawn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<u32>,
}

impl Series {
    fn new(name: impl Into<String>, kind: SeriesKind, x: Vec<AxisValue>, y: Vec<f64>) -> Self {
        Series {
            name: name.into(),
            kind,
            x,
            y,
            color: PRIMARY_COLOR.to_string(),
            marker_size: None,
        }
    }

    pub fn bar(name: impl Into<String>, x: Vec<AxisValue>, y: Vec<f64>) -> Self {
        Series::new(name, SeriesKind::Bar, x, y)
    }

    pub fn line(name: impl Into<String>, x: Vec<AxisValue>, y: Vec<f64>) -> Self {
        Series {
            marker_size: Some(6),
            ..Series::new(name, SeriesKind::Line, x, y)
        }
    }

    /// Horizontal line at `level` spanning every x in `x`
    pub fn reference_line(name: impl Into<String>, x: Vec<AxisValue>, level: f64) -> Self {
        let y = vec![level; x.len()];
        Series {
            color: HIGHLIGHT_COLOR.to_string(),
            ..Series::new(name, SeriesKind::ReferenceLine, x, y)
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }
}

/// The caller's selection, drawn on top of the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightPoint {
    pub label: String,
    pub x: AxisValue,
    pub y: f64,
}

impl HighlightPoint {
    pub fn new(label: impl Into<String>, x: impl Into<AxisValue>, y: f64) -> Self {
        HighlightPoint {
            label: label.into(),
            x: x.into(),
            y,
        }
    }

    /// Highlight labelled "Selected"
    pub fn selected(x: impl Into<AxisValue>, y: f64) -> Self {
        HighlightPoint::new("Selected", x, y)
    }

    fn into_series(self) -> Series {
        Series {
            color: HIGHLIGHT_COLOR.to_string(),
            marker_size: Some(12),
            ..Series::new(self.label, SeriesKind::Markers, vec![self.x], vec![self.y])
        }
    }
}

/// A complete, renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub calculator: String,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub bar_mode: BarMode,
    pub show_legend: bool,
    pub height: u32,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Replace the y-axis title (e.g. to carry the caller's units)
    pub fn with_y_axis_title(mut self, title: impl Into<String>) -> Self {
        self.y_axis_title = title.into();
        self
    }

    /// Serialize for hand-off to a renderer
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Per-calculator chart styling.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub bar_mode: BarMode,
}

const fn layout(title: &'static str, x_axis_title: &'static str, y_axis_title: &'static str) -> ChartLayout {
    ChartLayout {
        title,
        x_axis_title,
        y_axis_title,
        bar_mode: BarMode::Overlay,
    }
}

static CHART_LAYOUTS: LookupTable<&str, ChartLayout> = LookupTable::new(
    "chart_layouts",
    &[
        ("gravity_flow", layout("Flow Rate Comparison by Aperture Size", "Aperture Size (mm)", "Flow Rate")),
        (
            "spout_requirements",
            ChartLayout {
                bar_mode: BarMode::Group,
                ..layout("Spout Capacity Comparison", "Spout Size", "Capacity (CFH)")
            },
        ),
        ("belt_horsepower", layout("Belt Horsepower by Incline Angle", "Incline Angle (degrees)", "Horsepower (HP)")),
        ("drum_burden", layout("Magnetic Force by Magnet Type", "Magnet Type", "Magnetic Force")),
        ("screw_conveyor", layout("Screw Conveyor Capacity vs RPM", "RPM", "Capacity (tons/hr)")),
        ("vibrating_feeder", layout("Vibrating Feeder Flow Rate vs Frequency", "Frequency (Hz)", "Flow Rate (tons/hr)")),
        (
            "magnetic_separator",
            layout(
                "Magnetic Separation Efficiency vs Magnetic Intensity",
                "Magnetic Intensity (Gauss)",
                "Separation Efficiency (%)",
            ),
        ),
        (
            "air_classifier",
            layout("Air Classification Efficiency vs Air Velocity", "Air Velocity (m/s)", "Classification Efficiency (%)"),
        ),
        (
            "pneumatic_conveying",
            layout("Pneumatic Conveying Pressure Drop vs Distance", "Conveying Distance (ft)", "Pressure Drop (kPa)"),
        ),
        ("screen_sizing", layout("Screening Efficiency vs Mesh Size", "Mesh Size (mm)", "Screening Efficiency (%)")),
        (
            "cyclone_separator",
            layout("Cyclone Collection Efficiency vs Particle Size", "Particle Size (microns)", "Collection Efficiency (%)"),
        ),
    ],
);

/// Assemble the chart for `calculator_id` from computed series.
///
/// Fails with `KeyNotFound` if the calculator has no chart layout.
pub fn build_chart(
    calculator_id: &str,
    computed_series: Vec<Series>,
    highlighted_point: Option<HighlightPoint>,
) -> CalcResult<ChartSpec> {
    let layout = CHART_LAYOUTS.lookup_exact(calculator_id)?;

    let mut series = computed_series;
    if let Some(point) = highlighted_point {
        series.push(point.into_series());
    }

    Ok(ChartSpec {
        calculator: calculator_id.to_string(),
        title: layout.title.to_string(),
        x_axis_title: layout.x_axis_title.to_string(),
        y_axis_title: layout.y_axis_title.to_string(),
        bar_mode: layout.bar_mode,
        show_legend: true,
        height: CHART_HEIGHT,
        series,
    })
}

/// Calculator ids that have a chart layout
pub fn charted_calculators() -> impl Iterator<Item = &'static str> {
    CHART_LAYOUTS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bars() -> Series {
        Series::bar("Flow Rate", vec![30u32.into(), 50u32.into()], vec![35.32, 98.88])
    }

    #[test]
    fn test_highlight_is_appended_last() {
        let chart = build_chart("gravity_flow", vec![sample_bars()], Some(HighlightPoint::selected(50u32, 98.88))).unwrap();
        assert_eq!(chart.series.len(), 2);

        let highlight = &chart.series[1];
        assert_eq!(highlight.name, "Selected");
        assert_eq!(highlight.kind, SeriesKind::Markers);
        assert_eq!(highlight.color, HIGHLIGHT_COLOR);
        assert_eq!(highlight.marker_size, Some(12));
        assert_eq!(highlight.x, vec![AxisValue::Number(50.0)]);
    }

    #[test]
    fn test_without_highlight() {
        let chart = build_chart("gravity_flow", vec![sample_bars()], None).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.x_axis_title, "Aperture Size (mm)");
        assert_eq!(chart.height, CHART_HEIGHT);
    }

    #[test]
    fn test_unknown_calculator_has_no_layout() {
        let err = build_chart("column_velocity", vec![], None).unwrap_err();
        assert_eq!(err.error_code(), "KEY_NOT_FOUND");
    }

    #[test]
    fn test_spout_chart_groups_bars() {
        let chart = build_chart("spout_requirements", vec![], None).unwrap();
        assert_eq!(chart.bar_mode, BarMode::Group);
    }

    #[test]
    fn test_reference_line_spans_x() {
        let line = Series::reference_line("Required Capacity", vec!["a".into(), "b".into(), "c".into()], 42.0);
        assert_eq!(line.y, vec![42.0, 42.0, 42.0]);
        assert_eq!(line.kind, SeriesKind::ReferenceLine);
    }

    #[test]
    fn test_json_shape() {
        let chart = build_chart("gravity_flow", vec![sample_bars()], None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
        assert_eq!(value["series"][0]["kind"], "bar");
        assert_eq!(value["series"][0]["x"][0], 30.0);
        assert_eq!(value["bar_mode"], "overlay");
        assert!(value["series"][0].get("marker_size").is_none());

        let labelled = Series::bar("Round Spout", vec!["8\" Dia".into()], vec![1.0]);
        let json = serde_json::to_value(&labelled).unwrap();
        assert_eq!(json["x"][0], "8\" Dia");
    }

    #[test]
    fn test_charted_calculators() {
        let ids: Vec<&str> = charted_calculators().collect();
        assert!(ids.contains(&"cyclone_separator"));
        assert!(!ids.contains(&"drag_slide"));
    }
}
