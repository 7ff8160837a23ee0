//! # bulkflow_core - Bulk Material Handling Calculation Engine
//!
//! `bulkflow_core` provides sizing and performance calculations for bulk
//! material handling equipment: gravity metering, spouts, belt, screw and
//! pneumatic conveyors, feeders, magnetic separation, screening and
//! classification. All inputs and outputs are JSON-serializable, so the
//! engine can sit behind a CLI, an HTTP service, or an LLM tool call.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, every validation violation reported
//! - **Renderer-Agnostic**: Charts are data, not pictures
//!
//! ## Quick Start
//!
//! ```rust
//! use bulkflow_core::calculations::gravity_flow::{calculate, GravityFlowInput};
//!
//! let input = GravityFlowInput {
//!     aperture_size_mm: 150,
//!     bulk_density: 50.0,
//!     use_imperial: true,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.flow_rate_volume - 568.57).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - One module per calculator
//! - [`registry`] - Dispatch of JSON requests by calculator id
//! - [`validation`] - Input rule checking that reports every violation
//! - [`chart`] - Declarative chart specifications
//! - [`lookup`] - Static reference tables with exact and nearest-key lookup
//! - [`units`] - Unit systems and metric/imperial conversion
//! - [`materials`] - Bulk material property catalog
//! - [`settings`] - Caller preferences loaded from JSON
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod chart;
pub mod errors;
pub mod lookup;
pub mod materials;
pub mod registry;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationResponse, CalculatorInfo};
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;
pub use units::UnitSystem;
