//! # cable_core - Cable Sizing and Cost-Optimization Engine
//!
//! `cable_core` is the computational heart of Cableplan, selecting the
//! smallest compliant low-voltage cable (or set of parallel cables) for an
//! electrical load, pricing that selection, validating it against
//! engineering sanity rules, and ranking cost-saving alternatives.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Exact money**: Every cost and voltage-drop figure routes through a
//!   decimal arithmetic core; binary floating point never touches money
//! - **Data-driven standards**: Rating tables and regulatory limits are
//!   replaceable data, not constants baked into algorithms
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_core::cables::CableDatabase;
//! use cable_core::sizing::{calculate, SizingRequest};
//! use cable_core::standards::StandardsTable;
//!
//! let mut request = SizingRequest::new(450.0, 400.0);
//! request.length_m = Some(50.0);
//!
//! let result = calculate(&request, CableDatabase::builtin(), StandardsTable::builtin()).unwrap();
//!
//! assert_eq!(result.size, "95");
//! assert_eq!(result.parallel_count, 2);
//!
//! // Serialize for the UI or an export pipeline
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("parallel_count"));
//! ```
//!
//! ## Modules
//!
//! - [`decimal`] - Exact base-10 arithmetic primitives
//! - [`cables`] - Material-specific cable rating tables
//! - [`standards`] - Configurable regulatory limits and request defaults
//! - [`sizing`] - Minimal-compliant-cable selection and pricing
//! - [`validation`] - Independent rule engine over proposed selections
//! - [`optimizer`] - Cost-ranked alternatives for existing cable runs
//! - [`reporting`] - Category/grand cost-report aggregation
//! - [`errors`] - Structured error types

pub mod cables;
pub mod decimal;
pub mod errors;
pub mod optimizer;
pub mod reporting;
pub mod sizing;
pub mod standards;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use cables::{CableDatabase, CableMaterial, CableRatingRow, InstallMethod, SystemPhase};
pub use errors::{CalcError, CalcResult};
pub use optimizer::{CableRun, OptimizationResult, OptimizerSettings};
pub use reporting::{CostReport, GrandTotals};
pub use sizing::{SizingRequest, SizingResult};
pub use standards::StandardsTable;
pub use validation::{Severity, ValidationReport, ValidationWarning};
