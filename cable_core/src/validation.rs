//! # Selection Validator
//!
//! An independent rule engine that inspects a proposed calculation (request
//! plus selected cable) and emits structured warnings. Warnings never
//! mutate the calculation; they are advisory output attached to a result,
//! and the `requires_verification` flag tells the calling application that
//! an engineer must sign the selection off before it is persisted.
//!
//! The validator is deliberately decoupled from the sizing selector so it
//! can be invoked standalone against a manually-entered cable choice: it
//! accepts any externally supplied configuration, not only ones the
//! selector produced.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cables::{CableDatabase, CableMaterial};
//! use cable_core::standards::StandardsTable;
//! use cable_core::sizing::SizingRequest;
//! use cable_core::validation::validate_selection;
//!
//! let db = CableDatabase::builtin();
//! let standards = StandardsTable::builtin();
//! let request = SizingRequest::new(200.0, 400.0);
//!
//! // A user override of 25 mm² copper cannot carry 200 A.
//! let row = db.lookup(CableMaterial::Copper, "25").unwrap();
//! let report = validate_selection(row, &request, 1, None, db, standards);
//!
//! assert!(report.has_errors());
//! assert!(report.requires_verification);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cables::{CableDatabase, CableRatingRow};
use crate::sizing::SizingRequest;
use crate::standards::StandardsTable;

/// Plausibility ceilings for input sanity warnings. Values beyond these are
/// not rejected, only flagged for a second look.
const PLAUSIBLE_MAX_LOAD_AMPS: f64 = 5000.0;
const PLAUSIBLE_MAX_VOLTAGE: f64 = 1000.0;
const PLAUSIBLE_MAX_LENGTH_M: f64 = 2000.0;

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The configuration is unsafe or non-compliant
    Error,
    /// The configuration or data deserves a second look
    Warning,
    /// Advisory note, no action required
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", name)
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// How serious the finding is
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Request field the finding pertains to, when there is one
    pub field: Option<String>,
}

impl ValidationWarning {
    /// Create an error-severity finding
    pub fn error(message: impl Into<String>) -> Self {
        ValidationWarning {
            severity: Severity::Error,
            message: message.into(),
            field: None,
        }
    }

    /// Create a warning-severity finding
    pub fn warning(message: impl Into<String>) -> Self {
        ValidationWarning {
            severity: Severity::Warning,
            message: message.into(),
            field: None,
        }
    }

    /// Create an info-severity finding
    pub fn info(message: impl Into<String>) -> Self {
        ValidationWarning {
            severity: Severity::Info,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the field this finding pertains to (builder pattern)
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// The validator's output: findings plus the sign-off flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All findings, in check order
    pub warnings: Vec<ValidationWarning>,

    /// Whether an engineer must verify this selection before it is used
    pub requires_verification: bool,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        ValidationReport::default()
    }

    /// Add a finding. Error-severity findings always require verification.
    pub fn push(&mut self, warning: ValidationWarning) {
        if warning.severity == Severity::Error {
            self.requires_verification = true;
        }
        self.warnings.push(warning);
    }

    /// Add a finding and independently require verification.
    pub fn push_requiring_verification(&mut self, warning: ValidationWarning) {
        self.requires_verification = true;
        self.warnings.push(warning);
    }

    /// Whether any finding is error severity
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == Severity::Error)
    }

    /// Findings of a given severity
    pub fn of_severity(&self, severity: Severity) -> Vec<&ValidationWarning> {
        self.warnings
            .iter()
            .filter(|w| w.severity == severity)
            .collect()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.requires_verification |= other.requires_verification;
        self.warnings.extend(other.warnings);
    }
}

/// Validate a candidate cable against a request.
///
/// `parallel_count` is the number of parallel cables sharing the load and
/// `drop_percent` the computed voltage-drop percentage when the run length
/// is known. The checks are independent; each contributes its own findings:
///
/// - input sanity (non-positive figures are errors, implausibly large ones
///   warnings)
/// - derated capacity against the per-cable load (never passes silently)
/// - impedance monotonicity around the candidate (a violation indicates a
///   reference-data entry error, independent of the request)
/// - voltage drop against the applicable limit, with an advisory note when
///   the drop sits within the standards buffer below the limit
pub fn validate_selection(
    row: &CableRatingRow,
    request: &SizingRequest,
    parallel_count: u32,
    drop_percent: Option<Decimal>,
    db: &CableDatabase,
    standards: &StandardsTable,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_input_sanity(request, &mut report);
    check_capacity(row, request, parallel_count, &mut report);
    check_impedance_plausibility(row, request, db, &mut report);
    check_voltage_drop(request, drop_percent, standards, &mut report);

    report
}

fn check_input_sanity(request: &SizingRequest, report: &mut ValidationReport) {
    if request.load_amps <= 0.0 {
        report.push(
            ValidationWarning::error("Load current must be positive").with_field("load_amps"),
        );
    } else if request.load_amps > PLAUSIBLE_MAX_LOAD_AMPS {
        report.push(
            ValidationWarning::warning(format!(
                "Load of {} A is outside the plausible range for a single LV run",
                request.load_amps
            ))
            .with_field("load_amps"),
        );
    }

    if request.voltage <= 0.0 {
        report.push(
            ValidationWarning::error("System voltage must be positive").with_field("voltage"),
        );
    } else if request.voltage > PLAUSIBLE_MAX_VOLTAGE {
        report.push(
            ValidationWarning::warning(format!(
                "{} V is above the low-voltage range this engine covers",
                request.voltage
            ))
            .with_field("voltage"),
        );
    }

    if let Some(length) = request.length_m {
        if length <= 0.0 {
            report.push(
                ValidationWarning::error("Run length must be positive").with_field("length_m"),
            );
        } else if length > PLAUSIBLE_MAX_LENGTH_M {
            report.push(
                ValidationWarning::warning(format!(
                    "Run length of {} m is unusually long - verify the route",
                    length
                ))
                .with_field("length_m"),
            );
        }
    }

    if request.derating_factor <= 0.0 {
        report.push(
            ValidationWarning::error("Derating factor must be positive")
                .with_field("derating_factor"),
        );
    } else if request.derating_factor > 1.0 {
        report.push(
            ValidationWarning::warning(
                "Derating factor above 1.0 inflates cable capacity - confirm intent",
            )
            .with_field("derating_factor"),
        );
    }

    if let Some(margin) = request.safety_margin {
        if margin < 1.0 {
            report.push(
                ValidationWarning::warning(
                    "Safety margin below 1.0 shrinks the design load - confirm intent",
                )
                .with_field("safety_margin"),
            );
        }
    }
}

fn check_capacity(
    row: &CableRatingRow,
    request: &SizingRequest,
    parallel_count: u32,
    report: &mut ValidationReport,
) {
    if request.load_amps <= 0.0 || request.derating_factor <= 0.0 || parallel_count == 0 {
        // Sanity findings already cover unusable inputs.
        return;
    }

    let per_cable = request.effective_load() / parallel_count as f64;
    let derated = row.derated_rating(request.install_method, request.derating_factor);
    if derated < per_cable {
        report.push(
            ValidationWarning::error(format!(
                "{} mm² carries {:.0} A derated at {} but must carry {:.0} A per cable",
                row.size,
                derated,
                request.install_method,
                per_cable
            ))
            .with_field("size"),
        );
    }
}

fn check_impedance_plausibility(
    row: &CableRatingRow,
    request: &SizingRequest,
    db: &CableDatabase,
    report: &mut ValidationReport,
) {
    // Only applies to rows that come from a known table; a fully custom row
    // has no neighbours to compare against.
    let Some(index) = db.position(request.material, &row.size) else {
        return;
    };
    let rows = db.rows(request.material);

    let smaller_ok = index == 0 || rows[index - 1].impedance_ohm_per_km > row.impedance_ohm_per_km;
    let larger_ok = index + 1 >= rows.len()
        || rows[index + 1].impedance_ohm_per_km < row.impedance_ohm_per_km;

    if !smaller_ok || !larger_ok {
        report.push_requiring_verification(ValidationWarning::warning(format!(
            "Impedance of {} mm² {} breaks the expected larger-size-lower-impedance \
             ordering - check the rating table data",
            row.size,
            request.material,
        )));
    }
}

fn check_voltage_drop(
    request: &SizingRequest,
    drop_percent: Option<Decimal>,
    standards: &StandardsTable,
    report: &mut ValidationReport,
) {
    let Some(drop_percent) = drop_percent else {
        return;
    };
    if request.voltage <= 0.0 {
        return;
    }

    let limit = request
        .voltage_drop_limit_percent
        .unwrap_or_else(|| standards.drop_limit_for(request.voltage));

    if drop_percent > limit {
        report.push(
            ValidationWarning::error(format!(
                "Voltage drop of {}% exceeds the {}% limit",
                drop_percent, limit
            ))
            .with_field("voltage_drop"),
        );
    } else if drop_percent > limit - standards.verification_buffer_percent {
        report.push(
            ValidationWarning::info(format!(
                "Voltage drop of {}% is within {} points of the {}% limit",
                drop_percent, standards.verification_buffer_percent, limit
            ))
            .with_field("voltage_drop"),
        );
    }
}
