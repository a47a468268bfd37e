//! # Cable-Schedule Optimizer
//!
//! Re-evaluates existing cable runs against the full space of valid
//! (size × parallel-count) configurations, prices each with the same cost
//! model the sizing selector uses, and ranks the results by cost with
//! savings measured against the currently installed configuration.
//!
//! Each run is optimized in isolation: there are no cross-entry
//! assumptions (no shared conduit capacity, no budget constraint across
//! runs), so a caller can sweep a whole schedule or a single entry and get
//! identical per-run answers. Results are derived, recomputable views over
//! a snapshot of schedule rows and rate tables; they are never persisted.
//!
//! ## Example
//!
//! ```rust
//! use uuid::Uuid;
//! use cable_core::cables::{CableDatabase, CableMaterial, InstallMethod, SystemPhase};
//! use cable_core::optimizer::{optimize_run, CableRun, OptimizerSettings};
//! use cable_core::standards::StandardsTable;
//!
//! let run = CableRun {
//!     id: Uuid::new_v4(),
//!     tag: "SB-04".to_string(),
//!     from_location: "MSB".to_string(),
//!     to_location: "DB-L2".to_string(),
//!     length_m: 50.0,
//!     load_amps: 100.0,
//!     voltage: 400.0,
//!     phase: SystemPhase::ThreePhase,
//!     material: CableMaterial::Copper,
//!     install_method: InstallMethod::Air,
//!     size: "185".to_string(),
//!     parallel_count: 1,
//! };
//!
//! let result = optimize_run(
//!     &run,
//!     &OptimizerSettings::default(),
//!     CableDatabase::builtin(),
//!     StandardsTable::builtin(),
//! )
//! .unwrap();
//!
//! // A 185 mm² cable on a 100 A run is heavily oversized; the cheapest
//! // compliant alternative saves money.
//! assert!(result.alternatives[0].savings > rust_decimal::Decimal::ZERO);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cables::{CableDatabase, CableMaterial, CableRatingRow, InstallMethod, SystemPhase};
use crate::decimal;
use crate::errors::{CalcError, CalcResult};
use crate::sizing::{price_configuration, voltage_drop, CostBreakdown};
use crate::standards::{StandardsTable, DEFAULT_DERATING_FACTOR};

/// A cable-schedule entry as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableRun {
    /// Stable identity of the schedule row
    pub id: Uuid,

    /// Circuit tag (e.g., "SB-04")
    pub tag: String,

    /// Supply end
    pub from_location: String,

    /// Load end
    pub to_location: String,

    /// Total conductor run length (m)
    pub length_m: f64,

    /// Design load current (A)
    pub load_amps: f64,

    /// System voltage (V)
    pub voltage: f64,

    /// Phase arrangement
    pub phase: SystemPhase,

    /// Conductor material
    pub material: CableMaterial,

    /// Installation method
    pub install_method: InstallMethod,

    /// Installed conductor size label (mm²)
    pub size: String,

    /// Installed parallel-cable count
    pub parallel_count: u32,
}

/// Sweep-wide calculation settings.
///
/// Defaults mirror the sizing selector's documented request defaults; the
/// parallel-count ceiling comes from the standards table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Derating factor applied to every run in the sweep
    pub derating_factor: f64,

    /// Explicit voltage-drop limit; falls back to the standards table
    pub voltage_drop_limit_percent: Option<Decimal>,

    /// Termination cost per cable end, when tracked
    pub termination_cost_per_end: Option<Decimal>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        OptimizerSettings {
            derating_factor: DEFAULT_DERATING_FACTOR,
            voltage_drop_limit_percent: None,
            termination_cost_per_end: None,
        }
    }
}

/// One priced configuration within an optimization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeConfig {
    /// Conductor size label (mm²)
    pub size: String,

    /// Number of parallel cables
    pub parallel_count: u32,

    /// Load carried by each cable (A)
    pub per_cable_amps: f64,

    /// Cost breakdown for this configuration
    pub costs: CostBreakdown,

    /// Resulting voltage-drop percentage
    pub voltage_drop_percent: Decimal,

    /// Cost saved versus the current configuration (negative = dearer)
    pub savings: Decimal,

    /// Savings as a percentage of the current configuration's total
    pub savings_percent: Decimal,

    /// Whether this entry is the installed configuration
    pub is_current_config: bool,

    /// Whether the configuration passes capacity and voltage-drop checks
    pub compliant: bool,

    /// Annotation when there is something to flag (non-compliance, or a
    /// drop sitting within the standards buffer of its limit)
    pub compliance_note: Option<String>,
}

/// Ranked alternatives for one cable run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Identity of the schedule row this was derived from
    pub run_id: Uuid,

    /// Circuit tag
    pub tag: String,

    /// Supply end
    pub from_location: String,

    /// Load end
    pub to_location: String,

    /// Total conductor run length (m)
    pub length_m: f64,

    /// Snapshot of the installed configuration, priced
    pub current: AlternativeConfig,

    /// All surviving configurations ranked by total cost ascending, with
    /// the installed configuration marked inline
    pub alternatives: Vec<AlternativeConfig>,
}

impl OptimizationResult {
    /// The cheapest compliant configuration (may be the installed one).
    pub fn best(&self) -> Option<&AlternativeConfig> {
        self.alternatives.iter().find(|alt| alt.compliant)
    }

    /// Savings available by moving to the cheapest compliant configuration.
    pub fn best_savings(&self) -> Decimal {
        self.best().map(|alt| alt.savings).unwrap_or(Decimal::ZERO)
    }
}

/// Cost roll-up across an optimized schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of runs summarized
    pub run_count: usize,

    /// Sum of current-configuration totals
    pub total_current_cost: Decimal,

    /// Sum of cheapest-compliant totals
    pub total_best_cost: Decimal,

    /// Difference between the two
    pub total_potential_savings: Decimal,
}

/// Optimize a single cable run.
///
/// Enumerates every table size at parallel counts from 1 up to the
/// standards ceiling, discards configurations that fail the capacity or
/// voltage-drop checks, prices the survivors identically to the sizing
/// selector, and ranks them by cost. The installed configuration is always
/// present and marked, even when it is itself non-compliant, so UIs can
/// render it inline with the ranked list.
pub fn optimize_run(
    run: &CableRun,
    settings: &OptimizerSettings,
    db: &CableDatabase,
    standards: &StandardsTable,
) -> CalcResult<OptimizationResult> {
    if settings.derating_factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "derating_factor",
            settings.derating_factor.to_string(),
            "Derating factor must be positive",
        ));
    }
    if run.length_m <= 0.0 {
        return Err(CalcError::invalid_input(
            "length_m",
            run.length_m.to_string(),
            "Run length must be positive",
        ));
    }
    if run.voltage <= 0.0 {
        return Err(CalcError::invalid_input(
            "voltage",
            run.voltage.to_string(),
            "System voltage must be positive",
        ));
    }

    let rows = db.rows(run.material);
    if rows.is_empty() {
        return Err(CalcError::calculation_failed(
            "optimization",
            format!("no rating rows for {}", run.material),
        ));
    }
    let current_row = db.lookup(run.material, &run.size)?;
    let current_count = run.parallel_count.max(1);
    let limit = settings
        .voltage_drop_limit_percent
        .unwrap_or_else(|| standards.drop_limit_for(run.voltage));

    let current_total = price_configuration(
        current_row,
        current_count,
        run.length_m,
        settings.termination_cost_per_end,
    )?
    .total;

    let mut alternatives: Vec<AlternativeConfig> = Vec::new();
    for row in rows {
        for count in 1..=standards.max_parallel_cables {
            let is_current =
                row.size.eq_ignore_ascii_case(run.size.trim()) && count == current_count;
            let candidate =
                build_config(row, count, run, settings, limit, standards, current_total)?;
            if !candidate.compliant && !is_current {
                continue;
            }
            alternatives.push(AlternativeConfig {
                is_current_config: is_current,
                ..candidate
            });
        }
    }

    // An installed parallel count above the enumeration ceiling still has
    // to appear in the list.
    if !alternatives.iter().any(|alt| alt.is_current_config) {
        let mut current =
            build_config(current_row, current_count, run, settings, limit, standards, current_total)?;
        current.is_current_config = true;
        alternatives.push(current);
    }

    alternatives.sort_by(|a, b| a.costs.total.cmp(&b.costs.total));

    let current = alternatives
        .iter()
        .find(|alt| alt.is_current_config)
        .cloned()
        .ok_or_else(|| CalcError::Internal {
            message: "installed configuration missing from alternatives".to_string(),
        })?;

    let best_savings = alternatives
        .iter()
        .find(|alt| alt.compliant)
        .map(|alt| alt.savings)
        .unwrap_or(Decimal::ZERO);
    debug!(
        tag = %run.tag,
        alternatives = alternatives.len(),
        best_savings = %best_savings,
        "optimized cable run"
    );

    Ok(OptimizationResult {
        run_id: run.id,
        tag: run.tag.clone(),
        from_location: run.from_location.clone(),
        to_location: run.to_location.clone(),
        length_m: run.length_m,
        current,
        alternatives,
    })
}

/// Optimize every run of a schedule, in input order.
pub fn optimize_schedule(
    runs: &[CableRun],
    settings: &OptimizerSettings,
    db: &CableDatabase,
    standards: &StandardsTable,
) -> CalcResult<Vec<OptimizationResult>> {
    runs.iter()
        .map(|run| optimize_run(run, settings, db, standards))
        .collect()
}

/// Roll an optimized schedule up into current/best cost totals.
pub fn summarize_schedule(results: &[OptimizationResult]) -> CalcResult<ScheduleSummary> {
    let total_current_cost = decimal::add(results.iter().map(|r| r.current.costs.total))?;
    let total_best_cost = decimal::add(
        results
            .iter()
            .map(|r| r.best().map(|alt| alt.costs.total).unwrap_or(r.current.costs.total)),
    )?;
    let total_potential_savings = decimal::subtract(total_current_cost, total_best_cost)?;
    Ok(ScheduleSummary {
        run_count: results.len(),
        total_current_cost,
        total_best_cost,
        total_potential_savings,
    })
}

fn build_config(
    row: &CableRatingRow,
    parallel_count: u32,
    run: &CableRun,
    settings: &OptimizerSettings,
    limit: Decimal,
    standards: &StandardsTable,
    current_total: Decimal,
) -> CalcResult<AlternativeConfig> {
    let per_cable_amps = run.load_amps / parallel_count as f64;
    let capacity_ok =
        row.derated_rating(run.install_method, settings.derating_factor) >= per_cable_amps;
    let (_, drop_percent) =
        voltage_drop(row, run.phase, per_cable_amps, run.length_m, run.voltage)?;
    let drop_ok = drop_percent <= limit;

    let costs = price_configuration(
        row,
        parallel_count,
        run.length_m,
        settings.termination_cost_per_end,
    )?;
    let savings = decimal::subtract(current_total, costs.total)?;
    let savings_percent = if current_total.is_zero() {
        Decimal::ZERO
    } else {
        decimal::percentage(savings, current_total)?
    };

    let compliance_note = if !capacity_ok {
        Some("insufficient capacity".to_string())
    } else if !drop_ok {
        Some("voltage drop exceeds limit".to_string())
    } else if drop_percent > limit - standards.verification_buffer_percent {
        Some("within voltage-drop margin".to_string())
    } else {
        None
    };

    Ok(AlternativeConfig {
        size: row.size.clone(),
        parallel_count,
        per_cable_amps,
        costs,
        voltage_drop_percent: drop_percent,
        savings,
        savings_percent,
        is_current_config: false,
        compliant: capacity_ok && drop_ok,
        compliance_note,
    })
}
