//! # Cable Sizing Selector
//!
//! Given an electrical load, selects the smallest compliant cable (or set
//! of parallel cables) that satisfies both current-carrying capacity and
//! voltage-drop limits, prices the selection, and attaches the validator's
//! findings.
//!
//! ## Selection algorithm
//!
//! 1. Inflate the load by the safety margin, if one is set.
//! 2. If the effective load exceeds the per-cable maximum, split it across
//!    the smallest parallel count that brings each cable under the
//!    preferred per-cable amps.
//! 3. Scan the material's rating table ascending for the first size whose
//!    derated rating carries the per-cable load.
//! 4. If a run length is known, check voltage drop against the applicable
//!    limit and escalate to the next larger size (keeping the parallel
//!    count) until compliant or the table is exhausted. Exhaustion is never
//!    silent: the result carries an error-severity warning and the
//!    engineer-verification flag.
//! 5. Price the final configuration through the decimal arithmetic core.
//!
//! When multiple sizes satisfy both constraints the smallest wins; the scan
//! proceeds from smallest to largest and stops at first success.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cables::CableDatabase;
//! use cable_core::standards::StandardsTable;
//! use cable_core::sizing::{calculate, SizingRequest};
//!
//! let mut request = SizingRequest::new(450.0, 400.0);
//! request.length_m = Some(50.0);
//!
//! let result = calculate(&request, CableDatabase::builtin(), StandardsTable::builtin()).unwrap();
//!
//! // 450 A exceeds the 400 A single-cable maximum, so the load splits
//! // across two cables of 225 A each.
//! assert_eq!(result.parallel_count, 2);
//! assert_eq!(result.size, "95");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cables::{CableDatabase, CableMaterial, CableRatingRow, InstallMethod, SystemPhase};
use crate::decimal::{self, DecimalValue};
use crate::errors::{CalcError, CalcResult};
use crate::standards::{
    StandardsTable, DEFAULT_DERATING_FACTOR, DEFAULT_MAX_AMPS_PER_CABLE,
    DEFAULT_PREFERRED_AMPS_PER_CABLE,
};
use crate::validation::{self, ValidationWarning};

/// Input parameters for a cable sizing calculation.
///
/// Configuration travels with the request (derating, per-cable limits,
/// voltage-drop override) rather than living in process-wide state, so the
/// engine can serve concurrent callers with different settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "load_amps": 450.0,
///   "voltage": 400.0,
///   "phase": "ThreePhase",
///   "length_m": 50.0,
///   "material": "Copper",
///   "install_method": "Air",
///   "derating_factor": 1.0,
///   "safety_margin": null,
///   "max_amps_per_cable": 400.0,
///   "preferred_amps_per_cable": 300.0,
///   "voltage_drop_limit_percent": null,
///   "termination_cost_per_end": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// Design load current (A)
    pub load_amps: f64,

    /// System voltage (V)
    pub voltage: f64,

    /// Phase arrangement; selects the voltage-drop factor and core count
    pub phase: SystemPhase,

    /// Total conductor run length (m); without it the voltage-drop check,
    /// pricing, and alternatives are skipped
    pub length_m: Option<f64>,

    /// Conductor material
    pub material: CableMaterial,

    /// Installation method
    pub install_method: InstallMethod,

    /// Derating factor (≤ 1 reduces effective capacity)
    pub derating_factor: f64,

    /// Optional multiplier inflating the load before selection
    pub safety_margin: Option<f64>,

    /// Largest load a single cable may be asked to carry before splitting
    pub max_amps_per_cable: f64,

    /// Target per-cable amps once the load is split into parallel runs
    pub preferred_amps_per_cable: f64,

    /// Explicit voltage-drop limit; falls back to the standards table
    pub voltage_drop_limit_percent: Option<Decimal>,

    /// Termination cost per cable end, applied as ends × parallel count × 2
    pub termination_cost_per_end: Option<Decimal>,
}

impl SizingRequest {
    /// Create a request with the documented defaults.
    pub fn new(load_amps: f64, voltage: f64) -> Self {
        SizingRequest {
            load_amps,
            voltage,
            phase: SystemPhase::default(),
            length_m: None,
            material: CableMaterial::default(),
            install_method: InstallMethod::default(),
            derating_factor: DEFAULT_DERATING_FACTOR,
            safety_margin: None,
            max_amps_per_cable: DEFAULT_MAX_AMPS_PER_CABLE,
            preferred_amps_per_cable: DEFAULT_PREFERRED_AMPS_PER_CABLE,
            voltage_drop_limit_percent: None,
            termination_cost_per_end: None,
        }
    }

    /// Load current inflated by the safety margin, if one is set.
    pub fn effective_load(&self) -> f64 {
        self.load_amps * self.safety_margin.unwrap_or(1.0)
    }

    /// The voltage-drop limit applicable to this request.
    pub fn drop_limit(&self, standards: &StandardsTable) -> Decimal {
        self.voltage_drop_limit_percent
            .unwrap_or_else(|| standards.drop_limit_for(self.voltage))
    }
}

/// Priced configuration: supply, install, and termination components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Supply cost across all parallel cables
    pub supply: Decimal,

    /// Install cost across all parallel cables
    pub install: Decimal,

    /// Termination cost (both ends of every cable); zero when not tracked
    pub termination: Decimal,

    /// Sum of the above
    pub total: Decimal,
}

/// A viable configuration priced alongside the recommendation.
///
/// Savings are measured against the most expensive viable alternative, so
/// a UI can show "choosing the recommendation saves X over the worst
/// compliant option".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingAlternative {
    /// Conductor size label (mm²)
    pub size: String,

    /// Number of parallel cables
    pub parallel_count: u32,

    /// Cost breakdown for this configuration
    pub costs: CostBreakdown,

    /// Resulting voltage-drop percentage
    pub voltage_drop_percent: Decimal,

    /// Cost saved versus the most expensive viable alternative
    pub savings: Decimal,

    /// Savings as a percentage of the most expensive alternative's total
    pub savings_percent: Decimal,
}

/// Results of a sizing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Recommended conductor size label (mm²)
    pub size: String,

    /// Recommended number of parallel cables
    pub parallel_count: u32,

    /// Load carried by each cable after splitting (A)
    pub per_cable_amps: f64,

    /// Impedance of the parallel group (ohm/km)
    pub effective_impedance_ohm_per_km: f64,

    /// Absolute voltage drop (V); present when a run length was supplied
    pub voltage_drop_volts: Option<Decimal>,

    /// Voltage drop as a percentage of system voltage
    pub voltage_drop_percent: Option<Decimal>,

    /// Priced configuration; present when a run length was supplied
    pub costs: Option<CostBreakdown>,

    /// Overall diameter of the selected cable variant (mm)
    pub diameter_mm: f64,

    /// Mass per metre of the selected cable variant (kg/m)
    pub mass_kg_per_m: f64,

    /// Validator findings for the final candidate
    pub warnings: Vec<ValidationWarning>,

    /// Whether an engineer must sign this selection off
    pub requires_verification: bool,

    /// True when no escalation beyond the capacity-driven size was needed
    pub capacity_sufficient: bool,

    /// Viable configurations ranked by cost, cheapest first
    pub alternatives: Vec<SizingAlternative>,
}

/// Select the minimal compliant cable configuration for a request.
///
/// This is a pure function over the request and the supplied reference
/// tables. Non-ideal inputs (zero load, implausible voltage) surface as
/// warnings on the result; hard errors are reserved for structurally
/// unusable requests (non-positive derating factor, empty rating table)
/// and decimal arithmetic failures.
pub fn calculate(
    request: &SizingRequest,
    db: &CableDatabase,
    standards: &StandardsTable,
) -> CalcResult<SizingResult> {
    if request.derating_factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "derating_factor",
            request.derating_factor.to_string(),
            "Derating factor must be positive",
        ));
    }
    let rows = db.rows(request.material);
    if rows.is_empty() {
        return Err(CalcError::calculation_failed(
            "sizing",
            format!("no rating rows for {}", request.material),
        ));
    }

    let effective_load = request.effective_load();

    // Parallel split: smallest n with load/n at or under the preferred
    // per-cable amps, triggered once the load exceeds the single-cable max.
    let parallel_count = if effective_load > request.max_amps_per_cable {
        if request.preferred_amps_per_cable <= 0.0 {
            return Err(CalcError::invalid_input(
                "preferred_amps_per_cable",
                request.preferred_amps_per_cable.to_string(),
                "Preferred amps per cable must be positive to split a load",
            ));
        }
        (effective_load / request.preferred_amps_per_cable).ceil() as u32
    } else {
        1
    };
    let per_cable_load = effective_load / parallel_count as f64;

    // Ascending first-fit capacity scan.
    let required_rating = per_cable_load / request.derating_factor;
    let capacity_index = rows
        .iter()
        .position(|row| row.rating_for(request.install_method) >= required_rating);
    let (start_index, capacity_feasible) = match capacity_index {
        Some(index) => (index, true),
        None => (rows.len() - 1, false),
    };

    let mut selection_warnings: Vec<ValidationWarning> = Vec::new();
    let mut forced_verification = false;

    if !capacity_feasible {
        forced_verification = true;
        selection_warnings.push(
            ValidationWarning::error(format!(
                "No {} size carries {:.0} A per cable ({}) even at the largest section - \
                 rating table exhausted",
                request.material, per_cable_load, request.install_method
            ))
            .with_field("load_amps"),
        );
    }

    // Voltage-drop escalation, bounded by table exhaustion.
    let mut index = start_index;
    let mut drop_figures: Option<(Decimal, Decimal)> = None;
    if let (Some(length), true) = (request.length_m, request.voltage > 0.0) {
        if length > 0.0 {
            let limit = request.drop_limit(standards);
            loop {
                let figures =
                    voltage_drop(&rows[index], request.phase, per_cable_load, length, request.voltage)?;
                if figures.1 <= limit {
                    drop_figures = Some(figures);
                    break;
                }
                if index + 1 < rows.len() {
                    debug!(
                        size = %rows[index].size,
                        drop_percent = %figures.1,
                        limit = %limit,
                        "voltage drop over limit, escalating to next size"
                    );
                    index += 1;
                } else {
                    drop_figures = Some(figures);
                    forced_verification = true;
                    selection_warnings.push(
                        ValidationWarning::error(format!(
                            "Voltage drop of {}% exceeds the {}% limit even at the largest \
                             {} section - rating table exhausted",
                            figures.1, limit, request.material
                        ))
                        .with_field("voltage_drop"),
                    );
                    break;
                }
            }
        }
    }

    let row = &rows[index];
    let capacity_sufficient = capacity_feasible && index == start_index;

    // Price the final configuration.
    let costs = match request.length_m {
        Some(length) if length > 0.0 => Some(price_configuration(
            row,
            parallel_count,
            length,
            request.termination_cost_per_end,
        )?),
        _ => None,
    };

    // Independent validation of the final candidate.
    let report = validation::validate_selection(
        row,
        request,
        parallel_count,
        drop_figures.map(|(_, pct)| pct),
        db,
        standards,
    );

    let alternatives = match request.length_m {
        Some(length) if length > 0.0 && request.voltage > 0.0 => enumerate_alternatives(
            rows,
            request,
            parallel_count,
            per_cable_load,
            required_rating,
            length,
            standards,
        )?,
        _ => Vec::new(),
    };

    let mut warnings = selection_warnings;
    let requires_verification = forced_verification || report.requires_verification;
    warnings.extend(report.warnings);

    Ok(SizingResult {
        size: row.size.clone(),
        parallel_count,
        per_cable_amps: per_cable_load,
        effective_impedance_ohm_per_km: row.impedance_ohm_per_km / parallel_count as f64,
        voltage_drop_volts: drop_figures.map(|(volts, _)| volts),
        voltage_drop_percent: drop_figures.map(|(_, pct)| pct),
        costs,
        diameter_mm: row.diameter_mm(request.phase),
        mass_kg_per_m: row.mass_kg_per_m(request.phase),
        warnings,
        requires_verification,
        capacity_sufficient,
        alternatives,
    })
}

/// Price a configuration: `cost/m × length × parallel count` for supply and
/// install, plus both ends of every cable when termination cost is tracked.
///
/// Each component is a single decimal-core chain, so rounding happens once
/// per figure.
pub fn price_configuration(
    row: &CableRatingRow,
    parallel_count: u32,
    length_m: f64,
    termination_cost_per_end: Option<Decimal>,
) -> CalcResult<CostBreakdown> {
    let length = decimal::from_f64(length_m)?;
    let supply = decimal::multiply([
        DecimalValue::from(row.supply_cost_per_m),
        length.into(),
        parallel_count.into(),
    ])?;
    let install = decimal::multiply([
        DecimalValue::from(row.install_cost_per_m),
        length.into(),
        parallel_count.into(),
    ])?;
    let termination = match termination_cost_per_end {
        Some(cost) => decimal::multiply([
            DecimalValue::from(cost),
            parallel_count.into(),
            2u32.into(),
        ])?,
        None => Decimal::ZERO,
    };
    let total = decimal::add([supply, install, termination])?;
    Ok(CostBreakdown {
        supply,
        install,
        termination,
        total,
    })
}

/// Voltage drop for one cable of a parallel group, in volts and as a
/// percentage of system voltage.
pub(crate) fn voltage_drop(
    row: &CableRatingRow,
    phase: SystemPhase,
    per_cable_amps: f64,
    length_m: f64,
    voltage: f64,
) -> CalcResult<(Decimal, Decimal)> {
    // factor is mV/A/m; the final element converts to volts.
    let volts = decimal::multiply([
        DecimalValue::from(row.drop_factor_mv(phase)),
        per_cable_amps.into(),
        length_m.into(),
        Decimal::new(1, 3).into(),
    ])?;
    let percent = decimal::percentage(volts, voltage)?;
    Ok((volts, percent))
}

/// Every configuration at the chosen parallel count that satisfies both
/// capacity and voltage drop, priced and ranked cheapest first, with
/// savings measured against the most expensive viable option.
fn enumerate_alternatives(
    rows: &[CableRatingRow],
    request: &SizingRequest,
    parallel_count: u32,
    per_cable_load: f64,
    required_rating: f64,
    length_m: f64,
    standards: &StandardsTable,
) -> CalcResult<Vec<SizingAlternative>> {
    let limit = request.drop_limit(standards);
    let mut viable: Vec<SizingAlternative> = Vec::new();

    for row in rows {
        if row.rating_for(request.install_method) < required_rating {
            continue;
        }
        let (_, drop_percent) =
            voltage_drop(row, request.phase, per_cable_load, length_m, request.voltage)?;
        if drop_percent > limit {
            continue;
        }
        let costs =
            price_configuration(row, parallel_count, length_m, request.termination_cost_per_end)?;
        viable.push(SizingAlternative {
            size: row.size.clone(),
            parallel_count,
            costs,
            voltage_drop_percent: drop_percent,
            savings: Decimal::ZERO,
            savings_percent: Decimal::ZERO,
        });
    }

    viable.sort_by(|a, b| a.costs.total.cmp(&b.costs.total));

    if let Some(most_expensive) = viable.last().map(|alt| alt.costs.total) {
        if !most_expensive.is_zero() {
            for alt in &mut viable {
                alt.savings = decimal::subtract(most_expensive, alt.costs.total)?;
                alt.savings_percent = decimal::percentage(alt.savings, most_expensive)?;
            }
        }
    }

    Ok(viable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sized(request: &SizingRequest) -> SizingResult {
        calculate(request, CableDatabase::builtin(), StandardsTable::builtin()).unwrap()
    }

    #[test]
    fn test_parallel_split_scenario() {
        // 450 A exceeds the 400 A single-cable max; splitting at the 300 A
        // preference gives two cables of 225 A, which 95 mm² copper carries
        // in air (269 A).
        let mut request = SizingRequest::new(450.0, 400.0);
        request.length_m = Some(50.0);
        let result = sized(&request);

        assert_eq!(result.parallel_count, 2);
        assert_eq!(result.per_cable_amps, 225.0);
        assert_eq!(result.size, "95");
        assert!(result.capacity_sufficient);
        assert!(!result.requires_verification);

        // total = 2 × (34.60 + 6.70) × 50 m
        let costs = result.costs.unwrap();
        assert_eq!(costs.supply, d("3460.00"));
        assert_eq!(costs.install, d("670.00"));
        assert_eq!(costs.total, d("4130.00"));
    }

    #[test]
    fn test_voltage_drop_escalation_scenario() {
        // 50 A at 230 V single-phase over 200 m: 10 mm² satisfies capacity
        // (67 A) but drops far too much voltage; the selector must walk up
        // the table to the smallest size that satisfies both constraints.
        let mut request = SizingRequest::new(50.0, 230.0);
        request.phase = SystemPhase::SinglePhase;
        request.length_m = Some(200.0);
        let result = sized(&request);

        assert_eq!(result.parallel_count, 1);
        assert_eq!(result.size, "70");
        assert!(!result.capacity_sufficient);
        assert!(!result.requires_verification);

        // 0.65 mV/A/m × 50 A × 200 m = 6.5 V = 2.83% of 230 V
        assert_eq!(result.voltage_drop_volts, Some(d("6.50")));
        assert_eq!(result.voltage_drop_percent, Some(d("2.83")));
    }

    #[test]
    fn test_smallest_size_wins_without_length() {
        let request = SizingRequest::new(100.0, 400.0);
        let result = sized(&request);

        // 25 mm² is the first copper size rated at or above 100 A in air.
        assert_eq!(result.size, "25");
        assert_eq!(result.parallel_count, 1);
        assert!(result.costs.is_none());
        assert!(result.voltage_drop_percent.is_none());
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_monotonic_in_load() {
        let db = CableDatabase::builtin();
        let mut last_index = 0;
        for load in [10.0, 50.0, 100.0, 200.0, 300.0, 390.0] {
            let result = sized(&SizingRequest::new(load, 400.0));
            let index = db.position(CableMaterial::Copper, &result.size).unwrap();
            assert!(
                index >= last_index,
                "load {} A shrank the recommendation to {}",
                load,
                result.size
            );
            last_index = index;
        }
    }

    #[test]
    fn test_capacity_soundness() {
        let mut request = SizingRequest::new(180.0, 400.0);
        request.derating_factor = 0.75;
        request.length_m = Some(30.0);
        let result = sized(&request);
        assert!(!result.requires_verification);

        let row = CableDatabase::builtin()
            .lookup(CableMaterial::Copper, &result.size)
            .unwrap();
        let derated = row.derated_rating(request.install_method, request.derating_factor);
        assert!(derated >= result.per_cable_amps);
    }

    #[test]
    fn test_parallel_count_minimality() {
        let result = sized(&SizingRequest::new(900.0, 400.0));
        assert_eq!(result.parallel_count, 3);
        // Two cables would put 450 A on each, over the 300 A preference.
        assert!(900.0 / 2.0 > DEFAULT_PREFERRED_AMPS_PER_CABLE);
        assert!(900.0 / 3.0 <= DEFAULT_PREFERRED_AMPS_PER_CABLE);
    }

    #[test]
    fn test_derating_drives_size_up() {
        let plain = sized(&SizingRequest::new(100.0, 400.0));
        let mut derated = SizingRequest::new(100.0, 400.0);
        derated.derating_factor = 0.8;
        let derated = sized(&derated);

        let db = CableDatabase::builtin();
        let plain_index = db.position(CableMaterial::Copper, &plain.size).unwrap();
        let derated_index = db.position(CableMaterial::Copper, &derated.size).unwrap();
        assert!(derated_index > plain_index);
    }

    #[test]
    fn test_safety_margin_inflates_load() {
        let mut request = SizingRequest::new(100.0, 400.0);
        request.safety_margin = Some(1.25);
        let result = sized(&request);

        // 125 A effective needs 35 mm² (145 A) rather than 25 mm² (118 A).
        assert_eq!(result.size, "35");
        assert_eq!(result.per_cable_amps, 125.0);
    }

    #[test]
    fn test_capacity_exhaustion_flags_verification() {
        // Forbid splitting so the load can never fit a single cable.
        let mut request = SizingRequest::new(2000.0, 400.0);
        request.max_amps_per_cable = 10_000.0;
        let result = sized(&request);

        assert_eq!(result.size, "630");
        assert!(result.requires_verification);
        assert!(!result.capacity_sufficient);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("rating table exhausted")));
    }

    #[test]
    fn test_voltage_drop_exhaustion_flags_verification() {
        let mut request = SizingRequest::new(50.0, 230.0);
        request.phase = SystemPhase::SinglePhase;
        request.length_m = Some(2000.0);
        let result = sized(&request);

        assert_eq!(result.size, "630");
        assert!(result.requires_verification);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("rating table exhausted")));
    }

    #[test]
    fn test_explicit_drop_limit_forces_escalation() {
        let mut request = SizingRequest::new(100.0, 400.0);
        request.length_m = Some(100.0);
        let relaxed = sized(&request);

        request.voltage_drop_limit_percent = Some(d("0.5"));
        let tight = sized(&request);

        let db = CableDatabase::builtin();
        let relaxed_index = db.position(CableMaterial::Copper, &relaxed.size).unwrap();
        let tight_index = db.position(CableMaterial::Copper, &tight.size).unwrap();
        assert!(tight_index > relaxed_index);
    }

    #[test]
    fn test_aluminium_table_is_used() {
        let mut request = SizingRequest::new(100.0, 400.0);
        request.material = CableMaterial::Aluminium;
        let result = sized(&request);

        // First aluminium size rated at or above 100 A in air is 35 mm².
        assert_eq!(result.size, "35");
    }

    #[test]
    fn test_termination_cost_included() {
        let mut request = SizingRequest::new(450.0, 400.0);
        request.length_m = Some(50.0);
        request.termination_cost_per_end = Some(d("45.00"));
        let result = sized(&request);

        let costs = result.costs.unwrap();
        // 45.00 × 2 cables × 2 ends
        assert_eq!(costs.termination, d("180.00"));
        assert_eq!(costs.total, d("4310.00"));
    }

    #[test]
    fn test_alternatives_ranked_by_cost() {
        let mut request = SizingRequest::new(450.0, 400.0);
        request.length_m = Some(50.0);
        let result = sized(&request);

        assert!(!result.alternatives.is_empty());
        // Cheapest (the recommendation) first, every entry compliant.
        assert_eq!(result.alternatives[0].size, result.size);
        for pair in result.alternatives.windows(2) {
            assert!(pair[0].costs.total <= pair[1].costs.total);
        }
        // Savings measure against the most expensive viable alternative.
        let most_expensive = result.alternatives.last().unwrap();
        assert_eq!(most_expensive.savings, d("0.00"));
        assert!(result.alternatives[0].savings > Decimal::ZERO);
    }

    #[test]
    fn test_zero_load_warns_instead_of_failing() {
        let result = sized(&SizingRequest::new(0.0, 400.0));
        assert!(result.requires_verification);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field.as_deref() == Some("load_amps")));
    }

    #[test]
    fn test_non_positive_derating_is_hard_error() {
        let mut request = SizingRequest::new(100.0, 400.0);
        request.derating_factor = 0.0;
        let err = calculate(&request, CableDatabase::builtin(), StandardsTable::builtin())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_effective_impedance_divides_by_parallel_count() {
        let mut request = SizingRequest::new(450.0, 400.0);
        request.length_m = Some(50.0);
        let result = sized(&request);

        let row = CableDatabase::builtin()
            .lookup(CableMaterial::Copper, &result.size)
            .unwrap();
        assert!(
            (result.effective_impedance_ohm_per_km - row.impedance_ohm_per_km / 2.0).abs() < 1e-12
        );
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let mut request = SizingRequest::new(450.0, 400.0);
        request.length_m = Some(50.0);
        let result = sized(&request);

        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: SizingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
