//! # Standards Data and Request Defaults
//!
//! Regulatory thresholds are data, not code: the voltage-drop limits, the
//! near-limit buffer that triggers an advisory note, and the optimizer's
//! parallel-count ceiling all live in a [`StandardsTable`] that callers can
//! replace wholesale. The selection and validation algorithms never carry
//! these numbers themselves.
//!
//! Request defaults (derating factor, per-cable amp limits) are documented
//! constants applied when a request is built; they are never process-wide
//! mutable state, so the engine stays safely callable from concurrent
//! contexts with different settings.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default derating factor (no grouping/temperature reduction)
pub const DEFAULT_DERATING_FACTOR: f64 = 1.0;

/// Default maximum amps a single cable may be asked to carry before the
/// load is split into parallel runs
pub const DEFAULT_MAX_AMPS_PER_CABLE: f64 = 400.0;

/// Default target amps per cable once a load is split into parallel runs
pub const DEFAULT_PREFERRED_AMPS_PER_CABLE: f64 = 300.0;

/// A voltage-drop limit for a voltage class.
///
/// Applies to system voltages up to and including `max_voltage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropLimit {
    /// Upper bound of the voltage class (V)
    pub max_voltage: f64,

    /// Permitted voltage drop as a percentage of system voltage
    pub limit_percent: Decimal,
}

/// Data-driven standards table.
///
/// The shipped defaults follow common LV practice (tighter limits for
/// single-phase final-circuit voltages), but every figure here is intended
/// to be overridden by project or jurisdiction data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsTable {
    /// Voltage-drop limits by ascending voltage class
    pub voltage_drop_limits: Vec<VoltageDropLimit>,

    /// Fallback limit for voltages above every class
    pub fallback_drop_limit_percent: Decimal,

    /// How close (in percentage points) a computed drop may come to its
    /// limit before an advisory note is attached
    pub verification_buffer_percent: Decimal,

    /// Largest parallel-cable count the optimizer enumerates
    pub max_parallel_cables: u32,
}

impl StandardsTable {
    /// The built-in table shipped with the engine.
    pub fn builtin() -> &'static StandardsTable {
        &BUILTIN_STANDARDS
    }

    /// Voltage-drop limit (percent) applicable to a system voltage.
    pub fn drop_limit_for(&self, voltage: f64) -> Decimal {
        self.voltage_drop_limits
            .iter()
            .find(|limit| voltage <= limit.max_voltage)
            .map(|limit| limit.limit_percent)
            .unwrap_or(self.fallback_drop_limit_percent)
    }
}

impl Default for StandardsTable {
    fn default() -> Self {
        StandardsTable::builtin().clone()
    }
}

static BUILTIN_STANDARDS: Lazy<StandardsTable> = Lazy::new(|| StandardsTable {
    voltage_drop_limits: vec![
        VoltageDropLimit {
            max_voltage: 230.0,
            limit_percent: Decimal::new(40, 1), // 4.0%
        },
        VoltageDropLimit {
            max_voltage: 400.0,
            limit_percent: Decimal::new(50, 1), // 5.0%
        },
    ],
    fallback_drop_limit_percent: Decimal::new(60, 1), // 6.0%
    verification_buffer_percent: Decimal::new(5, 1),  // 0.5 points
    max_parallel_cables: 6,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_limit_by_voltage_class() {
        let standards = StandardsTable::builtin();
        assert_eq!(standards.drop_limit_for(230.0), Decimal::new(40, 1));
        assert_eq!(standards.drop_limit_for(400.0), Decimal::new(50, 1));
        // Above every class, the fallback applies
        assert_eq!(standards.drop_limit_for(690.0), Decimal::new(60, 1));
    }

    #[test]
    fn test_classes_are_inclusive_upper_bounds() {
        let standards = StandardsTable::builtin();
        assert_eq!(standards.drop_limit_for(229.9), Decimal::new(40, 1));
        assert_eq!(standards.drop_limit_for(230.1), Decimal::new(50, 1));
    }

    #[test]
    fn test_custom_table_overrides_builtin() {
        let custom = StandardsTable {
            voltage_drop_limits: vec![VoltageDropLimit {
                max_voltage: 1000.0,
                limit_percent: Decimal::new(25, 1),
            }],
            fallback_drop_limit_percent: Decimal::new(30, 1),
            verification_buffer_percent: Decimal::new(10, 1),
            max_parallel_cables: 4,
        };
        assert_eq!(custom.drop_limit_for(400.0), Decimal::new(25, 1));
        assert_eq!(custom.max_parallel_cables, 4);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let standards = StandardsTable::default();
        let json = serde_json::to_string(&standards).unwrap();
        let roundtrip: StandardsTable = serde_json::from_str(&json).unwrap();
        assert_eq!(standards, roundtrip);
    }
}
