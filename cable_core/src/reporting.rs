//! # Cost-Report Aggregator
//!
//! Rolls line items and variation records up into category and grand
//! totals through the decimal arithmetic core. The same aggregation serves
//! interactive display and document export, and [`compare_grand_totals`]
//! exists precisely so two independently computed roll-ups can be checked
//! against each other before a report leaves the building.
//!
//! A variation represents a change not present in the baseline or the
//! previous report, so its amount contributes zero to the original-budget
//! and previous-report figures and its full amount to anticipated final.
//!
//! ## Example
//!
//! ```rust
//! use uuid::Uuid;
//! use cable_core::reporting::{build_report, CostCategory, CostLineItem, VariationRecord};
//!
//! let cat = CostCategory {
//!     id: Uuid::new_v4(),
//!     code: "E10".to_string(),
//!     name: "Submains".to_string(),
//! };
//! let item = CostLineItem {
//!     category_id: cat.id,
//!     description: "SB-04 95mm2 run".to_string(),
//!     original_budget: "4130.00".parse().unwrap(),
//!     previous_report: "4130.00".parse().unwrap(),
//!     anticipated_final: "4130.00".parse().unwrap(),
//! };
//!
//! let report = build_report(&[cat], &[item], &[]).unwrap();
//! assert_eq!(report.totals.anticipated_final.to_string(), "4130.00");
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal;
use crate::errors::{CalcError, CalcResult};

/// Tolerance used when reconciling independently computed totals.
pub fn default_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// A cost category (report section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCategory {
    /// Stable identity
    pub id: Uuid,

    /// Short code (e.g., "E10")
    pub code: String,

    /// Display name
    pub name: String,
}

/// A priced line item within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    /// Category this item belongs to
    pub category_id: Uuid,

    /// What the money buys
    pub description: String,

    /// Baseline budget figure
    pub original_budget: Decimal,

    /// Figure carried in the previous report
    pub previous_report: Decimal,

    /// Current best estimate of final cost
    pub anticipated_final: Decimal,
}

/// An approved change against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRecord {
    /// Category the variation applies to
    pub category_id: Uuid,

    /// Variation reference (e.g., "VO-012")
    pub reference: String,

    /// Amount of the change (may be negative)
    pub amount: Decimal,
}

/// Aggregated figures for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category identity
    pub category_id: Uuid,

    /// Short code
    pub code: String,

    /// Display name
    pub name: String,

    /// Sum of line-item original budgets
    pub original_budget: Decimal,

    /// Sum of line-item previous-report figures
    pub previous_report: Decimal,

    /// Sum of line-item anticipated finals plus variation amounts
    pub anticipated_final: Decimal,

    /// Anticipated final against original budget
    pub variance: Decimal,

    /// This category's share of the grand anticipated final (percent)
    pub percent_of_total: Decimal,
}

/// Aggregated figures across all categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrandTotals {
    /// Sum of category original budgets
    pub original_budget: Decimal,

    /// Sum of category previous-report figures
    pub previous_report: Decimal,

    /// Sum of category anticipated finals
    pub anticipated_final: Decimal,

    /// Anticipated final against original budget
    pub variance: Decimal,
}

/// A complete cost report: per-category totals plus grand totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// One total per supplied category, in input order
    pub categories: Vec<CategoryTotal>,

    /// Roll-up across every category
    pub totals: GrandTotals,

    /// When this report was derived
    pub generated_at: DateTime<Utc>,
}

/// Aggregate line items and variations into a cost report.
///
/// Every line item and variation must reference a supplied category;
/// a dangling reference is a hard error rather than a silently dropped
/// amount.
pub fn build_report(
    categories: &[CostCategory],
    items: &[CostLineItem],
    variations: &[VariationRecord],
) -> CalcResult<CostReport> {
    for item in items {
        if !categories.iter().any(|c| c.id == item.category_id) {
            return Err(CalcError::invalid_input(
                "category_id",
                item.category_id.to_string(),
                format!("line item '{}' references an unknown category", item.description),
            ));
        }
    }
    for variation in variations {
        if !categories.iter().any(|c| c.id == variation.category_id) {
            return Err(CalcError::invalid_input(
                "category_id",
                variation.category_id.to_string(),
                format!("variation '{}' references an unknown category", variation.reference),
            ));
        }
    }

    let mut category_totals = Vec::with_capacity(categories.len());
    for category in categories {
        let own_items = items.iter().filter(|i| i.category_id == category.id);
        let own_variations = variations.iter().filter(|v| v.category_id == category.id);

        let original_budget = decimal::add(own_items.clone().map(|i| i.original_budget))?;
        let previous_report = decimal::add(own_items.clone().map(|i| i.previous_report))?;
        // Variations count toward anticipated final only.
        let anticipated_final = decimal::add(
            own_items
                .map(|i| i.anticipated_final)
                .chain(own_variations.map(|v| v.amount)),
        )?;
        let variance = decimal::variance(original_budget, anticipated_final)?;

        category_totals.push(CategoryTotal {
            category_id: category.id,
            code: category.code.clone(),
            name: category.name.clone(),
            original_budget,
            previous_report,
            anticipated_final,
            variance,
            percent_of_total: Decimal::ZERO,
        });
    }

    let original_budget = decimal::add(category_totals.iter().map(|c| c.original_budget))?;
    let previous_report = decimal::add(category_totals.iter().map(|c| c.previous_report))?;
    let anticipated_final = decimal::add(category_totals.iter().map(|c| c.anticipated_final))?;
    let variance = decimal::variance(original_budget, anticipated_final)?;

    if !anticipated_final.is_zero() {
        for total in &mut category_totals {
            total.percent_of_total =
                decimal::percentage(total.anticipated_final, anticipated_final)?;
        }
    }

    Ok(CostReport {
        categories: category_totals,
        totals: GrandTotals {
            original_budget,
            previous_report,
            anticipated_final,
            variance,
        },
        generated_at: Utc::now(),
    })
}

/// Check two independently computed grand totals against each other.
///
/// Returns the names of fields that disagree by more than `tolerance`;
/// an empty result means the totals reconcile.
pub fn compare_grand_totals(
    a: &GrandTotals,
    b: &GrandTotals,
    tolerance: Decimal,
) -> Vec<&'static str> {
    let mut mismatched = Vec::new();
    let fields = [
        ("original_budget", a.original_budget, b.original_budget),
        ("previous_report", a.previous_report, b.previous_report),
        ("anticipated_final", a.anticipated_final, b.anticipated_final),
        ("variance", a.variance, b.variance),
    ];
    for (name, left, right) in fields {
        if (left - right).abs() > tolerance {
            mismatched.push(name);
        }
    }
    mismatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn category(code: &str) -> CostCategory {
        CostCategory {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: format!("Category {}", code),
        }
    }

    fn item(category_id: Uuid, amount: &str) -> CostLineItem {
        CostLineItem {
            category_id,
            description: "line".to_string(),
            original_budget: d(amount),
            previous_report: d(amount),
            anticipated_final: d(amount),
        }
    }

    #[test]
    fn test_variation_counts_toward_anticipated_final_only() {
        // Budgets of 1000 and 2000 with one 500 variation: anticipated
        // final is 3500 while original budget stays 3000.
        let a = category("E10");
        let b = category("E20");
        let items = vec![item(a.id, "1000.00"), item(b.id, "2000.00")];
        let variations = vec![VariationRecord {
            category_id: a.id,
            reference: "VO-001".to_string(),
            amount: d("500.00"),
        }];

        let report = build_report(&[a, b], &items, &variations).unwrap();
        assert_eq!(report.totals.original_budget, d("3000.00"));
        assert_eq!(report.totals.previous_report, d("3000.00"));
        assert_eq!(report.totals.anticipated_final, d("3500.00"));
        assert_eq!(report.totals.variance, d("500.00"));
    }

    #[test]
    fn test_category_totals_sum_to_grand_total() {
        let a = category("E10");
        let b = category("E20");
        let c = category("E30");
        let items = vec![
            item(a.id, "1234.56"),
            item(a.id, "78.90"),
            item(b.id, "0.01"),
            item(c.id, "99999.99"),
        ];
        let variations = vec![VariationRecord {
            category_id: b.id,
            reference: "VO-002".to_string(),
            amount: d("-0.02"),
        }];

        let report = build_report(&[a, b, c], &items, &variations).unwrap();
        let summed = decimal::add(report.categories.iter().map(|c| c.anticipated_final)).unwrap();
        assert!((summed - report.totals.anticipated_final).abs() <= default_tolerance());
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], &[], &[]).unwrap();
        assert!(report.categories.is_empty());
        assert!(report.totals.anticipated_final.is_zero());
        assert!(report.totals.variance.is_zero());
    }

    #[test]
    fn test_all_variation_report() {
        // A category can consist of nothing but variations.
        let a = category("E10");
        let variations = vec![
            VariationRecord {
                category_id: a.id,
                reference: "VO-001".to_string(),
                amount: d("250.00"),
            },
            VariationRecord {
                category_id: a.id,
                reference: "VO-002".to_string(),
                amount: d("125.50"),
            },
        ];

        let report = build_report(&[a], &[], &variations).unwrap();
        assert!(report.totals.original_budget.is_zero());
        assert_eq!(report.totals.anticipated_final, d("375.50"));
        assert_eq!(report.totals.variance, d("375.50"));
    }

    #[test]
    fn test_percent_of_total() {
        let a = category("E10");
        let b = category("E20");
        let items = vec![item(a.id, "750.00"), item(b.id, "250.00")];

        let report = build_report(&[a, b], &items, &[]).unwrap();
        assert_eq!(report.categories[0].percent_of_total, d("75.00"));
        assert_eq!(report.categories[1].percent_of_total, d("25.00"));
    }

    #[test]
    fn test_unknown_category_is_hard_error() {
        let a = category("E10");
        let stray = item(Uuid::new_v4(), "100.00");
        let err = build_report(&[a], &[stray], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_compare_grand_totals_reconciles() {
        let a = category("E10");
        let items = vec![item(a.id, "1000.00")];
        let first = build_report(std::slice::from_ref(&a), &items, &[]).unwrap();
        let second = build_report(&[a], &items, &[]).unwrap();

        let mismatched =
            compare_grand_totals(&first.totals, &second.totals, default_tolerance());
        assert!(mismatched.is_empty());
    }

    #[test]
    fn test_compare_grand_totals_names_mismatches() {
        let totals = GrandTotals {
            original_budget: d("1000.00"),
            previous_report: d("1000.00"),
            anticipated_final: d("1500.00"),
            variance: d("500.00"),
        };
        let skewed = GrandTotals {
            original_budget: d("1000.00"),
            previous_report: d("1000.01"), // inside tolerance
            anticipated_final: d("1500.75"),
            variance: d("500.75"),
        };

        let mismatched = compare_grand_totals(&totals, &skewed, default_tolerance());
        assert_eq!(mismatched, vec!["anticipated_final", "variance"]);
    }

    #[test]
    fn test_report_serialization_roundtrip() {
        let a = category("E10");
        let items = vec![item(a.id, "4130.00")];
        let report = build_report(&[a], &items, &[]).unwrap();

        let json = serde_json::to_string_pretty(&report).unwrap();
        let roundtrip: CostReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }
}
