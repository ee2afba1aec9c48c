//! Financial ratios extracted from statement fields.
//!
//! Each ratio is a pure function over `StatementFields`. A filing that
//! cannot produce one ratio still produces the rest: `RatioSet::compute`
//! records each failure as an absent value and logs it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use event_study_core::error::{Result, StudyError};
use event_study_core::filing::StatementFields;

/// The ratios extracted from each filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    /// current_assets / current_liabilities
    CurrentRatio,
    /// (current_assets - inventory) / current_liabilities
    QuickRatio,
    /// total_debt / total_equity
    DebtToEquity,
    /// net_income / total_equity
    ReturnOnEquity,
    /// net_income / total_assets
    ReturnOnAssets,
}

impl RatioKind {
    /// All ratios in reporting order.
    pub const ALL: [RatioKind; 5] = [
        RatioKind::CurrentRatio,
        RatioKind::QuickRatio,
        RatioKind::DebtToEquity,
        RatioKind::ReturnOnEquity,
        RatioKind::ReturnOnAssets,
    ];

    /// Stable snake_case name used in output tables.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            RatioKind::CurrentRatio => "current_ratio",
            RatioKind::QuickRatio => "quick_ratio",
            RatioKind::DebtToEquity => "debt_to_equity",
            RatioKind::ReturnOnEquity => "return_on_equity",
            RatioKind::ReturnOnAssets => "return_on_assets",
        }
    }
}

fn require(field: Option<Decimal>, name: &'static str) -> Result<Decimal> {
    field.ok_or_else(|| StudyError::missing_field(name))
}

fn divide(numerator: Decimal, denominator: Decimal, ratio: RatioKind) -> Result<Decimal> {
    if denominator == Decimal::ZERO {
        return Err(StudyError::division_undefined(ratio.name()));
    }
    Ok(numerator / denominator)
}

/// Current ratio: current assets over current liabilities.
pub fn current_ratio(fields: &StatementFields) -> Result<Decimal> {
    let assets = require(fields.current_assets, "current_assets")?;
    let liabilities = require(fields.current_liabilities, "current_liabilities")?;
    divide(assets, liabilities, RatioKind::CurrentRatio)
}

/// Quick ratio: current assets net of inventory over current liabilities.
///
/// Unreported inventory counts as zero, so the quick ratio degrades to
/// the current ratio rather than going absent.
pub fn quick_ratio(fields: &StatementFields) -> Result<Decimal> {
    let assets = require(fields.current_assets, "current_assets")?;
    let liabilities = require(fields.current_liabilities, "current_liabilities")?;
    let inventory = fields.inventory.unwrap_or(Decimal::ZERO);
    divide(assets - inventory, liabilities, RatioKind::QuickRatio)
}

/// Debt-to-equity: total debt over total equity.
pub fn debt_to_equity(fields: &StatementFields) -> Result<Decimal> {
    let debt = require(fields.total_debt, "total_debt")?;
    let equity = require(fields.total_equity, "total_equity")?;
    divide(debt, equity, RatioKind::DebtToEquity)
}

/// Return on equity: net income over total equity.
pub fn return_on_equity(fields: &StatementFields) -> Result<Decimal> {
    let income = require(fields.net_income, "net_income")?;
    let equity = require(fields.total_equity, "total_equity")?;
    divide(income, equity, RatioKind::ReturnOnEquity)
}

/// Return on assets: net income over total assets.
pub fn return_on_assets(fields: &StatementFields) -> Result<Decimal> {
    let income = require(fields.net_income, "net_income")?;
    let assets = require(fields.total_assets, "total_assets")?;
    divide(income, assets, RatioKind::ReturnOnAssets)
}

/// Evaluates one ratio by kind.
///
/// # Errors
/// Returns `MissingField` or `DivisionUndefined` per the ratio's inputs.
pub fn extract(kind: RatioKind, fields: &StatementFields) -> Result<Decimal> {
    match kind {
        RatioKind::CurrentRatio => current_ratio(fields),
        RatioKind::QuickRatio => quick_ratio(fields),
        RatioKind::DebtToEquity => debt_to_equity(fields),
        RatioKind::ReturnOnEquity => return_on_equity(fields),
        RatioKind::ReturnOnAssets => return_on_assets(fields),
    }
}

/// The five ratios for one filing, absent where extraction failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    /// Current ratio, when computable.
    pub current_ratio: Option<Decimal>,
    /// Quick ratio, when computable.
    pub quick_ratio: Option<Decimal>,
    /// Debt-to-equity, when computable.
    pub debt_to_equity: Option<Decimal>,
    /// Return on equity, when computable.
    pub return_on_equity: Option<Decimal>,
    /// Return on assets, when computable.
    pub return_on_assets: Option<Decimal>,
}

impl RatioSet {
    /// Computes every ratio, recording failures as absent values.
    ///
    /// One undefined ratio never suppresses the others.
    #[must_use]
    pub fn compute(fields: &StatementFields) -> Self {
        Self {
            current_ratio: record(RatioKind::CurrentRatio, current_ratio(fields)),
            quick_ratio: record(RatioKind::QuickRatio, quick_ratio(fields)),
            debt_to_equity: record(RatioKind::DebtToEquity, debt_to_equity(fields)),
            return_on_equity: record(RatioKind::ReturnOnEquity, return_on_equity(fields)),
            return_on_assets: record(RatioKind::ReturnOnAssets, return_on_assets(fields)),
        }
    }

    /// Value of one ratio by kind.
    #[must_use]
    pub fn get(&self, kind: RatioKind) -> Option<Decimal> {
        match kind {
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::QuickRatio => self.quick_ratio,
            RatioKind::DebtToEquity => self.debt_to_equity,
            RatioKind::ReturnOnEquity => self.return_on_equity,
            RatioKind::ReturnOnAssets => self.return_on_assets,
        }
    }

    /// True when every ratio extracted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        RatioKind::ALL.iter().all(|kind| self.get(*kind).is_some())
    }
}

fn record(kind: RatioKind, outcome: Result<Decimal>) -> Option<Decimal> {
    match outcome {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(ratio = kind.name(), error = %error, "Ratio unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_fields() -> StatementFields {
        StatementFields {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            inventory: None,
            total_debt: Some(dec!(50)),
            total_equity: Some(dec!(150)),
            net_income: Some(dec!(30)),
            total_assets: Some(dec!(300)),
        }
    }

    // ============================================
    // Ratio Formula Tests
    // ============================================

    #[test]
    fn current_ratio_of_two() {
        let ratio = current_ratio(&full_fields()).unwrap();
        assert_eq!(ratio, dec!(2));
    }

    #[test]
    fn quick_ratio_defaults_missing_inventory_to_zero() {
        let ratio = quick_ratio(&full_fields()).unwrap();
        assert_eq!(ratio, dec!(2));
    }

    #[test]
    fn quick_ratio_subtracts_reported_inventory() {
        let fields = StatementFields {
            inventory: Some(dec!(50)),
            ..full_fields()
        };
        let ratio = quick_ratio(&fields).unwrap();
        assert_eq!(ratio, dec!(1.5));
    }

    #[test]
    fn debt_to_equity_of_one_third() {
        let ratio = debt_to_equity(&full_fields()).unwrap();
        assert!(
            (ratio - dec!(0.3333333333)).abs() < dec!(0.0000001),
            "ratio was {ratio}"
        );
    }

    #[test]
    fn return_on_equity_of_twenty_percent() {
        let ratio = return_on_equity(&full_fields()).unwrap();
        assert_eq!(ratio, dec!(0.2));
    }

    #[test]
    fn return_on_assets_of_ten_percent() {
        let ratio = return_on_assets(&full_fields()).unwrap();
        assert_eq!(ratio, dec!(0.1));
    }

    #[test]
    fn ratios_are_scale_invariant() {
        let thousands = full_fields();
        let units = StatementFields {
            current_assets: Some(dec!(200000)),
            current_liabilities: Some(dec!(100000)),
            inventory: None,
            total_debt: Some(dec!(50000)),
            total_equity: Some(dec!(150000)),
            net_income: Some(dec!(30000)),
            total_assets: Some(dec!(300000)),
        };

        assert_eq!(
            current_ratio(&thousands).unwrap(),
            current_ratio(&units).unwrap()
        );
        assert_eq!(
            debt_to_equity(&thousands).unwrap(),
            debt_to_equity(&units).unwrap()
        );
        assert_eq!(
            return_on_assets(&thousands).unwrap(),
            return_on_assets(&units).unwrap()
        );
    }

    // ============================================
    // Failure Mode Tests
    // ============================================

    #[test]
    fn missing_numerator_names_the_field() {
        let fields = StatementFields {
            net_income: None,
            ..full_fields()
        };

        match return_on_equity(&fields) {
            Err(StudyError::MissingField { field }) => assert_eq!(field, "net_income"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_denominator_names_the_field() {
        let fields = StatementFields {
            total_equity: None,
            ..full_fields()
        };

        match debt_to_equity(&fields) {
            Err(StudyError::MissingField { field }) => assert_eq!(field, "total_equity"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn zero_denominator_is_division_undefined() {
        let fields = StatementFields {
            total_equity: Some(dec!(0)),
            ..full_fields()
        };

        match return_on_equity(&fields) {
            Err(StudyError::DivisionUndefined { ratio }) => {
                assert_eq!(ratio, "return_on_equity");
            }
            other => panic!("expected DivisionUndefined, got {other:?}"),
        }
    }

    #[test]
    fn extract_dispatches_by_kind() {
        let fields = full_fields();
        for kind in RatioKind::ALL {
            let direct = extract(kind, &fields).unwrap();
            assert_eq!(RatioSet::compute(&fields).get(kind), Some(direct));
        }
    }

    // ============================================
    // RatioSet Tests
    // ============================================

    #[test]
    fn compute_fills_all_ratios_for_complete_fields() {
        let set = RatioSet::compute(&full_fields());
        assert!(set.is_complete());
        assert_eq!(set.current_ratio, Some(dec!(2)));
        assert_eq!(set.return_on_assets, Some(dec!(0.1)));
    }

    #[test]
    fn one_failed_ratio_leaves_the_rest_intact() {
        let fields = StatementFields {
            total_equity: Some(dec!(0)),
            ..full_fields()
        };

        let set = RatioSet::compute(&fields);
        assert_eq!(set.debt_to_equity, None);
        assert_eq!(set.return_on_equity, None);
        assert_eq!(set.current_ratio, Some(dec!(2)));
        assert_eq!(set.return_on_assets, Some(dec!(0.1)));
        assert!(!set.is_complete());
    }

    #[test]
    fn empty_fields_produce_an_empty_set() {
        let set = RatioSet::compute(&StatementFields::default());
        for kind in RatioKind::ALL {
            assert_eq!(set.get(kind), None, "{} should be absent", kind.name());
        }
    }
}
