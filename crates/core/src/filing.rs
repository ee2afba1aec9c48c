//! Filing records and the statement figures they report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance-sheet and income-statement figures reported in a filing.
///
/// Every field is optional: filers omit tags, and a missing figure
/// surfaces per ratio as `MissingField` instead of failing the filing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementFields {
    /// Total current assets.
    pub current_assets: Option<Decimal>,
    /// Total current liabilities.
    pub current_liabilities: Option<Decimal>,
    /// Inventory, net.
    pub inventory: Option<Decimal>,
    /// Total debt.
    pub total_debt: Option<Decimal>,
    /// Total stockholders' equity.
    pub total_equity: Option<Decimal>,
    /// Net income.
    pub net_income: Option<Decimal>,
    /// Total assets.
    pub total_assets: Option<Decimal>,
}

/// One regulatory filing: the date it became public and what it reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Date the filing was published.
    pub filing_date: NaiveDate,
    /// Fiscal period end the figures describe, when known.
    pub period_end: Option<NaiveDate>,
    /// Reported statement figures.
    pub fields: StatementFields,
}

impl FilingRecord {
    /// Creates a filing with no period end attached.
    #[must_use]
    pub fn new(filing_date: NaiveDate, fields: StatementFields) -> Self {
        Self {
            filing_date,
            period_end: None,
            fields,
        }
    }

    /// Attaches the fiscal period end the figures describe.
    #[must_use]
    pub fn with_period_end(mut self, period_end: NaiveDate) -> Self {
        self.period_end = Some(period_end);
        self
    }
}

/// Picks the latest fiscal period end at or before `date`.
///
/// Used when joining period-keyed statement figures to a filing date: a
/// filing only carries figures for periods that had already closed, so
/// the join never looks forward. `period_ends` must be sorted ascending.
#[must_use]
pub fn latest_period_end_on_or_before(
    period_ends: &[NaiveDate],
    date: NaiveDate,
) -> Option<NaiveDate> {
    let index = period_ends.partition_point(|end| *end <= date);
    index.checked_sub(1).map(|i| period_ends[i])
}
