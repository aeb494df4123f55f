//! Report reductions
//!
//! Pure functions that reduce hierarchical report rows into the summary
//! figures cached per company. Balance-position sections are classified by
//! case-insensitive substring on their titles; cash-position rows are read
//! from a fixed closing-balance column, skipping subtotal lines.

use rust_decimal::Decimal;

use crate::accounting::types::{ReportRow, ReportRowType};

/// Cell holding the amount on a balance-position row (cell 0 is the label).
const BALANCE_AMOUNT_CELL: usize = 1;
/// Closing-balance column on a cash-position row.
const CASH_AMOUNT_CELL: usize = 4;

/// Reduced balance position for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalancePosition {
    pub total_assets: Decimal,
    /// Accumulated as an absolute value.
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub is_balanced: bool,
}

/// Reduced cash position for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashPosition {
    pub total_cash: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionClass {
    Assets,
    Liabilities,
    Equity,
}

fn classify_section(title: &str) -> Option<SectionClass> {
    let title = title.to_lowercase();
    if title.contains("asset") {
        Some(SectionClass::Assets)
    } else if title.contains("liabilit") {
        Some(SectionClass::Liabilities)
    } else if title.contains("equity") {
        Some(SectionClass::Equity)
    } else {
        None
    }
}

/// Parse a positional cell as an amount. Missing or non-numeric cells are
/// non-contributory, not errors.
fn amount_cell(row: &ReportRow, index: usize) -> Decimal {
    row.cells
        .get(index)
        .and_then(|c| c.value.trim().parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

/// Sum each labeled section's rows into assets / liabilities / equity.
///
/// Nested sections inherit the classification of their nearest classified
/// ancestor; a titled subsection can override it. Exact-zero amounts are
/// skipped.
pub fn reduce_balance_position(rows: &[ReportRow]) -> BalancePosition {
    let mut position = BalancePosition::default();
    walk_balance(rows, None, &mut position);

    let difference =
        position.total_assets - (position.total_liabilities + position.total_equity);
    position.is_balanced = difference.abs() < Decimal::ONE;
    position
}

fn walk_balance(rows: &[ReportRow], current: Option<SectionClass>, acc: &mut BalancePosition) {
    for row in rows {
        match row.row_type {
            ReportRowType::Section => {
                let class = row
                    .title
                    .as_deref()
                    .and_then(classify_section)
                    .or(current);
                walk_balance(&row.rows, class, acc);
            }
            ReportRowType::Row => {
                let Some(class) = current else { continue };
                let amount = amount_cell(row, BALANCE_AMOUNT_CELL);
                if amount == Decimal::ZERO {
                    continue;
                }
                match class {
                    SectionClass::Assets => acc.total_assets += amount,
                    SectionClass::Liabilities => acc.total_liabilities += amount.abs(),
                    SectionClass::Equity => acc.total_equity += amount,
                }
            }
        }
    }
}

/// Sum the closing-balance column across leaf rows inside sections,
/// excluding subtotal lines (any row whose label contains "total").
pub fn reduce_cash_position(rows: &[ReportRow]) -> CashPosition {
    let mut position = CashPosition::default();
    walk_cash(rows, false, &mut position);
    position
}

fn walk_cash(rows: &[ReportRow], in_section: bool, acc: &mut CashPosition) {
    for row in rows {
        match row.row_type {
            ReportRowType::Section => walk_cash(&row.rows, true, acc),
            ReportRowType::Row => {
                if !in_section {
                    continue;
                }
                if row.label().to_lowercase().contains("total") {
                    continue;
                }
                acc.total_cash += amount_cell(row, CASH_AMOUNT_CELL);
            }
        }
    }
}
