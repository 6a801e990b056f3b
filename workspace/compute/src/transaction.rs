use chrono::NaiveDate;
use common::{MonthlyFlow, MonthlyFlowSeries};
use model::entities::transaction;
use model::entities::transaction::{Category, TransactionKind};
use tracing::instrument;

use crate::error::{ComputeError, Result};

/// First and last day of the given calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || ComputeError::InvalidPeriod { year, month };

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

    Ok((start, end))
}

/// The calendar month immediately before the given one.
fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Income and expense totals of one calendar month.
///
/// Transfers contribute to neither side.
pub fn monthly_flow(
    entries: &[transaction::Model],
    year: i32,
    month: u32,
) -> Result<MonthlyFlow> {
    let (start, end) = month_bounds(year, month)?;

    let mut flow = MonthlyFlow::new(year, month);
    for entry in entries {
        if entry.date < start || entry.date > end {
            continue;
        }
        match entry.kind {
            TransactionKind::Income => flow.income += entry.amount,
            TransactionKind::Expense => flow.expense += entry.amount,
            TransactionKind::Transfer => {}
        }
    }

    Ok(flow)
}

/// Monthly flows for the `months` calendar months ending at the anchor month,
/// oldest first. The anchor month itself is included.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn trailing_flows(
    entries: &[transaction::Model],
    year: i32,
    month: u32,
    months: usize,
) -> Result<MonthlyFlowSeries> {
    // Validate the anchor before walking backwards from it.
    month_bounds(year, month)?;

    let mut periods = Vec::with_capacity(months);
    let mut period = (year, month);
    for _ in 0..months {
        periods.push(period);
        period = previous_month(period.0, period.1);
    }
    periods.reverse();

    let points = periods
        .into_iter()
        .map(|(y, m)| monthly_flow(entries, y, m))
        .collect::<Result<Vec<_>>>()?;

    Ok(MonthlyFlowSeries::new(points))
}

/// Pure filter over ledger entries: substring search on the description plus
/// exact kind and category constraints. Absent fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &transaction::Model) -> bool {
        if let Some(term) = &self.search {
            if !entry
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(category) = self.category {
            if entry.category != category {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, entries: Vec<transaction::Model>) -> Vec<transaction::Model> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}
