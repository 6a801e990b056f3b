use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Income and expense totals of a single calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyFlow {
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthlyFlow {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }
}

/// A chronological run of monthly flows, oldest month first, used by the
/// income-versus-expense bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyFlowSeries {
    pub points: Vec<MonthlyFlow>,
}

impl MonthlyFlowSeries {
    pub fn new(points: Vec<MonthlyFlow>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_flow_starts_at_zero() {
        let flow = MonthlyFlow::new(2025, 6);
        assert_eq!(flow.income, Decimal::ZERO);
        assert_eq!(flow.expense, Decimal::ZERO);
    }

    #[test]
    fn test_series_serializes_month_fields() {
        let series = MonthlyFlowSeries::new(vec![MonthlyFlow::new(2025, 1)]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["points"][0]["year"], 2025);
        assert_eq!(json["points"][0]["month"], 1);
    }
}
