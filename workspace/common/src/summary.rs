use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The headline figures of the dashboard, derived from the raw entity lists
/// on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    /// Sum of all account balances (signed; overdrawn accounts subtract).
    pub total_balance: Decimal,
    /// Sum of invested amounts across all positions.
    pub total_invested: Decimal,
    /// Sum of current values across all positions.
    pub total_current_value: Decimal,
    /// `total_current_value - total_invested`.
    pub investment_return: Decimal,
    /// Return as a percentage of the invested amount; 0 when nothing is invested.
    pub return_percent: Decimal,
    /// Income booked in the selected month.
    pub monthly_income: Decimal,
    /// Expenses booked in the selected month.
    pub monthly_expenses: Decimal,
    /// Sum of the open bills of all credit cards.
    pub open_bills: Decimal,
    /// `total_balance + total_current_value`.
    pub patrimony: Decimal,
}

/// Credit totals plus the utilization of each individual card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreditSummary {
    pub total_limit: Decimal,
    pub total_used: Decimal,
    /// `total_limit - total_used`.
    pub available: Decimal,
    pub cards: Vec<CardUtilization>,
}

/// Utilization of a single credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CardUtilization {
    pub card_id: i32,
    pub name: String,
    /// `current_bill / credit_limit * 100`; 0 when the limit is 0.
    pub utilization: Decimal,
}

/// Investment totals plus the allocation breakdown for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub total_current_value: Decimal,
    pub total_return: Decimal,
    /// Return as a percentage of the invested amount; 0 when nothing is invested.
    pub return_percent: Decimal,
    pub allocation: Vec<AllocationSlice>,
}

/// One slice of the allocation breakdown, grouped by asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AllocationSlice {
    /// Machine-readable asset class (e.g. "fixed_income").
    pub kind: String,
    /// Display label (e.g. "Renda Fixa").
    pub label: String,
    /// Sum of current values in this asset class.
    pub current_value: Decimal,
    /// Share of the grand total, in percent.
    pub percent: Decimal,
}
