pub mod account;
pub mod card;
pub mod error;
pub mod investment;
pub mod transaction;

pub use error::{ComputeError, Result};

use common::DashboardSummary;
use model::entities::{account as account_entity, credit_card, investment as investment_entity};
use model::entities::transaction as transaction_entity;
use tracing::instrument;

/// Derives the dashboard overview from the raw entity lists.
///
/// Everything is recomputed from scratch on every call; nothing is cached at
/// this layer. The `(year, month)` pair selects the calendar month for the
/// income/expense figures.
#[instrument(skip_all, fields(
    num_accounts = accounts.len(),
    num_cards = cards.len(),
    num_investments = investments.len(),
    num_entries = entries.len(),
))]
pub fn dashboard_summary(
    accounts: &[account_entity::Model],
    cards: &[credit_card::Model],
    investments: &[investment_entity::Model],
    entries: &[transaction_entity::Model],
    year: i32,
    month: u32,
) -> Result<DashboardSummary> {
    let flow = transaction::monthly_flow(entries, year, month)?;

    let total_balance = account::total_balance(accounts);
    let total_invested = investment::invested_total(investments);
    let total_current_value = investment::current_total(investments);

    Ok(DashboardSummary {
        total_balance,
        total_invested,
        total_current_value,
        investment_return: total_current_value - total_invested,
        return_percent: investment::return_percent(total_invested, total_current_value),
        monthly_income: flow.income,
        monthly_expenses: flow.expense,
        open_bills: card::total_used(cards),
        patrimony: total_balance + total_current_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::entities::account::AccountType;
    use model::entities::investment::InvestmentKind;
    use model::entities::transaction::{Category, TransactionKind};
    use rust_decimal::Decimal;

    fn account(balance: Decimal) -> account_entity::Model {
        account_entity::Model {
            id: 1,
            name: "Nubank".to_string(),
            account_type: AccountType::Checking,
            bank: Some("Nubank".to_string()),
            balance,
            color: "purple".to_string(),
        }
    }

    fn investment(invested: Decimal, current: Decimal) -> investment_entity::Model {
        investment_entity::Model {
            id: 1,
            name: "Tesouro Selic".to_string(),
            kind: InvestmentKind::FixedIncome,
            institution: None,
            invested_amount: invested,
            current_value: current,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn card(limit: Decimal, bill: Decimal) -> credit_card::Model {
        credit_card::Model {
            id: 1,
            name: "Platinum".to_string(),
            bank: "Itaú".to_string(),
            credit_limit: limit,
            current_bill: bill,
            due_day: Some(10),
            closing_day: Some(3),
            color: "black".to_string(),
        }
    }

    fn entry(amount: Decimal, kind: TransactionKind, date: NaiveDate) -> transaction_entity::Model {
        transaction_entity::Model {
            id: 1,
            description: "Entrada".to_string(),
            amount,
            kind,
            category: Category::Other,
            date,
        }
    }

    #[test]
    fn test_dashboard_summary_combines_all_sources() {
        let accounts = vec![account(Decimal::new(100000, 2)), account(Decimal::new(-20000, 2))];
        let cards = vec![card(Decimal::new(100000, 2), Decimal::new(25000, 2))];
        let investments = vec![investment(Decimal::new(100000, 2), Decimal::new(120000, 2))];
        let entries = vec![
            entry(
                Decimal::new(500000, 2),
                TransactionKind::Income,
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            ),
            entry(
                Decimal::new(120000, 2),
                TransactionKind::Expense,
                NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            ),
            // Outside the selected month, must be ignored.
            entry(
                Decimal::new(99900, 2),
                TransactionKind::Expense,
                NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            ),
        ];

        let summary =
            dashboard_summary(&accounts, &cards, &investments, &entries, 2025, 6).unwrap();

        assert_eq!(summary.total_balance, Decimal::new(80000, 2));
        assert_eq!(summary.total_invested, Decimal::new(100000, 2));
        assert_eq!(summary.total_current_value, Decimal::new(120000, 2));
        assert_eq!(summary.investment_return, Decimal::new(20000, 2));
        assert_eq!(summary.return_percent, Decimal::from(20));
        assert_eq!(summary.monthly_income, Decimal::new(500000, 2));
        assert_eq!(summary.monthly_expenses, Decimal::new(120000, 2));
        assert_eq!(summary.open_bills, Decimal::new(25000, 2));
        // patrimony = balances + current investment value
        assert_eq!(summary.patrimony, Decimal::new(200000, 2));
    }

    #[test]
    fn test_dashboard_summary_on_empty_stores() {
        let summary = dashboard_summary(&[], &[], &[], &[], 2025, 1).unwrap();

        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert_eq!(summary.return_percent, Decimal::ZERO);
        assert_eq!(summary.patrimony, Decimal::ZERO);
    }

    #[test]
    fn test_dashboard_summary_rejects_invalid_month() {
        let err = dashboard_summary(&[], &[], &[], &[], 2025, 13).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidPeriod { .. }));
    }
}
