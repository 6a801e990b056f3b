use common::{AllocationSlice, PortfolioSummary};
use model::entities::investment;
use model::entities::investment::InvestmentKind;
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, Iterable};

/// Sum of invested amounts across all positions.
pub fn invested_total(investments: &[investment::Model]) -> Decimal {
    investments.iter().map(|i| i.invested_amount).sum()
}

/// Sum of current values across all positions.
pub fn current_total(investments: &[investment::Model]) -> Decimal {
    investments.iter().map(|i| i.current_value).sum()
}

/// Return as a percentage of the invested amount.
///
/// Reports 0% when nothing is invested rather than dividing by zero.
pub fn return_percent(invested: Decimal, current: Decimal) -> Decimal {
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    (current - invested) / invested * Decimal::ONE_HUNDRED
}

/// Current value grouped by asset class, with each class's share of the
/// grand total. Classes with no positions are omitted; the order follows the
/// declaration order of [`InvestmentKind`].
pub fn allocation(investments: &[investment::Model]) -> Vec<AllocationSlice> {
    let total = current_total(investments);

    InvestmentKind::iter()
        .filter_map(|kind| {
            if !investments.iter().any(|i| i.kind == kind) {
                return None;
            }
            let current_value: Decimal = investments
                .iter()
                .filter(|i| i.kind == kind)
                .map(|i| i.current_value)
                .sum();
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                current_value / total * Decimal::ONE_HUNDRED
            };
            Some(AllocationSlice {
                kind: kind.to_value(),
                label: kind.label().to_string(),
                current_value,
                percent,
            })
        })
        .collect()
}

/// Portfolio totals plus the allocation breakdown.
pub fn portfolio_summary(investments: &[investment::Model]) -> PortfolioSummary {
    let total_invested = invested_total(investments);
    let total_current_value = current_total(investments);

    PortfolioSummary {
        total_invested,
        total_current_value,
        total_return: total_current_value - total_invested,
        return_percent: return_percent(total_invested, total_current_value),
        allocation: allocation(investments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn position(id: i32, kind: InvestmentKind, invested: Decimal, current: Decimal) -> investment::Model {
        investment::Model {
            id,
            name: format!("Posição {id}"),
            kind,
            institution: None,
            invested_amount: invested,
            current_value: current,
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_return_percent() {
        // 1000 invested, 1200 current: +20%
        assert_eq!(
            return_percent(Decimal::new(100000, 2), Decimal::new(120000, 2)),
            Decimal::from(20)
        );
        // Losses come out negative
        assert_eq!(
            return_percent(Decimal::from(1000), Decimal::from(900)),
            Decimal::from(-10)
        );
    }

    #[test]
    fn test_return_percent_is_zero_when_nothing_invested() {
        assert_eq!(return_percent(Decimal::ZERO, Decimal::from(500)), Decimal::ZERO);
    }

    #[test]
    fn test_portfolio_summary_totals() {
        let investments = vec![
            position(1, InvestmentKind::Stocks, Decimal::from(1000), Decimal::from(1200)),
            position(2, InvestmentKind::Crypto, Decimal::from(500), Decimal::from(300)),
        ];

        let summary = portfolio_summary(&investments);

        assert_eq!(summary.total_invested, Decimal::from(1500));
        assert_eq!(summary.total_current_value, Decimal::from(1500));
        assert_eq!(summary.total_return, Decimal::ZERO);
        assert_eq!(summary.return_percent, Decimal::ZERO);
    }

    #[test]
    fn test_allocation_groups_by_kind() {
        let investments = vec![
            position(1, InvestmentKind::Stocks, Decimal::from(100), Decimal::from(300)),
            position(2, InvestmentKind::Stocks, Decimal::from(100), Decimal::from(200)),
            position(3, InvestmentKind::FixedIncome, Decimal::from(400), Decimal::from(500)),
        ];

        let slices = allocation(&investments);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].kind, "stocks");
        assert_eq!(slices[0].label, "Ações");
        assert_eq!(slices[0].current_value, Decimal::from(500));
        assert_eq!(slices[0].percent, Decimal::from(50));
        assert_eq!(slices[1].kind, "fixed_income");
        assert_eq!(slices[1].current_value, Decimal::from(500));
        assert_eq!(slices[1].percent, Decimal::from(50));
    }

    #[test]
    fn test_allocation_omits_kinds_without_positions() {
        let investments = vec![position(
            1,
            InvestmentKind::Savings,
            Decimal::from(100),
            Decimal::from(100),
        )];

        let slices = allocation(&investments);

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].kind, "savings");
        assert_eq!(slices[0].percent, Decimal::from(100));
    }

    #[test]
    fn test_allocation_of_empty_portfolio_is_empty() {
        assert!(allocation(&[]).is_empty());
    }
}
