use common::{CardUtilization, CreditSummary};
use model::entities::credit_card;
use rust_decimal::Decimal;

/// Utilization of a single card as a percentage of its limit.
///
/// A card with a zero limit reports 0% rather than dividing by zero. The
/// value is not clamped: a bill above the limit yields more than 100%.
pub fn utilization(card: &credit_card::Model) -> Decimal {
    if card.credit_limit.is_zero() {
        return Decimal::ZERO;
    }
    card.current_bill / card.credit_limit * Decimal::ONE_HUNDRED
}

/// Sum of the limits of all cards.
pub fn total_limit(cards: &[credit_card::Model]) -> Decimal {
    cards.iter().map(|c| c.credit_limit).sum()
}

/// Sum of the open bills of all cards.
pub fn total_used(cards: &[credit_card::Model]) -> Decimal {
    cards.iter().map(|c| c.current_bill).sum()
}

/// Credit totals plus per-card utilization.
pub fn credit_summary(cards: &[credit_card::Model]) -> CreditSummary {
    let total_limit = total_limit(cards);
    let total_used = total_used(cards);

    CreditSummary {
        total_limit,
        total_used,
        available: total_limit - total_used,
        cards: cards
            .iter()
            .map(|c| CardUtilization {
                card_id: c.id,
                name: c.name.clone(),
                utilization: utilization(c),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i32, limit: Decimal, bill: Decimal) -> credit_card::Model {
        credit_card::Model {
            id,
            name: format!("Cartão {id}"),
            bank: "Banco".to_string(),
            credit_limit: limit,
            current_bill: bill,
            due_day: None,
            closing_day: None,
            color: "black".to_string(),
        }
    }

    #[test]
    fn test_utilization_is_bill_over_limit() {
        let card = card(1, Decimal::new(100000, 2), Decimal::new(25000, 2));
        assert_eq!(utilization(&card), Decimal::from(25));
    }

    #[test]
    fn test_utilization_of_zero_limit_card_is_zero() {
        let card = card(1, Decimal::ZERO, Decimal::new(25000, 2));
        assert_eq!(utilization(&card), Decimal::ZERO);
    }

    #[test]
    fn test_utilization_is_not_clamped_at_one_hundred() {
        let card = card(1, Decimal::new(50000, 2), Decimal::new(100000, 2));
        assert_eq!(utilization(&card), Decimal::from(200));
    }

    #[test]
    fn test_credit_summary_totals() {
        let cards = vec![
            card(1, Decimal::new(100000, 2), Decimal::new(25000, 2)),
            card(2, Decimal::new(500000, 2), Decimal::new(100000, 2)),
        ];

        let summary = credit_summary(&cards);

        assert_eq!(summary.total_limit, Decimal::new(600000, 2));
        assert_eq!(summary.total_used, Decimal::new(125000, 2));
        assert_eq!(summary.available, Decimal::new(475000, 2));
        assert_eq!(summary.cards.len(), 2);
        assert_eq!(summary.cards[0].utilization, Decimal::from(25));
        assert_eq!(summary.cards[1].utilization, Decimal::from(20));
    }
}
