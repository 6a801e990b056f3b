use model::entities::account;
use rust_decimal::Decimal;

/// Sums the balances of all accounts. Balances are signed, so overdrawn
/// accounts reduce the total.
pub fn total_balance(accounts: &[account::Model]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::account::AccountType;

    fn account(id: i32, balance: Decimal) -> account::Model {
        account::Model {
            id,
            name: format!("Conta {id}"),
            account_type: AccountType::Checking,
            bank: None,
            balance,
            color: "blue".to_string(),
        }
    }

    #[test]
    fn test_total_balance_includes_negative_balances() {
        let accounts = vec![
            account(1, Decimal::new(100000, 2)),
            account(2, Decimal::new(-20000, 2)),
        ];

        assert_eq!(total_balance(&accounts), Decimal::new(80000, 2));
    }

    #[test]
    fn test_total_balance_of_empty_list_is_zero() {
        assert_eq!(total_balance(&[]), Decimal::ZERO);
    }
}
