use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[sea_orm(string_value = "checking")]
    Checking,
    #[sea_orm(string_value = "savings")]
    Savings,
    #[sea_orm(string_value = "wallet")]
    Wallet,
}

impl AccountType {
    /// Display label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Checking => "Conta Corrente",
            AccountType::Savings => "Poupança",
            AccountType::Wallet => "Carteira",
        }
    }
}

/// A bank account, savings account, or cash wallet.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub account_type: AccountType,
    /// Bank holding the account. Wallets typically have none.
    pub bank: Option<String>,
    /// Current balance. May be negative (overdrawn account).
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance: Decimal,
    /// Accent color used when rendering the account.
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_labels() {
        assert_eq!(AccountType::Checking.label(), "Conta Corrente");
        assert_eq!(AccountType::Savings.label(), "Poupança");
        assert_eq!(AccountType::Wallet.label(), "Carteira");
    }

    #[test]
    fn test_account_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&AccountType::Checking).unwrap();
        assert_eq!(json, "\"checking\"");

        let parsed: AccountType = serde_json::from_str("\"wallet\"").unwrap();
        assert_eq!(parsed, AccountType::Wallet);
    }
}
