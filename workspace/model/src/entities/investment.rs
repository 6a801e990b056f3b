use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The asset class of an investment position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    #[sea_orm(string_value = "stocks")]
    Stocks,
    #[sea_orm(string_value = "fixed_income")]
    FixedIncome,
    #[sea_orm(string_value = "funds")]
    Funds,
    #[sea_orm(string_value = "crypto")]
    Crypto,
    #[sea_orm(string_value = "real_estate")]
    RealEstate,
    #[sea_orm(string_value = "savings")]
    Savings,
    #[sea_orm(string_value = "other")]
    Other,
}

impl InvestmentKind {
    /// Display label used by the dashboard and the allocation chart.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentKind::Stocks => "Ações",
            InvestmentKind::FixedIncome => "Renda Fixa",
            InvestmentKind::Funds => "Fundos",
            InvestmentKind::Crypto => "Cripto",
            InvestmentKind::RealEstate => "Imóveis",
            InvestmentKind::Savings => "Poupança",
            InvestmentKind::Other => "Outros",
        }
    }
}

/// A single investment position.
///
/// The return of a position is derived, never stored:
/// `current_value - invested_amount`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub kind: InvestmentKind,
    pub institution: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub invested_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_matches_storage_values() {
        let json = serde_json::to_string(&InvestmentKind::FixedIncome).unwrap();
        assert_eq!(json, "\"fixed_income\"");

        let parsed: InvestmentKind = serde_json::from_str("\"real_estate\"").unwrap();
        assert_eq!(parsed, InvestmentKind::RealEstate);
    }
}
