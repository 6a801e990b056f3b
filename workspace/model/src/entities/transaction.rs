use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The direction of a ledger entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

impl TransactionKind {
    /// Display label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Receita",
            TransactionKind::Expense => "Despesa",
            TransactionKind::Transfer => "Transferência",
        }
    }
}

/// Spending/earning category of a ledger entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[sea_orm(string_value = "salary")]
    Salary,
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "transport")]
    Transport,
    #[sea_orm(string_value = "housing")]
    Housing,
    #[sea_orm(string_value = "health")]
    Health,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "entertainment")]
    Entertainment,
    #[sea_orm(string_value = "shopping")]
    Shopping,
    #[sea_orm(string_value = "investment")]
    Investment,
    #[sea_orm(string_value = "bills")]
    Bills,
    #[sea_orm(string_value = "other")]
    Other,
}

impl Category {
    /// Display label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "Salário",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Housing => "Moradia",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Entertainment => "Lazer",
            Category::Shopping => "Compras",
            Category::Investment => "Investimento",
            Category::Bills => "Contas",
            Category::Other => "Outros",
        }
    }
}

/// A single entry in the flat ledger.
///
/// Entries are deliberately not linked to an account or card: the ledger is a
/// global stream of money movements, and account balances are tracked
/// independently on the account records themselves.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    /// Unsigned magnitude. The direction comes from `kind`.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
