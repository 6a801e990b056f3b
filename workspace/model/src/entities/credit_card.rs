use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A credit card with a limit and an open bill.
///
/// `due_day` and `closing_day` are days of the month (1-31), not dates: the
/// bill closes and falls due on the same day every month.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub bank: String,
    /// Total credit limit of the card.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub credit_limit: Decimal,
    /// Amount already spent on the currently open bill.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub current_bill: Decimal,
    pub due_day: Option<i16>,
    pub closing_day: Option<i16>,
    /// Card face color used when rendering the card.
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
