use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string(Accounts::Name))
                    .col(string_len(Accounts::AccountType, 20))
                    .col(string_null(Accounts::Bank))
                    .col(decimal(Accounts::Balance).decimal_len(16, 4))
                    .col(string(Accounts::Color))
                    .to_owned(),
            )
            .await?;

        // Create credit_cards table
        manager
            .create_table(
                Table::create()
                    .table(CreditCards::Table)
                    .if_not_exists()
                    .col(pk_auto(CreditCards::Id))
                    .col(string(CreditCards::Name))
                    .col(string(CreditCards::Bank))
                    .col(decimal(CreditCards::CreditLimit).decimal_len(16, 4))
                    .col(decimal(CreditCards::CurrentBill).decimal_len(16, 4))
                    .col(small_integer_null(CreditCards::DueDay))
                    .col(small_integer_null(CreditCards::ClosingDay))
                    .col(string(CreditCards::Color))
                    .to_owned(),
            )
            .await?;

        // Create investments table
        manager
            .create_table(
                Table::create()
                    .table(Investments::Table)
                    .if_not_exists()
                    .col(pk_auto(Investments::Id))
                    .col(string(Investments::Name))
                    .col(string_len(Investments::Kind, 20))
                    .col(string_null(Investments::Institution))
                    .col(decimal(Investments::InvestedAmount).decimal_len(16, 4))
                    .col(decimal(Investments::CurrentValue).decimal_len(16, 4))
                    .col(date(Investments::PurchaseDate))
                    .to_owned(),
            )
            .await?;

        // Create transactions table.
        // Deliberately no foreign key to accounts or credit_cards: the ledger
        // is flat and global.
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(string(Transactions::Description))
                    .col(decimal(Transactions::Amount).decimal_len(16, 4))
                    .col(string_len(Transactions::Kind, 20))
                    .col(string_len(Transactions::Category, 20))
                    .col(date(Transactions::Date))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Investments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CreditCards::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Name,
    AccountType,
    Bank,
    Balance,
    Color,
}

#[derive(DeriveIden)]
enum CreditCards {
    Table,
    Id,
    Name,
    Bank,
    CreditLimit,
    CurrentBill,
    DueDay,
    ClosingDay,
    Color,
}

#[derive(DeriveIden)]
enum Investments {
    Table,
    Id,
    Name,
    Kind,
    Institution,
    InvestedAmount,
    CurrentValue,
    PurchaseDate,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Description,
    Amount,
    Kind,
    Category,
    Date,
}
