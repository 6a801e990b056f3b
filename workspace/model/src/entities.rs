pub mod account;
pub mod credit_card;
pub mod investment;
pub mod transaction;
