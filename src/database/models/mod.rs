pub mod debt;
pub mod user;

pub use debt::{DebtChanges, DebtFilter, DebtItem, DebtNote, DebtStatus, NewDebt};
pub use user::User;
