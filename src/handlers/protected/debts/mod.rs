mod create;
mod delete;
mod list;
mod show;
mod update;

pub use create::create_debt;
pub use delete::delete_debt;
pub use list::list_debts;
pub use show::get_debt;
pub use update::update_debt;
