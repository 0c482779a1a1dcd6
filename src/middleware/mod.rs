pub mod auth;
pub mod shop_db;

pub use auth::AuthUser;
pub use shop_db::ShopPool;
