pub mod cache;
pub mod models;
pub mod registry;
pub mod repository;
pub mod schema;

pub use registry::{DatabaseError, TenantRegistry};
pub use repository::DebtRepository;
