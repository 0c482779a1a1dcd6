use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Shop-owner identity record, stored in the system database. The
/// `database` field names the shop's tenant database and never changes
/// after signup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub shop_name: String,
    pub database: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Client-facing summary, as returned by signup/signin.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "shop_name": self.shop_name,
            "database": self.database,
        })
    }
}
