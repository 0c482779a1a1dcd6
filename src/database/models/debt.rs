use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Payment state of a debt note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "debt_status", rename_all = "lowercase")]
pub enum DebtStatus {
    Unpaid,
    Paid,
    Disabled,
}

/// One line item on a debt note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtItem {
    pub description: String,
    pub amount: Decimal,
}

/// A customer debt, stored in the owning shop's tenant database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DebtNote {
    pub id: Uuid,
    pub customer_name: String,
    pub phone: Option<String>,
    pub items: Json<Vec<DebtItem>>,
    pub total: Decimal,
    pub due_date: Option<DateTime<Utc>>,
    pub status: DebtStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a debt note. Status always starts out
/// unpaid.
#[derive(Debug, Deserialize)]
pub struct NewDebt {
    pub customer_name: String,
    pub phone: Option<String>,
    pub items: Vec<DebtItem>,
    pub total: Decimal,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct DebtChanges {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub items: Option<Vec<DebtItem>>,
    pub total: Option<Decimal>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<DebtStatus>,
}

impl DebtChanges {
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.phone.is_none()
            && self.items.is_none()
            && self.total.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// Filters accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DebtFilter {
    pub status: Option<DebtStatus>,
    /// Restrict to unpaid notes whose due date has passed (the reminders
    /// view).
    #[serde(default)]
    pub overdue: bool,
}
