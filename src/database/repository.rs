use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::models::{DebtChanges, DebtFilter, DebtNote, NewDebt};
use crate::database::registry::DatabaseError;

const COLUMNS: &str = "id, customer_name, phone, items, total, due_date, status, created_at";

/// Schema-bound accessor for one shop's debt notes.
///
/// Construction is pure and per-request: derive it from a freshly resolved
/// pool every time, never cache it across requests. Every operation is
/// implicitly scoped to the tenant database backing the pool - no query
/// parameter selects the tenant.
pub struct DebtRepository {
    pool: PgPool,
}

impl DebtRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewDebt) -> Result<DebtNote, DatabaseError> {
        let note = sqlx::query_as::<_, DebtNote>(&format!(
            "INSERT INTO debts (id, customer_name, phone, items, total, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(new.customer_name)
        .bind(new.phone)
        .bind(sqlx::types::Json(new.items))
        .bind(new.total)
        .bind(new.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    /// List debt notes, newest first.
    pub async fn list(&self, filter: &DebtFilter) -> Result<Vec<DebtNote>, DatabaseError> {
        let mut query = QueryBuilder::new(format!("SELECT {} FROM debts", COLUMNS));

        let mut clause = " WHERE ";
        if let Some(status) = filter.status {
            query.push(clause).push("status = ").push_bind(status);
            clause = " AND ";
        }
        if filter.overdue {
            query
                .push(clause)
                .push("status = 'unpaid' AND due_date IS NOT NULL AND due_date < now()");
        }
        query.push(" ORDER BY created_at DESC");

        let notes = query
            .build_query_as::<DebtNote>()
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<DebtNote>, DatabaseError> {
        let note = sqlx::query_as::<_, DebtNote>(&format!(
            "SELECT {} FROM debts WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    /// Apply a partial update; returns the updated note, or None when the
    /// id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        changes: DebtChanges,
    ) -> Result<Option<DebtNote>, DatabaseError> {
        if changes.is_empty() {
            return self.find(id).await;
        }

        let mut query = QueryBuilder::new("UPDATE debts SET ");
        {
            let mut sets = query.separated(", ");
            if let Some(v) = changes.customer_name {
                sets.push("customer_name = ");
                sets.push_bind_unseparated(v);
            }
            if let Some(v) = changes.phone {
                sets.push("phone = ");
                sets.push_bind_unseparated(v);
            }
            if let Some(v) = changes.items {
                sets.push("items = ");
                sets.push_bind_unseparated(sqlx::types::Json(v));
            }
            if let Some(v) = changes.total {
                sets.push("total = ");
                sets.push_bind_unseparated(v);
            }
            if let Some(v) = changes.due_date {
                sets.push("due_date = ");
                sets.push_bind_unseparated(v);
            }
            if let Some(v) = changes.status {
                sets.push("status = ");
                sets.push_bind_unseparated(v);
            }
        }
        query.push(" WHERE id = ").push_bind(id);
        query.push(format!(" RETURNING {}", COLUMNS));

        let note = query
            .build_query_as::<DebtNote>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    /// Returns true when a row was actually deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM debts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
