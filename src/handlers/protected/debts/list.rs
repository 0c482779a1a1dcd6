use axum::{extract::Query, response::Json, Extension};

use crate::database::models::{DebtFilter, DebtNote};
use crate::database::DebtRepository;
use crate::error::ApiError;
use crate::middleware::ShopPool;

/// GET /api/debts - list this shop's debts, newest first.
///
/// `?status=` narrows to one payment state; `?overdue=true` narrows to
/// unpaid notes past their due date (the reminders view).
pub async fn list_debts(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Query(filter): Query<DebtFilter>,
) -> Result<Json<Vec<DebtNote>>, ApiError> {
    let notes = DebtRepository::new(pool).list(&filter).await?;
    Ok(Json(notes))
}
