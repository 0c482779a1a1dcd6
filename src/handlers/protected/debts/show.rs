use axum::{extract::Path, response::Json, Extension};
use uuid::Uuid;

use crate::database::models::DebtNote;
use crate::database::DebtRepository;
use crate::error::ApiError;
use crate::middleware::ShopPool;

/// GET /api/debts/:id - fetch a single debt note.
pub async fn get_debt(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<DebtNote>, ApiError> {
    let note = DebtRepository::new(pool)
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;
    Ok(Json(note))
}
