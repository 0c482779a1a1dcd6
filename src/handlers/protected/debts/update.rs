use axum::{extract::Path, response::Json, Extension};
use uuid::Uuid;

use crate::database::models::{DebtChanges, DebtNote};
use crate::database::DebtRepository;
use crate::error::ApiError;
use crate::middleware::ShopPool;

/// PATCH /api/debts/:id - partially update a debt note (e.g. mark paid).
pub async fn update_debt(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<Uuid>,
    Json(changes): Json<DebtChanges>,
) -> Result<Json<DebtNote>, ApiError> {
    let note = DebtRepository::new(pool)
        .update(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;
    Ok(Json(note))
}
