use axum::{extract::Path, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::DebtRepository;
use crate::error::ApiError;
use crate::middleware::ShopPool;

/// DELETE /api/debts/:id - remove a debt note.
pub async fn delete_debt(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = DebtRepository::new(pool).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Not found"));
    }
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
