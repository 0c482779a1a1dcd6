use axum::{http::StatusCode, response::Json, Extension};

use crate::database::models::{DebtNote, NewDebt};
use crate::database::DebtRepository;
use crate::error::ApiError;
use crate::middleware::ShopPool;

/// POST /api/debts - record a new debt for this shop.
pub async fn create_debt(
    Extension(ShopPool(pool)): Extension<ShopPool>,
    Json(payload): Json<NewDebt>,
) -> Result<(StatusCode, Json<DebtNote>), ApiError> {
    if payload.customer_name.trim().is_empty() {
        return Err(ApiError::bad_request("Customer name is required"));
    }

    let note = DebtRepository::new(pool).create(payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}
