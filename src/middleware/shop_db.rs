use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The authenticated shop's database pool, injected by middleware.
///
/// Handlers derive their accessor from this pool per request; the pool
/// itself determines the tenant, no request parameter does.
#[derive(Clone)]
pub struct ShopPool(pub PgPool);

/// Resolve the shop database named by the authenticated user's identity
/// record and inject its pool.
pub async fn with_shop_db(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| {
            ApiError::unauthorized("Authentication required before database resolution")
        })?;

    let pool = state.registry.resolve(&auth_user.database).await?;
    tracing::debug!("Resolved shop database: {}", auth_user.database);

    request.extensions_mut().insert(ShopPool(pool));
    Ok(next.run(request).await)
}
