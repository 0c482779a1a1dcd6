use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::database::models::User;
use crate::database::registry::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/signin - authenticate a shop owner and issue a token.
///
/// Unknown email and wrong password produce the same response on purpose.
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = state.registry.system_pool().await?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, shop_name, database, created_at \
         FROM users WHERE email = $1",
    )
    .bind(payload.email.trim())
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| ApiError::bad_request("Invalid email or password"))?;

    if !auth::verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::bad_request("Invalid email or password"));
    }

    let security = &config::config().security;
    let claims = Claims::new(&user, security.jwt_expiry_hours);
    let token = auth::generate_jwt(&claims, &security.jwt_secret)?;
    tracing::debug!("Signin successful for {}", user.email);

    Ok(Json(json!({
        "message": "Signin successful",
        "user": user.summary(),
        "token": token,
    })))
}
