use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::config;
use crate::database::models::User;
use crate::database::registry::DatabaseError;
use crate::database::TenantRegistry;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub shop_name: String,
}

/// POST /api/auth/signup - register a shop owner.
///
/// Allocates the shop's tenant database name (opaque, immutable), stores
/// the identity record in the system database, provisions the tenant
/// database, and returns a signed token.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    validate(&payload)?;

    let pool = state.registry.system_pool().await?;

    let taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(payload.email.trim())
        .fetch_one(&pool)
        .await
        .map_err(DatabaseError::from)?;
    if taken > 0 {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let security = &config::config().security;
    let password_hash = auth::hash_password(&payload.password, security.bcrypt_cost)?;
    let database = TenantRegistry::allocate_database_name();

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, shop_name, database) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, email, password_hash, shop_name, database, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(payload.email.trim())
    .bind(&password_hash)
    .bind(payload.shop_name.trim())
    .bind(&database)
    .fetch_one(&pool)
    .await
    .map_err(|err| duplicate_email_or(err.into()))?;

    // Provision the shop database up front; if this fails the signup
    // surfaces the error and the database is created lazily on the next
    // authenticated request instead.
    state.registry.resolve(&database).await?;
    tracing::info!("New shop registered: {} -> {}", user.email, database);

    let claims = Claims::new(&user, security.jwt_expiry_hours);
    let token = auth::generate_jwt(&claims, &security.jwt_secret)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Signup successful, shop database created",
            "user": user.summary(),
            "token": token,
        })),
    ))
}

fn validate(payload: &SignupRequest) -> Result<(), ApiError> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    if payload.shop_name.trim().is_empty() {
        return Err(ApiError::bad_request("Shop name is required"));
    }
    Ok(())
}

/// Two signups can race the COUNT check; surface the unique violation as
/// the same client error as the early check.
fn duplicate_email_or(err: DatabaseError) -> ApiError {
    if let DatabaseError::Sqlx(sqlx::Error::Database(db)) = &err {
        if db.code().as_deref() == Some("23505") {
            return ApiError::bad_request("Email already registered");
        }
    }
    err.into()
}
