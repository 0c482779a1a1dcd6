use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::errors::ErrorKind;
use uuid::Uuid;

use crate::config;
use crate::database::models::User;
use crate::database::registry::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context, injected into the request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub shop_name: String,
    pub database: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            shop_name: user.shop_name,
            database: user.database,
        }
    }
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then re-checks that the identity record
/// still exists and builds the request context from the stored row rather
/// than the claim echo. A token can outlive its account; this check is
/// also what keeps unverified tenant names away from the registry.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(ApiError::unauthorized("JWT secret not configured"));
    }

    let claims = crate::auth::decode_jwt(&token, secret).map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => ApiError::unauthorized("Token expired"),
        _ => ApiError::forbidden("Invalid token"),
    })?;

    let pool = state.registry.system_pool().await?;
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, shop_name, database, created_at \
         FROM users WHERE id = $1",
    )
    .bind(claims.sub)
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| {
        tracing::warn!("Token for vanished user: {}", claims.sub);
        ApiError::not_found("User not found")
    })?;

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("Bearer ");
        assert!(extract_bearer_token(&headers).is_err());
    }
}
