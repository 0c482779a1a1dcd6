use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /api/auth/whoami - echo the authenticated user context.
pub async fn whoami(Extension(auth_user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "user": {
            "id": auth_user.user_id,
            "email": auth_user.email,
            "shop_name": auth_user.shop_name,
            "database": auth_user.database,
        },
        "timestamp": chrono::Utc::now(),
    }))
}
