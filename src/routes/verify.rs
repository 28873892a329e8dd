use axum::{Extension, Json};

use crate::{
    error::Result,
    models::{UserSummary, VerifyResponse},
    utils::jwt::{self, Claims},
};

/// The auth middleware has already validated the token; this just echoes
/// the identity it carries, without a database read.
pub async fn verify_token(Extension(claims): Extension<Claims>) -> Result<Json<VerifyResponse>> {
    let id = jwt::user_id_from_claims(&claims)?;

    Ok(Json(VerifyResponse {
        user: UserSummary {
            id,
            username: claims.username,
            email: None,
            role: claims.role,
        },
    }))
}
