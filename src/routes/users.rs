use axum::{Extension, Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::UserSummary,
    queries::user_queries,
    utils::jwt::{self, Claims},
};

/// Admin-only listing, newest accounts first.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>> {
    let users = user_queries::list_users(&state.db).await?;

    Ok(Json(users))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserSummary>> {
    let id = jwt::user_id_from_claims(&claims)?;

    let user = user_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
