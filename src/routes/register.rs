use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, Result},
    models::{RegisterRequest, RegisterResponse},
    queries::user_queries,
    AppState,
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    validate_registration(&payload)?;

    if user_queries::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = user_queries::create_user(
        &state.db,
        payload.username.trim(),
        &password_hash,
        payload.email.as_deref(),
    )
    .await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user_id: user.id,
        }),
    ))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    if payload.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if let Some(email) = payload.email.as_deref() {
        if !email.trim().is_empty() && !crate::utils::validation::is_valid_email(email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
    }

    Ok(())
}
