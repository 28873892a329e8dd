use sqlx::PgPool;

use crate::{
    error::Result,
    models::{User, UserSummary},
};

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    email: Option<&str>,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password, email) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>(
        "SELECT id, username, email, role FROM users ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}
