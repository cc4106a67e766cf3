use crate::db::models::{NewUser, User};
use crate::error::AppResult;
use sqlx::SqlitePool;

/// Insert a user and commit, returning the stored row with its generated id.
pub async fn create_user(pool: &SqlitePool, new_user: &NewUser) -> AppResult<User> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, created_at)
         VALUES (?, ?, ?)
         RETURNING id, username, password_hash, created_at",
    )
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.created_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

#[cfg(test)]
pub(crate) async fn count(pool: &SqlitePool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
