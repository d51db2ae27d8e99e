use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, profile_image, reset_token, reset_token_expiry, created_at";

impl User {
    /// Find a user by (already normalized) email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    /// Create a new user with hashed password. Returns `None` when the email
    /// is already taken.
    pub async fn create(
        db: &PgPool,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .context("create user")?;
        Ok(user)
    }

    /// Stores a reset token for the account with this email, if any.
    pub async fn set_reset_token(
        db: &PgPool,
        email: &str,
        token: &str,
        expiry: OffsetDateTime,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET reset_token = $2, reset_token_expiry = $3
             WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(token)
        .bind(expiry)
        .execute(db)
        .await
        .context("set reset token")?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn find_by_reset_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE reset_token = $1"
        ))
        .bind(token)
        .fetch_optional(db)
        .await
        .context("find user by reset token")?;
        Ok(user)
    }

    /// Replaces the password and consumes the reset token in one statement.
    /// Returns false if the token was already used or has expired meanwhile.
    pub async fn reset_password(
        db: &PgPool,
        user_id: Uuid,
        token: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET password_hash = $3, reset_token = NULL, reset_token_expiry = NULL
             WHERE id = $1 AND reset_token = $2 AND reset_token_expiry > NOW()
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(password_hash)
        .execute(db)
        .await
        .context("reset password")?;
        Ok(res.rows_affected() > 0)
    }
}
