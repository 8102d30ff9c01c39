//! User repository for database operations
//!
//! Tests for the onboarding transaction need PostgreSQL; see the
//! [`crate::repositories`] module docs for how to run them.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::UserRepository;
use crate::models::{NewUser, OnboardingOutcome, User};

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn complete_onboarding(
        &self,
        user_id: &str,
        interest_ids: &[String],
    ) -> DatabaseResult<OnboardingOutcome> {
        let mut tx = self.pool.begin().await?;

        let placeholder = NewUser::placeholder(user_id);
        let created = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO users (id, username, email, onboarded)
            VALUES ($1, $2, $3, FALSE)
            ON CONFLICT (id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&placeholder.id)
        .bind(&placeholder.username)
        .bind(&placeholder.email)
        .fetch_optional(&mut *tx)
        .await?;

        if created.is_some() {
            info!("Created placeholder user {}", user_id);
        }

        let linked = sqlx::query(
            r#"
            INSERT INTO user_interests (user_id, interest_id)
            SELECT $1, interest_id
            FROM UNNEST($2::text[]) AS interest_id
            ON CONFLICT (user_id, interest_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(interest_ids)
        .execute(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET onboarded = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, onboarded, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        // Dropping the transaction rolls it back
        .ok_or_else(|| DatabaseError::not_found("User", user_id))?;

        tx.commit().await?;

        Ok(OnboardingOutcome {
            user,
            user_created: created.is_some(),
            interests_linked: linked.rows_affected(),
        })
    }
}
