//! Interest repository for database operations
//!
//! Tests for catalog ordering need PostgreSQL; see the [`crate::repositories`]
//! module docs for how to run them.

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;

use super::InterestRepository;
use crate::models::Interest;

/// Interest repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgInterestRepository {
    pool: PgPool,
}

impl PgInterestRepository {
    /// Create a new interest repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterestRepository for PgInterestRepository {
    async fn list_by_name(&self) -> DatabaseResult<Vec<Interest>> {
        let interests = sqlx::query_as::<_, Interest>(
            r#"
            SELECT id, name, created_at
            FROM interests
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(interests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(pool: &PgPool, id: &str, name: &str) {
        sqlx::query("INSERT INTO interests (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_list_by_name_is_sorted(pool: PgPool) {
        seed(&pool, "i-3", "Travel").await;
        seed(&pool, "i-1", "Cooking").await;
        seed(&pool, "i-2", "Music").await;

        let repository = PgInterestRepository::new(pool);
        let interests = repository.list_by_name().await.unwrap();

        let names: Vec<&str> = interests.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cooking", "Music", "Travel"]);
        let ids: Vec<&str> = interests.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i-1", "i-2", "i-3"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_list_by_name_on_empty_catalog(pool: PgPool) {
        let repository = PgInterestRepository::new(pool);
        assert!(repository.list_by_name().await.unwrap().is_empty());
    }
}
