//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is properly configured and
//! that the process-wide pool is reused across calls. They need a running
//! PostgreSQL reachable through `DATABASE_URL`:
//!
//! ```bash
//! cargo test -p common --test infrastructure_integration -- --ignored
//! ```

use common::database::{
    DatabaseConfig, close_shared_pool, health_check, is_shared_pool_initialized, shared_pool,
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = shared_pool(&db_config).await?;
    assert!(is_shared_pool_initialized());

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    // A second call hands back the same pool instead of opening a new one
    let again = shared_pool(&db_config).await?;
    assert_eq!(pool.size(), again.size());
    assert!(!again.is_closed());

    close_shared_pool().await;
    assert!(pool.is_closed(), "Shared pool was not closed");
    assert!(again.is_closed(), "Second handle refers to a different pool");

    Ok(())
}
