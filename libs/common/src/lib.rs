//! Common library for the onboarding service
//!
//! This crate provides shared functionality used by the service crates,
//! including database connectivity and the typed database error taxonomy.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, close_shared_pool, health_check, shared_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = shared_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     close_shared_pool().await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
