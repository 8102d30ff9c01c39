//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    middleware::JwtVerifier,
    repositories::{InterestRepository, PgInterestRepository, PgUserRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub interest_repository: Arc<dyn InterestRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub jwt_verifier: Arc<JwtVerifier>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn new(pool: PgPool, jwt_verifier: JwtVerifier) -> Self {
        Self {
            interest_repository: Arc::new(PgInterestRepository::new(pool.clone())),
            user_repository: Arc::new(PgUserRepository::new(pool)),
            jwt_verifier: Arc::new(jwt_verifier),
        }
    }
}
