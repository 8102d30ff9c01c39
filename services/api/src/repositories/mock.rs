//! In-memory repositories for handler tests

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};

use super::{InterestRepository, UserRepository};
use crate::models::{Interest, NewUser, OnboardingOutcome, User};

#[derive(Default)]
struct Tables {
    interests: Vec<Interest>,
    users: BTreeMap<String, User>,
    links: BTreeSet<(String, String)>,
}

/// Shared in-memory store implementing every repository trait
#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<Tables>>,
    fail_next: Arc<Mutex<Option<DatabaseError>>>,
    drop_user_before_update: Arc<Mutex<bool>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interest(&self, id: &str, name: &str) {
        self.tables.lock().unwrap().interests.push(Interest {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        });
    }

    pub fn add_user(&self, id: &str, username: &str) {
        let now = Utc::now();
        self.tables.lock().unwrap().users.insert(
            id.to_string(),
            User {
                id: id.to_string(),
                username: username.to_string(),
                email: String::new(),
                onboarded: false,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Make the next repository call fail with `err`
    pub fn fail_next(&self, err: DatabaseError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Emulate the user row disappearing between insert and flag update
    pub fn drop_user_before_update(&self) {
        *self.drop_user_before_update.lock().unwrap() = true;
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.tables.lock().unwrap().users.get(id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn links(&self) -> Vec<(String, String)> {
        self.tables.lock().unwrap().links.iter().cloned().collect()
    }

    fn take_failure(&self) -> DatabaseResult<()> {
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InterestRepository for MockStore {
    async fn list_by_name(&self) -> DatabaseResult<Vec<Interest>> {
        self.take_failure()?;
        let mut interests = self.tables.lock().unwrap().interests.clone();
        interests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interests)
    }
}

#[async_trait]
impl UserRepository for MockStore {
    async fn complete_onboarding(
        &self,
        user_id: &str,
        interest_ids: &[String],
    ) -> DatabaseResult<OnboardingOutcome> {
        self.take_failure()?;

        // Work on a copy so a failure leaves the committed tables untouched
        let mut tables = self.tables.lock().unwrap();
        let mut users = tables.users.clone();
        let mut links = tables.links.clone();

        let user_created = !users.contains_key(user_id);
        if user_created {
            let placeholder = NewUser::placeholder(user_id);
            let now = Utc::now();
            users.insert(
                placeholder.id.clone(),
                User {
                    id: placeholder.id,
                    username: placeholder.username,
                    email: placeholder.email,
                    onboarded: false,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        let mut interests_linked = 0;
        for interest_id in interest_ids {
            if !tables.interests.iter().any(|i| &i.id == interest_id) {
                return Err(DatabaseError::ForeignKeyViolation {
                    constraint: Some("user_interests_interest_id_fkey".to_string()),
                });
            }
            if links.insert((user_id.to_string(), interest_id.clone())) {
                interests_linked += 1;
            }
        }

        if *self.drop_user_before_update.lock().unwrap() {
            users.remove(user_id);
        }

        let user = users
            .get_mut(user_id)
            .ok_or_else(|| DatabaseError::not_found("User", user_id))?;
        user.onboarded = true;
        user.updated_at = Utc::now();
        let user = user.clone();

        tables.users = users;
        tables.links = links;

        Ok(OnboardingOutcome {
            user,
            user_created,
            interests_linked,
        })
    }
}
