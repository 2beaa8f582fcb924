use crate::{
    error::Result,
    user::{NewUser, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Storage seam for users, injected into the HTTP layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in insertion order
    async fn list(&self) -> Result<Vec<User>>;

    /// Append a user, assigning its id and creation time
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Number of stored users
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}

pub type DynUserStore = Arc<dyn UserStore>;

/// Process-lifetime user list. Append-only; nothing is persisted.
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Store holding the two fixed mock records.
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(vec![
            seed_user(1, "John Doe", "john@example.com", now),
            seed_user(2, "Jane Smith", "jane@example.com", now),
        ])
    }

    pub fn into_dyn(self) -> DynUserStore {
        Arc::new(self)
    }
}

fn seed_user(id: u64, name: &str, email: &str, created_at: DateTime<Utc>) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        created_at,
    }
}

/// Ids come from the creation timestamp in milliseconds, bumped past the
/// last id so they stay strictly increasing.
fn next_id(last_id: Option<u64>, created_at: DateTime<Utc>) -> u64 {
    let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
    match last_id {
        Some(last) if millis <= last => last + 1,
        _ => millis,
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        let created_at = Utc::now();
        let id = next_id(users.last().map(|u| u.id), created_at);
        let user = User::new(id, new_user, created_at);
        users.push(user.clone());

        info!("Created user {} <{}>", user.id, user.email);

        Ok(user)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.users.read().await.len())
    }
}
