use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{NewUser, User, UserChanges, UserId};

/// Repository trait for User persistence
///
/// Implementations own id assignment and timestamps. The in-memory store
/// below never fails; other backends report faults as `UserError::Storage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Snapshot of every stored user, ordered by id
    async fn list_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: UserId) -> UserResult<Option<User>>;

    /// Store a new user, assigning its id and timestamps
    async fn insert(&self, input: NewUser) -> UserResult<User>;

    /// Merge `changes` into an existing user; `None` when the id is absent
    async fn update(&self, id: UserId, changes: UserChanges) -> UserResult<Option<User>>;

    /// Delete a user by ID; `false` when the id is absent
    async fn remove(&self, id: UserId) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository
///
/// Data lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with two demo users (ids 1 and 2)
    pub fn seeded() -> Self {
        let now = Utc::now();
        let users = [
            (1, "Taro Tanaka", "tanaka@example.com"),
            (2, "Hanako Sato", "sato@example.com"),
        ]
        .into_iter()
        .map(|(id, name, email)| {
            let user = User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created_at: now,
                updated_at: now,
            };
            (id, user)
        })
        .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Ids are never below 1, so an empty store starts at 1
        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let user = User {
            id,
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        users.insert(id, user.clone());

        tracing::info!(user_id = id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        user.apply_changes(changes);

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn remove(&self, id: UserId) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .insert(new_user("Test User", "test@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.email, "test@example.com");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_ids_follow_the_current_maximum() {
        let repo = InMemoryUserRepository::seeded();

        let third = repo.insert(new_user("Third", "third@example.com")).await.unwrap();
        assert_eq!(third.id, 3);

        // Removing a lower id does not free it for reuse
        assert!(repo.remove(1).await.unwrap());
        let fourth = repo.insert(new_user("Fourth", "fourth@example.com")).await.unwrap();
        assert_eq!(fourth.id, 4);

        // Removing the highest id does
        assert!(repo.remove(4).await.unwrap());
        let again = repo.insert(new_user("Again", "again@example.com")).await.unwrap();
        assert_eq!(again.id, 4);
    }

    #[tokio::test]
    async fn test_seeded_store_has_demo_users() {
        let users = InMemoryUserRepository::seeded().list_all().await.unwrap();

        let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(users[0].email, "tanaka@example.com");
        assert_eq!(users[1].email, "sato@example.com");
    }

    #[tokio::test]
    async fn test_list_all_returns_a_snapshot() {
        let repo = InMemoryUserRepository::seeded();

        let mut snapshot = repo.list_all().await.unwrap();
        snapshot[0].name = "Mutated".to_string();
        snapshot.clear();

        let users = repo.list_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Taro Tanaka");
    }

    #[tokio::test]
    async fn test_update_merges_present_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.insert(new_user("Alice", "alice@example.com")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UserChanges {
                    name: Some("Alicia".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(99, UserChanges::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryUserRepository::seeded();

        assert!(repo.remove(2).await.unwrap());
        assert!(!repo.remove(2).await.unwrap());
        assert!(repo.get_by_id(2).await.unwrap().is_none());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one_after_clearing() {
        let repo = InMemoryUserRepository::seeded();
        repo.remove(1).await.unwrap();
        repo.remove(2).await.unwrap();

        let user = repo.insert(new_user("Fresh", "fresh@example.com")).await.unwrap();
        assert_eq!(user.id, 1);
    }
}
