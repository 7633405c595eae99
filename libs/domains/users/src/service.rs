use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges, UserId};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Enforces the record rules and email uniqueness before anything reaches
/// the repository. Creates and updates are serialized through a write gate
/// so the uniqueness check and the write it guards happen as one step.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    write_gate: Arc<Mutex<()>>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            write_gate: Arc::clone(&self.write_gate),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// List every user
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list_all().await
    }

    /// Get a user by ID; absence is not an error
    pub async fn get_user(&self, id: UserId) -> UserResult<Option<User>> {
        self.repository.get_by_id(id).await
    }

    /// Create a new user
    pub async fn create_user(&self, name: String, email: String) -> UserResult<User> {
        Self::ensure_valid(&User::candidate(name.as_str(), email.as_str()))?;

        let _guard = self.write_gate.lock().await;

        let existing = self.repository.list_all().await?;
        if existing.iter().any(|u| u.email == email) {
            return Err(UserError::DuplicateEmail(email));
        }

        self.repository.insert(NewUser { name, email }).await
    }

    /// Update a user's name and/or email
    pub async fn update_user(&self, id: UserId, changes: UserChanges) -> UserResult<User> {
        let _guard = self.write_gate.lock().await;

        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let merged = current.merged(&changes);
        Self::ensure_valid(&merged)?;

        if merged.email != current.email {
            let existing = self.repository.list_all().await?;
            if existing.iter().any(|u| u.id != id && u.email == merged.email) {
                return Err(UserError::DuplicateEmail(merged.email));
            }
        }

        self.repository
            .update(id, changes)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user
    pub async fn delete_user(&self, id: UserId) -> UserResult<bool> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }

        self.repository.remove(id).await
    }

    fn ensure_valid(user: &User) -> UserResult<()> {
        if user.is_valid() {
            return Ok(());
        }
        Err(UserError::Validation(user.validation_failures().join("; ")))
    }
}
