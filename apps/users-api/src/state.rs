//! Application state management.
//!
//! Built once in `main` and handed to the route constructors; nothing here
//! is a process-wide global.

use domain_users::{InMemoryUserRepository, UserService};

/// Shared application state.
///
/// Cloning is cheap: the user service shares its repository and write gate.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// User use-cases over the in-memory store
    pub users: UserService<InMemoryUserRepository>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let repository = if config.seed_demo_users {
            InMemoryUserRepository::seeded()
        } else {
            InMemoryUserRepository::new()
        };

        Self {
            config,
            users: UserService::new(repository),
        }
    }
}
