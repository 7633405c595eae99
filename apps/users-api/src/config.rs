use core_config::{
    AppInfo, FromEnv, app_info, cors::CorsConfig, env_flag, env_parse, server::ServerConfig,
};
use std::time::Duration;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    /// Start the in-memory store with the two demo users (`SEED_DEMO_USERS`)
    pub seed_demo_users: bool,
    /// Upper bound on shutdown cleanup (`SHUTDOWN_TIMEOUT_SECS`)
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let seed_demo_users = env_flag("SEED_DEMO_USERS", true)?;
        let shutdown_timeout = Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?);

        Ok(Self {
            app: app_info!(),
            server,
            cors,
            environment,
            seed_demo_users,
            shutdown_timeout,
        })
    }
}
