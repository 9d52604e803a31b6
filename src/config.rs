use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Process configuration, read once at startup and shared through
/// [`AppState`](crate::state::AppState).
///
/// Each field maps to the upper-cased environment variable of the same name
/// (`mongo_uri` ← `MONGO_URI`). Empty variables count as unset.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment, `development` by default.
    pub app_env: String,
    pub port: u16,
    /// Prefix every API route is mounted under.
    pub base_path: String,
    /// MongoDB connection string. Required.
    pub mongo_uri: String,
    /// Database used when `mongo_uri` does not name one.
    pub mongo_database: String,
    /// Required.
    pub session_secret: String,
    /// Required.
    pub session_expires_in: String,
    /// Origin allowed by CORS.
    pub frontend_origin: String,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    /// Load from an explicit set of variables (useful for testing).
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(Environment::default().source(Some(source)))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app_env", "development")?
            .set_default("port", 5000)?
            .set_default("base_path", "/api")?
            .set_default("mongo_database", "teamhub")?
            .set_default("frontend_origin", "localhost")?
            .add_source(environment.ignore_empty(true))
            .build()?
            .try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
