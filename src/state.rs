use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::account_repository::{AccountRepository, MongoAccountRepository};
use crate::db::connection::{connect_database, DatabaseHealth, MongoHealth};
use crate::db::user_repository::{MongoUserRepository, UserRepository};
use crate::db::workspace_repository::{MongoWorkspaceRepository, WorkspaceRepository};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub database: Arc<dyn DatabaseHealth>,
    pub users: Arc<dyn UserRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub workspaces: Arc<dyn WorkspaceRepository>,
}

impl AppState {
    /// Connect to MongoDB, build the repositories and create their indexes.
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let db = connect_database(&config).await?;

        let state = Self {
            config: Arc::new(config),
            database: Arc::new(MongoHealth::new(&db)),
            users: Arc::new(MongoUserRepository::new(&db)),
            accounts: Arc::new(MongoAccountRepository::new(&db)),
            workspaces: Arc::new(MongoWorkspaceRepository::new(&db)),
        };
        state.ensure_indexes().await?;

        Ok(state)
    }

    /// Create the unique indexes every collection relies on.
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        self.users.ensure_indexes().await?;
        self.accounts.ensure_indexes().await?;
        self.workspaces.ensure_indexes().await?;
        tracing::info!("Database indexes ensured");
        Ok(())
    }
}
