use anyhow::Context;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};

use crate::config::AppConfig;
use crate::error::ApiResult;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Connect to MongoDB and make sure the server answers.
///
/// Uses the database named in `MONGO_URI`, falling back to
/// `MONGO_DATABASE`.
pub async fn connect_database(config: &AppConfig) -> anyhow::Result<mongodb::Database> {
    let client = mongodb::Client::with_uri_str(&config.mongo_uri)
        .await
        .context("Failed to connect to MongoDB")?;
    let db = client
        .default_database()
        .unwrap_or_else(|| client.database(&config.mongo_database));

    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB did not answer ping")?;

    tracing::info!(database = db.name(), "Connected to MongoDB");
    Ok(db)
}

/// Returns `true` if the write was rejected by a unique index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Liveness probe for the database, used by the health endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> ApiResult<()>;
}

pub struct MongoHealth {
    db: mongodb::Database,
}

impl MongoHealth {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl DatabaseHealth for MongoHealth {
    async fn ping(&self) -> ApiResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
