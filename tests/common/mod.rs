#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::routing::{get, post};
use axum::Router;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use teamhub::api::extract::Json;
use teamhub::config::AppConfig;
use teamhub::db::account_repository::{AccountRepository, MongoAccountRepository};
use teamhub::db::connection::DatabaseHealth;
use teamhub::db::models::{Account, AccountProvider, NewAccount, NewUser, User, Workspace};
use teamhub::db::user_repository::{MongoUserRepository, UserRepository};
use teamhub::db::workspace_repository::{MongoWorkspaceRepository, WorkspaceRepository};
use teamhub::enums::error_code::ErrorCode;
use teamhub::error::{ApiResult, AppError};
use teamhub::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig::from_vars([
        ("APP_ENV", "test"),
        ("MONGO_URI", "mongodb://127.0.0.1:27017"),
        ("SESSION_SECRET", "test-secret"),
        ("SESSION_EXPIRES_IN", "1d"),
        ("FRONTEND_ORIGIN", "http://localhost:3000"),
    ])
    .expect("test config should load")
}

// -- In-memory collaborators for HTTP tests --

pub struct StubHealth {
    pub healthy: bool,
}

#[async_trait]
impl DatabaseHealth for StubHealth {
    async fn ping(&self) -> ApiResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(anyhow::anyhow!("connection refused").into())
        }
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn create(&self, input: NewUser) -> ApiResult<User> {
        let mut user = User::new(input, None)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::bad_request("Email already exists")
                .with_error_code(ErrorCode::AuthEmailAlreadyExists)
                .into());
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let email = teamhub::db::models::normalize_email(email);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn set_current_workspace(
        &self,
        user_id: ObjectId,
        workspace_id: ObjectId,
    ) -> ApiResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(user_id))
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.current_workspace = Some(workspace_id);
        Ok(user.clone())
    }

    async fn record_login(&self, user_id: ObjectId) -> ApiResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(user_id))
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.last_login = Some(bson::DateTime::now());
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct MemoryAccounts {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn create(&self, input: NewAccount) -> ApiResult<Account> {
        let mut account = Account::new(input);
        account.id = Some(ObjectId::new());
        self.accounts.lock().unwrap().push(account.clone());
        Ok(account)
    }

    async fn find_by_provider_id(
        &self,
        provider: AccountProvider,
        provider_id: &str,
    ) -> ApiResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.provider == provider && a.provider_id == provider_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: ObjectId) -> ApiResult<Vec<Account>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryWorkspaces {
    workspaces: Mutex<Vec<Workspace>>,
}

#[async_trait]
impl WorkspaceRepository for MemoryWorkspaces {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn create(
        &self,
        name: &str,
        description: Option<String>,
        owner: ObjectId,
    ) -> ApiResult<Workspace> {
        let mut workspace = Workspace::new(name, description, owner)?;
        workspace.id = Some(ObjectId::new());
        self.workspaces.lock().unwrap().push(workspace.clone());
        Ok(workspace)
    }

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Workspace>> {
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == Some(id))
            .cloned())
    }

    async fn find_by_invite_code(&self, invite_code: &str) -> ApiResult<Option<Workspace>> {
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.invite_code == invite_code)
            .cloned())
    }

    async fn reset_invite_code(&self, id: ObjectId) -> ApiResult<Workspace> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let workspace = workspaces
            .iter_mut()
            .find(|w| w.id == Some(id))
            .ok_or_else(|| AppError::not_found("Workspace not found"))?;
        workspace.invite_code = teamhub::utils::invite_code::generate_invite_code();
        workspace.updated_at = bson::DateTime::now();
        Ok(workspace.clone())
    }
}

pub fn memory_state(healthy: bool) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        database: Arc::new(StubHealth { healthy }),
        users: Arc::new(MemoryUsers::default()),
        accounts: Arc::new(MemoryAccounts::default()),
        workspaces: Arc::new(MemoryWorkspaces::default()),
    }
}

// -- Routes that fail on purpose --

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoRequest {
    pub name: String,
}

async fn bad_request_handler() -> ApiResult<Json<EchoRequest>> {
    Err(AppError::bad_request("Bad Request").into())
}

async fn bad_request_with_code_handler() -> Result<Json<EchoRequest>, AppError> {
    Err(AppError::bad_request("Bad Request").with_error_code(ErrorCode::AuthTokenInvalid))
}

async fn unclassified_handler() -> ApiResult<&'static str> {
    tokio::task::yield_now().await;
    Err(anyhow::anyhow!("disk full").into())
}

async fn panic_handler() -> &'static str {
    tokio::task::yield_now().await;
    panic!("handler exploded");
}

async fn echo_handler(Json(request): Json<EchoRequest>) -> Json<EchoRequest> {
    Json(request)
}

async fn duplicate_user_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> ApiResult<Json<teamhub::db::models::PublicUser>> {
    let input = NewUser {
        email: "dup@example.com".to_string(),
        ..NewUser::default()
    };
    state.users.create(input.clone()).await?;
    let user = state.users.create(input).await?;
    Ok(Json(user.to_public()))
}

pub fn failing_routes() -> Router<AppState> {
    Router::new()
        .route("/test/bad-request", get(bad_request_handler))
        .route("/test/bad-request-token", get(bad_request_with_code_handler))
        .route("/test/unclassified", get(unclassified_handler))
        .route("/test/panic", get(panic_handler))
        .route("/test/echo", post(echo_handler))
        .route("/test/duplicate-user", post(duplicate_user_handler))
}

/// Router with the real API plus the failing test routes, over in-memory state.
pub fn test_server(healthy: bool) -> axum_test::TestServer {
    let router = teamhub::app::mount(
        teamhub::app::api_routes().merge(failing_routes()),
        memory_state(healthy),
    );
    axum_test::TestServer::builder().build(router)
}

// -- MongoDB-backed environment for repository tests --

/// Holds a running MongoDB container and repositories bound to it.
///
/// The container is stopped when this struct is dropped.
pub struct MongoEnv {
    _mongo: ContainerAsync<Mongo>,
    pub db: mongodb::Database,
    pub users: Arc<dyn UserRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub workspaces: Arc<dyn WorkspaceRepository>,
}

impl MongoEnv {
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database("teamhub_test");

        let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&db));
        let accounts: Arc<dyn AccountRepository> = Arc::new(MongoAccountRepository::new(&db));
        let workspaces: Arc<dyn WorkspaceRepository> =
            Arc::new(MongoWorkspaceRepository::new(&db));

        users.ensure_indexes().await.expect("user indexes");
        accounts.ensure_indexes().await.expect("account indexes");
        workspaces.ensure_indexes().await.expect("workspace indexes");

        Self {
            _mongo: mongo_container,
            db,
            users,
            accounts,
            workspaces,
        }
    }
}
