use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::IndexModel;

use crate::db::connection::is_duplicate_key;
use crate::db::models::{normalize_email, NewUser, User};
use crate::enums::error_code::ErrorCode;
use crate::error::{ApiError, ApiResult, AppError};
use crate::utils::password::hash_value;

/// Repository trait for user operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the unique index on `email`.
    async fn ensure_indexes(&self) -> ApiResult<()>;

    /// Insert a new user, hashing the password first.
    ///
    /// Fails with `AUTH_EMAIL_ALREADY_EXISTS` if the email is taken.
    async fn create(&self, input: NewUser) -> ApiResult<User>;

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>>;

    /// Lookup is case-insensitive and ignores surrounding whitespace.
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    async fn set_current_workspace(&self, user_id: ObjectId, workspace_id: ObjectId) -> ApiResult<User>;

    /// Stamp `lastLogin` with the current time.
    async fn record_login(&self, user_id: ObjectId) -> ApiResult<User>;
}

/// MongoDB implementation of the UserRepository.
pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    async fn update(&self, user_id: ObjectId, set: bson::Document) -> ApiResult<User> {
        self.collection
            .find_one_and_update(doc! { "_id": user_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found")
                    .with_error_code(ErrorCode::AuthUserNotFound)
                    .into()
            })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn create(&self, input: NewUser) -> ApiResult<User> {
        let password_hash = match input.password.as_deref() {
            Some(password) => Some(hash_value(password).await?),
            None => None,
        };
        let mut user = User::new(input, password_hash)?;

        let result = self.collection.insert_one(&user).await.map_err(|err| {
            if is_duplicate_key(&err) {
                AppError::bad_request("Email already exists")
                    .with_error_code(ErrorCode::AuthEmailAlreadyExists)
                    .into()
            } else {
                ApiError::from(err)
            }
        })?;

        user.id = result.inserted_id.as_object_id();
        tracing::debug!(email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "email": normalize_email(email) })
            .await?)
    }

    async fn set_current_workspace(&self, user_id: ObjectId, workspace_id: ObjectId) -> ApiResult<User> {
        self.update(
            user_id,
            doc! { "currentWorkspace": workspace_id, "updatedAt": bson::DateTime::now() },
        )
        .await
    }

    async fn record_login(&self, user_id: ObjectId) -> ApiResult<User> {
        let now = bson::DateTime::now();
        self.update(user_id, doc! { "lastLogin": now, "updatedAt": now })
            .await
    }
}
