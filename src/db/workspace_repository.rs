use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::IndexModel;

use crate::db::models::Workspace;
use crate::error::{ApiResult, AppError};
use crate::utils::invite_code::generate_invite_code;

/// Repository trait for workspaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Create the unique index on `inviteCode`.
    async fn ensure_indexes(&self) -> ApiResult<()>;

    /// Create a workspace owned by `owner` with a fresh invite code.
    async fn create(
        &self,
        name: &str,
        description: Option<String>,
        owner: ObjectId,
    ) -> ApiResult<Workspace>;

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Workspace>>;

    async fn find_by_invite_code(&self, invite_code: &str) -> ApiResult<Option<Workspace>>;

    /// Replace the invite code and return the updated workspace.
    async fn reset_invite_code(&self, id: ObjectId) -> ApiResult<Workspace>;
}

/// MongoDB implementation of the WorkspaceRepository.
pub struct MongoWorkspaceRepository {
    collection: mongodb::Collection<Workspace>,
}

impl MongoWorkspaceRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("workspaces"),
        }
    }
}

#[async_trait]
impl WorkspaceRepository for MongoWorkspaceRepository {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "inviteCode": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn create(
        &self,
        name: &str,
        description: Option<String>,
        owner: ObjectId,
    ) -> ApiResult<Workspace> {
        let mut workspace = Workspace::new(name, description, owner)?;
        let result = self.collection.insert_one(&workspace).await?;
        workspace.id = result.inserted_id.as_object_id();
        tracing::debug!(invite_code = %workspace.invite_code, "Created workspace");
        Ok(workspace)
    }

    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Workspace>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_invite_code(&self, invite_code: &str) -> ApiResult<Option<Workspace>> {
        Ok(self
            .collection
            .find_one(doc! { "inviteCode": invite_code })
            .await?)
    }

    async fn reset_invite_code(&self, id: ObjectId) -> ApiResult<Workspace> {
        let update = doc! {
            "$set": {
                "inviteCode": generate_invite_code(),
                "updatedAt": bson::DateTime::now(),
            }
        };

        self.collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::not_found("Workspace not found").into())
    }
}
