use async_trait::async_trait;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

use crate::db::models::{Account, AccountProvider, NewAccount};
use crate::error::ApiResult;

/// Repository trait for provider accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create the unique index on `providerId`.
    async fn ensure_indexes(&self) -> ApiResult<()>;

    /// Link a provider account to a user.
    ///
    /// A duplicate `providerId` is reported as an unclassified driver error.
    async fn create(&self, input: NewAccount) -> ApiResult<Account>;

    async fn find_by_provider_id(
        &self,
        provider: AccountProvider,
        provider_id: &str,
    ) -> ApiResult<Option<Account>>;

    /// All accounts of a user, oldest first.
    async fn list_for_user(&self, user_id: ObjectId) -> ApiResult<Vec<Account>>;
}

/// MongoDB implementation of the AccountRepository.
pub struct MongoAccountRepository {
    collection: mongodb::Collection<Account>,
}

impl MongoAccountRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("accounts"),
        }
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn ensure_indexes(&self) -> ApiResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "providerId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn create(&self, input: NewAccount) -> ApiResult<Account> {
        let mut account = Account::new(input);
        let result = self.collection.insert_one(&account).await?;
        account.id = result.inserted_id.as_object_id();
        Ok(account)
    }

    async fn find_by_provider_id(
        &self,
        provider: AccountProvider,
        provider_id: &str,
    ) -> ApiResult<Option<Account>> {
        Ok(self
            .collection
            .find_one(doc! { "provider": provider.as_str(), "providerId": provider_id })
            .await?)
    }

    async fn list_for_user(&self, user_id: ObjectId) -> ApiResult<Vec<Account>> {
        let mut cursor = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": 1 })
            .await?;

        let mut accounts = Vec::new();
        while let Some(account) = cursor.try_next().await? {
            accounts.push(account);
        }

        Ok(accounts)
    }
}
