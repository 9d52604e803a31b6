use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiResult, AppError};
use crate::utils::invite_code::generate_invite_code;
use crate::utils::password::compare_value;

/// Third-party identity providers an [`Account`] can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountProvider {
    Google,
    Github,
    Facebook,
    /// Email and password.
    Email,
}

impl AccountProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountProvider::Google => "GOOGLE",
            AccountProvider::Github => "GITHUB",
            AccountProvider::Facebook => "FACEBOOK",
            AccountProvider::Email => "EMAIL",
        }
    }
}

fn default_true() -> bool {
    true
}

/// A user as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Unique, stored trimmed and lowercased.
    pub email: String,
    /// bcrypt hash. `None` for users that only sign in through a provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<bson::DateTime>,
    #[serde(default)]
    pub current_workspace: Option<ObjectId>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Input for creating a user. The password is plain text and hashed by the
/// repository before insertion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Build a user from creation input. `password_hash` must already be hashed.
    pub fn new(input: NewUser, password_hash: Option<String>) -> Result<Self, AppError> {
        let email = normalize_email(&input.email);
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }

        let now = bson::DateTime::now();
        Ok(Self {
            id: None,
            name: input
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            email,
            password: password_hash,
            profile_picture: input.profile_picture,
            is_active: true,
            last_login: None,
            current_workspace: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a plain-text candidate against the stored hash. Users without a
    /// password never match.
    pub async fn compare_password(&self, candidate: &str) -> ApiResult<bool> {
        match self.password.as_deref() {
            Some(hash) => compare_value(candidate, hash).await,
            None => Ok(false),
        }
    }

    /// The client-facing view, without the password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.map(|id| id.to_hex()),
            name: self.name.clone(),
            email: self.email.clone(),
            profile_picture: self.profile_picture.clone(),
            is_active: self.is_active,
            last_login: self.last_login.map(|at| at.to_chrono()),
            current_workspace: self.current_workspace.map(|id| id.to_hex()),
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
        }
    }
}

/// A user as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: String,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub current_workspace: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A provider account linked to a user, stored in the `accounts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub provider: AccountProvider,
    /// Identifier assigned by the provider. Unique.
    pub provider_id: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expiry: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: ObjectId,
    pub provider: AccountProvider,
    pub provider_id: String,
    pub refresh_token: Option<String>,
    pub token_expiry: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(input: NewAccount) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: None,
            user_id: input.user_id,
            provider: input.provider,
            provider_id: input.provider_id,
            refresh_token: input.refresh_token,
            token_expiry: input.token_expiry.map(bson::DateTime::from_chrono),
            created_at: now,
            updated_at: now,
        }
    }

    /// The client-facing view. The refresh token is never exposed.
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id.map(|id| id.to_hex()),
            user_id: self.user_id.to_hex(),
            provider: self.provider,
            provider_id: self.provider_id.clone(),
            token_expiry: self.token_expiry.map(|at| at.to_chrono()),
            created_at: self.created_at.to_chrono(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Option<String>,
    pub user_id: String,
    pub provider: AccountProvider,
    pub provider_id: String,
    pub token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A workspace, stored in the `workspaces` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: ObjectId,
    /// Short code others use to join. Unique.
    pub invite_code: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Workspace {
    /// A new workspace with a freshly generated invite code.
    pub fn new(
        name: &str,
        description: Option<String>,
        owner: ObjectId,
    ) -> Result<Self, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Workspace name is required"));
        }

        let now = bson::DateTime::now();
        Ok(Self {
            id: None,
            name: name.to_string(),
            description,
            owner,
            invite_code: generate_invite_code(),
            created_at: now,
            updated_at: now,
        })
    }
}
