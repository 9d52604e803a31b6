use anyhow::Context;

use crate::error::ApiResult;

/// bcrypt cost used for stored passwords.
pub const DEFAULT_SALT_ROUNDS: u32 = 10;

/// Hash a value with [`DEFAULT_SALT_ROUNDS`].
pub async fn hash_value(value: &str) -> ApiResult<String> {
    hash_value_with_rounds(value, DEFAULT_SALT_ROUNDS).await
}

/// Hash a value with bcrypt on the blocking pool.
pub async fn hash_value_with_rounds(value: &str, rounds: u32) -> ApiResult<String> {
    let value = value.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(value, rounds))
        .await
        .context("password hashing task failed")?
        .context("failed to hash value")?;
    Ok(hash)
}

/// Check `value` against a bcrypt hash on the blocking pool.
pub async fn compare_value(value: &str, hash: &str) -> ApiResult<bool> {
    let value = value.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(value, &hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify value")?;
    Ok(matches)
}
