//! Anti-forgery tokens for mutating wiki requests.
//!
//! A token is bound to an action tag and, when relevant, the key of the entry
//! being written. Validation is fail-fast: handlers check the token before
//! touching the store.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

const DEFAULT_TOKEN_MAX_AGE: Duration = Duration::hours(24);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XsrfError {
    #[error("token is malformed")]
    Malformed,
    #[error("token does not match the requested action")]
    Mismatch,
    #[error("token has expired")]
    Expired,
}

pub struct XsrfTokenManager {
    secret: Vec<u8>,
    max_age: Duration,
}

impl XsrfTokenManager {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            max_age: DEFAULT_TOKEN_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Issue a token for `action`, optionally bound to an entry key.
    pub fn create_token(&self, action: &str, key: Option<&str>) -> String {
        self.token_at(action, key, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Check a presented token against `action`/`key` and the max age.
    pub fn validate(&self, token: &str, action: &str, key: Option<&str>) -> Result<(), XsrfError> {
        let (issued_part, digest_part) = token.split_once('.').ok_or(XsrfError::Malformed)?;
        let issued_at: i64 = issued_part.parse().map_err(|_| XsrfError::Malformed)?;
        let presented = hex::decode(digest_part).map_err(|_| XsrfError::Malformed)?;

        let expected = self.digest(action, key, issued_at);
        if expected.as_slice().ct_eq(presented.as_slice()).unwrap_u8() == 0 {
            return Err(XsrfError::Mismatch);
        }

        let age = OffsetDateTime::now_utc().unix_timestamp() - issued_at;
        if age < 0 || Duration::seconds(age) > self.max_age {
            return Err(XsrfError::Expired);
        }

        Ok(())
    }

    fn token_at(&self, action: &str, key: Option<&str>, issued_at: i64) -> String {
        format!(
            "{issued_at}.{}",
            hex::encode(self.digest(action, key, issued_at))
        )
    }

    fn digest(&self, action: &str, key: Option<&str>, issued_at: i64) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update([0u8]);
        hasher.update(action.as_bytes());
        hasher.update([0u8]);
        if let Some(key) = key {
            hasher.update(key.as_bytes());
        }
        hasher.update([0u8]);
        hasher.update(issued_at.to_be_bytes());
        hasher.finalize().to_vec()
    }
}
