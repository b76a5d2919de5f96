use sha2::{Digest, Sha256};
use std::fmt;

/// Storage key of one user's snapshot.
///
/// User identifiers are frequently e-mail addresses, so the key carries a
/// SHA-256 digest of the id rather than the id itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_user(namespace: &str, user_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(user_id.as_bytes());
        let digest = hex::encode(hasher.finalize());
        Self(format!("{}{}", namespace, digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
