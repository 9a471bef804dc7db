//! One-way hashing of verification codes

use async_trait::async_trait;

use crate::errors::{DomainError, DomainResult};

/// bcrypt cost used for stored code hashes
pub const DEFAULT_HASH_COST: u32 = 10;

/// Hashes codes for storage and checks candidates against stored hashes
#[async_trait]
pub trait CodeHasher: Send + Sync {
    /// Produce a salted one-way hash of `code`
    async fn hash(&self, code: &str) -> DomainResult<String>;

    /// Check `candidate` against a stored hash
    ///
    /// A malformed stored hash is an error, not a mismatch.
    async fn verify(&self, candidate: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt-backed hasher
///
/// bcrypt is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptCodeHasher {
    cost: u32,
}

impl BcryptCodeHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptCodeHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

#[async_trait]
impl CodeHasher for BcryptCodeHasher {
    async fn hash(&self, code: &str) -> DomainResult<String> {
        let code = code.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(code, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Hashing {
                message: e.to_string(),
            })
    }

    async fn verify(&self, candidate: &str, hash: &str) -> DomainResult<bool> {
        let candidate = candidate.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hash verification task failed: {}", e),
            })?
            .map_err(|e| DomainError::Hashing {
                message: e.to_string(),
            })
    }
}
