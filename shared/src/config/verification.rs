//! Verification code configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Settings for hashing stored verification codes.
///
/// Policy windows (validity, cooldown, lockout) are fixed in the core crate
/// and intentionally absent here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// bcrypt cost factor used when hashing codes
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            hash_cost: env_or("CODE_HASH_COST", default_hash_cost()),
        }
    }
}

fn default_hash_cost() -> u32 {
    10
}
