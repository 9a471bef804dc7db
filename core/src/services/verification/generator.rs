//! Verification code generation

use rand::{rngs::OsRng, Rng};

/// Smallest code that can be generated (no leading zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be generated
pub const CODE_MAX: u32 = 999_999;

/// Generate a 6-digit verification code
///
/// Values are uniform over `[CODE_MIN, CODE_MAX]` and drawn from the
/// operating system CSPRNG.
pub fn generate_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}
