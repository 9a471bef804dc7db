//! Verification service module for email-based authentication
//!
//! This module provides the complete verification code workflow:
//! - Code generation and bcrypt hashing
//! - Issuance with expiry sweep, lock check and per-address cooldown
//! - Attempt-limited verification with a time-boxed lock
//! - Integration with the credential store and a mail dispatcher

mod clock;
mod generator;
mod guard;
mod hasher;
mod mock;
mod service;
mod traits;
mod types;


pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::{generate_code, CODE_MAX, CODE_MIN};
pub use guard::{next_issue_at, VerificationGuard};
pub use hasher::{BcryptCodeHasher, CodeHasher, DEFAULT_HASH_COST};
pub use mock::{RecordingMailDispatcher, SentMail};
pub use service::VerificationService;
pub use traits::MailDispatcher;
pub use types::{IssueOutcome, IssuedCode, VerifiedCode, VerifyOutcome};
