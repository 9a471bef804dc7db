//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    generate_code, BcryptCodeHasher, Clock, CodeHasher, IssueOutcome, IssuedCode, MailDispatcher,
    ManualClock, RecordingMailDispatcher, SentMail, SystemClock, VerificationGuard,
    VerificationService, VerifiedCode, VerifyOutcome,
};
