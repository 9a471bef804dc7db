//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, Environment};

/// Mail delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Resend HTTP API
    Resend,
    /// Log messages instead of delivering them (development only)
    Log,
}

impl MailProvider {
    /// Resolve the provider from the raw `MAIL_PROVIDER` value.
    ///
    /// Unset or blank selects Resend in production and the log provider
    /// elsewhere. Any other unrecognized value is an error.
    pub fn resolve(raw: Option<&str>, environment: Environment) -> Result<Self, String> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse(),
            None if environment.is_production() => Ok(MailProvider::Resend),
            None => Ok(MailProvider::Log),
        }
    }
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resend" => Ok(MailProvider::Resend),
            "log" | "mock" | "console" => Ok(MailProvider::Log),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Which provider delivers verification emails
    pub provider: MailProvider,

    /// Provider API key (`AUTH_RESEND_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Sender address, e.g. `WorkWrap <noreply@workwrap.app>` (`AUTH_EMAIL_FROM`)
    #[serde(default)]
    pub from_address: String,

    /// Base URL of the provider API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum delivery attempts for retryable provider errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Log,
            api_key: String::new(),
            from_address: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables.
    ///
    /// Fails when `MAIL_PROVIDER` names an unknown provider.
    pub fn from_env(environment: Environment) -> Result<Self, String> {
        let raw_provider = std::env::var("MAIL_PROVIDER").ok();

        Ok(Self {
            provider: MailProvider::resolve(raw_provider.as_deref(), environment)?,
            api_key: std::env::var("AUTH_RESEND_KEY").unwrap_or_default(),
            from_address: std::env::var("AUTH_EMAIL_FROM").unwrap_or_default(),
            api_base_url: std::env::var("MAIL_API_BASE_URL")
                .unwrap_or_else(|_| default_api_base_url()),
            timeout_secs: env_or("MAIL_TIMEOUT_SECS", default_timeout_secs()),
            max_retries: env_or("MAIL_MAX_RETRIES", default_max_retries()),
            retry_delay_ms: env_or("MAIL_RETRY_DELAY_MS", default_retry_delay_ms()),
        })
    }
}

fn default_api_base_url() -> String {
    String::from("https://api.resend.com")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}
