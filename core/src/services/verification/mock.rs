//! Recording mail dispatcher for tests and local development

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::MailDispatcher;

/// One attempted delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub address: String,
    pub code: String,
}

/// Mail dispatcher that keeps every attempted delivery in memory
///
/// Attempts are recorded even when the dispatcher is set to fail, so a
/// test can recover the plaintext code of an undelivered message.
#[derive(Clone, Default)]
pub struct RecordingMailDispatcher {
    sent: Arc<RwLock<Vec<SentMail>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that reports every delivery as failed
    pub fn failing() -> Self {
        let dispatcher = Self::default();
        dispatcher.set_failing(true);
        dispatcher
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All attempted deliveries, oldest first
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }

    /// Most recent code handed over for `address`
    pub async fn last_code_for(&self, address: &str) -> Option<String> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|mail| mail.address == address)
            .map(|mail| mail.code.clone())
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailDispatcher {
    async fn send_verification_code(&self, address: &str, code: &str) -> Result<String, String> {
        let mut sent = self.sent.write().await;
        sent.push(SentMail {
            address: address.to_string(),
            code: code.to_string(),
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err("Mail provider unavailable".to_string());
        }
        Ok(format!("recorded-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}
