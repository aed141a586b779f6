use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::AccountError;

/// Mail transport collaborator. Retry/backoff, if wanted, lives behind
/// this trait, not in the issuer.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Development transport: logs the outgoing message instead of sending it.
#[derive(Clone, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        info!(%to, %subject, %body, "mail transport not configured, logging message");
        Ok(())
    }
}

/// Composes and dispatches the one-time certification message.
#[derive(Clone)]
pub struct CertificationIssuer {
    mail: Arc<dyn MailSender>,
    base_url: String,
}

impl CertificationIssuer {
    pub fn new(mail: Arc<dyn MailSender>, base_url: impl Into<String>) -> Self {
        Self {
            mail,
            base_url: base_url.into(),
        }
    }

    pub async fn send(&self, email: &str, user_id: i64, code: &str) -> Result<(), AccountError> {
        let subject = "Please certify your email address";
        let body = format!(
            "Please click the following link to certify your email address: \
             {}/users/{}/verify?certificationCode={}",
            self.base_url, user_id, code
        );
        self.mail
            .send(email, subject, &body)
            .await
            .map_err(|source| AccountError::Delivery {
                to: email.to_string(),
                source,
            })?;
        info!(%email, user_id, "certification mail dispatched");
        Ok(())
    }
}
