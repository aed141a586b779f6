use thiserror::Error;

/// Typed failures surfaced by the account and post services.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The record is absent, or not in the state the operation requires.
    /// A non-active user is indistinguishable from a missing one.
    #[error("{kind} with key {key} not found")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} with key {key} already exists")]
    Duplicate { kind: &'static str, key: String },

    #[error("certification code does not match for user {user_id}")]
    CertificationMismatch { user_id: i64 },

    /// Certification mail could not be dispatched. Non-fatal on create.
    #[error("failed to deliver certification mail to {to}")]
    Delivery {
        to: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AccountError {
    pub fn user_not_found_by_id(id: i64) -> Self {
        Self::NotFound {
            kind: "Users",
            key: id.to_string(),
        }
    }

    pub fn user_not_found_by_email(email: &str) -> Self {
        Self::NotFound {
            kind: "Users",
            key: email.to_string(),
        }
    }

    pub fn post_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: "Posts",
            key: id.to_string(),
        }
    }
}
