use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    certification::CertificationIssuer,
    config::DuplicateEmailPolicy,
    error::AccountError,
    providers::{Clock, TokenProvider},
    users::{
        repo::{is_unique_violation, UserStore},
        repo_types::{NewUser, User, UserStatus},
        dto::{UserCreate, UserUpdate},
    },
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Result of a successful create. The certification dispatch is decoupled
/// from the record write: a transport failure leaves the user in place and
/// is reported here instead of rolling back.
#[derive(Debug)]
pub struct CreatedUser {
    pub user: User,
    pub delivery_warning: Option<AccountError>,
}

/// Single source of truth for user records and the PENDING/ACTIVE
/// transition. All reads and writes of a user go through here.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    certification: CertificationIssuer,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenProvider>,
    duplicate_email: DuplicateEmailPolicy,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        certification: CertificationIssuer,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenProvider>,
        duplicate_email: DuplicateEmailPolicy,
    ) -> Self {
        Self {
            store,
            certification,
            clock,
            tokens,
            duplicate_email,
        }
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, mut payload: UserCreate) -> Result<CreatedUser, AccountError> {
        payload.email = payload.email.trim().to_lowercase();

        if !is_valid_email(&payload.email) {
            warn!(email = %payload.email, "invalid email");
            return Err(AccountError::InvalidEmail(payload.email));
        }

        if self.duplicate_email == DuplicateEmailPolicy::Reject {
            if let Some(_existing) = self.store.find_by_email(&payload.email).await? {
                warn!(email = %payload.email, "email already registered");
                return Err(AccountError::Duplicate {
                    kind: "Users",
                    key: payload.email,
                });
            }
        }

        let now = self.clock.now_millis();
        let new_user = NewUser {
            email: payload.email,
            nickname: payload.nickname,
            address: payload.address,
            certification_code: self.tokens.next(),
            status: UserStatus::Pending,
            created_at: now,
        };

        // The pre-check can race; a unique violation from the insert is
        // still a Duplicate under either policy.
        let user = match self.store.insert(new_user).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(AccountError::Duplicate {
                    kind: "Users",
                    key: "email".into(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        info!(user_id = user.id, email = %user.email, "user created, pending certification");

        // Dispatch only after the record is durable. Best effort: the
        // created user stands even if the mail cannot go out.
        let delivery_warning = match self
            .certification
            .send(&user.email, user.id, &user.certification_code)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "certification dispatch failed");
                Some(e)
            }
        };

        Ok(CreatedUser {
            user,
            delivery_warning,
        })
    }

    /// Active users only. A pending account is indistinguishable from a
    /// nonexistent one here.
    #[instrument(skip(self))]
    pub async fn get_active_by_id(&self, id: i64) -> Result<User, AccountError> {
        match self.store.find_by_id(id).await? {
            Some(user) if user.status == UserStatus::Active => Ok(user),
            _ => Err(AccountError::user_not_found_by_id(id)),
        }
    }

    /// Same contract as `get_active_by_id`, keyed by email.
    #[instrument(skip(self))]
    pub async fn get_active_by_email(&self, email: &str) -> Result<User, AccountError> {
        match self.store.find_by_email(email).await? {
            Some(user) if user.status == UserStatus::Active => Ok(user),
            _ => Err(AccountError::user_not_found_by_email(email)),
        }
    }

    /// Match the supplied code against the stored one and activate the
    /// account. Reachable for pending users, unlike the getters above.
    /// Idempotent once active, so a re-clicked certification link (or a
    /// lost activation race) is harmless.
    #[instrument(skip(self, supplied_code))]
    pub async fn verify(&self, id: i64, supplied_code: &str) -> Result<User, AccountError> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::user_not_found_by_id(id))?;

        if user.certification_code != supplied_code {
            warn!(user_id = id, "certification code mismatch");
            return Err(AccountError::CertificationMismatch { user_id: id });
        }

        if user.status == UserStatus::Active {
            return Ok(user);
        }

        user.status = UserStatus::Active;
        user.modified_at = self.clock.now_millis();
        let user = self.store.update(&user).await?;
        info!(user_id = id, "user certified and activated");
        Ok(user)
    }

    /// Self-service update for the acting user, addressed by email. The one
    /// path where a pending account is still reachable by email.
    #[instrument(skip(self, payload))]
    pub async fn update_profile(
        &self,
        acting_email: &str,
        payload: UserUpdate,
    ) -> Result<User, AccountError> {
        let mut user = self
            .store
            .find_by_email(acting_email)
            .await?
            .ok_or_else(|| AccountError::user_not_found_by_email(acting_email))?;

        user.nickname = payload.nickname;
        user.address = payload.address;
        user.modified_at = self.clock.now_millis();
        let user = self.store.update(&user).await?;
        info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    /// Records a successful authenticated access. `last_login_at` never
    /// moves backwards, even if the clock does.
    #[instrument(skip(self))]
    pub async fn login(&self, id: i64) -> Result<User, AccountError> {
        let mut user = self.get_active_by_id(id).await?;
        let now = self.clock.now_millis();
        user.last_login_at = now.max(user.last_login_at);
        user.modified_at = now;
        let user = self.store.update(&user).await?;
        info!(user_id = id, "login recorded");
        Ok(user)
    }
}
