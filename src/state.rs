use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::certification::{CertificationIssuer, LogMailSender, MailSender};
use crate::config::AppConfig;
use crate::posts::{repo::PgPostStore, services::PostService};
use crate::providers::{SystemClock, UuidTokenProvider};
use crate::users::{repo::PgUserStore, services::UserService};

/// Composition root for embedding callers: wires the Postgres stores and
/// the system capability providers into the services.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserService,
    pub posts: PostService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        // No real mail transport in this crate; embedders pass their own.
        Ok(Self::from_parts(db, config, Arc::new(LogMailSender)))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, mail: Arc<dyn MailSender>) -> Self {
        let clock = Arc::new(SystemClock);
        let users = UserService::new(
            Arc::new(PgUserStore::new(db.clone())),
            CertificationIssuer::new(mail, config.certification.base_url.clone()),
            clock.clone(),
            Arc::new(UuidTokenProvider),
            config.duplicate_email,
        );
        let posts = PostService::new(
            Arc::new(PgPostStore::new(db.clone())),
            users.clone(),
            clock,
        );
        Self {
            db,
            config,
            users,
            posts,
        }
    }
}
