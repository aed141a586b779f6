use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

/// Persistence seam for user records. The store only moves rows; state
/// rules live in the service.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn update(&self, user: &User) -> anyhow::Result<User>;
}

const USER_COLUMNS: &str =
    "id, email, nickname, address, certification_code, status, last_login_at, created_at, modified_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Marker attached by stores when an insert trips a unique index, so the
/// service can report `Duplicate` instead of an opaque store failure.
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated on {0}")]
pub struct UniqueViolation(pub &'static str);

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UniqueViolation>().is_some()
}

// Postgres SQLSTATE for unique_violation.
fn map_insert_err(e: sqlx::Error) -> anyhow::Error {
    let unique = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false);
    if unique {
        anyhow::Error::new(e).context(UniqueViolation("users.email"))
    } else {
        e.into()
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, nickname, address, certification_code, status, last_login_at, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $6)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&new_user.email)
        .bind(&new_user.nickname)
        .bind(&new_user.address)
        .bind(&new_user.certification_code)
        .bind(new_user.status)
        .bind(new_user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_err)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#,
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> anyhow::Result<User> {
        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET nickname = $2, address = $3, status = $4, last_login_at = $5, modified_at = $6
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(user.id)
        .bind(&user.nickname)
        .bind(&user.address)
        .bind(user.status)
        .bind(user.last_login_at)
        .bind(user.modified_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }
}
