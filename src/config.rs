use serde::Deserialize;

/// How `create` treats an email that is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEmailPolicy {
    /// Fail fast with `Duplicate` before inserting.
    Reject,
    /// Skip the pre-check and rely on the database unique index.
    DbConstraint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificationConfig {
    /// Base URL embedded in certification links,
    /// e.g. `http://localhost:8080/api`.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub certification: CertificationConfig,
    pub duplicate_email: DuplicateEmailPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let certification = CertificationConfig {
            base_url: std::env::var("CERTIFICATION_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".into()),
        };
        let duplicate_email = match std::env::var("DUPLICATE_EMAIL_POLICY")
            .unwrap_or_else(|_| "reject".into())
            .to_lowercase()
            .as_str()
        {
            "constraint" => DuplicateEmailPolicy::DbConstraint,
            _ => DuplicateEmailPolicy::Reject,
        };
        Ok(Self {
            database_url,
            certification,
            duplicate_email,
        })
    }
}
