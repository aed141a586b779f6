//! In-memory fakes shared by the unit tests. They stand in for the
//! Postgres stores, the mail transport, and the injected clock/token
//! capabilities so the services run deterministically without I/O.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use crate::certification::MailSender;
use crate::posts::repo::PostStore;
use crate::posts::repo_types::{NewPost, Post};
use crate::providers::{Clock, TokenProvider};
use crate::users::repo::{UniqueViolation, UserStore};
use crate::users::repo_types::{NewUser, User, UserStatus};

pub const CODE_KOK202: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
pub const CODE_KOK303: &str = "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb";

/// In-memory user table. Enforces the email unique index the way the
/// Postgres store surfaces it.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed(&self, user: User) {
        let mut rows = self.rows.lock().unwrap();
        self.next_id.fetch_max(user.id + 1, Ordering::SeqCst);
        rows.push(user);
    }

    /// Direct row access, bypassing the registry's status gating.
    pub fn raw_by_id(&self, id: i64) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn raw_by_email(&self, email: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(anyhow::Error::new(UniqueViolation("users.email")));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: new_user.email,
            nickname: new_user.nickname,
            address: new_user.address,
            certification_code: new_user.certification_code,
            status: new_user.status,
            last_login_at: 0,
            created_at: new_user.created_at,
            modified_at: new_user.created_at,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.raw_by_id(id))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.raw_by_email(email))
    }

    async fn update(&self, user: &User) -> anyhow::Result<User> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| anyhow::anyhow!("no user row with id {}", user.id))?;
        *row = user.clone();
        Ok(user.clone())
    }
}

/// The two seeded accounts used across the service tests: kok202 is
/// already certified, kok303 is still pending.
pub fn seeded_store() -> MemoryUserStore {
    let store = MemoryUserStore::new();
    store.seed(User {
        id: 1,
        email: "kok202@naver.com".into(),
        nickname: "kok202".into(),
        address: "Seoul".into(),
        certification_code: CODE_KOK202.into(),
        status: UserStatus::Active,
        last_login_at: 0,
        created_at: 0,
        modified_at: 0,
    });
    store.seed(User {
        id: 2,
        email: "kok303@naver.com".into(),
        nickname: "kok303".into(),
        address: "Busan".into(),
        certification_code: CODE_KOK303.into(),
        status: UserStatus::Pending,
        last_login_at: 0,
        created_at: 0,
        modified_at: 0,
    });
    store
}

#[derive(Default)]
pub struct MemoryPostStore {
    rows: Mutex<Vec<Post>>,
    next_id: AtomicI64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, new_post: NewPost) -> anyhow::Result<Post> {
        let mut rows = self.rows.lock().unwrap();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            writer_id: new_post.writer_id,
            content: new_post.content,
            created_at: new_post.created_at,
            modified_at: new_post.created_at,
        };
        rows.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Post>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, post: &Post) -> anyhow::Result<Post> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| anyhow::anyhow!("no post row with id {}", post.id))?;
        *row = post.clone();
        Ok(post.clone())
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Captures outgoing mail; can be told to fail the next send to simulate
/// a transport outage.
#[derive(Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<SentMail>>,
    fail_next: AtomicBool,
}

impl RecordingMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn last(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("smtp connection refused");
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Always hands out the same token, like the original fixed-uuid test double.
pub struct FixedTokenProvider(String);

impl FixedTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for FixedTokenProvider {
    fn next(&self) -> String {
        self.0.clone()
    }
}

/// Hand-driven clock for asserting created/modified timestamps.
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }

    pub fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
