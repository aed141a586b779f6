use time::OffsetDateTime;
use uuid::Uuid;

/// Time source injected into the services so that `created_at` /
/// `modified_at` are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// Source of opaque certification tokens. Injected instead of calling
/// into randomness inline, so `create` is deterministic under test.
pub trait TokenProvider: Send + Sync {
    fn next(&self) -> String;
}

#[derive(Clone, Default)]
pub struct UuidTokenProvider;

impl TokenProvider for UuidTokenProvider {
    fn next(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
