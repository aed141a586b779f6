//! User-account service core: account creation, email certification,
//! login-gated profile update, and privacy-aware lookups. The HTTP layer
//! is deliberately out of scope; embed [`state::AppState`] behind your
//! own routing.

pub mod certification;
pub mod config;
pub mod error;
pub mod posts;
pub mod providers;
pub mod state;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;
