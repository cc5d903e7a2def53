//! Authentication module
//!
//! Supports: API Key, Bearer, signed-in user sessions
//!
//! The `Authenticator` holds the signed-in user (if any) and applies the
//! configured credentials to outgoing document-store requests. Sign-up,
//! sign-in and password flows live with the platform's auth service; this
//! module only carries the resulting session.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, AuthSession, Location};
