//! Configuration types for the store.
//!
//! # Example
//!
//! ```rust
//! use roster_store::config::{AuthConfig, LoginKey, StoreConfig};
//! use std::time::Duration;
//!
//! // Use defaults
//! let config = StoreConfig::default();
//!
//! // Or customize
//! let config = StoreConfig {
//!     auth: AuthConfig {
//!         login_key: LoginKey::Email,
//!         simulated_latency: Duration::from_millis(250),
//!         ..Default::default()
//!     },
//! };
//! ```

use std::time::Duration;

use crate::crypto::{Argon2Hasher, PasswordHasher, PlaintextHasher};

/// Main configuration struct for the store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Session and credential settings.
    pub auth: AuthConfig,
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// No artificial latency on login and register.
    ///
    /// Suitable for tests and tooling.
    pub fn development() -> Self {
        Self {
            auth: AuthConfig {
                simulated_latency: Duration::ZERO,
                ..AuthConfig::default()
            },
        }
    }

    /// Re-validates restored sessions and hashes passwords with Argon2.
    pub fn strict() -> Self {
        Self {
            auth: AuthConfig {
                revalidate_on_restore: true,
                password_scheme: PasswordScheme::Argon2,
                ..AuthConfig::default()
            },
        }
    }
}

/// Which user field identifies a leader at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginKey {
    #[default]
    UserId,
    Email,
}

impl LoginKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::Email => "email",
        }
    }
}

/// How the `password` field of stored users is produced and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Stores the password as given.
    ///
    /// INSECURE. Kept as the default for compatibility with existing data;
    /// use [`PasswordScheme::Argon2`] for anything beyond local demos.
    #[default]
    Plaintext,
    Argon2,
}

impl PasswordScheme {
    pub fn hasher(&self) -> Box<dyn PasswordHasher> {
        match self {
            Self::Plaintext => Box::new(PlaintextHasher),
            Self::Argon2 => Box::new(Argon2Hasher::default()),
        }
    }
}

/// Configuration for login, registration and session restore.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Field matched against the login key.
    ///
    /// Default: `userId`
    pub login_key: LoginKey,

    /// Delay awaited before login and register mutate anything.
    ///
    /// Default: 1 second
    pub simulated_latency: Duration,

    /// Drop a restored session whose user no longer exists.
    ///
    /// Default: false (the stored user is trusted as-is)
    pub revalidate_on_restore: bool,

    /// Default: plaintext
    pub password_scheme: PasswordScheme,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_key: LoginKey::UserId,
            simulated_latency: Duration::from_secs(1),
            revalidate_on_restore: false,
            password_scheme: PasswordScheme::Plaintext,
        }
    }
}
