use crate::StoreError;
use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A wrapper for sensitive string data that prevents accidental logging.
///
/// `SecretString` implements `Debug` and `Display` to show `[REDACTED]` instead
/// of the actual content.
///
/// # Example
///
/// ```rust
/// use roster_store::crypto::SecretString;
///
/// let password = SecretString::new("my_secret_password");
///
/// assert_eq!(format!("{:?}", password), "SecretString([REDACTED])");
/// assert_eq!(password.expose_secret(), "my_secret_password");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the secret value.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // the users collection stores the value itself
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}

/// Produces and checks the value stored in a user's `password` field.
///
/// # Example
///
/// ```rust
/// use roster_store::crypto::{PasswordHasher, Argon2Hasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("mypassword").unwrap();
/// assert!(hasher.verify("mypassword", &hash).unwrap());
/// assert!(!hasher.verify("wrongpassword", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::PasswordHashError` if the stored value is malformed.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, StoreError>;
}

/// Stores passwords unchanged and compares them by equality.
///
/// INSECURE: anyone who can read the backing store can read every password.
/// It exists so data written by earlier versions keeps working.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextHasher;

impl PasswordHasher for PlaintextHasher {
    fn hash(&self, password: &str) -> Result<String, StoreError> {
        Ok(password.to_owned())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, StoreError> {
        Ok(password == stored)
    }
}

/// Hashes stored leader passwords with Argon2id when the store runs with
/// [`PasswordScheme::Argon2`](crate::PasswordScheme::Argon2).
///
/// Only hashing reads the cost settings. Verification takes them from the
/// PHC string already in the `users` collection, so records hashed under
/// older settings keep working.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    memory_kib: u32,
    passes: u32,
    lanes: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            passes: Params::DEFAULT_T_COST,
            lanes: Params::DEFAULT_P_COST,
        }
    }
}

impl Argon2Hasher {
    /// Memory in KiB, then passes and lanes, as `argon2::Params` takes them.
    #[must_use]
    pub fn new(memory_kib: u32, passes: u32, lanes: u32) -> Self {
        Self {
            memory_kib,
            passes,
            lanes,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_kib, self.passes, self.lanes, None)
            .map_err(|_| StoreError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| StoreError::PasswordHashError)
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, StoreError> {
        let parsed = PasswordHash::new(stored).map_err(|_| StoreError::PasswordHashError)?;

        // params come from the stored hash, not from self
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Random alphanumeric string, used to name scratch directories in tests.
#[cfg(any(test, feature = "mocks"))]
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}
