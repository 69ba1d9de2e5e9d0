//! Credential hashing.
//!
//! Passwords are stored as argon2 encoded strings with a random 16-byte salt
//! per user. The encoded form embeds its own parameters, so hashes created
//! with different [`PasswordHasher`] costs verify alike.

use std::fmt;

use argon2::Config;
use rand::RngCore;

const SALT_LEN: usize = 16;
const ENCODED_PREFIX: &str = "$argon2";

/// Failures raised while hashing or parsing stored credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing backend rejected the input or parameters.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Backend error text.
        message: String,
    },
    /// A stored value is not an argon2 encoded hash.
    #[error("stored credential is not an argon2 hash")]
    NotEncoded,
}

/// Argon2 encoded credential.
///
/// `Debug` and `Display` never print the hash itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a previously stored encoded hash.
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, PasswordHashError> {
        let encoded = encoded.into();
        if encoded.starts_with(ENCODED_PREFIX) {
            Ok(Self(encoded))
        } else {
            Err(PasswordHashError::NotEncoded)
        }
    }

    /// Encoded form for persistence.
    pub fn as_encoded(&self) -> &str {
        self.0.as_str()
    }

    /// Check a plaintext password. Malformed hashes never verify.
    pub fn verify(&self, password: &str) -> bool {
        argon2::verify_encoded(&self.0, password.as_bytes()).unwrap_or(false)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Hashing cost settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    mem_cost_kib: u32,
    time_cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        let config = Config::default();
        Self {
            mem_cost_kib: config.mem_cost,
            time_cost: config.time_cost,
        }
    }
}

impl PasswordHasher {
    /// Minimal cost for tests and seeding throwaway directories.
    pub fn low_cost() -> Self {
        Self {
            mem_cost_kib: 64,
            time_cost: 1,
        }
    }

    /// Hash `password` with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use coursehub::domain::PasswordHasher;
    ///
    /// let hash = PasswordHasher::low_cost().hash("correct horse").expect("hash");
    /// assert!(hash.verify("correct horse"));
    /// assert!(!hash.verify("wrong"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let config = Config {
            mem_cost: self.mem_cost_kib,
            time_cost: self.time_cost,
            ..Config::default()
        };
        argon2::hash_encoded(password.as_bytes(), &salt, &config)
            .map(PasswordHash)
            .map_err(|err| PasswordHashError::Hashing {
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::low_cost();
        let first = hasher.hash("password123").expect("hash");
        let second = hasher.hash("password123").expect("hash");
        assert_ne!(first.as_encoded(), second.as_encoded());
        assert!(first.verify("password123"));
        assert!(second.verify("password123"));
    }

    #[rstest]
    fn encoded_hash_never_contains_plaintext() {
        let hash = PasswordHasher::low_cost().hash("adminpassword").expect("hash");
        assert!(!hash.as_encoded().contains("adminpassword"));
        assert!(!format!("{hash:?}").contains("argon2"));
    }

    #[rstest]
    #[case("adminpassword")]
    #[case("")]
    fn from_encoded_rejects_plaintext(#[case] raw: &str) {
        assert_eq!(
            PasswordHash::from_encoded(raw),
            Err(PasswordHashError::NotEncoded)
        );
    }

    #[rstest]
    fn round_trips_through_encoded_form() {
        let hash = PasswordHasher::low_cost().hash("subadminpassword").expect("hash");
        let restored = PasswordHash::from_encoded(hash.as_encoded()).expect("restore");
        assert!(restored.verify("subadminpassword"));
    }
}
