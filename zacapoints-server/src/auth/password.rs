//! Password hashing (bcrypt, off the async runtime)

use shared::error::{AppError, ErrorCode};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plain password
    pub async fn hash(&self, plain: &str) -> Result<String, AppError> {
        let plain = plain.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking join error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "bcrypt hash failed");
                AppError::new(ErrorCode::InternalError)
            })
    }

    /// Compare a plain password against a stored bcrypt hash
    pub async fn verify(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking join error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "bcrypt verify failed");
                AppError::new(ErrorCode::PasswordHashInvalid)
            })
    }
}

/// Whether a stored value looks like a bcrypt hash
///
/// Legacy rows may hold plain text; those must never be compared.
pub fn is_bcrypt_hash(stored: &str) -> bool {
    stored.len() == 60
        && (stored.starts_with("$2a$") || stored.starts_with("$2b$") || stored.starts_with("$2y$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("1234").await.unwrap();
        assert!(is_bcrypt_hash(&hash));
        assert!(hasher.verify("1234", &hash).await.unwrap());
        assert!(!hasher.verify("4321", &hash).await.unwrap());
    }

    #[test]
    fn test_plain_text_is_not_a_hash() {
        assert!(!is_bcrypt_hash("1234"));
        assert!(!is_bcrypt_hash("$argon2id$v=19$m=19456,t=2,p=1$abc"));
    }
}
