use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::{rngs::OsRng, RngCore};
use time::OffsetDateTime;
use tracing::error;

lazy_static! {
    /// Verified against when the email is unknown, so both login failures
    /// cost one argon2 run.
    static ref DUMMY_HASH: Option<String> = hash_password("wayfare-dummy-password").ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "argon2 parse hash error");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Burns the same work as a real verification and always fails.
pub fn verify_against_dummy(plain: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
    false
}

/// 32 random bytes, hex encoded.
pub fn issue_reset_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn is_expired(expiry: Option<OffsetDateTime>) -> bool {
    is_expired_at(expiry, OffsetDateTime::now_utc())
}

pub fn is_expired_at(expiry: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    match expiry {
        None => true,
        Some(exp) => now >= exp,
    }
}
