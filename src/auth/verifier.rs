//! Hash-scheme detection and password verification.
//!
//! Stored hashes carry no scheme metadata, so the scheme is detected from
//! the hash itself: bcrypt prefixes (`$2a$`, `$2b$`, `$2y$`) select the
//! bcrypt path, anything else is treated as a legacy unsalted digest.
//!
//! The legacy path accepts SHA-256, MD5 and SHA-1 hex digests in any casing
//! (9 comparisons total). That is deliberately permissive migration
//! tolerance for pre-bcrypt records and is load-bearing for existing data;
//! it is not a scheme for new credentials.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Verification scheme derived from the stored hash. Detected once per
/// verification call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Bcrypt,
    LegacyDigest,
}

impl HashScheme {
    pub fn detect(stored_hash: &str) -> Self {
        if BCRYPT_PREFIXES.iter().any(|p| stored_hash.starts_with(p)) {
            Self::Bcrypt
        } else {
            Self::LegacyDigest
        }
    }
}

/// Check a plaintext password against a stored hash of unknown scheme.
///
/// Pure function of its two inputs. Never panics: a malformed bcrypt hash
/// reads as a mismatch, indistinguishable from a wrong password.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match HashScheme::detect(stored_hash) {
        HashScheme::Bcrypt => bcrypt::verify(plaintext, stored_hash).unwrap_or(false),
        HashScheme::LegacyDigest => legacy_digest_matches(plaintext, stored_hash),
    }
}

/// The nine legacy comparisons: {SHA-256, MD5, SHA-1} × {stored as-is,
/// stored lowercased, stored uppercased}. All comparisons always run; the
/// verdict is accumulated with constant-time equality rather than
/// short-circuited.
fn legacy_digest_matches(plaintext: &str, stored_hash: &str) -> bool {
    let digests = [
        hex::encode(Sha256::digest(plaintext.as_bytes())),
        hex::encode(Md5::digest(plaintext.as_bytes())),
        hex::encode(Sha1::digest(plaintext.as_bytes())),
    ];

    let lowered = stored_hash.to_lowercase();
    let uppered = stored_hash.to_uppercase();

    let mut valid = Choice::from(0u8);
    for digest in &digests {
        valid |= stored_hash.as_bytes().ct_eq(digest.as_bytes());
        valid |= lowered.as_bytes().ct_eq(digest.as_bytes());
        valid |= uppered.as_bytes().ct_eq(digest.to_uppercase().as_bytes());
    }
    bool::from(valid)
}
