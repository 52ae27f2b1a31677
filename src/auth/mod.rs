pub mod service;
pub mod verifier;

pub use service::*;
pub use verifier::*;

use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Connection or transport failure. Fatal to the current login attempt,
    /// never retried here — retries belong to the UI layer.
    #[error("data store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("user not found")]
    UserNotFound,

    /// Credential row exists but carries no password hash. A data integrity
    /// problem, not attributable to the caller.
    #[error("credential has no stored password hash")]
    NoStoredHash,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Verified user has no linked patient record (e.g. a staff account).
    #[error("user has no linked patient record")]
    NotAPatient,
}
