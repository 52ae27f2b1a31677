//! Clinical-portal core: credential verification with legacy-hash migration
//! tolerance, and the patient dashboard read-model.
//!
//! The UI shell consumes three operations: [`AuthService::login`],
//! [`build_patient_profile`] and [`list_files`]. Everything else here exists
//! to back those three.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;

use tracing_subscriber::EnvFilter;

pub use auth::{verify_password, AuthError, AuthService, HashScheme};
pub use config::DbConfig;
pub use dashboard::{build_patient_profile, list_files};
pub use db::{CredentialStore, PatientRepository, PgPortalStore, StoreError};
pub use models::{Credential, MedicalFile, PatientCore, PatientProfile, SessionContext};

/// Initialize tracing. The host application calls this once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
