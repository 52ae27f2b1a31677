//! Login orchestration.
//!
//! Flow: fetch credential → verify password → resolve linked patient →
//! return a `SessionContext`. Each step runs at most once; every failure is
//! one of the terminal `AuthError` variants and no partial session ever
//! escapes. The post-login companion-window hook is the UI layer's concern
//! and starts after this function returns.

use super::verifier::verify_password;
use super::AuthError;
use crate::db::{CredentialStore, PatientRepository};
use crate::models::SessionContext;

pub struct AuthService<S> {
    store: S,
}

impl<S: CredentialStore + PatientRepository> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Authenticate a username/password pair against the portal store.
    ///
    /// The username match is exact and case-sensitive. The returned
    /// `SessionContext` carries the username as stored, not as typed.
    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionContext, AuthError> {
        let credential = self
            .store
            .fetch_by_username(username)?
            .ok_or_else(|| {
                tracing::debug!(username, "login failed: unknown user");
                AuthError::UserNotFound
            })?;

        if credential.stored_hash.is_empty() {
            tracing::warn!(user_id = credential.user_id, "credential row has no password hash");
            return Err(AuthError::NoStoredHash);
        }

        if !verify_password(password, &credential.stored_hash) {
            tracing::debug!(user_id = credential.user_id, "login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let patient_id = self
            .store
            .fetch_patient_id(credential.user_id)?
            .ok_or_else(|| {
                tracing::debug!(user_id = credential.user_id, "login failed: not a patient");
                AuthError::NotAPatient
            })?;

        tracing::info!(user_id = credential.user_id, patient_id, "login succeeded");
        Ok(SessionContext {
            user_id: credential.user_id,
            username: credential.username,
            role_id: credential.role_id,
            patient_id,
        })
    }

    /// Hand the store back so the caller can reuse the same connection for
    /// the dashboard fetches.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::db::StoreError;
    use crate::models::{Address, ContactInfo, Credential, FileRecord, PatientCore};

    /// In-memory store: a credential table, a user→patient link table, and
    /// an "unplugged" switch for simulating transport failure.
    #[derive(Default)]
    struct FakeStore {
        credentials: Vec<Credential>,
        patient_links: HashMap<i32, i32>,
        unavailable: bool,
    }

    impl FakeStore {
        fn with_user(user_id: i32, username: &str, stored_hash: &str) -> Self {
            Self {
                credentials: vec![Credential {
                    user_id,
                    username: username.to_string(),
                    role_id: 2,
                    stored_hash: stored_hash.to_string(),
                }],
                ..Self::default()
            }
        }

        fn check_available(&self) -> Result<(), StoreError> {
            if self.unavailable {
                Err(StoreError::Connection("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl CredentialStore for FakeStore {
        fn fetch_by_username(
            &mut self,
            username: &str,
        ) -> Result<Option<Credential>, StoreError> {
            self.check_available()?;
            Ok(self
                .credentials
                .iter()
                .find(|c| c.username == username)
                .cloned())
        }
    }

    impl PatientRepository for FakeStore {
        fn fetch_patient_id(&mut self, user_id: i32) -> Result<Option<i32>, StoreError> {
            self.check_available()?;
            Ok(self.patient_links.get(&user_id).copied())
        }

        fn fetch_patient_core(&mut self, _: i32) -> Result<Option<PatientCore>, StoreError> {
            Ok(None)
        }

        fn fetch_contact(&mut self, _: i32) -> Result<Option<ContactInfo>, StoreError> {
            Ok(None)
        }

        fn fetch_blood_type_name(&mut self, _: i32) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn fetch_occupation_name(&mut self, _: i32) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn fetch_marital_status_name(&mut self, _: i32) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn fetch_address(&mut self, _: i32) -> Result<Option<Address>, StoreError> {
            Ok(None)
        }

        fn fetch_files(&mut self, _: i32) -> Result<Vec<FileRecord>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn sha256_hex(password: &str) -> String {
        use sha2::{Digest, Sha256};
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    #[test]
    fn login_succeeds_for_patient_with_legacy_hash() {
        let mut store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        store.patient_links.insert(7, 42);

        let mut service = AuthService::new(store);
        let session = service.login("maria", "clave123").unwrap();

        assert_eq!(session.user_id, 7);
        assert_eq!(session.username, "maria");
        assert_eq!(session.role_id, 2);
        assert_eq!(session.patient_id, 42);
    }

    #[test]
    fn login_succeeds_for_patient_with_bcrypt_hash() {
        let stored = bcrypt::hash("clave123", 4).unwrap();
        let mut store = FakeStore::with_user(7, "maria", &stored);
        store.patient_links.insert(7, 42);

        let mut service = AuthService::new(store);
        assert!(service.login("maria", "clave123").is_ok());
    }

    #[test]
    fn unknown_user_is_user_not_found() {
        let store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        let mut service = AuthService::new(store);

        let err = service.login("pedro", "clave123").unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        let mut service = AuthService::new(store);

        let err = service.login("Maria", "clave123").unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[test]
    fn empty_stored_hash_is_no_stored_hash() {
        let mut store = FakeStore::with_user(7, "maria", "");
        store.patient_links.insert(7, 42);
        let mut service = AuthService::new(store);

        let err = service.login("maria", "clave123").unwrap_err();
        assert!(matches!(err, AuthError::NoStoredHash));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        let mut service = AuthService::new(store);

        let err = service.login("maria", "clave124").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn staff_account_is_not_a_patient() {
        // valid credential, no paciente link
        let store = FakeStore::with_user(9, "dr_lopez", &sha256_hex("clave123"));
        let mut service = AuthService::new(store);

        let err = service.login("dr_lopez", "clave123").unwrap_err();
        assert!(matches!(err, AuthError::NotAPatient));
    }

    #[test]
    fn unreachable_store_is_store_unavailable() {
        let mut store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        store.unavailable = true;
        let mut service = AuthService::new(store);

        let err = service.login("maria", "clave123").unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    #[test]
    fn into_store_returns_the_store_after_login() {
        let mut store = FakeStore::with_user(7, "maria", &sha256_hex("clave123"));
        store.patient_links.insert(7, 42);

        let mut service = AuthService::new(store);
        service.login("maria", "clave123").unwrap();

        let mut store = service.into_store();
        assert_eq!(store.fetch_patient_id(7).unwrap(), Some(42));
    }
}
