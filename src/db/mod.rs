pub mod pg;

pub use pg::PgPortalStore;

use thiserror::Error;

use crate::models::{Address, ContactInfo, Credential, FileRecord, PatientCore};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(#[from] postgres::Error),
}

/// Lookup of stored credentials (`usuario` table).
pub trait CredentialStore {
    /// Fetch the credential row for a username. The match is exact and
    /// case-sensitive — no normalization. `None` when no row exists.
    fn fetch_by_username(&mut self, username: &str) -> Result<Option<Credential>, StoreError>;
}

/// Parameterized reads across the patient tables, one method per query group.
///
/// Absent data is an explicit `Ok(None)`, never an error. For the optional
/// `direccion_paciente` table, a missing table and a missing row both surface
/// as `Ok(None)`; the structural distinction exists only in logs.
pub trait PatientRepository {
    /// Patient id linked to a user, or `None` for non-patient accounts.
    fn fetch_patient_id(&mut self, user_id: i32) -> Result<Option<i32>, StoreError>;

    fn fetch_patient_core(&mut self, patient_id: i32) -> Result<Option<PatientCore>, StoreError>;

    fn fetch_contact(&mut self, patient_id: i32) -> Result<Option<ContactInfo>, StoreError>;

    fn fetch_blood_type_name(&mut self, patient_id: i32) -> Result<Option<String>, StoreError>;

    fn fetch_occupation_name(&mut self, patient_id: i32) -> Result<Option<String>, StoreError>;

    fn fetch_marital_status_name(&mut self, patient_id: i32)
        -> Result<Option<String>, StoreError>;

    fn fetch_address(&mut self, patient_id: i32) -> Result<Option<Address>, StoreError>;

    fn fetch_files(&mut self, patient_id: i32) -> Result<Vec<FileRecord>, StoreError>;
}
