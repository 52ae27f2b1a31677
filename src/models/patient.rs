use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One `paciente` row. Immutable within a session — a read-only view.
/// Every patient is owned by exactly one `usuario` via `usuario_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCore {
    pub patient_id: i32,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub lifestyle: Option<String>,
    pub blood_type_id: Option<i32>,
    pub occupation_id: Option<i32>,
    pub marital_status_id: Option<i32>,
    pub general_practitioner_id: Option<i32>,
}

/// Contact columns from the owning `usuario` row. Either column may be NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One `direccion_paciente` row. The table itself is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
}

/// Denormalized read-model for the dashboard. Built fresh on every view
/// request, never cached; absent source data degrades per field to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub contact_email: String,
    pub contact_phone: String,
    pub blood_type_name: String,
    pub occupation_name: String,
    pub marital_status_name: String,
    pub address: String,
}

/// Raw associated-file row (`archivo` joined through `archivo_asociacion`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub kind: String,
    pub url: String,
    pub description: Option<String>,
}

/// A patient's associated file, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalFile {
    pub description: String,
    pub kind: String,
    pub url: String,
}
