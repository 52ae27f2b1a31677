//! Patient dashboard read-model — profile aggregation and file listing.
//!
//! Assembles one denormalized `PatientProfile` from independent repository
//! sub-fetches. No sub-fetch depends on another's result; any one of them
//! failing (missing row, missing optional table, null join target, store
//! error) degrades only its own field to the fallback label. The profile is
//! built fresh on every call and never cached.

use crate::db::{PatientRepository, StoreError};
use crate::models::{Address, MedicalFile, PatientProfile};

/// Label shown for any field whose backing data is absent.
pub const FIELD_FALLBACK: &str = "N/A";

/// Label substituted for an associated file with no description.
pub const FILE_FALLBACK_LABEL: &str = "Archivo";

/// Build the dashboard profile for a patient.
///
/// Infallible by contract: aggregation never fails as a whole, it degrades
/// field by field. Idempotent for unchanged backing data.
pub fn build_patient_profile<R: PatientRepository>(
    repo: &mut R,
    patient_id: i32,
) -> PatientProfile {
    let contact = tolerate(repo.fetch_contact(patient_id), "contact");
    let (contact_email, contact_phone) = match contact {
        Some(c) => (
            c.email.unwrap_or_else(|| FIELD_FALLBACK.to_string()),
            c.phone.unwrap_or_else(|| FIELD_FALLBACK.to_string()),
        ),
        None => (FIELD_FALLBACK.to_string(), FIELD_FALLBACK.to_string()),
    };

    PatientProfile {
        contact_email,
        contact_phone,
        blood_type_name: name_or_fallback(repo.fetch_blood_type_name(patient_id), "blood_type"),
        occupation_name: name_or_fallback(repo.fetch_occupation_name(patient_id), "occupation"),
        marital_status_name: name_or_fallback(
            repo.fetch_marital_status_name(patient_id),
            "marital_status",
        ),
        address: format_address(tolerate(repo.fetch_address(patient_id), "address")),
    }
}

/// List a patient's associated files, substituting the fallback label for
/// rows with no description.
pub fn list_files<R: PatientRepository>(
    repo: &mut R,
    patient_id: i32,
) -> Result<Vec<MedicalFile>, StoreError> {
    let records = repo.fetch_files(patient_id)?;
    Ok(records
        .into_iter()
        .map(|r| MedicalFile {
            description: r
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| FILE_FALLBACK_LABEL.to_string()),
            kind: r.kind,
            url: r.url,
        })
        .collect())
}

/// Collapse one sub-fetch to present/absent, logging the reason. A store
/// error degrades the field instead of aborting the aggregation.
fn tolerate<T>(result: Result<Option<T>, StoreError>, field: &'static str) -> Option<T> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            tracing::debug!(field, "optional data absent");
            None
        }
        Err(e) => {
            tracing::warn!(field, error = %e, "sub-fetch failed, degrading field");
            None
        }
    }
}

fn name_or_fallback(result: Result<Option<String>, StoreError>, field: &'static str) -> String {
    tolerate(result, field).unwrap_or_else(|| FIELD_FALLBACK.to_string())
}

/// `"{street} #{ext}"` plus `" Int:{interior}"` when an interior number is
/// present. Street and exterior number must both be non-empty, otherwise the
/// whole field falls back.
fn format_address(address: Option<Address>) -> String {
    match address {
        Some(a) if !a.street.is_empty() && !a.exterior_number.is_empty() => {
            let mut formatted = format!("{} #{}", a.street, a.exterior_number);
            if let Some(interior) = a.interior_number.filter(|i| !i.is_empty()) {
                formatted.push_str(&format!(" Int:{interior}"));
            }
            formatted
        }
        _ => FIELD_FALLBACK.to_string(),
    }
}
