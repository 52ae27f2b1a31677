//! Synchronous PostgreSQL implementation of the store traits.
//!
//! One `PgPortalStore` wraps one short-lived connection; dropping the store
//! closes it, so every exit path releases the connection. Queries are
//! parameterized — no string interpolation of caller input.

use postgres::error::SqlState;
use postgres::{Client, NoTls};

use super::{CredentialStore, PatientRepository, StoreError};
use crate::config::DbConfig;
use crate::models::{Address, ContactInfo, Credential, FileRecord, PatientCore};

pub struct PgPortalStore {
    client: Client,
}

impl PgPortalStore {
    /// Open a connection using the resolved environment configuration.
    pub fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        let client = Client::configure()
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .password(&config.password)
            .connect(NoTls)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(host = %config.host, port = config.port, dbname = %config.dbname,
            "Connected to portal database");
        Ok(Self { client })
    }

    /// Shared shape for the three lookup-name queries: a single text column
    /// selected through the patient's foreign key. A NULL foreign key yields
    /// no row, which surfaces as `None`.
    fn fetch_lookup_name(
        &mut self,
        query: &str,
        patient_id: i32,
    ) -> Result<Option<String>, StoreError> {
        let row = self.client.query_opt(query, &[&patient_id])?;
        Ok(row.and_then(|r| r.get::<_, Option<String>>(0)))
    }
}

impl CredentialStore for PgPortalStore {
    fn fetch_by_username(&mut self, username: &str) -> Result<Option<Credential>, StoreError> {
        let row = self.client.query_opt(
            "SELECT id, username, rol_id, password_hash FROM usuario
             WHERE username = $1",
            &[&username],
        )?;

        Ok(row.map(|r| Credential {
            user_id: r.get(0),
            username: r.get(1),
            role_id: r.get(2),
            // NULL and empty both mean "no hash configured"
            stored_hash: r.get::<_, Option<String>>(3).unwrap_or_default(),
        }))
    }
}

impl PatientRepository for PgPortalStore {
    fn fetch_patient_id(&mut self, user_id: i32) -> Result<Option<i32>, StoreError> {
        let row = self.client.query_opt(
            "SELECT id FROM paciente WHERE usuario_id = $1",
            &[&user_id],
        )?;
        Ok(row.map(|r| r.get(0)))
    }

    fn fetch_patient_core(&mut self, patient_id: i32) -> Result<Option<PatientCore>, StoreError> {
        let row = self.client.query_opt(
            "SELECT id, fecha_nacimiento, sexo, altura, peso,
                    estilo_vida, id_tipo_sangre, id_ocupacion,
                    id_estado_civil, id_medico_gen
             FROM paciente
             WHERE id = $1",
            &[&patient_id],
        )?;

        Ok(row.map(|r| PatientCore {
            patient_id: r.get(0),
            birth_date: r.get(1),
            sex: r.get(2),
            height_cm: r.get(3),
            weight_kg: r.get(4),
            lifestyle: r.get(5),
            blood_type_id: r.get(6),
            occupation_id: r.get(7),
            marital_status_id: r.get(8),
            general_practitioner_id: r.get(9),
        }))
    }

    fn fetch_contact(&mut self, patient_id: i32) -> Result<Option<ContactInfo>, StoreError> {
        let row = self.client.query_opt(
            "SELECT u.correo, u.telefono
             FROM usuario u
             JOIN paciente p ON p.usuario_id = u.id
             WHERE p.id = $1",
            &[&patient_id],
        )?;

        Ok(row.map(|r| ContactInfo {
            email: r.get(0),
            phone: r.get(1),
        }))
    }

    fn fetch_blood_type_name(&mut self, patient_id: i32) -> Result<Option<String>, StoreError> {
        self.fetch_lookup_name(
            "SELECT tipo FROM tipo_sangre WHERE id = (
                 SELECT id_tipo_sangre FROM paciente WHERE id = $1
             )",
            patient_id,
        )
    }

    fn fetch_occupation_name(&mut self, patient_id: i32) -> Result<Option<String>, StoreError> {
        self.fetch_lookup_name(
            "SELECT nombre FROM ocupacion WHERE id = (
                 SELECT id_ocupacion FROM paciente WHERE id = $1
             )",
            patient_id,
        )
    }

    fn fetch_marital_status_name(
        &mut self,
        patient_id: i32,
    ) -> Result<Option<String>, StoreError> {
        self.fetch_lookup_name(
            "SELECT nombre FROM estado_civil WHERE id = (
                 SELECT id_estado_civil FROM paciente WHERE id = $1
             )",
            patient_id,
        )
    }

    fn fetch_address(&mut self, patient_id: i32) -> Result<Option<Address>, StoreError> {
        let result = self.client.query_opt(
            "SELECT calle, numero_ext, numero_int
             FROM direccion_paciente
             WHERE paciente_id = $1",
            &[&patient_id],
        );

        match result {
            Ok(row) => Ok(row.map(|r| Address {
                street: r.get::<_, Option<String>>(0).unwrap_or_default(),
                exterior_number: r.get::<_, Option<String>>(1).unwrap_or_default(),
                interior_number: r.get(2),
            })),
            // Deployments without the address table are valid; a missing
            // table reads the same as a missing row.
            Err(e) if e.code() == Some(&SqlState::UNDEFINED_TABLE) => {
                tracing::debug!(patient_id, "direccion_paciente table not present");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_files(&mut self, patient_id: i32) -> Result<Vec<FileRecord>, StoreError> {
        let rows = self.client.query(
            "SELECT a.tipo, a.url, aa.descripcion
             FROM archivo_asociacion aa
             JOIN archivo a ON a.id = aa.archivo_id
             WHERE aa.entidad = 'paciente' AND aa.entidad_id = $1",
            &[&patient_id],
        )?;

        Ok(rows
            .into_iter()
            .map(|r| FileRecord {
                kind: r.get(0),
                url: r.get(1),
                description: r.get(2),
            })
            .collect())
    }
}
