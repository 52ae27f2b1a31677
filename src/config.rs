//! Database connection configuration.
//!
//! Connection parameters come from the environment (a `.env` file is honored
//! when present). Each parameter has a documented fallback chain: the `DB_*`
//! variable, then the `POSTGRES_*` variable, then a hard default matching the
//! development docker-compose setup. The rest of the crate treats the
//! resolved values as opaque connection inputs.

use std::fmt;

/// Application-level constants
pub const APP_NAME: &str = "Portalmed";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "portalmed=info"
}

/// PostgreSQL connection parameters.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    /// Separated from `from_env` so resolution is testable without touching
    /// process-wide environment state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |primary: &str, alternate: &str, default: &str| {
            lookup(primary)
                .or_else(|| lookup(alternate))
                .unwrap_or_else(|| default.to_string())
        };

        let port = pick("DB_PORT", "POSTGRES_PORT", "5432")
            .parse()
            .unwrap_or(5432);

        Self {
            host: pick("DB_HOST", "POSTGRES_HOST", "localhost"),
            port,
            dbname: pick("DB_NAME", "POSTGRES_DB", "medico_db"),
            user: pick("DB_USER", "POSTGRES_USER", "admin"),
            password: pick("DB_PASSWORD", "POSTGRES_PASSWORD", "admin123"),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(vars: &[(&str, &str)]) -> DbConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DbConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_empty() {
        let config = resolve(&[]);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "medico_db");
        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "admin123");
    }

    #[test]
    fn primary_variable_wins_over_alternate() {
        let config = resolve(&[("DB_HOST", "db.internal"), ("POSTGRES_HOST", "ignored")]);
        assert_eq!(config.host, "db.internal");
    }

    #[test]
    fn alternate_variable_used_when_primary_missing() {
        let config = resolve(&[("POSTGRES_DB", "clinic")]);
        assert_eq!(config.dbname, "clinic");
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let config = resolve(&[("DB_PORT", "not-a-port")]);
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn debug_redacts_password() {
        let config = resolve(&[("DB_PASSWORD", "s3cret")]);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
