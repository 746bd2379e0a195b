use crate::config::error::ConfigError;
use connectors::sql::postgres::{ConnectionParams, TlsMode};
use std::collections::HashMap;
use std::time::Duration;

pub const PG_HOST: &str = "PG_HOST";
pub const PG_PORT: &str = "PG_PORT";
pub const PG_DB: &str = "PG_DB";
pub const PG_USER: &str = "PG_USER";
pub const PG_PASSWORD: &str = "PG_PASSWORD";
pub const PG_SSLMODE: &str = "PG_SSLMODE";

const REQUIRED_VARS: [&str; 5] = [PG_HOST, PG_PORT, PG_DB, PG_USER, PG_PASSWORD];

/// Immutable snapshot of the process environment.
///
/// Captured once at startup and passed by reference wherever credentials
/// are needed; nothing reads `std::env` after that point, so tests can
/// inject variables without touching the real environment.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Captures the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    /// Builds Postgres connection parameters from the `PG_*` variables.
    ///
    /// Every missing required variable is reported in one error so a
    /// misconfigured deployment surfaces completely on the first run.
    pub fn connection_params(
        &self,
        connect_timeout: Duration,
    ) -> Result<ConnectionParams, ConfigError> {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| self.get(key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        let port_raw = self.required(PG_PORT)?;
        let port: u16 = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name: PG_PORT.to_string(),
            reason: format!("'{port_raw}' is not a valid port number"),
        })?;

        let tls = match self.get(PG_SSLMODE) {
            Some(raw) => raw.parse::<TlsMode>().map_err(|err| ConfigError::Invalid {
                name: PG_SSLMODE.to_string(),
                reason: err.to_string(),
            })?,
            None => TlsMode::default(),
        };

        Ok(ConnectionParams {
            host: self.required(PG_HOST)?,
            port,
            dbname: self.required(PG_DB)?,
            user: self.required(PG_USER)?,
            password: self.required(PG_PASSWORD)?,
            tls,
            connect_timeout,
        })
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingEnv(vec![key.to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn full_env() -> Environment {
        let mut env = Environment::empty();
        env.set(PG_HOST, "db.internal");
        env.set(PG_PORT, "5433");
        env.set(PG_DB, "warehouse");
        env.set(PG_USER, "loader");
        env.set(PG_PASSWORD, "secret");
        env
    }

    #[test]
    fn all_missing_variables_reported_together() {
        let mut env = Environment::empty();
        env.set(PG_HOST, "localhost");
        let err = env.connection_params(TIMEOUT).unwrap_err();
        match err {
            ConfigError::MissingEnv(missing) => {
                assert_eq!(missing, vec![PG_PORT, PG_DB, PG_USER, PG_PASSWORD]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builds_params_with_prefer_tls_by_default() {
        let params = full_env().connection_params(TIMEOUT).unwrap();
        assert_eq!(params.host, "db.internal");
        assert_eq!(params.port, 5433);
        assert_eq!(params.dbname, "warehouse");
        assert_eq!(params.tls, TlsMode::Prefer);
        assert_eq!(params.connect_timeout, TIMEOUT);
    }

    #[test]
    fn rejects_unparseable_port() {
        let mut env = full_env();
        env.set(PG_PORT, "fivefourthreetwo");
        let err = env.connection_params(TIMEOUT).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == PG_PORT));
    }

    #[test]
    fn honors_explicit_sslmode() {
        let mut env = full_env();
        env.set(PG_SSLMODE, "require");
        let params = env.connection_params(TIMEOUT).unwrap();
        assert_eq!(params.tls, TlsMode::Require);

        env.set(PG_SSLMODE, "verify-ca");
        assert!(env.connection_params(TIMEOUT).is_err());
    }
}
