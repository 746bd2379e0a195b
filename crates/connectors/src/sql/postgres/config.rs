use crate::sql::base::error::ConnectorError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio_postgres::config::SslMode;

/// TLS posture for a Postgres session, following libpq's `sslmode` values.
///
/// `Prefer` attempts a TLS handshake first and falls back to plaintext if
/// the server refuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl TlsMode {
    pub(crate) fn ssl_mode(self) -> SslMode {
        match self {
            TlsMode::Disable => SslMode::Disable,
            TlsMode::Prefer => SslMode::Prefer,
            TlsMode::Require => SslMode::Require,
        }
    }
}

impl FromStr for TlsMode {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(TlsMode::Disable),
            "prefer" => Ok(TlsMode::Prefer),
            "require" => Ok(TlsMode::Require),
            other => Err(ConnectorError::InvalidParams(format!(
                "unknown sslmode '{other}': expected disable, prefer or require"
            ))),
        }
    }
}

/// Everything needed to reach one Postgres database.
#[derive(Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub tls: TlsMode,
    pub connect_timeout: Duration,
}

impl ConnectionParams {
    pub(crate) fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password)
            .connect_timeout(self.connect_timeout)
            .ssl_mode(self.tls.ssl_mode());
        config
    }

    /// `host:port/dbname`, safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.dbname)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("tls", &self.tls)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sslmode_parses_case_insensitively() {
        assert_eq!("require".parse::<TlsMode>().unwrap(), TlsMode::Require);
        assert_eq!("Disable".parse::<TlsMode>().unwrap(), TlsMode::Disable);
        assert!("verify-full".parse::<TlsMode>().is_err());
    }

    #[test]
    fn debug_omits_password() {
        let params = ConnectionParams {
            host: "db.internal".to_string(),
            port: 5432,
            dbname: "warehouse".to_string(),
            user: "loader".to_string(),
            password: "s3cret".to_string(),
            tls: TlsMode::Prefer,
            connect_timeout: Duration::from_secs(30),
        };
        let rendered = format!("{params:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("db.internal"));
        assert_eq!(params.endpoint(), "db.internal:5432/warehouse");
    }
}
