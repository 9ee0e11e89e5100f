//! Backend types and their driver prefixes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DbConnectError;

/// The kind of database a logical name points at.
///
/// Parsed from the raw `type` parameter:
///
/// | raw value    | prefix              |
/// |--------------|---------------------|
/// | `mysql`      | `mysql+pymysql`     |
/// | `postgresql` | `postgresql`        |
/// | `awsathena`  | `awsathena+jdbc`    |
/// | `redshift`   | `redshift+psycopg2` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    MySql,
    PostgreSql,
    #[serde(rename = "awsathena")]
    Athena,
    Redshift,
}

impl Backend {
    /// Driver prefix used as the URI scheme.
    pub fn prefix(&self) -> &'static str {
        match self {
            Backend::MySql => "mysql+pymysql",
            Backend::PostgreSql => "postgresql",
            Backend::Athena => "awsathena+jdbc",
            Backend::Redshift => "redshift+psycopg2",
        }
    }

    /// The raw `type` value this backend is stored as.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::MySql => "mysql",
            Backend::PostgreSql => "postgresql",
            Backend::Athena => "awsathena",
            Backend::Redshift => "redshift",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DbConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mysql" => Ok(Backend::MySql),
            "postgresql" => Ok(Backend::PostgreSql),
            "awsathena" => Ok(Backend::Athena),
            "redshift" => Ok(Backend::Redshift),
            other => Err(DbConnectError::UnrecognizedBackendType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_map_to_prefixes() {
        let cases = [
            ("mysql", "mysql+pymysql"),
            ("postgresql", "postgresql"),
            ("awsathena", "awsathena+jdbc"),
            ("redshift", "redshift+psycopg2"),
        ];
        for (raw, prefix) in cases {
            let backend: Backend = raw.parse().unwrap();
            assert_eq!(backend.prefix(), prefix);
            assert_eq!(backend.to_string(), raw);
        }
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        assert_eq!("redshift\n".parse::<Backend>().unwrap(), Backend::Redshift);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let err = "oracle".parse::<Backend>().unwrap_err();
        assert!(matches!(err, DbConnectError::UnrecognizedBackendType(ref v) if v == "oracle"));
    }

    #[test]
    fn test_type_is_case_sensitive() {
        assert!("MySQL".parse::<Backend>().is_err());
    }

    #[test]
    fn test_serializes_as_raw_type() {
        assert_eq!(serde_json::to_string(&Backend::Athena).unwrap(), "\"awsathena\"");
        assert_eq!(serde_json::to_string(&Backend::PostgreSql).unwrap(), "\"postgresql\"");
    }
}
