use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Target relational database family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
    Oracle,
}

impl Dialect {
    /// All known dialects.
    pub const ALL: [Dialect; 3] = [Dialect::MySql, Dialect::PostgreSql, Dialect::Oracle];

    /// Canonical display name (used in configuration files).
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::Oracle => "Oracle",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported dialect '{0}', expected one of: MySQL, PostgreSQL, Oracle")]
pub struct ParseDialectError(pub String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            "oracle" => Ok(Dialect::Oracle),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = ParseDialectError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Dialect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The kind of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Data-model class.
    Model,
    /// Data-access interface.
    Accessor,
    /// Declarative mapping document.
    Mapping,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Model,
        ArtifactKind::Accessor,
        ArtifactKind::Mapping,
    ];

    /// File extension for this kind of artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Model | ArtifactKind::Accessor => "java",
            ArtifactKind::Mapping => "xml",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Accessor => "accessor",
            ArtifactKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!(" Oracle ".parse::<Dialect>().unwrap(), Dialect::Oracle);
        assert!("sqlite".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_dialect_display_round_trip() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_artifact_extensions() {
        assert_eq!(ArtifactKind::Model.extension(), "java");
        assert_eq!(ArtifactKind::Accessor.extension(), "java");
        assert_eq!(ArtifactKind::Mapping.extension(), "xml");
    }
}
