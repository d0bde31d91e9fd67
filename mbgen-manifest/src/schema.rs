//! Read-only table metadata consumed by the generator.
//!
//! Opening connections and storing credentials is out of scope here. The
//! [`SchemaSource`] trait is the seam; [`TomlSchemaSource`] reads an offline
//! snapshot and [`StaticSchemaSource`] holds tables in memory.

use std::path::{Path, PathBuf};

use mbgen_core::Dialect;
use serde::Deserialize;
use thiserror::Error;

/// Key-role marker used by snapshot files.
const PRIMARY_KEY_ROLE: &str = "PRI";

/// One column as reported by a schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub raw_sql_type: String,
    pub comment: String,
    pub nullable: bool,
    pub is_primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, raw_sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_sql_type: raw_sql_type.into(),
            comment: String::new(),
            nullable: true,
            is_primary_key: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Ordered columns plus the optional table comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub comment: Option<String>,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            columns,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema unavailable for table '{table}': {reason}")]
    Unavailable { table: String, reason: String },

    #[error("dialect {requested} is not supported by this schema source (supports {supported})")]
    UnsupportedDialect {
        requested: Dialect,
        supported: Dialect,
    },

    #[error("failed to read schema snapshot '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema snapshot '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaError {
    pub fn unavailable(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Source of table metadata.
pub trait SchemaSource {
    /// Dialect of the database this source describes.
    fn dialect(&self) -> Dialect;

    /// Columns and comment of one table, in ordinal order.
    fn table(&self, dialect: Dialect, name: &str) -> Result<TableSchema, SchemaError>;

    /// Table names containing `filter`, ignoring case (all tables when `None`).
    fn table_names(&self, filter: Option<&str>) -> Result<Vec<String>, SchemaError>;
}

/// In-memory schema source.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    dialect: Dialect,
    tables: Vec<TableSchema>,
}

impl StaticSchemaSource {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tables: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: TableSchema) -> Self {
        self.tables.push(table);
        self
    }

    fn lookup(&self, dialect: Dialect, name: &str) -> Result<TableSchema, SchemaError> {
        if dialect != self.dialect {
            return Err(SchemaError::UnsupportedDialect {
                requested: dialect,
                supported: self.dialect,
            });
        }
        self.tables
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| SchemaError::unavailable(name, "table not found"))
    }

    /// Case-insensitive substring match on table names.
    fn names(&self, filter: Option<&str>) -> Vec<String> {
        let filter = filter.map(str::to_lowercase);
        self.tables
            .iter()
            .filter(|t| {
                filter
                    .as_deref()
                    .is_none_or(|f| t.name.to_lowercase().contains(f))
            })
            .map(|t| t.name.clone())
            .collect()
    }
}

impl SchemaSource for StaticSchemaSource {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn table(&self, dialect: Dialect, name: &str) -> Result<TableSchema, SchemaError> {
        self.lookup(dialect, name)
    }

    fn table_names(&self, filter: Option<&str>) -> Result<Vec<String>, SchemaError> {
        Ok(self.names(filter))
    }
}

/// Schema source backed by a TOML snapshot file.
///
/// ```toml
/// dialect = "MySQL"
///
/// [[tables]]
/// name = "user_profile"
/// comment = "registered users"
///
/// [[tables.columns]]
/// name = "id"
/// type = "int(11)"
/// key = "PRI"
/// ```
#[derive(Debug, Clone)]
pub struct TomlSchemaSource {
    path: PathBuf,
    inner: StaticSchemaSource,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    dialect: Dialect,
    #[serde(default)]
    tables: Vec<SnapshotTable>,
}

#[derive(Debug, Deserialize)]
struct SnapshotTable {
    name: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    columns: Vec<SnapshotColumn>,
}

#[derive(Debug, Deserialize)]
struct SnapshotColumn {
    name: String,
    #[serde(rename = "type")]
    sql_type: String,
    #[serde(default)]
    comment: String,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default)]
    key: String,
}

fn default_nullable() -> bool {
    true
}

impl From<SnapshotTable> for TableSchema {
    fn from(table: SnapshotTable) -> Self {
        let columns = table
            .columns
            .into_iter()
            .map(|c| Column {
                is_primary_key: c.key.eq_ignore_ascii_case(PRIMARY_KEY_ROLE),
                name: c.name,
                raw_sql_type: c.sql_type,
                comment: c.comment,
                nullable: c.nullable,
            })
            .collect();
        TableSchema {
            name: table.name,
            comment: table.comment.filter(|c| !c.is_empty()),
            columns,
        }
    }
}

impl TomlSchemaSource {
    /// Load a snapshot from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| SchemaError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_str_at(&content, path)
    }

    /// Parse snapshot content; `path` is used for error reporting.
    pub fn from_str_at(content: &str, path: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let path = path.into();
        let snapshot: Snapshot = toml::from_str(content).map_err(|source| SchemaError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            dialect = %snapshot.dialect,
            tables = snapshot.tables.len(),
            "loaded schema snapshot"
        );
        let inner = snapshot
            .tables
            .into_iter()
            .fold(StaticSchemaSource::new(snapshot.dialect), |source, table| {
                source.with_table(table.into())
            });
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for TomlSchemaSource {
    fn dialect(&self) -> Dialect {
        self.inner.dialect
    }

    fn table(&self, dialect: Dialect, name: &str) -> Result<TableSchema, SchemaError> {
        self.inner.lookup(dialect, name).map_err(|e| match e {
            SchemaError::Unavailable { table, .. } => SchemaError::Unavailable {
                table,
                reason: format!("not present in {}", self.path.display()),
            },
            other => other,
        })
    }

    fn table_names(&self, filter: Option<&str>) -> Result<Vec<String>, SchemaError> {
        Ok(self.inner.names(filter))
    }
}
