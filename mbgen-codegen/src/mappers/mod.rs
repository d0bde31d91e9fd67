//! Type mapping from raw SQL column types.
//!
//! Lookup is keyed by dialect and a normalized type token (lower-cased, with
//! any `(length, precision)` qualifier dropped). Unmapped tokens never fail:
//! value types fall back to [`VALUE_TYPE_FALLBACK`] and I/O tags to
//! [`IO_TAG_FALLBACK`].

mod java;

pub use java::JavaTypeMapper;
use mbgen_core::Dialect;

/// Value type used when a SQL type has no table entry.
pub const VALUE_TYPE_FALLBACK: &str = "String";

/// I/O tag used when a SQL type has no table entry.
pub const IO_TAG_FALLBACK: &str = "VARCHAR";

/// Per-dialect lookup tables for one target language.
///
/// Implementations see normalized type tokens only.
pub trait TypeMapper {
    /// Standard value type for a SQL type.
    fn value_type(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str>;

    /// Temporal override type, consulted first when temporal types are enabled.
    fn temporal_type(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str>;

    /// Framework-level binding tag for a SQL type.
    fn io_tag(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str>;

    /// Fully-qualified import a value type needs, if any.
    fn import_for(&self, value_type: &str) -> Option<&'static str>;

    /// Fully-qualified form of a value type, as used in mapping documents.
    fn qualified_name(&self, value_type: &str) -> String;

    /// Resolve the value type of a raw SQL type, applying normalization and
    /// the temporal override.
    fn resolve_value_type(&self, dialect: Dialect, raw_sql_type: &str, temporal: bool) -> &'static str {
        let sql_type = normalize_type(raw_sql_type);
        temporal
            .then(|| self.temporal_type(dialect, &sql_type))
            .flatten()
            .or_else(|| self.value_type(dialect, &sql_type))
            .unwrap_or(VALUE_TYPE_FALLBACK)
    }

    /// Resolve the I/O tag of a raw SQL type.
    fn resolve_io_tag(&self, dialect: Dialect, raw_sql_type: &str) -> &'static str {
        self.io_tag(dialect, &normalize_type(raw_sql_type))
            .unwrap_or(IO_TAG_FALLBACK)
    }
}

/// Lower-case a raw SQL type and drop everything from the first `(`.
///
/// `VARCHAR(255)` becomes `varchar`, `double precision` is left intact.
pub fn normalize_type(raw_sql_type: &str) -> String {
    let lower = raw_sql_type.to_lowercase();
    match lower.find('(') {
        Some(idx) => lower[..idx].to_string(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("VARCHAR(255)"), "varchar");
        assert_eq!(normalize_type("decimal(10,2)"), "decimal");
        assert_eq!(normalize_type("Double Precision"), "double precision");
        assert_eq!(normalize_type(""), "");
    }

    #[test]
    fn test_resolve_applies_temporal_override() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.resolve_value_type(Dialect::MySql, "DATETIME", false), "Date");
        assert_eq!(
            mapper.resolve_value_type(Dialect::MySql, "DATETIME", true),
            "LocalDateTime"
        );
        // no temporal entry, falls through to the standard table
        assert_eq!(mapper.resolve_value_type(Dialect::MySql, "year", true), "Date");
    }

    #[test]
    fn test_unmapped_types_fall_back() {
        let mapper = JavaTypeMapper;
        for dialect in Dialect::ALL {
            for raw in ["geometry", "", "enum('a','b')", "VARCHAR2(20)x"] {
                let ty = mapper.resolve_value_type(dialect, raw, true);
                assert!(!ty.is_empty());
            }
            assert_eq!(mapper.resolve_value_type(dialect, "geometry", false), "String");
            assert_eq!(mapper.resolve_io_tag(dialect, "geometry"), "VARCHAR");
        }
    }

    #[test]
    fn test_io_tag_ignores_temporal_override() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.resolve_io_tag(Dialect::MySql, "datetime"), "TIMESTAMP");
        assert_eq!(mapper.resolve_io_tag(Dialect::MySql, "varchar(50)"), "VARCHAR");
        assert_eq!(mapper.resolve_io_tag(Dialect::MySql, "int(11)"), "INTEGER");
    }
}
