//! SQL to Java/MyBatis type tables.

use mbgen_core::Dialect;

use super::TypeMapper;

/// Java value types and MyBatis JDBC tags per dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaTypeMapper;

impl TypeMapper for JavaTypeMapper {
    fn value_type(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str> {
        match dialect {
            Dialect::MySql => mysql_value_type(sql_type),
            Dialect::PostgreSql => postgres_value_type(sql_type),
            Dialect::Oracle => oracle_value_type(sql_type),
        }
    }

    fn temporal_type(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str> {
        let ty = match (dialect, sql_type) {
            (Dialect::MySql, "date") | (Dialect::PostgreSql, "date") => "LocalDate",
            (Dialect::MySql, "datetime" | "timestamp") => "LocalDateTime",
            (Dialect::MySql, "time") | (Dialect::PostgreSql, "time") => "LocalTime",
            (Dialect::PostgreSql, "timestamp") => "LocalDateTime",
            (Dialect::Oracle, "date" | "timestamp") => "LocalDateTime",
            _ => return None,
        };
        Some(ty)
    }

    fn io_tag(&self, dialect: Dialect, sql_type: &str) -> Option<&'static str> {
        match dialect {
            Dialect::MySql => mysql_io_tag(sql_type),
            Dialect::PostgreSql => postgres_io_tag(sql_type),
            Dialect::Oracle => oracle_io_tag(sql_type),
        }
    }

    fn import_for(&self, value_type: &str) -> Option<&'static str> {
        match value_type {
            "Date" => Some("java.util.Date"),
            "BigDecimal" => Some("java.math.BigDecimal"),
            "LocalDate" => Some("java.time.LocalDate"),
            "LocalDateTime" => Some("java.time.LocalDateTime"),
            "LocalTime" => Some("java.time.LocalTime"),
            _ => None,
        }
    }

    fn qualified_name(&self, value_type: &str) -> String {
        if let Some(import) = self.import_for(value_type) {
            return import.to_string();
        }
        match value_type {
            "String" | "Integer" | "Long" | "Short" | "Byte" | "Float" | "Double" | "Boolean" => {
                format!("java.lang.{value_type}")
            }
            other => other.to_string(),
        }
    }
}

fn mysql_value_type(sql_type: &str) -> Option<&'static str> {
    let ty = match sql_type {
        "varchar" | "char" | "text" | "mediumtext" | "longtext" | "tinytext" => "String",
        "int" | "tinyint" | "smallint" | "mediumint" => "Integer",
        "bigint" => "Long",
        "decimal" | "numeric" => "BigDecimal",
        "float" => "Float",
        "double" => "Double",
        "date" | "datetime" | "timestamp" | "time" | "year" => "Date",
        "bit" | "boolean" => "Boolean",
        "blob" | "mediumblob" | "longblob" | "binary" | "varbinary" => "byte[]",
        _ => return None,
    };
    Some(ty)
}

fn postgres_value_type(sql_type: &str) -> Option<&'static str> {
    let ty = match sql_type {
        "varchar" | "character varying" | "char" | "character" | "text" => "String",
        "uuid" | "json" | "jsonb" => "String",
        "integer" | "int" | "int4" | "smallint" | "int2" => "Integer",
        "bigint" | "int8" => "Long",
        "numeric" | "decimal" => "BigDecimal",
        "real" | "float4" => "Float",
        "double precision" | "float8" => "Double",
        "date" | "timestamp" | "time" => "Date",
        "boolean" | "bool" => "Boolean",
        "bytea" => "byte[]",
        _ => return None,
    };
    Some(ty)
}

fn oracle_value_type(sql_type: &str) -> Option<&'static str> {
    let ty = match sql_type {
        "varchar2" | "nvarchar2" | "char" | "nchar" | "clob" | "nclob" | "long" => "String",
        "number" => "BigDecimal",
        "integer" | "int" | "smallint" => "Integer",
        "float" | "binary_double" => "Double",
        "binary_float" => "Float",
        "date" | "timestamp" => "Date",
        "blob" | "raw" | "long raw" => "byte[]",
        _ => return None,
    };
    Some(ty)
}

fn mysql_io_tag(sql_type: &str) -> Option<&'static str> {
    let tag = match sql_type {
        "varchar" | "tinytext" => "VARCHAR",
        "char" => "CHAR",
        "text" | "mediumtext" | "longtext" => "LONGVARCHAR",
        "int" | "mediumint" | "year" => "INTEGER",
        "tinyint" => "TINYINT",
        "smallint" => "SMALLINT",
        "bigint" => "BIGINT",
        "decimal" => "DECIMAL",
        "numeric" => "NUMERIC",
        "float" => "FLOAT",
        "double" => "DOUBLE",
        "date" => "DATE",
        "datetime" | "timestamp" => "TIMESTAMP",
        "time" => "TIME",
        "bit" => "BIT",
        "boolean" => "BOOLEAN",
        "blob" | "mediumblob" | "longblob" => "BLOB",
        "binary" => "BINARY",
        "varbinary" => "VARBINARY",
        _ => return None,
    };
    Some(tag)
}

fn postgres_io_tag(sql_type: &str) -> Option<&'static str> {
    let tag = match sql_type {
        "varchar" | "character varying" | "uuid" => "VARCHAR",
        "char" | "character" => "CHAR",
        "text" | "json" | "jsonb" => "LONGVARCHAR",
        "integer" | "int" | "int4" => "INTEGER",
        "smallint" | "int2" => "SMALLINT",
        "bigint" | "int8" => "BIGINT",
        "numeric" => "NUMERIC",
        "decimal" => "DECIMAL",
        "real" | "float4" => "REAL",
        "double precision" | "float8" => "DOUBLE",
        "date" => "DATE",
        "timestamp" => "TIMESTAMP",
        "time" => "TIME",
        "boolean" | "bool" => "BOOLEAN",
        "bytea" => "BLOB",
        _ => return None,
    };
    Some(tag)
}

fn oracle_io_tag(sql_type: &str) -> Option<&'static str> {
    let tag = match sql_type {
        "varchar2" => "VARCHAR",
        "nvarchar2" => "NVARCHAR",
        "char" => "CHAR",
        "nchar" => "NCHAR",
        "clob" => "CLOB",
        "nclob" => "NCLOB",
        "long" => "LONGVARCHAR",
        "number" => "NUMERIC",
        "integer" | "int" => "INTEGER",
        "smallint" => "SMALLINT",
        "float" | "binary_float" => "FLOAT",
        "binary_double" => "DOUBLE",
        "date" => "DATE",
        "timestamp" => "TIMESTAMP",
        "blob" => "BLOB",
        "raw" => "VARBINARY",
        "long raw" => "LONGVARBINARY",
        _ => return None,
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_types() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.value_type(Dialect::MySql, "int"), Some("Integer"));
        assert_eq!(mapper.value_type(Dialect::MySql, "datetime"), Some("Date"));
        assert_eq!(mapper.value_type(Dialect::MySql, "longblob"), Some("byte[]"));
        assert_eq!(mapper.io_tag(Dialect::MySql, "tinytext"), Some("VARCHAR"));
        assert_eq!(mapper.io_tag(Dialect::MySql, "year"), Some("INTEGER"));
    }

    #[test]
    fn test_postgres_types() {
        let mapper = JavaTypeMapper;
        assert_eq!(
            mapper.value_type(Dialect::PostgreSql, "double precision"),
            Some("Double")
        );
        assert_eq!(mapper.io_tag(Dialect::PostgreSql, "jsonb"), Some("LONGVARCHAR"));
        assert_eq!(mapper.value_type(Dialect::PostgreSql, "datetime"), None);
    }

    #[test]
    fn test_oracle_types() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.value_type(Dialect::Oracle, "number"), Some("BigDecimal"));
        assert_eq!(mapper.io_tag(Dialect::Oracle, "long raw"), Some("LONGVARBINARY"));
        assert_eq!(
            mapper.temporal_type(Dialect::Oracle, "date"),
            Some("LocalDateTime")
        );
    }

    #[test]
    fn test_temporal_table_is_sparse() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.temporal_type(Dialect::MySql, "year"), None);
        assert_eq!(mapper.temporal_type(Dialect::PostgreSql, "date"), Some("LocalDate"));
    }

    #[test]
    fn test_imports() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.import_for("BigDecimal"), Some("java.math.BigDecimal"));
        assert_eq!(mapper.import_for("LocalTime"), Some("java.time.LocalTime"));
        assert_eq!(mapper.import_for("String"), None);
    }

    #[test]
    fn test_qualified_name() {
        let mapper = JavaTypeMapper;
        assert_eq!(mapper.qualified_name("Integer"), "java.lang.Integer");
        assert_eq!(mapper.qualified_name("Date"), "java.util.Date");
        assert_eq!(mapper.qualified_name("com.acme.Money"), "com.acme.Money");
    }
}
