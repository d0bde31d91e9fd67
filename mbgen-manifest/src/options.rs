//! Generation options recognized by the generator.

use std::path::PathBuf;

use mbgen_core::{Dialect, to_upper_camel};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Immutable configuration bag for one generation request.
///
/// Every field has a default so partial presets deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Target database family, drives type mapping and paging syntax
    pub dialect: Dialect,
    /// Map date/time columns to `java.time` types instead of `java.util.Date`
    pub use_temporal_types: bool,
    /// Use raw column names as field names instead of camel-casing them
    pub use_actual_column_names: bool,
    /// Emit `toString`/`equals`/`hashCode`
    pub use_rich_object_methods: bool,
    /// Emit `@JsonProperty` on every field
    pub use_property_annotations: bool,
    /// Uppercase the first letter of the `@JsonProperty` name
    pub property_annotation_upper_case: bool,
    pub generate_batch_insert: bool,
    pub generate_batch_update: bool,
    /// Emit an offset/limit `selectByPage` query
    pub generate_paged_query: bool,
    /// Replace an existing mapping document instead of keeping it
    pub overwrite_mapping_document: bool,
    /// Property filled from database-generated keys on insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key_auto_generation: Option<String>,
    /// Declarative accessor style (Lombok `@Data`)
    pub use_lombok: bool,
    /// Emit default and all-fields constructors
    pub use_constructors: bool,
    /// Emit table and column comments
    pub comments: bool,
    /// Model class name; derived from the table name when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_object_name: Option<String>,
    /// Accessor interface name; `<Model>Mapper` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor_name: Option<String>,
    /// Root folder every artifact path is resolved under
    pub output_root: PathBuf,
    /// Columns excluded from every artifact
    pub ignored_columns: Vec<String>,
    pub packages: PackageNames,
    pub output_subfolders: OutputSubfolders,
    pub column_overrides: Vec<ColumnOverride>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            use_temporal_types: false,
            use_actual_column_names: false,
            use_rich_object_methods: false,
            use_property_annotations: false,
            property_annotation_upper_case: false,
            generate_batch_insert: false,
            generate_batch_update: false,
            generate_paged_query: false,
            overwrite_mapping_document: false,
            primary_key_auto_generation: None,
            use_lombok: false,
            use_constructors: false,
            comments: true,
            domain_object_name: None,
            accessor_name: None,
            output_root: PathBuf::from("."),
            ignored_columns: Vec::new(),
            packages: PackageNames::default(),
            output_subfolders: OutputSubfolders::default(),
            column_overrides: Vec::new(),
        }
    }
}

/// Dotted package names per artifact kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageNames {
    pub model: String,
    pub accessor: String,
    pub mapping: String,
}

impl Default for PackageNames {
    fn default() -> Self {
        Self {
            model: "com.example.model".to_string(),
            accessor: "com.example.mapper".to_string(),
            mapping: "com.example.mapper".to_string(),
        }
    }
}

/// Source folders per artifact kind, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSubfolders {
    pub model: PathBuf,
    pub accessor: PathBuf,
    pub mapping: PathBuf,
}

impl Default for OutputSubfolders {
    fn default() -> Self {
        Self {
            model: PathBuf::from("src/main/java"),
            accessor: PathBuf::from("src/main/java"),
            mapping: PathBuf::from("src/main/resources"),
        }
    }
}

/// Per-column replacement of the emitted field name and/or value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverride {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl GenerationOptions {
    /// Model class name for a table.
    pub fn domain_object_name_for(&self, table: &str) -> String {
        match &self.domain_object_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => to_upper_camel(table),
        }
    }

    /// Accessor interface name for a table.
    pub fn accessor_name_for(&self, table: &str) -> String {
        match &self.accessor_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}Mapper", self.domain_object_name_for(table)),
        }
    }

    /// Whether a column is on the ignore list (case-insensitive).
    pub fn is_ignored(&self, column: &str) -> bool {
        self.ignored_columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(column))
    }

    /// Override configured for a column, if any (case-insensitive).
    pub fn override_for(&self, column: &str) -> Option<&ColumnOverride> {
        self.column_overrides
            .iter()
            .find(|o| o.column.eq_ignore_ascii_case(column))
    }

    /// Copy of these options with the domain/accessor names cleared.
    ///
    /// Multi-table requests derive names per table.
    pub fn for_each_table(&self) -> Self {
        Self {
            domain_object_name: None,
            accessor_name: None,
            ..self.clone()
        }
    }

    /// Check values that would produce unusable artifacts.
    pub fn validate(&self) -> Result<()> {
        for (kind, package) in [
            ("model", &self.packages.model),
            ("accessor", &self.packages.accessor),
            ("mapping", &self.packages.mapping),
        ] {
            if package.is_empty() {
                continue;
            }
            let valid = package.split('.').all(|segment| {
                let mut chars = segment.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_')
                    && chars.all(|c| c.is_alphanumeric() || c == '_')
            });
            if !valid {
                return Err(Error::validation(format!(
                    "invalid {kind} package name '{package}'"
                )));
            }
        }

        if let Some(key) = &self.primary_key_auto_generation
            && key.trim().is_empty()
        {
            return Err(Error::validation(
                "primary_key_auto_generation must name a property",
            ));
        }

        for column in &self.column_overrides {
            if column.property.is_none() && column.value_type.is_none() {
                return Err(Error::validation(format!(
                    "override for column '{}' sets neither property nor value_type",
                    column.column
                )));
            }
        }

        Ok(())
    }
}
