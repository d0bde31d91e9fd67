//! Render context assembled from table metadata and generation options.

use mbgen_core::{ArtifactKind, Dialect, to_lower_camel};
use mbgen_manifest::{GenerationOptions, PackageNames, TableSchema};

use crate::{ImportSet, TypeMapper, imports::simple_name};

/// One emitted field, derived from one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderField {
    /// Field name used in the model and in `#{...}` parameters
    pub identifier_name: String,
    /// Simple value type name (`Integer`, `Date`, ...)
    pub output_type: String,
    /// Fully-qualified value type
    pub qualified_type: String,
    /// MyBatis `jdbcType` tag
    pub io_tag: String,
    pub column_name: String,
    pub comment: String,
    pub is_primary_key: bool,
}

/// Key parameter used by the by-key statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRef<'a> {
    pub identifier_name: &'a str,
    pub output_type: &'a str,
    pub qualified_type: &'a str,
    pub column_name: &'a str,
    pub io_tag: &'a str,
}

/// Key used when no column carries the primary-key role.
pub const FALLBACK_KEY: KeyRef<'static> = KeyRef {
    identifier_name: "id",
    output_type: "Long",
    qualified_type: "java.lang.Long",
    column_name: "id",
    io_tag: "BIGINT",
};

impl<'a> From<&'a RenderField> for KeyRef<'a> {
    fn from(field: &'a RenderField) -> Self {
        Self {
            identifier_name: &field.identifier_name,
            output_type: &field.output_type,
            qualified_type: &field.qualified_type,
            column_name: &field.column_name,
            io_tag: &field.io_tag,
        }
    }
}

/// Complete template input for one table.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub table_name: String,
    pub table_comment: Option<String>,
    pub domain_object_name: String,
    pub accessor_name: String,
    pub packages: PackageNames,
    pub fields: Vec<RenderField>,
    pub imports: ImportSet,
    pub options: GenerationOptions,
}

impl RenderContext {
    /// Build the context for `table`.
    ///
    /// Columns keep their source order. Ignored columns are dropped here so
    /// every artifact sees the same field list. Only the first key-role
    /// column is kept as the primary key.
    pub fn build(table: &TableSchema, options: &GenerationOptions, mapper: &impl TypeMapper) -> Self {
        let mut imports = ImportSet::new();
        let mut key_seen = false;
        let mut fields = Vec::with_capacity(table.columns.len());

        for column in table.columns.iter().filter(|c| !options.is_ignored(&c.name)) {
            let column_override = options.override_for(&column.name);

            let identifier_name = match column_override.and_then(|o| o.property.as_deref()) {
                Some(property) => property.to_string(),
                None if options.use_actual_column_names => column.name.clone(),
                None => to_lower_camel(&column.name),
            };

            let (output_type, qualified_type) =
                match column_override.and_then(|o| o.value_type.as_deref()) {
                    Some(value_type) if value_type.contains('.') => {
                        imports.add(value_type);
                        (simple_name(value_type).to_string(), value_type.to_string())
                    }
                    Some(value_type) => {
                        if let Some(import) = mapper.import_for(value_type) {
                            imports.add(import);
                        }
                        (value_type.to_string(), mapper.qualified_name(value_type))
                    }
                    None => {
                        let value_type = mapper.resolve_value_type(
                            options.dialect,
                            &column.raw_sql_type,
                            options.use_temporal_types,
                        );
                        if let Some(import) = mapper.import_for(value_type) {
                            imports.add(import);
                        }
                        (value_type.to_string(), mapper.qualified_name(value_type))
                    }
                };

            let is_primary_key = column.is_primary_key && !key_seen;
            if column.is_primary_key && key_seen {
                tracing::debug!(
                    table = %table.name,
                    column = %column.name,
                    "demoting additional key column to an ordinary field"
                );
            }
            key_seen |= is_primary_key;

            fields.push(RenderField {
                identifier_name,
                output_type,
                qualified_type,
                io_tag: mapper
                    .resolve_io_tag(options.dialect, &column.raw_sql_type)
                    .to_string(),
                column_name: column.name.clone(),
                comment: column.comment.clone(),
                is_primary_key,
            });
        }

        Self {
            table_name: table.name.clone(),
            table_comment: table.comment.clone(),
            domain_object_name: options.domain_object_name_for(&table.name),
            accessor_name: options.accessor_name_for(&table.name),
            packages: options.packages.clone(),
            fields,
            imports,
            options: options.clone(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    pub fn primary_key(&self) -> Option<&RenderField> {
        self.fields.iter().find(|f| f.is_primary_key)
    }

    /// Key parameter for by-key statements, falling back to `Long id`.
    pub fn key(&self) -> KeyRef<'_> {
        self.primary_key()
            .map(KeyRef::from)
            .unwrap_or(FALLBACK_KEY)
    }

    /// Fields other than the primary key, in source order.
    pub fn non_key_fields(&self) -> impl Iterator<Item = &RenderField> {
        self.fields.iter().filter(|f| !f.is_primary_key)
    }

    /// Fields written by insert statements.
    ///
    /// The key is left to the database when key auto-generation is on.
    pub fn insert_fields(&self) -> impl Iterator<Item = &RenderField> {
        let skip_key = self.generated_key_property().is_some();
        self.fields
            .iter()
            .filter(move |f| !(skip_key && f.is_primary_key))
    }

    /// Property filled from generated keys on insert, if enabled.
    pub fn generated_key_property(&self) -> Option<&str> {
        self.options
            .primary_key_auto_generation
            .as_deref()
            .filter(|p| !p.is_empty())
    }

    /// Class or interface name that names the artifact file.
    pub fn type_name(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Model => &self.domain_object_name,
            ArtifactKind::Accessor | ArtifactKind::Mapping => &self.accessor_name,
        }
    }

    /// Fully-qualified model class name.
    pub fn model_type(&self) -> String {
        qualify(&self.packages.model, &self.domain_object_name)
    }

    /// Fully-qualified accessor interface name (mapping namespace).
    pub fn accessor_type(&self) -> String {
        qualify(&self.packages.accessor, &self.accessor_name)
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
