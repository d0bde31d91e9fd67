//! Import collection for generated Java sources.

use std::collections::BTreeSet;

/// Deduplicated set of fully-qualified type imports.
///
/// Iteration is sorted so rendered import blocks are stable across runs.
///
/// # Example
///
/// ```
/// use mbgen_codegen::ImportSet;
///
/// let mut imports = ImportSet::new();
/// imports.add("java.util.Date");
/// imports.add("java.math.BigDecimal");
/// imports.add("java.util.Date");
///
/// let lines: Vec<_> = imports.iter().collect();
/// assert_eq!(lines, ["java.math.BigDecimal", "java.util.Date"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    imports: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully-qualified name. Returns `false` if already present.
    pub fn add(&mut self, qualified_name: &str) -> bool {
        self.imports.insert(qualified_name.to_string())
    }

    /// Merge another set into this one.
    pub fn merge(&mut self, other: &ImportSet) {
        self.imports.extend(other.imports.iter().cloned());
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.imports.contains(qualified_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

/// Last segment of a dotted type name (`java.time.Instant` -> `Instant`).
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, name)| name)
}
