use std::path::{Path, PathBuf};

use mbgen_codegen::{JavaTypeMapper, PathResolver, RenderContext, TypeMapper};
use mbgen_core::{ArtifactKind, GeneratedFile, WriteResult};
use mbgen_manifest::{GenerationOptions, SchemaSource};
use serde::Serialize;

use crate::{
    GenerateError, Result,
    files::{MapperJava, MapperXml, ModelJava},
};

/// One artifact on disk after a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

/// Result of generating one table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    pub table: String,
    /// Artifacts written in this run
    pub written: Vec<GeneratedArtifact>,
    /// Artifacts left untouched because they already existed
    pub skipped: Vec<GeneratedArtifact>,
}

impl GenerationOutcome {
    /// Paths of the artifacts written by this run. Kept artifacts are left out.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.written.iter().map(|a| a.path.clone()).collect()
    }

    pub fn was_skipped(&self, kind: ArtifactKind) -> bool {
        self.skipped.iter().any(|a| a.kind == kind)
    }
}

/// An artifact rendered in memory.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewFile {
    /// Path relative to the output root
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub content: String,
}

/// Generates the model, accessor and mapping document of one table.
#[derive(Debug, Clone, Default)]
pub struct Generator<M = JavaTypeMapper> {
    mapper: M,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TypeMapper> Generator<M> {
    pub fn with_mapper(mapper: M) -> Self {
        Self { mapper }
    }

    /// Read `table` from the schema source and build its render context.
    pub fn context(
        &self,
        source: &dyn SchemaSource,
        table: &str,
        options: &GenerationOptions,
    ) -> Result<RenderContext> {
        options
            .validate()
            .map_err(|e| GenerateError::InvalidOptions {
                message: e.to_string(),
            })?;
        let schema = source
            .table(options.dialect, table)
            .map_err(|e| GenerateError::from_schema(table, e))?;
        tracing::debug!(
            table,
            dialect = %options.dialect,
            columns = schema.columns.len(),
            "loaded table schema"
        );
        Ok(RenderContext::build(&schema, options, &self.mapper))
    }

    /// Generate under the options' `output_root`.
    pub fn generate(
        &self,
        source: &dyn SchemaSource,
        table: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome> {
        self.generate_into(source, table, options, &options.output_root)
    }

    /// Generate under `root` instead of the options' `output_root`.
    pub fn generate_into(
        &self,
        source: &dyn SchemaSource,
        table: &str,
        options: &GenerationOptions,
        root: &Path,
    ) -> Result<GenerationOutcome> {
        let ctx = self.context(source, table, options)?;
        write_artifacts(&ctx, root)
    }

    /// Render every artifact without touching the filesystem.
    pub fn preview(
        &self,
        source: &dyn SchemaSource,
        table: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<PreviewFile>> {
        let ctx = self.context(source, table, options)?;
        Ok(preview_artifacts(&ctx))
    }
}

fn artifacts(ctx: &RenderContext) -> [(ArtifactKind, Box<dyn GeneratedFile + '_>); 3] {
    [
        (ArtifactKind::Model, Box::new(ModelJava::new(ctx))),
        (ArtifactKind::Accessor, Box::new(MapperJava::new(ctx))),
        (ArtifactKind::Mapping, Box::new(MapperXml::new(ctx))),
    ]
}

/// Write the three artifacts of a prepared context under `root`.
///
/// Each file is replaced atomically. Files written before a failure are
/// left in place.
pub fn write_artifacts(ctx: &RenderContext, root: &Path) -> Result<GenerationOutcome> {
    let mut outcome = GenerationOutcome {
        table: ctx.table_name.clone(),
        ..Default::default()
    };

    for (kind, file) in artifacts(ctx) {
        match file.write(root).map_err(GenerateError::from)? {
            WriteResult::Written(path) => {
                tracing::debug!(table = %ctx.table_name, %kind, path = %path.display(), "wrote artifact");
                outcome.written.push(GeneratedArtifact { path, kind });
            }
            WriteResult::Skipped(path) => {
                tracing::info!(
                    table = %ctx.table_name,
                    %kind,
                    path = %path.display(),
                    "kept existing artifact"
                );
                outcome.skipped.push(GeneratedArtifact { path, kind });
            }
        }
    }

    tracing::info!(
        table = %ctx.table_name,
        written = outcome.written.len(),
        skipped = outcome.skipped.len(),
        "generated table artifacts"
    );
    Ok(outcome)
}

/// Render the three artifacts of a prepared context in memory.
pub fn preview_artifacts(ctx: &RenderContext) -> Vec<PreviewFile> {
    let resolver = PathResolver::with_root("", &ctx.options);
    artifacts(ctx)
        .into_iter()
        .map(|(kind, file)| PreviewFile {
            path: resolver.relative(kind, ctx),
            kind,
            content: file.render(),
        })
        .collect()
}
