//! Output path resolution for generated artifacts.
//!
//! `<output_root>/<subfolder>/<package as dirs>/<TypeName>.<ext>`

use std::path::{Path, PathBuf};

use mbgen_core::ArtifactKind;
use mbgen_manifest::{GenerationOptions, OutputSubfolders, PackageNames};

use crate::RenderContext;

/// Maps artifact kinds to file paths under an output root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    packages: PackageNames,
    subfolders: OutputSubfolders,
}

impl PathResolver {
    /// Resolver rooted at the options' `output_root`.
    pub fn new(options: &GenerationOptions) -> Self {
        Self::with_root(&options.output_root, options)
    }

    /// Resolver rooted at `root`, ignoring the options' `output_root`.
    pub fn with_root(root: impl AsRef<Path>, options: &GenerationOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            packages: options.packages.clone(),
            subfolders: options.output_subfolders.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an artifact relative to the root.
    pub fn relative(&self, kind: ArtifactKind, ctx: &RenderContext) -> PathBuf {
        let (subfolder, package) = match kind {
            ArtifactKind::Model => (&self.subfolders.model, &self.packages.model),
            ArtifactKind::Accessor => (&self.subfolders.accessor, &self.packages.accessor),
            ArtifactKind::Mapping => (&self.subfolders.mapping, &self.packages.mapping),
        };
        subfolder
            .join(package_dir(package))
            .join(format!("{}.{}", ctx.type_name(kind), kind.extension()))
    }

    /// Path of an artifact under the root.
    pub fn resolve(&self, kind: ArtifactKind, ctx: &RenderContext) -> PathBuf {
        self.root.join(self.relative(kind, ctx))
    }
}

/// Resolve one artifact path straight from options.
pub fn resolve(kind: ArtifactKind, ctx: &RenderContext, options: &GenerationOptions) -> PathBuf {
    PathResolver::new(options).resolve(kind, ctx)
}

/// `com.example.model` -> `com/example/model` with the host separator.
pub fn package_dir(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}
