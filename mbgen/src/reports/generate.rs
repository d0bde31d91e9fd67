//! Generate command report data structures.

use std::path::{Path, PathBuf};

use mbgen_codegen_java::GenerationOutcome;
use mbgen_core::Dialect;
use mbgen_staging::StagedArchive;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from a generation request.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Connection the schemas were read from.
    pub connection: String,
    pub dialect: Dialect,
    /// Preset used, if any.
    pub preset: Option<String>,
    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Result of generation.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug, Serialize)]
pub struct WrittenResult {
    /// Root the artifacts were written under.
    pub output_dir: PathBuf,
    /// Per-table outcome in request order.
    pub tables: Vec<GenerationOutcome>,
    /// Staged archive, unless archiving was disabled.
    pub download: Option<StagedArchive>,
    /// Expired staging entries removed before staging.
    pub swept: usize,
}

/// Result of a dry-run preview.
#[derive(Debug, Default, Serialize)]
pub struct PreviewResult {
    pub files: Vec<PreviewEntry>,
}

/// A file in preview mode.
#[derive(Debug, Serialize)]
pub struct PreviewEntry {
    pub table: String,
    /// Path relative to the output root.
    pub path: PathBuf,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if written.swept > 0 {
            out.key_value(
                "Removed expired staging entries",
                &written.swept.to_string(),
            );
            out.newline();
        }

        for outcome in &written.tables {
            out.section(&outcome.table);
            for artifact in &outcome.written {
                out.added_item(&relative(&artifact.path, &written.output_dir));
            }
            for artifact in &outcome.skipped {
                out.list_item(&format!(
                    "{} (kept existing {})",
                    relative(&artifact.path, &written.output_dir),
                    artifact.kind
                ));
            }
            out.newline();
        }

        out.key_value("Generated", &written.output_dir.display().to_string());
        out.key_value(
            "Source",
            &format!("{} ({})", self.connection, self.dialect),
        );
        if let Some(preset) = &self.preset {
            out.key_value("Preset", preset);
        }

        if let Some(download) = &written.download {
            out.newline();
            out.section("Download");
            out.key_value_indented("key", &download.download_key);
            out.key_value_indented("archive", &download.archive_path.display().to_string());
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path.display().to_string());
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use mbgen_codegen_java::GeneratedArtifact;
    use mbgen_core::ArtifactKind;

    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_render_written_with_skipped_mapping() {
        let root = PathBuf::from("/work/out");
        let report = GenerateReport {
            connection: "local".into(),
            dialect: Dialect::MySql,
            preset: None,
            result: GenerationResult::Written(WrittenResult {
                output_dir: root.clone(),
                tables: vec![GenerationOutcome {
                    table: "user".into(),
                    written: vec![GeneratedArtifact {
                        path: root.join("User.java"),
                        kind: ArtifactKind::Model,
                    }],
                    skipped: vec![GeneratedArtifact {
                        path: root.join("UserMapper.xml"),
                        kind: ArtifactKind::Mapping,
                    }],
                }],
                download: None,
                swept: 0,
            }),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "user:",
                "  + User.java",
                "  - UserMapper.xml (kept existing mapping)",
                "",
                "Generated: /work/out",
                "Source: local (MySQL)",
            ]
        );
    }

    #[test]
    fn test_json_tags_mode() {
        let report = GenerateReport {
            connection: "local".into(),
            dialect: Dialect::Oracle,
            preset: Some("fast".into()),
            result: GenerationResult::Preview(PreviewResult::default()),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["result"]["mode"], "preview");
        assert_eq!(value["dialect"], "Oracle");
    }
}
