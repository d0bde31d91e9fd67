//! Generate operation - artifacts, archive and download key for a request.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::{Context, Result};
use mbgen_codegen_java::{GenerationOutcome, Generator};
use mbgen_manifest::MbgenToml;
use mbgen_staging::StagingArea;

use super::open_connection;
use crate::reports::{GenerateReport, GenerationResult, PreviewEntry, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Connection to read schemas from.
    pub connection: &'a str,
    /// Preset name; `None` uses `[generator]`.
    pub preset: Option<&'a str>,
    /// Tables to generate, in request order.
    pub tables: &'a [String],
    /// Output root for single-table requests.
    pub output_dir: Option<&'a Path>,
    /// Render in memory only.
    pub dry_run: bool,
    /// Build an archive and download key after writing.
    pub archive: bool,
}

/// Execute the generate operation.
///
/// A single table is written under the output root. Several tables are
/// written into a fresh request folder inside the staging directory, with
/// per-table domain and accessor names.
pub fn generate(mbgen_toml: &MbgenToml, opts: GenerateOptions) -> Result<GenerateReport> {
    let manifest = mbgen_toml.manifest();
    let connection = open_connection(mbgen_toml, opts.connection)?;

    let requested = unique_tables(opts.tables);
    let mut options = manifest.options(opts.preset)?.clone();
    options.dialect = connection.profile.dialect;
    let multi = requested.len() > 1;
    if multi {
        options = options.for_each_table();
    }

    let generator = Generator::new();
    let report = |result| GenerateReport {
        connection: connection.name.to_string(),
        dialect: options.dialect,
        preset: opts.preset.map(str::to_string),
        result,
    };

    if opts.dry_run {
        let mut preview = PreviewResult::default();
        for &table in &requested {
            let files = generator
                .preview(&connection.source, table, &options)
                .wrap_err_with(|| format!("Failed to render table '{table}'"))?;
            preview
                .files
                .extend(files.into_iter().map(|file| PreviewEntry {
                    table: table.to_string(),
                    path: file.path,
                    content: file.content,
                }));
        }
        return Ok(report(GenerationResult::Preview(preview)));
    }

    let staging = StagingArea::new(mbgen_toml.resolve(&manifest.staging.dir));
    let swept = staging
        .sweep(Duration::from_secs(manifest.staging.ttl_secs))
        .removed
        .len();

    let output_dir: PathBuf = if multi {
        staging
            .request_folder()
            .wrap_err("Failed to create request folder")?
    } else {
        match opts.output_dir {
            Some(dir) => dir.to_path_buf(),
            None => mbgen_toml.resolve(&options.output_root),
        }
    };

    let mut outcomes: Vec<GenerationOutcome> = Vec::with_capacity(requested.len());
    for &table in &requested {
        let outcome = generator
            .generate_into(&connection.source, table, &options, &output_dir)
            .wrap_err_with(|| format!("Failed to generate table '{table}'"))?;
        outcomes.push(outcome);
    }

    let files: Vec<PathBuf> = outcomes
        .iter()
        .flat_map(GenerationOutcome::written_paths)
        .collect();
    let download = if opts.archive && !files.is_empty() {
        let (hint, scope) = match requested.as_slice() {
            [table] => (table.to_string(), *table),
            _ => (format!("generated_{}_tables", requested.len()), "multi"),
        };
        let staged = staging
            .stage(&files, &output_dir, &hint, connection.schema_id(), scope)
            .wrap_err("Failed to build download archive")?;
        Some(staged)
    } else {
        None
    };

    Ok(report(GenerationResult::Written(WrittenResult {
        output_dir,
        tables: outcomes,
        download,
        swept,
    })))
}

/// Requested tables in first-seen order without repeats.
fn unique_tables(tables: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tables
        .iter()
        .map(String::as_str)
        .filter(|table| seen.insert(*table))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use mbgen_core::ArtifactKind;
    use tempfile::TempDir;

    use super::*;
    use crate::ops::fixtures::project;

    fn tables(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn options<'a>(tables: &'a [String]) -> GenerateOptions<'a> {
        GenerateOptions {
            connection: "local",
            preset: None,
            tables,
            output_dir: None,
            dry_run: false,
            archive: true,
        }
    }

    fn written(report: GenerateReport) -> WrittenResult {
        match report.result {
            GenerationResult::Written(written) => written,
            GenerationResult::Preview(_) => panic!("expected written result"),
        }
    }

    #[test]
    fn test_single_table_writes_and_stages() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["user_profile"]);

        let written = written(generate(&toml, options(&names)).unwrap());
        assert_eq!(written.output_dir, dir.path().join("out"));
        assert_eq!(written.tables.len(), 1);
        assert_eq!(written.tables[0].written.len(), 3);

        let download = written.download.unwrap();
        assert!(download.download_key.starts_with("local_user_profile_"));
        assert!(download.archive_path.starts_with(dir.path().join("temp")));

        let archive = zip_names(&download.archive_path);
        assert!(archive.contains(&"src/main/java/com/example/model/UserProfile.java".to_string()));
        assert!(archive.contains(&"src/main/resources/com/example/mapper/UserProfileMapper.xml".to_string()));
    }

    #[test]
    fn test_multi_table_uses_request_folder() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["user_profile", "user_role"]);

        let written = written(generate(&toml, options(&names)).unwrap());
        let folder = written.output_dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(folder.starts_with("gen_"), "{folder}");
        assert!(written.output_dir.starts_with(dir.path().join("temp")));

        let download = written.download.unwrap();
        assert!(download.download_key.starts_with("local_multi_"));
        let archive_name = download.archive_path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(archive_name.starts_with("mgg_generated_2_tables_"), "{archive_name}");
        assert_eq!(zip_names(&download.archive_path).len(), 6);
    }

    #[test]
    fn test_repeated_table_is_generated_once() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["user_profile", "user_profile"]);

        let written = written(generate(&toml, options(&names)).unwrap());
        assert_eq!(written.output_dir, dir.path().join("out"));
        assert_eq!(written.tables.len(), 1);

        let download = written.download.unwrap();
        assert!(download.download_key.starts_with("local_user_profile_"));
        assert_eq!(zip_names(&download.archive_path).len(), 3);
    }

    #[test]
    fn test_unique_tables_keeps_first_order() {
        let names = tables(&["b", "a", "b", "c", "a"]);
        assert_eq!(unique_tables(&names), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rerun_archives_only_written_files() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["user_profile"]);

        written(generate(&toml, options(&names)).unwrap());
        let second = written(generate(&toml, options(&names)).unwrap());
        assert!(second.tables[0].was_skipped(ArtifactKind::Mapping));

        let archive = zip_names(&second.download.unwrap().archive_path);
        assert_eq!(archive.len(), 2);
        assert!(!archive.contains(&"src/main/resources/com/example/mapper/UserProfileMapper.xml".to_string()));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["user_profile"]);

        let report = generate(
            &toml,
            GenerateOptions {
                dry_run: true,
                ..options(&names)
            },
        )
        .unwrap();

        match report.result {
            GenerationResult::Preview(preview) => {
                assert_eq!(preview.files.len(), 3);
                assert!(preview.files[0].content.contains("public class UserProfile"));
            }
            GenerationResult::Written(_) => panic!("expected preview"),
        }
        assert!(!dir.path().join("out").exists());
        assert!(!dir.path().join("temp").exists());
    }

    #[test]
    fn test_preset_and_no_archive() {
        let dir = TempDir::new().unwrap();
        let toml = project(
            dir.path(),
            r#"
[presets.lombok]
use_lombok = true
output_root = "lombok-out"
"#,
        );
        let names = tables(&["user_role"]);

        let written = written(
            generate(
                &toml,
                GenerateOptions {
                    preset: Some("lombok"),
                    archive: false,
                    ..options(&names)
                },
            )
            .unwrap(),
        );
        assert!(written.download.is_none());
        assert_eq!(written.output_dir, dir.path().join("lombok-out"));

        let model = written.tables[0]
            .written
            .iter()
            .find(|a| a.kind == ArtifactKind::Model)
            .unwrap();
        let content = std::fs::read_to_string(&model.path).unwrap();
        assert!(content.contains("@Data"));
    }

    #[test]
    fn test_unknown_table_fails() {
        let dir = TempDir::new().unwrap();
        let toml = project(dir.path(), "");
        let names = tables(&["missing"]);

        let err = generate(&toml, options(&names)).unwrap_err();
        assert!(format!("{err:?}").contains("missing"));
    }

    fn zip_names(path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }
}
