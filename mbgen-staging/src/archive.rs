//! Bundles generated files into a single deflate archive.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Datelike, Local, Timelike};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    error::{Result, StagingError},
    key::archive_file_name,
};

/// Attempts at finding an unused archive name before giving up.
const CREATE_ATTEMPTS: usize = 8;

/// Archive `files` into `staging_dir` and return the archive path.
///
/// Entry names are relative to `base` and always use `/` separators. Files
/// outside `base` are stored under their file name. A path listed twice, or
/// two files with the same entry name, produce one entry.
pub fn build_archive(
    files: &[PathBuf],
    base: &Path,
    hint: &str,
    staging_dir: &Path,
) -> Result<PathBuf> {
    if files.is_empty() {
        return Err(StagingError::EmptyArchiveInput);
    }

    fs::create_dir_all(staging_dir).map_err(StagingError::fs(staging_dir))?;
    let (archive_path, archive) =
        create_archive_file(staging_dir, || archive_file_name(hint, Local::now()))?;

    let entries = match write_archive(archive, &archive_path, files, base) {
        Ok(entries) => entries,
        Err(err) => {
            let _ = fs::remove_file(&archive_path);
            return Err(err);
        }
    };

    tracing::info!(
        archive = %archive_path.display(),
        entries,
        "archive built"
    );
    Ok(archive_path)
}

/// Create a new archive file, drawing another name when one is taken.
/// Existing archives are never truncated.
fn create_archive_file(
    staging_dir: &Path,
    mut next_name: impl FnMut() -> String,
) -> Result<(PathBuf, File)> {
    let mut attempt = 1;
    loop {
        let path = staging_dir.join(next_name());
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err)
                if err.kind() == io::ErrorKind::AlreadyExists && attempt < CREATE_ATTEMPTS =>
            {
                tracing::debug!(path = %path.display(), "archive name taken, retrying");
                attempt += 1;
            }
            Err(source) => return Err(StagingError::FileSystem { path, source }),
        }
    }
}

fn write_archive(
    archive: File,
    archive_path: &Path,
    files: &[PathBuf],
    base: &Path,
) -> Result<usize> {
    let mut zip = ZipWriter::new(archive);
    let zip_err = |source| StagingError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };
    let mut seen = BTreeSet::new();

    for file in files {
        let name = entry_name(file, base);
        if !seen.insert(name.clone()) {
            tracing::debug!(
                entry = %name,
                path = %file.display(),
                "duplicate archive entry skipped"
            );
            continue;
        }

        let metadata = fs::metadata(file).map_err(StagingError::fs(file))?;
        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        if let Some(modified) = metadata.modified().ok().and_then(to_zip_time) {
            options = options.last_modified_time(modified);
        }

        tracing::debug!(entry = %name, size = metadata.len(), "adding archive entry");
        zip.start_file(name, options).map_err(zip_err)?;

        let mut source = File::open(file).map_err(StagingError::fs(file))?;
        io::copy(&mut source, &mut zip).map_err(StagingError::fs(file))?;
    }

    zip.finish().map_err(zip_err)?;
    Ok(seen.len())
}

/// Entry name for `file` relative to `base`, joined with `/`.
///
/// Backslashes are rewritten to `/` on every host.
pub fn entry_name(file: &Path, base: &Path) -> String {
    match file.strip_prefix(base) {
        Ok(relative) if relative.components().next().is_some() => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().replace('\\', "/")),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        _ => file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string_lossy().into_owned())
            .replace('\\', "/"),
    }
}

fn to_zip_time(time: SystemTime) -> Option<zip::DateTime> {
    let local = DateTime::<Local>::from(time);
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = build_archive(&[], dir.path(), "t", &dir.path().join("temp")).unwrap_err();
        assert!(matches!(err, StagingError::EmptyArchiveInput));
        assert!(!dir.path().join("temp").exists());
    }

    #[test]
    fn test_entry_name_relative() {
        let base = Path::new("/work/gen");
        let file = base.join("src").join("main").join("User.java");
        assert_eq!(entry_name(&file, base), "src/main/User.java");
    }

    #[test]
    fn test_entry_name_nested_backslashes() {
        let base = Path::new("/work/gen");
        let file = base.join("src").join(r"main\java").join("User.java");
        assert_eq!(entry_name(&file, base), "src/main/java/User.java");
        assert_eq!(
            entry_name(Path::new(r"/elsewhere/a\b.java"), base),
            "a/b.java"
        );
    }

    #[test]
    fn test_duplicate_paths_make_one_entry() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("src/User.java");
        write(&file, "class User {}");

        let archive = build_archive(
            &[file.clone(), file.clone()],
            dir.path(),
            "user",
            &dir.path().join("temp"),
        )
        .unwrap();

        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
        assert_eq!(zip.file_names().collect::<Vec<_>>(), vec!["src/User.java"]);
    }

    #[test]
    fn test_taken_archive_name_is_not_truncated() {
        let dir = TempDir::new().unwrap();
        let taken = dir.path().join("mgg_user_20240101_000000_aaaa.zip");
        fs::write(&taken, b"existing").unwrap();

        let mut names = vec![
            "mgg_user_20240101_000000_bbbb.zip",
            "mgg_user_20240101_000000_aaaa.zip",
        ];
        let (path, _file) =
            create_archive_file(dir.path(), || names.pop().unwrap().to_string()).unwrap();

        assert_eq!(path, dir.path().join("mgg_user_20240101_000000_bbbb.zip"));
        assert_eq!(fs::read(&taken).unwrap(), b"existing");
    }

    #[test]
    fn test_archive_name_retries_are_bounded() {
        let dir = TempDir::new().unwrap();
        let taken = dir.path().join("mgg_x.zip");
        fs::write(&taken, b"existing").unwrap();

        let mut calls = 0;
        let err = create_archive_file(dir.path(), || {
            calls += 1;
            "mgg_x.zip".to_string()
        })
        .unwrap_err();

        assert!(matches!(err, StagingError::FileSystem { .. }));
        assert_eq!(calls, CREATE_ATTEMPTS);
    }

    #[test]
    fn test_entry_name_outside_base() {
        let file = Path::new("/elsewhere/User.java");
        assert_eq!(entry_name(file, Path::new("/work")), "User.java");
    }

    #[test]
    fn test_build_archive_contents() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("out");
        let model = base.join("src/main/java/com/example/model/User.java");
        let xml = base.join("src/main/resources/mapper/UserMapper.xml");
        write(&model, "class User {}");
        write(&xml, "<mapper/>");

        let staging = dir.path().join("temp");
        let archive =
            build_archive(&[model.clone(), xml.clone()], &base, "user", &staging).unwrap();

        assert_eq!(archive.parent().unwrap(), staging);
        let name = archive.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("mgg_user_"), "{name}");

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 2);

        let mut entry = zip
            .by_name("src/main/java/com/example/model/User.java")
            .unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "class User {}");
        drop(entry);

        assert!(zip.by_name("src/main/resources/mapper/UserMapper.xml").is_ok());
    }

    #[test]
    fn test_missing_input_leaves_no_archive() {
        let dir = TempDir::new().unwrap();
        let staging = dir.path().join("temp");
        let err = build_archive(
            &[dir.path().join("missing.java")],
            dir.path(),
            "t",
            &staging,
        )
        .unwrap_err();
        assert!(matches!(err, StagingError::FileSystem { .. }));
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
    }
}
