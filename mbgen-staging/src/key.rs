//! Names for download keys, archives and request folders.

use chrono::{DateTime, Local};
use rand::Rng;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Prefix of every staged archive file name.
pub const ARCHIVE_PREFIX: &str = "mgg_";
pub const ARCHIVE_EXTENSION: &str = "zip";
/// Prefix of per-request working folders.
pub const REQUEST_FOLDER_PREFIX: &str = "gen_";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Random `[a-z0-9]` string of `len` characters.
pub fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(CHARSET[rng.gen_range(0..CHARSET.len())]))
        .collect()
}

/// `<schema id>_<scope>_<8 random>`, where scope is a table name or `multi`.
pub fn download_key(schema_id: &str, scope: &str) -> String {
    format!("{schema_id}_{scope}_{}", random_suffix(8))
}

/// `mgg_<hint>_<YYYYMMDD_HHMMSS>_<4 random>.zip`
pub fn archive_file_name(hint: &str, now: DateTime<Local>) -> String {
    format!(
        "{ARCHIVE_PREFIX}{hint}_{}_{}.{ARCHIVE_EXTENSION}",
        now.format(TIMESTAMP_FORMAT),
        random_suffix(4)
    )
}

/// `gen_<YYYYMMDD_HHMMSS>_<8 random>`
pub fn request_folder_name(now: DateTime<Local>) -> String {
    format!(
        "{REQUEST_FOLDER_PREFIX}{}_{}",
        now.format(TIMESTAMP_FORMAT),
        random_suffix(8)
    )
}

/// Whether a file name looks like a staged archive.
pub fn is_archive_name(name: &str) -> bool {
    name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".zip")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_random_suffix_charset() {
        let suffix = random_suffix(64);
        assert_eq!(suffix.len(), 64);
        assert!(suffix.bytes().all(|c| CHARSET.contains(&c)));
    }

    #[test]
    fn test_archive_file_name() {
        let name = archive_file_name("user_profile", fixed_time());
        assert!(name.starts_with("mgg_user_profile_20240309_070501_"));
        assert!(name.ends_with(".zip"));
        assert_eq!(name.len(), "mgg_user_profile_20240309_070501_abcd.zip".len());
        assert!(is_archive_name(&name));
    }

    #[test]
    fn test_request_folder_name() {
        let name = request_folder_name(fixed_time());
        assert!(name.starts_with("gen_20240309_070501_"));
        assert_eq!(name.len(), "gen_20240309_070501_".len() + 8);
    }

    #[test]
    fn test_download_key() {
        let key = download_key("local", "multi");
        assert!(key.starts_with("local_multi_"));
        assert_eq!(key.len(), "local_multi_".len() + 8);
        assert_ne!(download_key("local", "multi"), download_key("local", "multi"));
    }

    #[test]
    fn test_is_archive_name() {
        assert!(is_archive_name("mgg_x_1.zip"));
        assert!(!is_archive_name("other.zip"));
        assert!(!is_archive_name("mgg_x_1.tar"));
    }
}
