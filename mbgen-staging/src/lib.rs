//! Staging for generated output: archives, download keys and expiry.
//!
//! A [`StagingArea`] owns a staging directory and a [`DownloadRegistry`].
//! Generated files are bundled with [`build_archive`], registered under a
//! download key, and removed by [`sweep_once`] or the background reaper
//! started with [`StagingArea::start_reaper`] once they exceed their TTL.

mod archive;
mod area;
mod error;
mod key;
mod reaper;
mod registry;

pub use archive::{build_archive, entry_name};
pub use area::{StagedArchive, StagingArea};
pub use error::{Result, StagingError};
pub use key::{
    ARCHIVE_PREFIX, REQUEST_FOLDER_PREFIX, archive_file_name, download_key, random_suffix,
    request_folder_name,
};
pub use reaper::{ReaperHandle, SweepReport, sweep_once};
pub use registry::DownloadRegistry;
