//! Per-file zip archives.
//!
//! Every source file is wrapped in its own single-entry zip so the update
//! pipeline can fetch files one by one. The entry is named by the file's
//! relative path and keeps the file's modification time and, on Unix, its
//! permission bits.

use camino::Utf8Path;
use std::fs;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Errors arising while writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading the source file or writing the archive failed.
    #[error("archive I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip writer rejected the entry.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Name of the archive entry for `relative_path`.
///
/// Zip entry names always use `/`, whatever the platform separator.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use patch_packager::archive::entry_name;
///
/// assert_eq!(entry_name(Utf8Path::new("sub/b.txt")), "sub/b.txt");
/// ```
#[must_use]
pub fn entry_name(relative_path: &Utf8Path) -> String {
    relative_path
        .components()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Write a single-entry archive of `source` to `destination`.
///
/// Missing parent folders of `destination` are created. Both file handles
/// are released before this returns. A failure leaves whatever was already
/// written in place.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if the source cannot be read or the
/// destination cannot be created, and [`ArchiveError::Zip`] if the zip
/// writer fails.
pub fn emit_archive(
    source: &Utf8Path,
    relative_path: &Utf8Path,
    destination: &Utf8Path,
) -> Result<(), ArchiveError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut input = fs::File::open(source)?;
    let options = entry_options(&input.metadata()?);

    let mut writer = ZipWriter::new(fs::File::create(destination)?);
    writer.start_file(entry_name(relative_path), options)?;
    io::copy(&mut input, &mut writer)?;
    writer.finish()?;
    Ok(())
}

/// Entry options carrying the source file's metadata.
fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let mut options =
        SimpleFileOptions::default().large_file(metadata.len() >= u64::from(u32::MAX));
    if let Some(timestamp) = metadata.modified().ok().and_then(zip_timestamp) {
        options = options.last_modified_time(timestamp);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode());
    }
    options
}

/// Convert `time` to a zip timestamp, in UTC.
///
/// Returns `None` for times the zip format cannot hold (before 1980 or
/// after 2107).
fn zip_timestamp(time: SystemTime) -> Option<zip::DateTime> {
    let secs = time.duration_since(UNIX_EPOCH).ok()?.as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    let day_secs = secs % 86_400;
    zip::DateTime::from_date_and_time(
        u16::try_from(year).ok()?,
        u8::try_from(month).ok()?,
        u8::try_from(day).ok()?,
        u8::try_from(day_secs / 3_600).ok()?,
        u8::try_from(day_secs % 3_600 / 60).ok()?,
        u8::try_from(day_secs % 60).ok()?,
    )
    .ok()
}

/// Convert days since the Unix epoch to a `(year, month, day)` triple.
///
/// Howard Hinnant's `civil_from_days`, restricted to dates after the epoch.
const fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097; // day of era [0, 146_096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
