//! Capability-based file access for Itinera's JSON inputs and reports.
//!
//! Paths arrive from the command line as UTF-8. Each helper resolves an
//! ambient directory handle for the path's parent and works relative to it,
//! so absolute and relative paths behave the same.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Open an existing file for reading.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` names an existing regular file.
///
/// # Errors
///
/// Returns an error when the parent directory cannot be opened or the entry
/// cannot be inspected.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_dir_and_name(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create or truncate `path` for writing, creating missing parent directories.
///
/// # Errors
///
/// Returns an error when a directory cannot be created or the file cannot
/// be opened for writing.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_dir_and_name(path)?;
    dir.create(name.as_str())
}

/// Create the parent directory chain of `path` if it does not exist.
///
/// # Errors
///
/// Returns an error when the directories cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambient root handle and the path below it.
fn split_root(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut components = dir.as_std_path().components();
    let base = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // Drive prefixes are followed by the root separator.
            if matches!(components.next(), Some(Component::RootDir)) {
                Utf8PathBuf::from(format!("{prefix}{}", std::path::MAIN_SEPARATOR))
            } else {
                Utf8PathBuf::from(prefix)
            }
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => {
            let handle = fs_utf8::Dir::open_ambient_dir(".", ambient_authority())?;
            return Ok((handle, dir.to_path_buf()));
        }
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;
    let handle = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((handle, relative))
}
