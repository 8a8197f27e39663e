//! JSON inputs and outputs shared by the subcommands.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use itinera_fs::{create_utf8_file, file_is_file, open_utf8_file};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode the JSON document at `path`.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)
}

/// Write `value` to `path`, or to `fallback` when no path is given.
pub(crate) fn emit_json<T: Serialize>(
    output: Option<&Utf8Path>,
    fallback: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let Some(path) = output else {
        return write_json(fallback, value);
    };
    let mut file = create_utf8_file(path).map_err(CliError::WriteOutput)?;
    write_json(&mut file, value)?;
    log::info!("wrote report to {path}");
    Ok(())
}
