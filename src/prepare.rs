use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use crate::base::Error;
use crate::pipeline::Pipeline;
use crate::policy::resolve_layout;

/// Everything needed to restore one backup file.
#[derive(Debug, Default, Clone)]
pub struct Request {
    /// The backup as written by the agent.
    pub input: PathBuf,
    /// Where the restored data goes. Must not exist yet.
    pub output: PathBuf,
    /// base64url-encoded AES key, empty if the backup is not encrypted.
    pub encryption_key: String,
    /// Version of the agent the backup was taken with, empty if unknown.
    pub agent_version: String,
    /// Undo encryption. Only consulted for agents newer than 1.10.0.
    pub decrypt: bool,
    /// Undo compression. Only consulted for agents newer than 1.10.0.
    pub decompress: bool,
}

/// Checks that `path` names an existing file that is not a directory.
pub fn validate_input_file(path: &Path) -> Result<(), Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::MissingArgument("backup file"));
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(Error::InputIsDirectory(path.to_owned())),
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(Error::InputNotFound(path.to_owned())),
        Err(source) => Err(Error::Open { path: path.to_owned(), source })
    }
}

/// Checks that nothing exists at `path` yet, not even a dangling symlink.
pub fn validate_output_file(path: &Path) -> Result<(), Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::MissingArgument("output file"));
    }
    match std::fs::symlink_metadata(path) {
        Ok(_) => Err(Error::OutputExists(path.to_owned())),
        Err(_) => Ok(())
    }
}

/// Restores `request.input` into `request.output`, returning the number of bytes written.
///
/// Argument errors (paths, version, missing or malformed key, a backup which is not zlib
/// where one is expected) are reported before the output file is created. If decoding fails
/// midway, the incomplete output file is removed again.
pub fn prepare_backup_file(request: &Request) -> Result<u64, Error> {
    validate_input_file(&request.input)?;
    validate_output_file(&request.output)?;
    let layout = resolve_layout(&request.agent_version, request.decrypt, request.decompress,
        !request.encryption_key.is_empty())?;

    let input = File::open(&request.input)
        .map_err(|source| Error::Open { path: request.input.clone(), source })?;
    let pipeline = Pipeline::build(BufReader::new(input), &layout, &request.encryption_key)?;

    let output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&request.output)
        .map_err(|source| match source.kind() {
            ErrorKind::AlreadyExists => Error::OutputExists(request.output.clone()),
            _ => Error::Create { path: request.output.clone(), source }
        })?;
    let mut writer = BufWriter::new(output);
    match pipeline.copy_to(&mut writer) {
        Ok(written) => {
            log::info!("Wrote {written} bytes to {}", request.output.display());
            Ok(written)
        },
        Err(err) => {
            drop(writer);
            if let Err(rm_err) = std::fs::remove_file(&request.output) {
                log::warn!("Could not remove incomplete {}: {rm_err}", request.output.display());
            }
            Err(err)
        }
    }
}
