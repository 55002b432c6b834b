use std::path::PathBuf;

use thiserror::Error;

use super::Codec;

/// The error type of all decode operations.
///
/// Every variant is terminal for the current invocation: nothing is retried, and the first
/// error encountered while building stages or copying data is the one reported.
#[derive(Error, Debug)]
pub enum Error {
    /// The agent version is neither a sentinel nor a parseable semantic version.
    #[error("invalid --agent-version {version:?}: {source}")]
    VersionParse {
        version: String,
        #[source]
        source: semver::Error,
    },

    /// The encryption key is not valid padded base64url.
    #[error("--encryption-key is not valid base64url: {0}")]
    KeyDecode(#[from] base64::DecodeError),

    /// The decoded key does not fit any AES variant.
    #[error("--encryption-key decodes to {0} bytes, expected 16, 24 or 32")]
    KeyLength(usize),

    /// The stream does not start with the container header of `Codec`.
    #[error("backup stream is not {0}; check the --agent-version the backup was taken with")]
    CodecHeader(Codec),

    /// Decryption was requested but no key was given.
    #[error("--encryption-key is mandatory when --decrypt is set")]
    MissingKey,

    /// Reading or writing one of the streams failed, including decoding errors past the
    /// container header.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is mandatory")]
    MissingArgument(&'static str),

    #[error("backup file {} doesn't exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("expecting a file but {} is a directory", .0.display())]
    InputIsDirectory(PathBuf),

    #[error("output file {} exists, please remove it", .0.display())]
    OutputExists(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
