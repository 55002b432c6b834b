use std::fmt::{Display, Formatter};

mod error;
pub use error::*;

mod version;
pub use version::*;

/// Compression containers the backup agent has used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Codec {
    /// zlib framing around raw deflate data (header, data, Adler-32 trailer).
    Deflate,
    /// The snappy framing format, with per-chunk CRC-32C checksums.
    Snappy,
}

impl Display for Codec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Deflate => f.write_str("a zlib stream"),
            Codec::Snappy => f.write_str("a framed snappy stream"),
        }
    }
}

/// The encoding step a [`Stage::PassThrough`] stands in for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Bypass {
    Decryption,
    Decompression,
}

/// A single decoding step of a pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stage {
    /// Decrypt with the AES-OFB keystream, or pass through when no key is given.
    DecryptIfKeyed,
    /// Inflate a zlib container.
    DecompressDeflate,
    /// Decode the snappy framing format.
    DecompressSnappyFramed,
    /// Leave the bytes unchanged.
    PassThrough(Bypass),
}
