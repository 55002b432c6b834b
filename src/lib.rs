//! Restores backups taken by the CloudBackup agent to their original bytes.
//!
//! Depending on its release, the agent compressed each backup with zlib or the snappy framing
//! format, and optionally encrypted it with AES in OFB mode. [`policy`] decides from the agent
//! version which of these steps to undo, [`pipeline`] chains the matching decoding adapters from
//! [`cipher`] and [`codecs`] around the backup stream and copies it out. [`prepare`] does the
//! same for files on disk.

pub mod base;
pub mod cipher;
pub mod codecs;
pub mod policy;
pub mod pipeline;
pub mod prepare;

#[cfg(test)]
mod testutil;

pub use base::*;
pub use policy::{resolve_layout, PipelineLayout};
pub use pipeline::{execute, Pipeline};
pub use prepare::{prepare_backup_file, Request};
