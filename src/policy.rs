use crate::base::*;

/// The decoding stages for a backup, chosen from the agent version that produced it.
///
/// Each layout lists its [`Stage`]s innermost first: the first stage reads the raw backup, the
/// last one is read by the copy loop.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PipelineLayout {
    /// Agents up to 1.2.0, and agents of unknown version: decrypt, then inflate the zlib
    /// container.
    Legacy,
    /// Agents up to 1.10.0: decrypt, then decode the snappy framing.
    Framed,
    /// Newer agents, where the user states which steps to undo.
    Explicit { decrypt: bool, decompress: bool },
}

impl PipelineLayout {
    /// Picks the layout for `version`.
    ///
    /// `decrypt` and `decompress` only matter for agents newer than 1.10.0. For those,
    /// `decrypt` without a key (`keyed == false`) is an error. Older layouts decrypt only if a
    /// key is given.
    pub fn resolve(version: &AgentVersion, decrypt: bool, decompress: bool, keyed: bool) -> Result<Self, Error> {
        let layout = match version {
            AgentVersion::Unknown => PipelineLayout::Legacy,
            v if v.at_most(1, 2, 0) => PipelineLayout::Legacy,
            v if v.at_most(1, 10, 0) => PipelineLayout::Framed,
            _ if decrypt && !keyed => return Err(Error::MissingKey),
            _ => PipelineLayout::Explicit { decrypt, decompress },
        };
        log::debug!("Agent version {version}: {layout:?}");
        Ok(layout)
    }

    pub fn stages(&self) -> [Stage; 2] {
        match *self {
            PipelineLayout::Legacy => [Stage::DecryptIfKeyed, Stage::DecompressDeflate],
            PipelineLayout::Framed => [Stage::DecryptIfKeyed, Stage::DecompressSnappyFramed],
            PipelineLayout::Explicit { decrypt, decompress } => [
                if decrypt { Stage::DecryptIfKeyed } else { Stage::PassThrough(Bypass::Decryption) },
                if decompress { Stage::DecompressSnappyFramed } else { Stage::PassThrough(Bypass::Decompression) },
            ],
        }
    }
}

/// Parses `version` and picks the layout for it, see [`PipelineLayout::resolve()`].
pub fn resolve_layout(version: &str, decrypt: bool, decompress: bool, keyed: bool) -> Result<PipelineLayout, Error> {
    PipelineLayout::resolve(&version.parse()?, decrypt, decompress, keyed)
}
