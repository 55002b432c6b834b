use std::io::{Read, Write};

use crate::base::*;
use crate::cipher;
use crate::codecs::{self, HeaderMismatch};
use crate::policy::PipelineLayout;

/// A backup stream with all decoding stages of a [`PipelineLayout`] applied.
pub struct Pipeline<'a> {
    reader: Box<dyn Read + 'a>,
}

impl<'a> Pipeline<'a> {
    /// Wraps `raw` in the stages of `layout`, innermost first.
    ///
    /// Key errors, and a zlib header that doesn't match, are reported here, before anything is
    /// copied.
    pub fn build<R: Read + 'a>(raw: R, layout: &PipelineLayout, key: &str) -> Result<Self, Error> {
        let mut reader: Box<dyn Read + 'a> = Box::new(raw);
        for stage in layout.stages() {
            reader = match stage {
                Stage::DecryptIfKeyed => cipher::decode(reader, key)?,
                Stage::DecompressDeflate => codecs::decode(reader, Codec::Deflate)?,
                Stage::DecompressSnappyFramed => codecs::decode(reader, Codec::Snappy)?,
                Stage::PassThrough(Bypass::Decryption) => {
                    log::warn!("Not decrypting backup stream, if your file was encrypted, the output file may be corrupt");
                    reader
                },
                Stage::PassThrough(Bypass::Decompression) => {
                    log::warn!("Not decompressing backup stream, if your file was compressed, the output file may be corrupt");
                    reader
                }
            };
        }
        Ok(Pipeline { reader })
    }

    /// Streams all decoded bytes into `output`, returning their count.
    ///
    /// Stops at the first error. Whatever was written to `output` until then stays there.
    pub fn copy_to<W: Write + ?Sized>(mut self, output: &mut W) -> Result<u64, Error> {
        let written = std::io::copy(&mut self.reader, output).map_err(|err| match HeaderMismatch::find(&err) {
            Some(codec) => Error::CodecHeader(codec),
            None => Error::Io(err)
        })?;
        output.flush()?;
        log::debug!("Wrote {written} bytes");
        Ok(written)
    }
}

/// Decodes `raw` according to `layout` into `output`. Returns the number of bytes written.
pub fn execute<R: Read, W: Write + ?Sized>(raw: R, layout: &PipelineLayout, key: &str, output: &mut W) -> Result<u64, Error> {
    Pipeline::build(raw, layout, key)?.copy_to(output)
}
