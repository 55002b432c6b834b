mod flate;
mod snappy;

use std::io::Read;

use crate::base::*;

/// Wraps a `Read` in an adapter decompressing the data according to `codec`.
///
/// The zlib header is read and validated before this returns, so a stream that is not
/// deflate-compressed is rejected right away with [`Error::CodecHeader`]. The snappy stream
/// identifier is only checked on the first read from the returned adapter; a mismatch then
/// surfaces as an `std::io::Error` carrying a [`HeaderMismatch`].
pub fn decode<'a, R: Read + 'a>(input: R, codec: Codec) -> Result<Box<dyn Read + 'a>, Error> {
    match codec {
        Codec::Deflate => {
            log::info!("Using legacy zlib reader");
            Ok(Box::new(flate::decode(input)?))
        },
        Codec::Snappy => {
            log::info!("Using snappy reader");
            Ok(Box::new(snappy::decode(input)))
        }
    }
}

/// The payload of an `std::io::Error` raised by a lazily checked container header.
#[derive(thiserror::Error, Debug)]
#[error("stream is not {0}")]
pub struct HeaderMismatch(pub Codec);

impl HeaderMismatch {
    /// Recovers the codec from an `std::io::Error` raised by a decoding adapter.
    pub fn find(err: &std::io::Error) -> Option<Codec> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<HeaderMismatch>())
            .map(|mismatch| mismatch.0)
    }

    fn into_io(self) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::InvalidData, self)
    }
}

/// Reads up to `len` bytes, fewer only if the input ends first.
fn read_head<R: Read>(input: &mut R, len: usize) -> std::io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(len);
    input.by_ref().take(len as u64).read_to_end(&mut head)?;
    Ok(head)
}
