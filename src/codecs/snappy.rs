use std::io::{Cursor, Read};
use snap::read::FrameDecoder;

use crate::base::Codec;
use super::{read_head, HeaderMismatch};

/// The stream identifier chunk every framed snappy stream starts with.
const STREAM_IDENTIFIER: &[u8] = b"\xff\x06\x00\x00sNaPpY";

pub fn decode<R: Read>(input: R) -> FrameDecoder<IdentifierCheck<R>> {
    FrameDecoder::new(IdentifierCheck::new(input))
}

/// Verifies the stream identifier on the first read, then replays it to the decoder.
///
/// An input that ends before its first byte is accepted as an empty stream.
pub struct IdentifierCheck<R: Read> {
    inner: R,
    head: Cursor<Vec<u8>>,
    checked: bool,
}

impl<R: Read> IdentifierCheck<R> {
    fn new(inner: R) -> Self {
        IdentifierCheck { inner, head: Default::default(), checked: false }
    }
}

impl<R: Read> Read for IdentifierCheck<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if !self.checked {
            let head = read_head(&mut self.inner, STREAM_IDENTIFIER.len())?;
            if !head.is_empty() && head != STREAM_IDENTIFIER {
                return Err(HeaderMismatch(Codec::Snappy).into_io());
            }
            self.head = Cursor::new(head);
            self.checked = true;
        }
        match self.head.read(buf)? {
            0 => self.inner.read(buf),
            len => Ok(len)
        }
    }
}
