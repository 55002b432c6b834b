use std::io::{BufRead, BufReader, Chain, Cursor, Read};
use flate2::{Decompress, FlushDecompress, Status};

use crate::base::{Codec, Error};
use super::read_head;

/// Reads and checks the two-byte zlib header, then hands it back to the decoder together with
/// the rest of `input`.
pub fn decode<R: Read>(mut input: R) -> Result<FlateDecoder<BufReader<Chain<Cursor<Vec<u8>>, R>>>, Error> {
    let head = read_head(&mut input, 2)?;
    if !valid_header(&head) {
        return Err(Error::CodecHeader(Codec::Deflate));
    }
    Ok(FlateDecoder::new(BufReader::new(Cursor::new(head).chain(input))))
}

fn valid_header(head: &[u8]) -> bool {
    let &[cmf, flg] = head else {
        return false;
    };
    let method = cmf & 0x0f;
    let window = cmf >> 4;
    let preset_dict = flg & 0x20 != 0;
    method == 8 && window <= 7 && !preset_dict && (u16::from(cmf) << 8 | u16::from(flg)) % 31 == 0
}

/// Inflates a zlib stream, failing if the input ends before the Adler-32 trailer.
///
/// Anything after the trailer is left unread.
pub struct FlateDecoder<R: BufRead> {
    reader: R,
    state: Decompress,
    done: bool,
}

impl<R: BufRead> FlateDecoder<R> {
    fn new(reader: R) -> Self {
        FlateDecoder { reader, state: Decompress::new(true), done: false }
    }
}

impl<R: BufRead> Read for FlateDecoder<R> {
    fn read(&mut self, out_buf: &mut [u8]) -> std::io::Result<usize> {
        if self.done || out_buf.is_empty() {
            return Ok(0);
        }
        loop {
            let in_buf = self.reader.fill_buf()?;
            let eof = in_buf.is_empty();
            let (in_before, out_before) = (self.state.total_in(), self.state.total_out());
            let status = self.state.decompress(in_buf, out_buf, FlushDecompress::None)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
            let consumed = (self.state.total_in() - in_before) as usize;
            let read = (self.state.total_out() - out_before) as usize;
            self.reader.consume(consumed);
            match status {
                Status::StreamEnd => {
                    self.done = true;
                    return Ok(read);
                },
                _ if read > 0 => return Ok(read),
                _ if eof => return Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof,
                    "zlib stream ends before its trailer")),
                _ => continue
            }
        }
    }
}
