//! AES in output-feedback mode, as the backup agent encrypts its artifacts.
//!
//! The agent always starts the keystream from an all-zero IV. This is only sound while every
//! key encrypts a single artifact, since two ciphertexts under the same key XOR to the XOR of
//! their plaintexts. Existing backups can only be read back with exactly this construction.

use std::io::Read;

use aes::{Aes128, Aes192, Aes256};
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use ofb::cipher::{InvalidLength, KeyIvInit, StreamCipher};
use ofb::Ofb;

use crate::base::Error;

const IV: [u8; 16] = [0; 16];

/// Padded base64url. Keys issued by the agent may carry non-zero bits past the last full byte.
const KEY_ENCODING: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true));

/// Wraps a `Read` in an adapter decrypting the data with `key`, the base64url-encoded
/// (padded) AES key.
///
/// An empty `key` means the backup is not encrypted and `input` is returned as is. A wrong but
/// well-formed key can not be detected: reading then succeeds and yields garbage.
pub fn decode<'a, R: Read + 'a>(input: R, key: &str) -> Result<Box<dyn Read + 'a>, Error> {
    if key.is_empty() {
        log::debug!("No encryption key given, reading stream as plaintext");
        return Ok(Box::new(input));
    }
    // line breaks from wrapped key files are not part of the key
    let key = key.chars().filter(|c| !matches!(c, '\r' | '\n')).collect::<String>();
    let keystream = Keystream::new(&KEY_ENCODING.decode(key)?)?;
    log::info!("Using cipher reader ({})", keystream.name());
    Ok(Box::new(CipherReader { inner: input, keystream }))
}

enum Keystream {
    Aes128(Ofb<Aes128>),
    Aes192(Ofb<Aes192>),
    Aes256(Ofb<Aes256>),
}

impl Keystream {
    fn new(key: &[u8]) -> Result<Self, Error> {
        let invalid = |_: InvalidLength| Error::KeyLength(key.len());
        Ok(match key.len() {
            16 => Keystream::Aes128(Ofb::new_from_slices(key, &IV).map_err(invalid)?),
            24 => Keystream::Aes192(Ofb::new_from_slices(key, &IV).map_err(invalid)?),
            32 => Keystream::Aes256(Ofb::new_from_slices(key, &IV).map_err(invalid)?),
            len => return Err(Error::KeyLength(len))
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Keystream::Aes128(_) => "AES-128-OFB",
            Keystream::Aes192(_) => "AES-192-OFB",
            Keystream::Aes256(_) => "AES-256-OFB",
        }
    }

    fn apply(&mut self, buf: &mut [u8]) {
        match self {
            Keystream::Aes128(ofb) => ofb.apply_keystream(buf),
            Keystream::Aes192(ofb) => ofb.apply_keystream(buf),
            Keystream::Aes256(ofb) => ofb.apply_keystream(buf),
        }
    }
}

struct CipherReader<R: Read> {
    inner: R,
    keystream: Keystream,
}

impl<R: Read> Read for CipherReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = self.inner.read(buf)?;
        self.keystream.apply(&mut buf[..len]);
        Ok(len)
    }
}
