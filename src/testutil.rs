//! Encoders producing backups the way the agent does, for tests.

use std::io::Write;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use ofb::cipher::{KeyIvInit, StreamCipher};
use ofb::Ofb;

pub const TEXT: &[u8] = b"-- MySQL dump 10.13  Distrib 5.7.22\n\
    CREATE TABLE `t` (`id` int NOT NULL, PRIMARY KEY (`id`));\n\
    INSERT INTO `t` VALUES (1),(2),(3),(4),(5),(6),(7),(8),(9),(10);\n";

/// AES-256 key.
pub const KEY: &str = "kpySdc2vfHL_4WebUstA29fRFacKis8LZRbLqFFY0HM=";
/// Another AES-256 key, with both URL-safe characters.
pub const OTHER_KEY: &str = "-__7__v_-__7__v_-__7__v_-__7__v_-__7__v_-_8=";
pub const KEY_128: &str = "AQIDBAUGBwgJCgsMDQ4PEA==";
pub const KEY_192: &str = "ZGVmZ2hpamtsbW5vcHFyc3R1dnd4eXp7";

pub fn encrypt(data: &[u8], key: &str) -> Vec<u8> {
    let key = URL_SAFE.decode(key).unwrap();
    let iv = [0u8; 16];
    let mut out = data.to_vec();
    match key.len() {
        16 => Ofb::<aes::Aes128>::new_from_slices(&key, &iv).unwrap().apply_keystream(&mut out),
        24 => Ofb::<aes::Aes192>::new_from_slices(&key, &iv).unwrap().apply_keystream(&mut out),
        32 => Ofb::<aes::Aes256>::new_from_slices(&key, &iv).unwrap().apply_keystream(&mut out),
        len => panic!("no AES variant for {len} byte keys")
    }
    out
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn snappy(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = snap::write::FrameEncoder::new(&mut out);
    enc.write_all(data).unwrap();
    enc.flush().unwrap();
    drop(enc);
    out
}
