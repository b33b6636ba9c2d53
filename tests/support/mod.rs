#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: [u8; 10] = *b"ID3\x03\x00\x00\x00\x00\x00\x00";
pub const IDS: [&[u8; 4]; 6] = [b"TIT2", b"TPE1", b"TALB", b"TYER", b"TCON", b"COMM"];
pub const VALUES: [&str; 6] = ["Song", "Band", "Record", "1999", "Rock", "Nice"];
pub const AUDIO: &[u8] = b"\xff\xfb\x90\x64\x00\x0d\x0a\x1a\x00AUDIO";

/// id | size (big-endian, text length + 1) | 3 flag bytes | text
pub fn frame(id: &[u8; 4], text: &[u8]) -> Vec<u8> {
    let mut v = id.to_vec();
    v.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
    v.extend_from_slice(&[0, 0, 0]);
    v.extend_from_slice(text);
    v
}

pub fn tag_bytes(values: [&str; 6]) -> Vec<u8> {
    let mut v = HEADER.to_vec();
    for (id, value) in IDS.iter().zip(values) {
        v.extend(frame(id, value.as_bytes()));
    }
    v.extend_from_slice(AUDIO);
    v
}

pub fn write_mp3(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
