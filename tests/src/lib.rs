/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod checksum;
mod png;

#[derive(Clone, Deserialize, Debug)]
pub struct ChecksumEntry {
    pub name:    String,
    pub data:    String,
    pub crc32:   Option<u32>,
    pub adler32: Option<u32>,
    pub comment: Option<String>
}

pub fn manifest_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

/// Deterministic test image, a diagonal gradient with a hard edge in the middle
pub fn test_image(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * channels);

    for y in 0..height {
        for x in 0..width {
            let edge = if x > width / 2 { 128 } else { 0 };

            for c in 0..channels {
                pixels.push(((x + y) * (c + 1) + edge) as u8);
            }
        }
    }
    pixels
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
