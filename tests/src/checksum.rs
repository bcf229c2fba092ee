/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;

use fpng_checksum::{adler32, adler32_scalar, crc32, crc32_slice8};

use crate::{manifest_path, ChecksumEntry};

fn entries() -> Vec<ChecksumEntry> {
    let json_file = read(manifest_path("checksum.json")).unwrap();

    serde_json::from_slice(&json_file).unwrap()
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_checksum_vectors() {
    let mut failures = Vec::new();

    for entry in entries() {
        let data = entry.data.as_bytes();

        if let Some(expected) = entry.crc32 {
            let found = crc32(data, 0);
            if found != expected {
                failures.push(format!(
                    "crc32 mismatch for {:?}, expected {:08x} found {:08x}",
                    entry.name, expected, found
                ));
            }
        }
        if let Some(expected) = entry.adler32 {
            let found = adler32(data, 1);
            if found != expected {
                failures.push(format!(
                    "adler32 mismatch for {:?}, expected {:08x} found {:08x}",
                    entry.name, expected, found
                ));
            }
        }
    }
    if !failures.is_empty() {
        panic!("{:#?}", failures);
    }
}

#[test]
fn test_fast_paths_match_scalar() {
    // long enough to go through every vector loop and tail
    for len in [0, 1, 15, 16, 63, 64, 65, 1000, 5552, 5553, 70_001] {
        let data: Vec<u8> = (0..len).map(|x: usize| (x * 31 + x / 7) as u8).collect();

        assert_eq!(crc32(&data, 0), crc32_slice8(&data, 0), "crc32, length {len}");
        assert_eq!(adler32(&data, 1), adler32_scalar(&data, 1), "adler32, length {len}");
    }
}

#[test]
fn test_crc_matches_flate2() {
    let data = crate::test_image(200, 100, 3);
    let mut hasher = flate2::Crc::new();
    hasher.update(&data);

    assert_eq!(crc32(&data, 0), hasher.sum());
}
