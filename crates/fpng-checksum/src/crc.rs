/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png chunks (reflected, polynomial `0xEDB88320`)

/// Reversed representation of the png polynomial
const CRC_POLY: u32 = 0xEDB8_8320;

/// Slice by 8 tables, `CRC_TABLES[k][i]` is the crc of byte `i`
/// followed by `k` zero bytes.
static CRC_TABLES: [[u32; 256]; 8] = make_crc_tables();

const fn make_crc_tables() -> [[u32; 256]; 8] {
    let mut tables = [[0_u32; 256]; 8];
    let mut i = 0;

    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;

        while k < 8 {
            c = if c & 1 != 0 { CRC_POLY ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        tables[0][i] = c;
        i += 1;
    }

    let mut i = 0;

    while i < 256 {
        let mut c = tables[0][i];
        let mut t = 1;

        while t < 8 {
            c = tables[0][(c & 0xFF) as usize] ^ (c >> 8);
            tables[t][i] = c;
            t += 1;
        }
        i += 1;
    }
    tables
}

/// Compute the crc of `data` continuing from `seed`
///
/// `seed` is the value a previous call returned, or `0` to start
/// a new checksum.
///
/// Dispatches to a carry-less multiplication routine when the
/// cpu supports it, the result is the same either way.
pub fn crc32(data: &[u8], seed: u32) -> u32 {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if crate::cpu_supports_fast_path() && data.len() >= crate::crc32_pclmul::MIN_LENGTH {
            // Safety: cpu_supports_fast_path checked pclmulqdq and sse4.1
            return unsafe { crate::crc32_pclmul::crc32_pclmul(data, seed) };
        }
    }
    crc32_slice8(data, seed)
}

/// Portable slice by 8 crc, always available
pub fn crc32_slice8(data: &[u8], seed: u32) -> u32 {
    let mut crc = !seed;

    let mut chunks = data.chunks_exact(8);

    for chunk in &mut chunks {
        let a = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ crc;

        crc = CRC_TABLES[7][(a & 0xFF) as usize]
            ^ CRC_TABLES[6][((a >> 8) & 0xFF) as usize]
            ^ CRC_TABLES[5][((a >> 16) & 0xFF) as usize]
            ^ CRC_TABLES[4][(a >> 24) as usize]
            ^ CRC_TABLES[3][usize::from(chunk[4])]
            ^ CRC_TABLES[2][usize::from(chunk[5])]
            ^ CRC_TABLES[1][usize::from(chunk[6])]
            ^ CRC_TABLES[0][usize::from(chunk[7])];
    }
    for byte in chunks.remainder() {
        crc = CRC_TABLES[0][((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    !crc
}
