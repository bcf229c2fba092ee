/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Adler-32 as used by the zlib trailer

/// Largest prime below 2^16
const MOD_ADLER: u32 = 65521;

/// Largest n such that `255n(n+1)/2 + (n+1)(MOD_ADLER-1) <= 2^32-1`,
/// i.e how many bytes we can sum before reducing
const NMAX: usize = 5552;

/// Compute the adler32 of `data` continuing from `seed`
///
/// `seed` is the value a previous call returned, or `1` to start
/// a new checksum.
pub fn adler32(data: &[u8], seed: u32) -> u32 {
    #[cfg(feature = "simd")]
    {
        if crate::cpu_supports_fast_path() {
            let mut hasher = simd_adler32::Adler32::from_checksum(seed);
            hasher.write(data);
            return hasher.finish();
        }
    }
    adler32_scalar(data, seed)
}

/// Portable adler32, always available
pub fn adler32_scalar(data: &[u8], seed: u32) -> u32 {
    if data.is_empty() {
        return seed;
    }
    let mut a = (seed & 0xFFFF) % MOD_ADLER;
    let mut b = (seed >> 16) % MOD_ADLER;

    for chunk in data.chunks(NMAX) {
        for byte in chunk {
            a += u32::from(*byte);
            b += a;
        }
        a %= MOD_ADLER;
        b %= MOD_ADLER;
    }
    (b << 16) | a
}
