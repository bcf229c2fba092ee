/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 by folding with carry-less multiplication
//!
//! Follows "Fast CRC Computation for Generic Polynomials Using PCLMULQDQ
//! Instruction" by Intel, bit reflected variant.
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::crc::crc32_slice8;

/// Inputs below this go through the table routine
pub(crate) const MIN_LENGTH: usize = 128;

// x^(4*128+32) mod P and x^(4*128-32) mod P
const K1: i64 = 0x1_5444_2bd4;
const K2: i64 = 0x1_c6e4_1596;
// x^(128+32) mod P and x^(128-32) mod P
const K3: i64 = 0x1_7519_97d0;
const K4: i64 = 0x0_ccaa_009e;
// x^64 mod P
const K5: i64 = 0x1_63cd_6124;
// P(x) and floor(x^64 / P(x)), both reflected
const P_X: i64 = 0x1_DB71_0641;
const U_PRIME: i64 = 0x1_F701_1641;

#[target_feature(enable = "pclmulqdq", enable = "sse2", enable = "sse4.1")]
unsafe fn fold_sse(src: __m128i, dst: __m128i, multipliers: __m128i) -> __m128i {
    // 0x00 multiplies the low halves, 0x11 the high halves
    let first = _mm_clmulepi64_si128::<0x00>(src, multipliers);
    let second = _mm_clmulepi64_si128::<0x11>(src, multipliers);

    _mm_xor_si128(_mm_xor_si128(dst, first), second)
}

#[target_feature(enable = "sse2")]
unsafe fn load(data: &mut &[u8]) -> __m128i {
    debug_assert!(data.len() >= 16);
    let value = _mm_loadu_si128(data.as_ptr().cast());
    *data = &data[16..];
    value
}

/// Compute the crc of `data` continuing from `seed`
///
/// # Safety
/// The cpu must support `pclmulqdq` and `sse4.1`.
#[target_feature(enable = "pclmulqdq", enable = "sse2", enable = "sse4.1")]
pub(crate) unsafe fn crc32_pclmul(mut data: &[u8], seed: u32) -> u32 {
    if data.len() < MIN_LENGTH {
        return crc32_slice8(data, seed);
    }

    let mut x3 = load(&mut data);
    let mut x2 = load(&mut data);
    let mut x1 = load(&mut data);
    let mut x0 = load(&mut data);

    x3 = _mm_xor_si128(x3, _mm_cvtsi32_si128(!seed as i32));

    // fold four lanes at a time
    let k1k2 = _mm_set_epi64x(K2, K1);

    while data.len() >= 64 {
        x3 = fold_sse(x3, load(&mut data), k1k2);
        x2 = fold_sse(x2, load(&mut data), k1k2);
        x1 = fold_sse(x1, load(&mut data), k1k2);
        x0 = fold_sse(x0, load(&mut data), k1k2);
    }

    let k3k4 = _mm_set_epi64x(K4, K3);

    let mut x = fold_sse(x3, x2, k3k4);
    x = fold_sse(x, x1, k3k4);
    x = fold_sse(x, x0, k3k4);

    while data.len() >= 16 {
        x = fold_sse(x, load(&mut data), k3k4);
    }

    // 128 bits to 64 bits
    let x = _mm_xor_si128(
        _mm_clmulepi64_si128::<0x10>(x, k3k4),
        _mm_srli_si128::<8>(x)
    );
    let low_32 = _mm_set_epi32(0, 0, 0, !0);

    let x = _mm_xor_si128(
        _mm_clmulepi64_si128::<0x00>(_mm_and_si128(x, low_32), _mm_set_epi64x(0, K5)),
        _mm_srli_si128::<4>(x)
    );

    // Barrett reduction, 64 bits to 32 bits
    let pu = _mm_set_epi64x(U_PRIME, P_X);

    let t1 = _mm_clmulepi64_si128::<0x10>(_mm_and_si128(x, low_32), pu);
    let t2 = _mm_clmulepi64_si128::<0x00>(_mm_and_si128(t1, low_32), pu);

    // reflected, so the result sits in the upper 32 bits of the low lane
    let c = _mm_extract_epi32::<1>(_mm_xor_si128(x, t2)) as u32;

    if data.is_empty() {
        !c
    } else {
        crc32_slice8(data, !c)
    }
}
