/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Checksums used by the png container and the zlib stream inside it.
//!
//! Both functions take a running seed so a checksum can be built up
//! over multiple buffers, `crc32(b, crc32(a, 0)) == crc32(a ++ b, 0)` and
//! likewise for adler with a starting value of `1`.
//!
//! The accelerated routines are picked at runtime, their results are
//! identical to the scalar ones, only faster.
//!
//! ```
//! use fpng_checksum::{adler32, crc32};
//!
//! assert_eq!(crc32(b"123456789", 0), 0xCBF4_3926);
//! assert_eq!(adler32(b"Wikipedia", 1), 0x11E6_0398);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

pub use adler::{adler32, adler32_scalar};
pub use cpu::cpu_supports_fast_path;
pub use crc::{crc32, crc32_slice8};

mod adler;
mod cpu;
mod crc;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod crc32_pclmul;
