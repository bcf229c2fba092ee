/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Largest length a single chunk may declare
pub const PNG_MAX_CHUNK_LENGTH: usize = 0x7FFF_FFFF;

/// Smallest zlib stream that can hold one deflate block,
/// two header bytes, one block byte and the adler trailer
pub const MIN_IDAT_SIZE: usize = 7;

/// Size of an IHDR payload
pub const IHDR_LENGTH: usize = 13;

/// Largest width or height the encoder accepts
pub const MAX_ENCODE_DIMENSIONS: usize = 1 << 24;

/// Scanlines sampled when choosing a single filter for the whole image
pub const FILTER_SAMPLE_ROWS: usize = 16;
