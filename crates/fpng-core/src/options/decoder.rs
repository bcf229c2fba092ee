/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Largest width or height a png header may declare
pub const DEFAULT_MAX_DIMENSIONS: usize = 1 << 24;

/// Largest allocation a decode may make for its output
pub const DEFAULT_MAX_MEMORY: usize = 1 << 31;

/// Largest file the path based decoders will read
pub const DEFAULT_MAX_FILE_SIZE: u64 = i32::MAX as u64;

/// Decoder options that are flags
#[derive(Copy, Debug, Clone)]
struct DecoderFlags {
    /// Whether the decoder should confirm and report adler mismatch
    inflate_confirm_adler: bool,
    /// Whether the PNG decoder should confirm crc
    png_confirm_crc:       bool
}

impl Default for DecoderFlags {
    fn default() -> Self {
        DecoderFlags {
            inflate_confirm_adler: true,
            png_confirm_crc:       true
        }
    }
}

/// Decoder options
///
/// The defaults are the safe limits, every checksum is confirmed.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16777216
    max_width:        usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16777216
    max_height:       usize,
    /// Maximum number of bytes the decoded image and its
    /// intermediate buffers may occupy
    ///
    /// - Default value: 2 GiB
    max_memory_bytes: usize,
    /// Maximum file size path based decoding will read
    ///
    /// - Default value: `i32::MAX`
    max_file_size:    u64,
    /// Boolean flags that influence decoding
    flags:            DecoderFlags
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:        DEFAULT_MAX_DIMENSIONS,
            max_height:       DEFAULT_MAX_DIMENSIONS,
            max_memory_bytes: DEFAULT_MAX_MEMORY,
            max_file_size:    DEFAULT_MAX_FILE_SIZE,
            flags:            DecoderFlags::default()
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder with options setting most configurable
    /// options to be their safe counterparts
    ///
    /// This is the same as `default`
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create the decoder with crc and adler checking disabled
    ///
    /// Corrupt files then surface as decode errors or wrong pixels
    /// instead of checksum errors.
    pub fn new_fast() -> DecoderOptions {
        DecoderOptions::default()
            .set_confirm_crc(false)
            .set_confirm_adler(false)
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    pub const fn get_max_memory_bytes(&self) -> usize {
        self.max_memory_bytes
    }

    pub const fn get_max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether chunk crc values are compared
    pub const fn get_confirm_crc(&self) -> bool {
        self.flags.png_confirm_crc
    }

    /// Whether the zlib trailer is compared
    pub const fn get_confirm_adler(&self) -> bool {
        self.flags.inflate_confirm_adler
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the largest number of bytes a decode may allocate
    /// for its output and intermediate buffers
    pub fn set_max_memory_bytes(mut self, bytes: usize) -> Self {
        self.max_memory_bytes = bytes;
        self
    }

    /// Set the largest file path based decoding will read
    pub fn set_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn set_confirm_crc(mut self, yes: bool) -> Self {
        self.flags.png_confirm_crc = yes;
        self
    }

    pub fn set_confirm_adler(mut self, yes: bool) -> Self {
        self.flags.inflate_confirm_adler = yes;
        self
    }
}
