/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::colorspace::ColorSpace;

/// How hard the encoder works
///
/// The numeric values are the ones callers pass around as plain integers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum EncodeFlags {
    /// One filter for the whole image, fixed huffman with
    /// pixel and row repeats as the only matches
    #[default]
    Fast,
    /// A filter per scanline and a hash chain match finder
    Slower,
    /// No filtering and stored deflate blocks
    ForceUncompressed
}

impl EncodeFlags {
    pub const fn from_u32(value: u32) -> Option<EncodeFlags> {
        match value {
            0 => Some(Self::Fast),
            1 => Some(Self::Slower),
            2 => Some(Self::ForceUncompressed),
            _ => None
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Fast => 0,
            Self::Slower => 1,
            Self::ForceUncompressed => 2
        }
    }
}

/// Options shared by some of the encoders in
/// the `fpng-` family of image crates
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    flags:      EncodeFlags
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGB,
            flags:      EncodeFlags::Fast
        }
    }
}

impl EncoderOptions {
    /// Create  new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `colorspace`: Image colorspaces
    /// * `flags`: How much effort the encoder puts into compression
    ///
    /// returns: EncoderOptions
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, flags: EncodeFlags
    ) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            flags
        }
    }
    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }

    /// Get height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }

    /// Get the colorspace for which the image will be encoded in
    pub const fn get_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn get_flags(&self) -> EncodeFlags {
        self.flags
    }

    /// Set width for the image to be encoded
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set height for the image to be encoded
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set colorspace for the image to be encoded
    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    pub fn set_flags(mut self, flags: EncodeFlags) -> Self {
        self.flags = flags;
        self
    }
}
