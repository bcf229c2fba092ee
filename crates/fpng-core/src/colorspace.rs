/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information

/// Colorspaces the codec can store
///
/// Only 8 bit interleaved RGB and RGBA are supported.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorSpace {
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    /// Map a channel count back to a colorspace
    ///
    /// ```
    /// use fpng_core::colorspace::ColorSpace;
    /// assert_eq!(ColorSpace::from_components(4), Some(ColorSpace::RGBA));
    /// assert_eq!(ColorSpace::from_components(2), None);
    /// ```
    pub const fn from_components(components: usize) -> Option<ColorSpace> {
        match components {
            3 => Some(Self::RGB),
            4 => Some(Self::RGBA),
            _ => None
        }
    }
}
