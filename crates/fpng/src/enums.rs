/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

/// Chunks the decoder knows by name
///
/// Everything else is sorted into [`PngChunkType::Ancillary`] or
/// [`PngChunkType::Critical`] depending on the case of the first letter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType
{
    IHDR,
    PLTE,
    IDAT,
    IEND,
    Ancillary,
    Critical
}

impl PngChunkType
{
    pub fn from_name(name: [u8; 4]) -> PngChunkType
    {
        match &name
        {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            // bit 5 of the first byte is the ancillary bit
            _ if name[0] & (1 << 5) != 0 => PngChunkType::Ancillary,
            _ => PngChunkType::Critical
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum FilterMethod
{
    #[default]
    None,
    Sub,
    Up,
    Average,
    Paeth,
    // First scanline, special
    PaethFirst,
    AvgFirst
}

impl FilterMethod
{
    pub const ALL: [FilterMethod; 5] = [
        FilterMethod::None,
        FilterMethod::Sub,
        FilterMethod::Up,
        FilterMethod::Average,
        FilterMethod::Paeth
    ];

    pub fn from_int(int: u8) -> Option<FilterMethod>
    {
        match int
        {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8
    {
        match self
        {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average | FilterMethod::AvgFirst => 3,
            FilterMethod::Paeth | FilterMethod::PaethFirst => 4
        }
    }

    /// The filter to use on the first scanline, where
    /// the row above is all zeroes
    pub const fn first_row_variant(self) -> FilterMethod
    {
        match self
        {
            // up for the first row becomes a memcpy
            FilterMethod::Up => FilterMethod::None,
            FilterMethod::Paeth => FilterMethod::PaethFirst,
            FilterMethod::Average => FilterMethod::AvgFirst,
            other => other
        }
    }
}

/// Color types the decoder accepts
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PngColor
{
    #[default]
    RGB,
    RGBA
}

impl PngColor
{
    pub const fn num_components(self) -> usize
    {
        match self
        {
            PngColor::RGB => 3,
            PngColor::RGBA => 4
        }
    }

    pub const fn from_int(int: u8) -> Option<PngColor>
    {
        match int
        {
            2 => Some(PngColor::RGB),
            6 => Some(PngColor::RGBA),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8
    {
        match self
        {
            PngColor::RGB => 2,
            PngColor::RGBA => 6
        }
    }
}

#[cfg(test)]
mod tests
{
    use crate::enums::{FilterMethod, PngChunkType};

    #[test]
    fn chunk_names_are_classified()
    {
        assert_eq!(PngChunkType::from_name(*b"IDAT"), PngChunkType::IDAT);
        assert_eq!(PngChunkType::from_name(*b"tEXt"), PngChunkType::Ancillary);
        assert_eq!(PngChunkType::from_name(*b"fdEC"), PngChunkType::Ancillary);
        assert_eq!(PngChunkType::from_name(*b"ZZZZ"), PngChunkType::Critical);
    }

    #[test]
    fn filter_bytes_round_trip()
    {
        for filter in FilterMethod::ALL
        {
            assert_eq!(FilterMethod::from_int(filter.to_int()), Some(filter));
        }
        assert_eq!(FilterMethod::from_int(5), None);
    }
}
