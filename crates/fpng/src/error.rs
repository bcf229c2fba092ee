/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors that can occur when encoding or decoding
//!
//! Every variant maps to one of a fixed set of numeric codes,
//! see [`PngErrors::code`]
use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use fpng_core::bytestream::ZByteIoError;
use fpng_deflate::errors::InflateDecodeErrors;

pub enum PngErrors
{
    /// A valid PNG which uses features outside of what this
    /// codec writes, a general PNG decoder should be used instead
    NotFpng(String),
    /// Bad parameters passed by the caller
    InvalidArg(String),
    /// The PNG signature did not match
    BadSignature,
    /// Stored crc, calculated crc
    BadCrc(u32, u32),
    /// Width or height is zero or above the configured limit
    InvalidDimensions(usize, usize),
    /// Memory needed, memory allowed
    TooMuchMemory(usize, usize),
    /// Chunk framing was truncated or malformed
    ChunkParsing(String),
    /// Size of all IDAT chunks
    IdatTooSmall(usize),
    FileOpen(String),
    /// File size, maximum allowed
    FileTooLarge(u64, u64),
    FileRead(String),
    FileWrite(String),
    FileSeek(String)
}

impl PngErrors
{
    /// The numeric error code of this error
    ///
    /// | Code | Meaning |
    /// |------|---------|
    /// | 1    | not written by this codec, retry with a general decoder |
    /// | 2    | invalid argument |
    /// | 3    | not a png |
    /// | 4    | chunk crc mismatch |
    /// | 5    | invalid dimensions |
    /// | 6    | image needs too much memory |
    /// | 7    | chunk parsing failed |
    /// | 8    | IDAT too small |
    /// | 9    | file could not be opened or created |
    /// | 10   | file too large |
    /// | 11   | file read or write failed |
    /// | 12   | file seek failed |
    pub const fn code(&self) -> u32
    {
        match self
        {
            PngErrors::NotFpng(_) => 1,
            PngErrors::InvalidArg(_) => 2,
            PngErrors::BadSignature => 3,
            PngErrors::BadCrc(_, _) => 4,
            PngErrors::InvalidDimensions(_, _) => 5,
            PngErrors::TooMuchMemory(_, _) => 6,
            PngErrors::ChunkParsing(_) => 7,
            PngErrors::IdatTooSmall(_) => 8,
            PngErrors::FileOpen(_) => 9,
            PngErrors::FileTooLarge(_, _) => 10,
            PngErrors::FileRead(_) | PngErrors::FileWrite(_) => 11,
            PngErrors::FileSeek(_) => 12
        }
    }

    /// Returns true if the data is possibly a valid PNG that
    /// this codec cannot decode
    pub const fn needs_general_decoder(&self) -> bool
    {
        matches!(self, PngErrors::NotFpng(_))
    }
}

impl Debug for PngErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            Self::NotFpng(reason) =>
            {
                writeln!(f, "Image not written by fpng, use a general png decoder: {reason}")
            }
            Self::InvalidArg(reason) => writeln!(f, "Invalid argument: {reason}"),
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected:08X} but found {found:08X}",
            ),
            Self::InvalidDimensions(width, height) =>
            {
                writeln!(f, "Invalid image dimensions {width}x{height}")
            }
            Self::TooMuchMemory(needed, allowed) => writeln!(
                f,
                "Image needs {needed} bytes, larger than the configured limit of {allowed}"
            ),
            Self::ChunkParsing(reason) => writeln!(f, "Could not parse chunk: {reason}"),
            Self::IdatTooSmall(size) => writeln!(f, "IDAT chunks too small, total size {size}"),
            Self::FileOpen(reason) => writeln!(f, "Could not open file: {reason}"),
            Self::FileTooLarge(size, max) => writeln!(
                f,
                "File size {size} larger than the maximum allowed file size {max}"
            ),
            Self::FileRead(reason) => writeln!(f, "Could not read file: {reason}"),
            Self::FileWrite(reason) => writeln!(f, "Could not write file: {reason}"),
            Self::FileSeek(reason) => writeln!(f, "Could not seek file: {reason}")
        }
    }
}

impl Display for PngErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PngErrors {}

impl From<ZByteIoError> for PngErrors
{
    fn from(value: ZByteIoError) -> Self
    {
        PngErrors::ChunkParsing(alloc::format!("{value:?}"))
    }
}

impl From<InflateDecodeErrors> for PngErrors
{
    fn from(value: InflateDecodeErrors) -> Self
    {
        PngErrors::NotFpng(alloc::format!("{:?}", value.error))
    }
}

#[cfg(test)]
mod tests
{
    use alloc::string::ToString;

    use crate::error::PngErrors;

    #[test]
    fn codes_are_stable()
    {
        assert_eq!(PngErrors::NotFpng("".to_string()).code(), 1);
        assert_eq!(PngErrors::BadSignature.code(), 3);
        assert_eq!(PngErrors::BadCrc(0, 1).code(), 4);
        assert_eq!(PngErrors::FileWrite("".to_string()).code(), 11);
        assert_eq!(PngErrors::FileSeek("".to_string()).code(), 12);
    }

    #[test]
    fn only_not_fpng_needs_a_general_decoder()
    {
        assert!(PngErrors::NotFpng("".to_string()).needs_general_decoder());
        assert!(!PngErrors::IdatTooSmall(3).needs_general_decoder());
    }
}
