/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors raised while inflating

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

/// Failure of [`DeflateDecoder`](crate::DeflateDecoder), with the
/// bytes produced before the failure
pub struct InflateDecodeErrors
{
    pub error: DecodeErrorStatus,
    /// Output written before `error` was hit, may be empty
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }
    /// An error raised before any output was produced
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, Vec::new())
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "{:?} ({} bytes inflated)", self.error, self.data.len())
    }
}

impl Display for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        Debug::fmt(self, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InflateDecodeErrors {}

pub enum DecodeErrorStatus
{
    /// The stream ended early
    InsufficientData,
    Generic(&'static str),
    GenericStr(String),
    /// Invalid symbol or a distance before the start of the output
    CorruptData,
    /// Limit, size the output would have grown to
    OutputLimitExceeded(usize, usize),
    /// Expected, found
    MismatchedAdler(u32, u32),
    /// Valid deflate that is not one of the block layouts we write
    Unsupported(&'static str)
}

impl DecodeErrorStatus
{
    /// True when a general purpose inflater may still decode the stream
    pub const fn is_unsupported(&self) -> bool
    {
        matches!(self, Self::Unsupported(_))
    }
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            Self::InsufficientData => write!(f, "Stream ended before the final block was complete"),
            Self::Generic(reason) => write!(f, "{reason}"),
            Self::GenericStr(reason) => write!(f, "{reason}"),
            Self::CorruptData => write!(f, "Corrupt deflate data"),
            Self::OutputLimitExceeded(limit, size) =>
            {
                write!(f, "Output of {size} bytes goes over the limit of {limit} bytes")
            }
            Self::MismatchedAdler(expected, found) =>
            {
                write!(f, "Adler-32 mismatch, stream says {expected:#010x} but data gives {found:#010x}")
            }
            Self::Unsupported(reason) => write!(f, "Unsupported deflate stream: {reason}")
        }
    }
}

#[cfg(test)]
mod tests
{
    use alloc::format;
    use alloc::vec;

    use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};

    #[test]
    fn only_unsupported_streams_are_flagged()
    {
        assert!(DecodeErrorStatus::Unsupported("dynamic huffman block").is_unsupported());
        assert!(!DecodeErrorStatus::CorruptData.is_unsupported());
        assert!(!DecodeErrorStatus::MismatchedAdler(1, 2).is_unsupported());
    }

    #[test]
    fn message_mentions_partial_output()
    {
        let err = InflateDecodeErrors::new(DecodeErrorStatus::InsufficientData, vec![0; 3]);

        assert!(format!("{err}").ends_with("(3 bytes inflated)"));
    }
}
