/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec::Vec;

use fpng_checksum::adler32;
use fpng_core::log::trace;

use crate::bitstream::BitStreamReader;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    DEFLATE_END_OF_BLOCK, FIXED_LITLEN_DECODE_TABLE, FIXED_LITLEN_TABLE_BITS, FIXED_OFFSET_CODES,
    FIXED_OFFSET_CODE_LEN, LENGTH_BASE, LENGTH_EXTRA_BITS, OFFSET_BASE, OFFSET_EXTRA_BITS,
    ZLIB_FDICT
};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};

/// Options that can influence decompression
/// in Deflate/Zlib/Gzip
///
/// To use them, pass a customized options to
/// the deflate decoder.
#[derive(Copy, Clone)]
pub struct DeflateOptions
{
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize
}

impl Default for DeflateOptions
{
    fn default() -> Self
    {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: true,
            size_hint:        37000
        }
    }
}

impl DeflateOptions
{
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the inbuilt limit and will
    /// return an error if the limit is exceeded
    pub const fn get_limit(&self) -> usize
    {
        self.limit
    }
    /// Set a limit to the internal vector
    /// used to store decoded zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    /// # Returns
    /// A modified version of DeflateDecoder
    #[must_use]
    pub fn set_limit(mut self, limit: usize) -> Self
    {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn get_confirm_checksum(&self) -> bool
    {
        self.confirm_checksum
    }
    /// Set whether the decoder should confirm a checksum
    /// after decoding
    #[must_use]
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self
    {
        self.confirm_checksum = yes;
        self
    }

    /// Get the default set size hint for the decompressor
    pub const fn get_size_hint(&self) -> usize
    {
        self.size_hint
    }
    /// Set the size hint for the decompressor
    ///
    /// This can be used to prevent multiple re-allocations
    #[must_use]
    pub fn set_size_hint(mut self, hint: usize) -> Self
    {
        self.size_hint = hint;
        self
    }
}

/// A decoder for the streams `DeflateEncoder` writes
///
/// Runs of stored blocks or a single final fixed huffman block are
/// decoded, anything else is refused with
/// [`DecodeErrorStatus::Unsupported`] before any data of that block is read.
pub struct DeflateDecoder<'a>
{
    data:    &'a [u8],
    options: DeflateOptions
}

impl<'a> DeflateDecoder<'a>
{
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder::new_with_options(data, DeflateOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a>
    {
        DeflateDecoder { data, options }
    }

    /// Decode zlib-encoded data returning the uncompressed in a `Vec<u8>`
    /// or an error if something went wrong.
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        if self.data.len()
            < 2 /* zlib header */
            + 4
        /* Deflate */
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::InsufficientData
            ));
        }

        // Zlib flags
        // See https://www.ietf.org/rfc/rfc1950.txt for
        // the RFC
        let cmf = self.data[0];
        let flg = self.data[1];

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;

        // confirm we have the right deflate methods
        if cm != 8
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::GenericStr(format!("Unknown zlib compression method {cm}"))
            ));
        }
        if cinfo > 7
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::GenericStr(format!(
                    "Unknown cinfo `{cinfo}` greater than 7, not allowed"
                ))
            ));
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::Generic("FCHECK integrity not preserved")
            ));
        }
        if flg & ZLIB_FDICT != 0
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::Unsupported("preset dictionary")
            ));
        }

        let deflate_data = &self.data[2..];

        let mut out = self.allocate_output();

        let consumed = match decode_blocks(deflate_data, &mut out, self.options.limit)
        {
            Ok(consumed) => consumed,
            Err(err) => return Err(InflateDecodeErrors::new(err, out))
        };

        let trailer = match deflate_data.get(consumed..consumed + 4)
        {
            Some(trailer) => trailer,
            None =>
            {
                return Err(InflateDecodeErrors::new(
                    DecodeErrorStatus::InsufficientData,
                    out
                ))
            }
        };

        if self.options.confirm_checksum
        {
            let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
            let found = adler32(&out, 1);

            if expected != found
            {
                return Err(InflateDecodeErrors::new(
                    DecodeErrorStatus::MismatchedAdler(expected, found),
                    out
                ));
            }
        }

        Ok(out)
    }

    /// Decode a raw deflate stream without the zlib wrapper
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut out = self.allocate_output();

        match decode_blocks(self.data, &mut out, self.options.limit)
        {
            Ok(_) => Ok(out),
            Err(err) => Err(InflateDecodeErrors::new(err, out))
        }
    }

    fn allocate_output(&self) -> Vec<u8>
    {
        Vec::with_capacity(self.options.size_hint.min(self.options.limit))
    }
}

/// Decode every block, returning the number of bytes of `src` consumed
/// rounded up to a whole byte
fn decode_blocks(src: &[u8], out: &mut Vec<u8>, limit: usize) -> Result<usize, DecodeErrorStatus>
{
    let mut stream = BitStreamReader::new(src);
    let mut seen_stored = false;
    let mut seen_static = false;

    loop
    {
        stream.refill();

        if !stream.has(3)
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let is_last_block = stream.get_bits(1) == 1;
        let block_type = stream.get_bits(2) as u8;

        match block_type
        {
            DEFLATE_BLOCKTYPE_UNCOMPRESSED =>
            {
                if seen_static
                {
                    return Err(DecodeErrorStatus::Unsupported(
                        "stored block after a fixed huffman block"
                    ));
                }
                seen_stored = true;

                stream.align_to_byte();
                let start = stream.byte_position();
                let end = decode_stored_block(src, start, out, limit)?;
                stream.reset_to(end);
            }
            DEFLATE_BLOCKTYPE_STATIC =>
            {
                if seen_stored || seen_static
                {
                    return Err(DecodeErrorStatus::Unsupported(
                        "fixed huffman block mixed with other blocks"
                    ));
                }
                if !is_last_block
                {
                    return Err(DecodeErrorStatus::Unsupported(
                        "fixed huffman block is not the final block"
                    ));
                }
                seen_static = true;

                decode_static_block(&mut stream, out, limit)?;
            }
            DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN =>
            {
                return Err(DecodeErrorStatus::Unsupported("dynamic huffman block"));
            }
            _ =>
            {
                return Err(DecodeErrorStatus::Generic("Reserved block type 3 encountered"));
            }
        }

        if is_last_block
        {
            break;
        }
    }
    stream.align_to_byte();

    trace!("Inflated {} bytes", out.len());

    Ok(stream.byte_position())
}

/// Copy a stored block whose LEN field starts at `start`,
/// returning the position after its payload
fn decode_stored_block(
    src: &[u8], start: usize, out: &mut Vec<u8>, limit: usize
) -> Result<usize, DecodeErrorStatus>
{
    let header = src
        .get(start..start + 4)
        .ok_or(DecodeErrorStatus::InsufficientData)?;

    let len = u16::from_le_bytes([header[0], header[1]]);
    let nlen = u16::from_le_bytes([header[2], header[3]]);

    if len != !nlen
    {
        return Err(DecodeErrorStatus::Generic("LEN and NLEN do not match"));
    }
    let payload_start = start + 4;
    let payload_end = payload_start + usize::from(len);

    let payload = src
        .get(payload_start..payload_end)
        .ok_or(DecodeErrorStatus::InsufficientData)?;

    if out.len() + payload.len() > limit
    {
        return Err(DecodeErrorStatus::OutputLimitExceeded(
            limit,
            out.len() + payload.len()
        ));
    }
    out.extend_from_slice(payload);

    Ok(payload_end)
}

fn decode_static_block(
    stream: &mut BitStreamReader, out: &mut Vec<u8>, limit: usize
) -> Result<(), DecodeErrorStatus>
{
    loop
    {
        // a full length/distance pair is at most 31 bits, one refill covers it
        stream.refill();

        let entry = FIXED_LITLEN_DECODE_TABLE[stream.peek_bits::<FIXED_LITLEN_TABLE_BITS>()];
        let symbol = usize::from(entry >> 4);
        let code_length = (entry & 0xF) as u8;

        if !stream.has(code_length)
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        stream.drop_bits(code_length);

        if symbol < 256
        {
            if out.len() >= limit
            {
                return Err(DecodeErrorStatus::OutputLimitExceeded(limit, out.len() + 1));
            }
            out.push(symbol as u8);
            continue;
        }
        if symbol == DEFLATE_END_OF_BLOCK
        {
            return Ok(());
        }

        let length_index = symbol - 257;

        if length_index >= LENGTH_BASE.len()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }
        let extra = LENGTH_EXTRA_BITS[length_index];

        if !stream.has(extra + FIXED_OFFSET_CODE_LEN)
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let length = usize::from(LENGTH_BASE[length_index]) + stream.get_bits(extra) as usize;

        let offset_index =
            usize::from(FIXED_OFFSET_CODES[stream.peek_bits::<{ FIXED_OFFSET_CODE_LEN as usize }>()]);
        stream.drop_bits(FIXED_OFFSET_CODE_LEN);

        if offset_index >= OFFSET_BASE.len()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }
        let extra = OFFSET_EXTRA_BITS[offset_index];

        if !stream.has(extra)
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let distance = usize::from(OFFSET_BASE[offset_index]) + stream.get_bits(extra) as usize;

        if distance > out.len()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }
        if out.len() + length > limit
        {
            return Err(DecodeErrorStatus::OutputLimitExceeded(limit, out.len() + length));
        }

        let start = out.len() - distance;

        if distance >= length
        {
            out.extend_from_within(start..start + length);
        }
        else
        {
            // overlapping copy, each byte may depend on one written in this loop
            for i in start..start + length
            {
                let byte = out[i];
                out.push(byte);
            }
        }
    }
}
