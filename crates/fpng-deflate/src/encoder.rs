/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use fpng_checksum::adler32;
use fpng_core::log::trace;

use crate::bitstream::BitStreamWriter;
use crate::constants::{
    offset_index, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_END_OF_BLOCK,
    DEFLATE_MAX_STORED_LEN, FIXED_LITLEN_CODES, FIXED_OFFSET_CODES, FIXED_OFFSET_CODE_LEN,
    LENGTH_BASE, LENGTH_EXTRA_BITS, LENGTH_TO_INDEX, OFFSET_BASE, OFFSET_EXTRA_BITS,
    ZLIB_CINFO_32K_WINDOW, ZLIB_CM_DEFLATE
};
use crate::matcher::{HashChainMatcher, Match, MatchFinder, RunMatcher};

/// Hash chain depth for the slower strategy
const SLOW_MAX_CHAIN: usize = 64;
/// Stop searching once a match this long is found
const SLOW_NICE_LENGTH: usize = 128;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeflateEncodingStrategy
{
    /// Stored blocks, input is copied verbatim
    NoCompression,
    /// A single fixed huffman block, matches only at the
    /// configured pixel and row distances
    FixedHuffmanFast,
    /// A single fixed huffman block fed by a hash chain match finder
    FixedHuffmanSlow
}

impl DeflateEncodingStrategy
{
    /// FLEVEL hint written to the zlib header
    fn to_level(self) -> u8
    {
        match self
        {
            Self::NoCompression => 0,
            Self::FixedHuffmanFast => 1,
            Self::FixedHuffmanSlow => 2
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DeflateEncodingOptions
{
    strategy:       DeflateEncodingStrategy,
    pixel_distance: usize,
    row_distance:   usize
}

impl Default for DeflateEncodingOptions
{
    fn default() -> Self
    {
        DeflateEncodingOptions {
            strategy:       DeflateEncodingStrategy::NoCompression,
            pixel_distance: 1,
            row_distance:   0
        }
    }
}

impl DeflateEncodingOptions
{
    pub fn set_strategy(mut self, strategy: DeflateEncodingStrategy) -> Self
    {
        self.strategy = strategy;
        self
    }

    /// Distance between two pixels, the bytes per pixel
    pub fn set_pixel_distance(mut self, distance: usize) -> Self
    {
        self.pixel_distance = distance;
        self
    }

    /// Distance between the same pixel on two consecutive rows,
    /// zero disables row matches
    pub fn set_row_distance(mut self, distance: usize) -> Self
    {
        self.row_distance = distance;
        self
    }

    pub const fn get_strategy(&self) -> DeflateEncodingStrategy
    {
        self.strategy
    }
}

pub struct DeflateEncoder<'a>
{
    data:    &'a [u8],
    options: DeflateEncodingOptions
}

impl<'a> DeflateEncoder<'a>
{
    /// Create a new deflate encoder writing stored blocks
    pub fn new(data: &'a [u8]) -> DeflateEncoder<'a>
    {
        DeflateEncoder::new_with_options(data, DeflateEncodingOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DeflateEncodingOptions) -> DeflateEncoder<'a>
    {
        DeflateEncoder { data, options }
    }

    /// Upper bound on the compressed size, fixed huffman codes
    /// are at most 9 bits per byte
    fn max_compressed_size(&self) -> usize
    {
        let len = self.data.len();

        match self.options.strategy
        {
            DeflateEncodingStrategy::NoCompression =>
            {
                len + 5 * (len / DEFLATE_MAX_STORED_LEN + 1)
            }
            _ => len + len / 8 + 16
        }
    }

    fn write_zlib_header(&self, output: &mut Vec<u8>)
    {
        let level_hint = self.options.strategy.to_level();

        let mut hdr = (ZLIB_CM_DEFLATE << 8) | (ZLIB_CINFO_32K_WINDOW << 12);

        hdr |= u16::from(level_hint) << 6;
        hdr |= 31 - (hdr % 31);

        output.extend_from_slice(&hdr.to_be_bytes());
    }

    /// Encode a deflate data block with no compression
    fn encode_no_compression(&self, output: &mut Vec<u8>)
    {
        /*
         * If the input is zero-length, we still must output a block in order
         * for the output to be a valid DEFLATE stream.
         */
        if self.data.is_empty()
        {
            /* BFINAL and BTYPE */
            output.push(1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1));
            /* LEN and NLEN */
            output.extend_from_slice(&0xFFFF_0000_u32.to_le_bytes());
            return;
        }
        let mut chunks = self.data.chunks(DEFLATE_MAX_STORED_LEN).peekable();

        while let Some(chunk) = chunks.next()
        {
            let bfinal = u8::from(chunks.peek().is_none());
            /*
             * Output BFINAL and BTYPE.  The stream is already byte-aligned
             * here, so this step always requires outputting exactly 1 byte.
             */
            output.push(bfinal | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1));

            // output len and nlen
            let len_u16 = chunk.len() as u16;

            output.extend_from_slice(&len_u16.to_le_bytes());
            output.extend_from_slice(&(!len_u16).to_le_bytes());
            output.extend_from_slice(chunk);
        }
    }

    /// Encode everything as one final fixed huffman block
    fn encode_fixed_huffman<M: MatchFinder>(&self, mut matcher: M, output: Vec<u8>) -> Vec<u8>
    {
        let data = self.data;
        let mut writer = BitStreamWriter::new(output);

        writer.put_bits(1, 1);
        writer.put_bits(u32::from(DEFLATE_BLOCKTYPE_STATIC), 2);

        let mut position = 0;
        let mut num_matches = 0_usize;

        while position < data.len()
        {
            match matcher.find_match(data, position)
            {
                Some(found) =>
                {
                    write_match(&mut writer, found);
                    matcher.skip(data, position + 1, position + found.length);
                    position += found.length;
                    num_matches += 1;
                }
                None =>
                {
                    write_symbol(&mut writer, usize::from(data[position]));
                    position += 1;
                }
            }
        }
        write_symbol(&mut writer, DEFLATE_END_OF_BLOCK);

        trace!("Fixed huffman block, {} bytes, {} matches", data.len(), num_matches);

        writer.into_inner()
    }

    /// Encode the input as a raw deflate stream, without the zlib wrapper
    pub fn encode_deflate(&self) -> Vec<u8>
    {
        let output = Vec::with_capacity(self.max_compressed_size());
        self.encode_body(output)
    }

    fn encode_body(&self, mut output: Vec<u8>) -> Vec<u8>
    {
        match self.options.strategy
        {
            DeflateEncodingStrategy::NoCompression =>
            {
                self.encode_no_compression(&mut output);
                output
            }
            DeflateEncodingStrategy::FixedHuffmanFast =>
            {
                let matcher =
                    RunMatcher::new(self.options.pixel_distance, self.options.row_distance);
                self.encode_fixed_huffman(matcher, output)
            }
            DeflateEncodingStrategy::FixedHuffmanSlow =>
            {
                let matcher = HashChainMatcher::new(SLOW_MAX_CHAIN, SLOW_NICE_LENGTH);
                self.encode_fixed_huffman(matcher, output)
            }
        }
    }

    /// Encode the input as a zlib stream, header, deflate blocks
    /// and the big endian adler32 of the input
    pub fn encode_zlib(&self) -> Vec<u8>
    {
        let mut output = Vec::with_capacity(self.max_compressed_size() + 6);

        self.write_zlib_header(&mut output);

        let mut output = self.encode_body(output);

        // add adler hash
        let hash = adler32(self.data, 1);
        output.extend_from_slice(&hash.to_be_bytes());

        output
    }
}

#[inline(always)]
fn write_symbol(writer: &mut BitStreamWriter, symbol: usize)
{
    let (code, length) = FIXED_LITLEN_CODES[symbol];
    writer.put_bits(u32::from(code), length);
}

#[inline(always)]
fn write_match(writer: &mut BitStreamWriter, found: Match)
{
    let length_index = usize::from(LENGTH_TO_INDEX[found.length]);

    write_symbol(writer, 257 + length_index);

    let extra = LENGTH_EXTRA_BITS[length_index];

    if extra > 0
    {
        let value = found.length - usize::from(LENGTH_BASE[length_index]);
        writer.put_bits(value as u32, extra);
    }

    let offset = offset_index(found.distance);

    writer.put_bits(u32::from(FIXED_OFFSET_CODES[offset]), FIXED_OFFSET_CODE_LEN);

    let extra = OFFSET_EXTRA_BITS[offset];

    if extra > 0
    {
        let value = found.distance - usize::from(OFFSET_BASE[offset]);
        writer.put_bits(value as u32, extra);
    }
}
