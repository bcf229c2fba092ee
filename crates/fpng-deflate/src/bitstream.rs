/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! `BitStreamReader` and `BitStreamWriter` API
//!
//! This module provides an interface to read and write bits (and bytes) for
//! huffman, deflate packs bits starting from the least significant bit of a byte.

use alloc::vec::Vec;

pub struct BitStreamReader<'src>
{
    src:       &'src [u8],
    // next byte of `src` to load
    position:  usize,
    bits_left: u8,
    buffer:    u64
}

impl<'src> BitStreamReader<'src>
{
    pub fn new(in_buffer: &'src [u8]) -> BitStreamReader<'src>
    {
        BitStreamReader {
            bits_left: 0,
            buffer:    0,
            src:       in_buffer,
            position:  0
        }
    }
    /// Top the bit buffer up to 56..=63 bits, or to every
    /// remaining bit near the end of the input
    #[inline(always)]
    pub fn refill(&mut self)
    {
        match self.src.get(self.position..self.position + 8)
        {
            Some(bytes) =>
            {
                let mut word = [0; 8];
                word.copy_from_slice(bytes);

                // whole bytes that fit above the bits still buffered
                let consumed = (63 ^ self.bits_left) >> 3;

                self.buffer |= u64::from_le_bytes(word) << self.bits_left;
                self.position += usize::from(consumed);
                self.bits_left |= 56;
            }
            None => self.refill_slow()
        }
    }

    #[inline(never)]
    fn refill_slow(&mut self)
    {
        let bytes = self.src.get(self.position..).unwrap_or(&[]);

        for byte in bytes
        {
            if self.bits_left >= 56
            {
                break;
            }

            self.buffer |= u64::from(*byte) << self.bits_left;
            self.bits_left += 8;
            self.position += 1;
        }
    }

    /// Look at the next bits without consuming them,
    /// bits past the end of the stream read as zero
    #[inline(always)]
    pub const fn peek_bits<const LOOKAHEAD: usize>(&self) -> usize
    {
        (self.buffer & ((1 << LOOKAHEAD) - 1)) as usize
    }

    #[inline(always)]
    pub fn get_bits(&mut self, num_bits: u8) -> u64
    {
        debug_assert!(self.bits_left >= num_bits);

        let mask = (1_u64 << num_bits) - 1;

        let value = self.buffer & mask;

        self.buffer >>= num_bits;

        self.bits_left -= num_bits;

        value
    }

    /// Return true if the bit buffer can satisfy
    /// `bits` read without refilling,
    #[inline(always)]
    pub const fn has(&self, bits: u8) -> bool
    {
        self.bits_left >= bits
    }

    #[inline(always)]
    pub fn drop_bits(&mut self, bits: u8)
    {
        debug_assert!(self.bits_left >= bits);
        self.bits_left -= bits;
        self.buffer >>= bits;
    }

    /// Discard bits up to the next byte boundary
    pub fn align_to_byte(&mut self)
    {
        self.drop_bits(self.bits_left & 7);
    }

    /// Position of the first byte not yet handed out as bits.
    ///
    /// Only meaningful when byte aligned.
    pub const fn byte_position(&self) -> usize
    {
        self.position - (self.bits_left >> 3) as usize
    }

    /// Drop buffered bits and continue reading at byte `position`
    pub fn reset_to(&mut self, position: usize)
    {
        self.buffer = 0;
        self.bits_left = 0;
        self.position = position;
    }
}

/// Accumulates bits least significant first into a byte vector
pub struct BitStreamWriter
{
    output:         Vec<u8>,
    buffer:         u64,
    bits_in_buffer: u8
}

impl BitStreamWriter
{
    /// Create a writer appending to `output`
    pub fn new(output: Vec<u8>) -> BitStreamWriter
    {
        BitStreamWriter {
            output,
            buffer: 0,
            bits_in_buffer: 0
        }
    }

    /// Write the low `num_bits` bits of `value`, at most 32 bits per call
    #[inline(always)]
    pub fn put_bits(&mut self, value: u32, num_bits: u8)
    {
        debug_assert!(num_bits <= 32);
        debug_assert!(u64::from(value) < (1_u64 << num_bits));

        self.buffer |= u64::from(value) << self.bits_in_buffer;
        self.bits_in_buffer += num_bits;

        if self.bits_in_buffer >= 32
        {
            self.output
                .extend_from_slice(&(self.buffer as u32).to_le_bytes());
            self.buffer >>= 32;
            self.bits_in_buffer -= 32;
        }
    }

    /// Pad with zero bits up to a byte boundary and write
    /// out everything buffered
    pub fn flush_to_byte(&mut self)
    {
        while self.bits_in_buffer > 0
        {
            self.output.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits_in_buffer = self.bits_in_buffer.saturating_sub(8);
        }
        self.buffer = 0;
    }

    pub fn into_inner(mut self) -> Vec<u8>
    {
        self.flush_to_byte();
        self.output
    }
}
