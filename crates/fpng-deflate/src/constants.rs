/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Valid block types
pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u8 = 0;
pub const DEFLATE_BLOCKTYPE_STATIC: u8 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u8 = 2;

pub const ZLIB_CM_DEFLATE: u16 = 8;
pub const ZLIB_CINFO_32K_WINDOW: u16 = 7;
/// Preset dictionary bit of the zlib FLG byte
pub const ZLIB_FDICT: u8 = 1 << 5;

pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;
pub const DEFLATE_NUM_OFFSET_SYMS: usize = 32;
pub const DEFLATE_END_OF_BLOCK: usize = 256;

pub const DEFLATE_MIN_MATCH_LEN: usize = 3;
pub const DEFLATE_MAX_MATCH_LEN: usize = 258;
pub const DEFLATE_WINDOW_SIZE: usize = 32768;

/// Largest payload of a stored block
pub const DEFLATE_MAX_STORED_LEN: usize = u16::MAX as usize;

/// Length base for length symbols 257..=285
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258
];

pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0
];

/// Offset base for offset symbols 0..=29
pub const OFFSET_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577
];

pub const OFFSET_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13, 13
];

/// Bits needed to index the fixed litlen decode table,
/// the longest fixed code is 9 bits
pub const FIXED_LITLEN_TABLE_BITS: usize = 9;
pub const FIXED_OFFSET_CODE_LEN: u8 = 5;

/// Huffman codes are sent most significant bit first but the
/// bitstream is little endian, so codes are stored reversed.
const fn reverse_bits(mut code: u16, length: u8) -> u16
{
    let mut reversed = 0;
    let mut i = 0;

    while i < length
    {
        reversed = (reversed << 1) | (code & 1);
        code >>= 1;
        i += 1;
    }
    reversed
}

/// Code and length of a fixed litlen symbol, RFC 1951 section 3.2.6
const fn fixed_litlen_code(symbol: usize) -> (u16, u8)
{
    if symbol <= 143
    {
        (0x30 + symbol as u16, 8)
    }
    else if symbol <= 255
    {
        (0x190 + (symbol - 144) as u16, 9)
    }
    else if symbol <= 279
    {
        ((symbol - 256) as u16, 7)
    }
    else
    {
        (0xC0 + (symbol - 280) as u16, 8)
    }
}

const fn make_fixed_litlen_codes() -> [(u16, u8); DEFLATE_NUM_LITLEN_SYMS]
{
    let mut codes = [(0, 0); DEFLATE_NUM_LITLEN_SYMS];
    let mut symbol = 0;

    while symbol < DEFLATE_NUM_LITLEN_SYMS
    {
        let (code, length) = fixed_litlen_code(symbol);
        codes[symbol] = (reverse_bits(code, length), length);
        symbol += 1;
    }
    codes
}

/// Entries are `symbol << 4 | code length`
const fn make_fixed_litlen_decode_table() -> [u16; 1 << FIXED_LITLEN_TABLE_BITS]
{
    let mut table = [0; 1 << FIXED_LITLEN_TABLE_BITS];
    let mut symbol = 0;

    while symbol < DEFLATE_NUM_LITLEN_SYMS
    {
        let (code, length) = fixed_litlen_code(symbol);
        let reversed = reverse_bits(code, length) as usize;
        let mut fill = 0;

        while fill < (1 << (FIXED_LITLEN_TABLE_BITS - length as usize))
        {
            table[reversed | (fill << length as usize)] = ((symbol as u16) << 4) | length as u16;
            fill += 1;
        }
        symbol += 1;
    }
    table
}

const fn make_fixed_offset_codes() -> [u16; DEFLATE_NUM_OFFSET_SYMS]
{
    let mut codes = [0; DEFLATE_NUM_OFFSET_SYMS];
    let mut symbol = 0;

    while symbol < DEFLATE_NUM_OFFSET_SYMS
    {
        codes[symbol] = reverse_bits(symbol as u16, FIXED_OFFSET_CODE_LEN);
        symbol += 1;
    }
    codes
}

/// Map a match length (3..=258) to its index in `LENGTH_BASE`
const fn make_length_to_index() -> [u8; DEFLATE_MAX_MATCH_LEN + 1]
{
    let mut table = [0; DEFLATE_MAX_MATCH_LEN + 1];
    let mut index = 0;

    while index < LENGTH_BASE.len()
    {
        let base = LENGTH_BASE[index] as usize;
        let mut extra = 0;

        while extra < (1 << LENGTH_EXTRA_BITS[index] as usize) && base + extra <= DEFLATE_MAX_MATCH_LEN
        {
            // later codes overwrite, so 258 ends up with its dedicated symbol
            table[base + extra] = index as u8;
            extra += 1;
        }
        index += 1;
    }
    table
}

/// Reversed code and code length for every litlen symbol
pub static FIXED_LITLEN_CODES: [(u16, u8); DEFLATE_NUM_LITLEN_SYMS] = make_fixed_litlen_codes();

/// Reversed 5 bit codes for every offset symbol.
///
/// Reversal is its own inverse, so this doubles as the decode table.
pub static FIXED_OFFSET_CODES: [u16; DEFLATE_NUM_OFFSET_SYMS] = make_fixed_offset_codes();

pub static FIXED_LITLEN_DECODE_TABLE: [u16; 1 << FIXED_LITLEN_TABLE_BITS] =
    make_fixed_litlen_decode_table();

pub static LENGTH_TO_INDEX: [u8; DEFLATE_MAX_MATCH_LEN + 1] = make_length_to_index();

/// Index in `OFFSET_BASE` for a match distance of 1..=32768
#[inline]
pub fn offset_index(distance: usize) -> usize
{
    OFFSET_BASE
        .partition_point(|base| usize::from(*base) <= distance)
        .saturating_sub(1)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fixed_codes_follow_rfc_examples()
    {
        // literal 0 is 00110000, end of block is 0000000
        assert_eq!(FIXED_LITLEN_CODES[0], (reverse_bits(0b0011_0000, 8), 8));
        assert_eq!(FIXED_LITLEN_CODES[256], (0, 7));
        assert_eq!(FIXED_LITLEN_CODES[255], (reverse_bits(0b1_1111_1111, 9), 9));
        assert_eq!(FIXED_LITLEN_CODES[287].1, 8);
    }

    #[test]
    fn decode_table_inverts_codes()
    {
        for (symbol, (code, length)) in FIXED_LITLEN_CODES.iter().enumerate()
        {
            let entry = FIXED_LITLEN_DECODE_TABLE[usize::from(*code)];
            assert_eq!(usize::from(entry >> 4), symbol);
            assert_eq!((entry & 15) as u8, *length);
        }
    }

    #[test]
    fn length_and_offset_lookup()
    {
        assert_eq!(LENGTH_TO_INDEX[3], 0);
        assert_eq!(LENGTH_TO_INDEX[10], 7);
        assert_eq!(LENGTH_TO_INDEX[11], 8);
        assert_eq!(LENGTH_TO_INDEX[12], 8);
        assert_eq!(LENGTH_TO_INDEX[257], 27);
        assert_eq!(LENGTH_TO_INDEX[258], 28);

        assert_eq!(offset_index(1), 0);
        assert_eq!(offset_index(4), 3);
        assert_eq!(offset_index(5), 4);
        assert_eq!(offset_index(6), 4);
        assert_eq!(offset_index(24577), 29);
        assert_eq!(offset_index(32768), 29);
    }
}
