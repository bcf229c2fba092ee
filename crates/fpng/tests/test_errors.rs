/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Error codes returned for malformed, foreign and hostile input

use fpng::fpng_core::options::DecoderOptions;
use nanorand::{Rng, WyRand};

struct Chunk {
    name: [u8; 4],
    data: Vec<u8>
}

/// Split a png into its chunks, ignoring the stored crc
fn split_chunks(png: &[u8]) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut position = 8;

    while position < png.len() {
        let length = u32::from_be_bytes(png[position..position + 4].try_into().unwrap()) as usize;
        let name = png[position + 4..position + 8].try_into().unwrap();
        let data = png[position + 8..position + 8 + length].to_vec();

        chunks.push(Chunk { name, data });
        position += length + 12;
    }
    chunks
}

/// Join chunks back into a png with correct crcs
fn join_chunks(chunks: &[Chunk]) -> Vec<u8> {
    let mut png = png_signature();

    for chunk in chunks {
        png.extend_from_slice(&(chunk.data.len() as u32).to_be_bytes());
        png.extend_from_slice(&chunk.name);
        png.extend_from_slice(&chunk.data);
        let crc = fpng::crc32(&chunk.data, fpng::crc32(&chunk.name, 0));
        png.extend_from_slice(&crc.to_be_bytes());
    }
    png
}

fn png_signature() -> Vec<u8> {
    vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
}

fn sample_png(width: u32, height: u32, channels: u32, flags: u32) -> (Vec<u8>, Vec<u8>) {
    let mut rng = WyRand::new_seed(u64::from(width * 31 + height));
    let mut pixels = vec![0_u8; (width * height * channels) as usize];
    rng.fill(&mut pixels);

    let png = fpng::encode_to_bytes(&pixels, width, height, channels, flags).unwrap();
    (pixels, png)
}

fn decode_code(png: &[u8]) -> u32 {
    fpng::decode_from_bytes(png, 0).unwrap_err().code()
}

fn with_dimensions(png: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut chunks = split_chunks(png);
    chunks[0].data[0..4].copy_from_slice(&width.to_be_bytes());
    chunks[0].data[4..8].copy_from_slice(&height.to_be_bytes());
    join_chunks(&chunks)
}

#[test]
fn test_split_and_join_is_identity() {
    let (_, png) = sample_png(9, 9, 3, 0);

    assert_eq!(join_chunks(&split_chunks(&png)), png);
}

#[test]
fn test_foreign_png_needs_general_decoder() {
    // smooth content, so the reference encoder picks dynamic huffman blocks
    let (width, height) = (256_u32, 256_u32);
    let pixels: Vec<u8> = (0..width * height * 4)
        .map(|i| (((i / 4) % width) ^ ((i / 4) / width)) as u8)
        .collect();

    let mut foreign = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut foreign, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&pixels).unwrap();
    }

    assert_eq!(fpng::get_info(&foreign).unwrap(), (width, height, 4));

    let err = fpng::decode_from_bytes(&foreign, 0).unwrap_err();
    assert_eq!(err.code(), 1);
    assert!(err.needs_general_decoder());
}

#[test]
fn test_crc_tamper_is_detected() {
    for flags in 0..3 {
        let (_, png) = sample_png(8, 8, 4, flags);

        let mut position = 8;
        while position < png.len() {
            let length =
                u32::from_be_bytes(png[position..position + 4].try_into().unwrap()) as usize;

            for offset in position + 8..position + 8 + length {
                let mut tampered = png.clone();
                tampered[offset] ^= 0x01;

                assert_eq!(decode_code(&tampered), 4, "flags {flags}, byte {offset}");
            }
            position += length + 12;
        }
    }
}

#[test]
fn test_not_a_png() {
    assert_eq!(decode_code(b"GIF89a"), 3);
    assert_eq!(decode_code(&[]), 3);
    assert_eq!(fpng::get_info(b"\x89PNG\r\n\x1a\x0b...").unwrap_err().code(), 3);

    // a valid signature followed by something other than IHDR
    let mut png = png_signature();
    png.extend_from_slice(&[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
    assert_eq!(decode_code(&png), 3);
}

#[test]
fn test_invalid_dimensions() {
    let (_, png) = sample_png(4, 4, 3, 0);

    assert_eq!(decode_code(&with_dimensions(&png, 0, 4)), 5);
    assert_eq!(decode_code(&with_dimensions(&png, 4, 0)), 5);
    assert_eq!(decode_code(&with_dimensions(&png, (1 << 24) + 1, 4)), 5);
    assert_eq!(
        fpng::get_info(&with_dimensions(&png, 0, 0))
            .unwrap_err()
            .code(),
        5
    );
}

#[test]
fn test_huge_image_needs_too_much_memory() {
    let (_, png) = sample_png(4, 4, 3, 0);
    let huge = with_dimensions(&png, 1 << 20, 1 << 20);

    // headers alone are fine
    assert_eq!(fpng::get_info(&huge).unwrap(), (1 << 20, 1 << 20, 3));
    assert_eq!(decode_code(&huge), 6);
}

#[test]
fn test_get_info_ignores_garbage_idat() {
    let (_, png) = sample_png(33, 17, 4, 1);
    let mut chunks = split_chunks(&png);

    let mut rng = WyRand::new_seed(5);
    rng.fill(&mut chunks[1].data);
    // not a zlib stream we could have written
    chunks[1].data[0] = 0x00;
    let garbage = join_chunks(&chunks);

    assert_eq!(fpng::get_info(&garbage).unwrap(), (33, 17, 4));
    assert!(fpng::decode_from_bytes(&garbage, 0).is_err());
}

#[test]
fn test_multiple_idat_chunks() {
    let (pixels, png) = sample_png(40, 30, 3, 0);
    let chunks = split_chunks(&png);

    let idat = &chunks[1].data;
    let third = idat.len() / 3;

    let reframed = join_chunks(&[
        Chunk { name: *b"IHDR", data: chunks[0].data.clone() },
        Chunk { name: *b"IDAT", data: idat[..third].to_vec() },
        Chunk { name: *b"IDAT", data: idat[third..2 * third].to_vec() },
        Chunk { name: *b"IDAT", data: idat[2 * third..].to_vec() },
        Chunk { name: *b"IEND", data: vec![] }
    ]);

    assert_eq!(fpng::decode_from_bytes(&reframed, 0).unwrap().pixels, pixels);

    // an ancillary chunk between two IDATs splits the image data
    let split = join_chunks(&[
        Chunk { name: *b"IHDR", data: chunks[0].data.clone() },
        Chunk { name: *b"IDAT", data: idat[..third].to_vec() },
        Chunk { name: *b"tEXt", data: b"Comment\0hi".to_vec() },
        Chunk { name: *b"IDAT", data: idat[third..].to_vec() },
        Chunk { name: *b"IEND", data: vec![] }
    ]);
    assert_eq!(decode_code(&split), 1);
}

#[test]
fn test_ancillary_chunks_are_skipped() {
    let (pixels, png) = sample_png(12, 12, 4, 1);
    let mut chunks = split_chunks(&png);

    chunks.insert(1, Chunk { name: *b"tEXt", data: b"Software\0fpng".to_vec() });
    chunks.insert(1, Chunk { name: *b"gAMA", data: 45455_u32.to_be_bytes().to_vec() });
    // after the image data, before IEND
    chunks.insert(4, Chunk { name: *b"tIME", data: vec![7, 230, 1, 1, 0, 0, 0] });

    let png = join_chunks(&chunks);
    assert_eq!(fpng::decode_from_bytes(&png, 0).unwrap().pixels, pixels);
}

#[test]
fn test_critical_chunks_are_refused() {
    let (_, png) = sample_png(12, 12, 3, 0);

    for name in [*b"PLTE", *b"ABCD", *b"IHDR"] {
        let mut chunks = split_chunks(&png);
        let data = if &name == b"IHDR" { chunks[0].data.clone() } else { vec![0; 3] };

        chunks.insert(1, Chunk { name, data });

        assert_eq!(decode_code(&join_chunks(&chunks)), 1, "{name:?}");
    }
}

#[test]
fn test_truncated_streams() {
    let (_, png) = sample_png(16, 16, 3, 0);

    for length in 0..8 {
        assert_eq!(decode_code(&png[..length]), 3);
    }
    for length in 8..png.len() {
        assert_eq!(decode_code(&png[..length]), 7, "truncated at {length}");
    }
}

#[test]
fn test_missing_iend() {
    let (_, png) = sample_png(16, 16, 3, 2);
    let mut chunks = split_chunks(&png);
    chunks.pop();

    assert_eq!(decode_code(&join_chunks(&chunks)), 7);
}

#[test]
fn test_oversized_chunk_length() {
    let (_, png) = sample_png(4, 4, 3, 0);
    let mut png = png;
    // IDAT length field, right after IHDR
    png[33..37].copy_from_slice(&0x8000_0000_u32.to_be_bytes());

    assert_eq!(decode_code(&png), 7);
}

#[test]
fn test_idat_too_small() {
    let (_, png) = sample_png(4, 4, 3, 0);
    let chunks = split_chunks(&png);

    let tiny = join_chunks(&[
        Chunk { name: *b"IHDR", data: chunks[0].data.clone() },
        Chunk { name: *b"IDAT", data: vec![0x78, 0x01, 0x01, 0, 0] },
        Chunk { name: *b"IEND", data: vec![] }
    ]);
    assert_eq!(decode_code(&tiny), 8);

    let none = join_chunks(&[
        Chunk { name: *b"IHDR", data: chunks[0].data.clone() },
        Chunk { name: *b"IEND", data: vec![] }
    ]);
    assert_eq!(decode_code(&none), 8);
}

#[test]
fn test_unsupported_ihdr_fields() {
    let (_, png) = sample_png(4, 4, 3, 0);

    // depth, color type, compression, filter, interlace
    for (index, value) in [(8, 16), (9, 0), (9, 3), (10, 1), (11, 1), (12, 1)] {
        let mut chunks = split_chunks(&png);
        chunks[0].data[index] = value;

        assert_eq!(decode_code(&join_chunks(&chunks)), 1, "field {index} = {value}");
    }
}

#[test]
fn test_adler_mismatch() {
    let (_, png) = sample_png(6, 6, 3, 2);
    let mut chunks = split_chunks(&png);

    let last = chunks[1].data.len() - 1;
    chunks[1].data[last] ^= 0xFF;
    let png = join_chunks(&chunks);

    assert_eq!(decode_code(&png), 1);

    let options = DecoderOptions::default().set_confirm_adler(false);
    assert!(fpng::decode_from_bytes_with_options(&png, 0, options).is_ok());
}

#[test]
fn test_invalid_encode_arguments() {
    let pixels = vec![0_u8; 4 * 4 * 3];

    // inferred channels must divide exactly
    assert_eq!(fpng::encode_to_bytes(&pixels[1..], 4, 4, 0, 0).unwrap_err().code(), 2);
    assert_eq!(fpng::encode_to_bytes(&pixels, 4, 4, 0, 3).unwrap_err().code(), 2);
    assert_eq!(fpng::encode_to_bytes(&pixels, 4, 4, 5, 0).unwrap_err().code(), 2);
    assert_eq!(fpng::encode_to_bytes(&pixels, 4, 4, 4, 0).unwrap_err().code(), 2);
    assert_eq!(fpng::encode_to_bytes(&pixels, 0, 4, 0, 0).unwrap_err().code(), 2);
    assert_eq!(fpng::encode_to_bytes(&[], 0, 0, 3, 0).unwrap_err().code(), 2);

    // inference picks 4 channels when the length says so
    let rgba = vec![0_u8; 4 * 4 * 4];
    let png = fpng::encode_to_bytes(&rgba, 4, 4, 0, 0).unwrap();
    assert_eq!(fpng::get_info(&png).unwrap(), (4, 4, 4));

    let (_, png) = sample_png(4, 4, 3, 0);
    assert_eq!(fpng::decode_from_bytes(&png, 1).unwrap_err().code(), 2);
}

/// Packs deflate fields LSB first, fixed huffman codes MSB first
#[derive(Default)]
struct DeflateBits {
    out:   Vec<u8>,
    acc:   u32,
    nbits: u32
}

impl DeflateBits {
    fn bits(mut self, value: u32, count: u32) -> Self {
        self.acc |= value << self.nbits;
        self.nbits += count;

        while self.nbits >= 8 {
            self.out.push(self.acc as u8);
            self.acc >>= 8;
            self.nbits -= 8;
        }
        self
    }

    fn code(self, code: u32, length: u32) -> Self {
        self.bits(code.reverse_bits() >> (32 - length), length)
    }

    fn literal(self, byte: u8) -> Self {
        self.code(0x30 + u32::from(byte), 8)
    }

    fn length_symbol(self, symbol: u32) -> Self {
        match symbol {
            256..=279 => self.code(symbol - 256, 7),
            _ => self.code(0xC0 + symbol - 280, 8)
        }
    }

    fn align(self) -> Self {
        let padding = (8 - self.nbits % 8) % 8;
        self.bits(0, padding)
    }

    fn raw(mut self, bytes: &[u8]) -> Self {
        self.out.extend_from_slice(bytes);
        self
    }

    /// zlib header, the blocks and a zero adler
    fn into_zlib(self) -> Vec<u8> {
        let mut stream = vec![0x78, 0x01];
        stream.extend_from_slice(&self.align().out);
        stream.extend_from_slice(&[0; 4]);
        stream
    }
}

#[test]
fn test_refused_deflate_layouts_need_general_decoder() {
    let fixed = |last: bool| DeflateBits::default().bits(u32::from(last), 1).bits(1, 2);
    let stored_header = |last: bool| DeflateBits::default().bits(u32::from(last), 1).bits(0, 2);

    let streams = [
        (
            "stored then fixed",
            stored_header(false)
                .align()
                .raw(&[4, 0, 0xFB, 0xFF, 0, 1, 2, 3])
                .bits(1, 1)
                .bits(1, 2)
                .length_symbol(256)
        ),
        ("fixed not final", fixed(false).length_symbol(256).bits(1, 1).bits(1, 2)),
        ("reserved block type", DeflateBits::default().bits(1, 1).bits(3, 2)),
        (
            "len nlen mismatch",
            stored_header(true).align().raw(&[4, 0, 0, 0, 0, 1, 2, 3])
        ),
        (
            "distance before start",
            fixed(true).literal(0).length_symbol(257).code(1, 5).length_symbol(256)
        ),
        ("litlen 286", fixed(true).literal(0).length_symbol(286).length_symbol(256)),
        ("litlen 287", fixed(true).literal(0).length_symbol(287).length_symbol(256)),
        (
            "distance 30",
            fixed(true).literal(0).length_symbol(257).code(30, 5).length_symbol(256)
        ),
        (
            "distance 31",
            fixed(true).literal(0).length_symbol(257).code(31, 5).length_symbol(256)
        )
    ];

    let (_, png) = sample_png(1, 1, 3, 0);

    for (name, bits) in streams {
        let mut chunks = split_chunks(&png);
        chunks[1].data = bits.into_zlib();

        let err = fpng::decode_from_bytes(&join_chunks(&chunks), 0).unwrap_err();

        assert_eq!(err.code(), 1, "{name}");
        assert!(err.needs_general_decoder(), "{name}");
    }
}
