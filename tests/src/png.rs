/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Read;

use crate::{hash, test_image};

/// Concatenated IDAT payloads of a png
fn idat_payload(png: &[u8]) -> Vec<u8> {
    let mut position = 8;
    let mut payload = Vec::new();

    while position + 8 <= png.len() {
        let length = u32::from_be_bytes(png[position..position + 4].try_into().unwrap()) as usize;
        let name = &png[position + 4..position + 8];

        if name == b"IDAT" {
            payload.extend_from_slice(&png[position + 8..position + 8 + length]);
        }
        position += length + 12;
    }
    payload
}

fn decode_with_png_crate(data: &[u8]) -> Vec<u8> {
    let mut reader = png::Decoder::new(data).read_info().unwrap();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    buf
}

#[test]
fn test_decoders_agree() {
    for channels in [3, 4] {
        for flags in 0..3 {
            let pixels = test_image(123, 45, channels);
            let png = fpng::encode_to_bytes(&pixels, 123, 45, channels as u32, flags).unwrap();

            let ours = fpng::decode_from_bytes(&png, 0).unwrap().pixels;
            let theirs = decode_with_png_crate(&png);

            assert_eq!(hash(&ours), hash(&pixels), "flags {flags}, {channels} channels");
            assert_eq!(hash(&theirs), hash(&pixels), "flags {flags}, {channels} channels");
        }
    }
}

#[test]
fn test_idat_inflates_with_flate2() {
    let (width, height, channels) = (64, 30, 4);
    let pixels = test_image(width, height, channels);

    for flags in 0..3 {
        let png = fpng::encode_to_bytes(&pixels, 64, 30, 4, flags).unwrap();
        let idat = idat_payload(&png);

        let mut filtered = Vec::new();
        flate2::read::ZlibDecoder::new(idat.as_slice())
            .read_to_end(&mut filtered)
            .unwrap();

        assert_eq!(filtered.len(), height * (width * channels + 1));

        for row in filtered.chunks_exact(width * channels + 1) {
            assert!(row[0] <= 4, "invalid filter type {}", row[0]);

            if flags == 2 {
                assert_eq!(row[0], 0);
            }
        }
        // flate2 and our own inflater see the same bytes
        let ours = fpng_deflate::DeflateDecoder::new(&idat)
            .decode_zlib()
            .unwrap();
        assert_eq!(ours, filtered);
    }
}

