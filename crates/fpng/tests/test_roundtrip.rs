/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};

/// Pixels that compress a little, smooth gradients with some noise
fn make_image(width: usize, height: usize, channels: usize, seed: u64) -> Vec<u8> {
    let mut rng = WyRand::new_seed(seed);
    let mut pixels = vec![0_u8; width * height * channels];

    for (i, pixel) in pixels.chunks_exact_mut(channels).enumerate() {
        let (x, y) = (i % width, i / width);

        for (c, value) in pixel.iter_mut().enumerate() {
            let noise = rng.generate_range(0_u8..4);
            *value = ((x * (c + 1) + y * 3) as u8).wrapping_add(noise);
        }
    }
    pixels
}

/// A noise free gradient
fn make_smooth_image(width: usize, height: usize, channels: usize) -> Vec<u8> {
    (0..width * height * channels)
        .map(|i| {
            let (x, y, c) = ((i / channels) % width, (i / channels) / width, i % channels);
            (x * (c + 1) + y * 3) as u8
        })
        .collect()
}

fn decode_ref(data: &[u8]) -> (Vec<u8>, png::ColorType) {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info().unwrap();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());

    (buf, info.color_type)
}

const SIZES: [(usize, usize); 6] = [(1, 1), (1, 17), (13, 1), (31, 7), (64, 64), (300, 200)];

#[test]
fn test_round_trip_all_flags() {
    for flags in 0..3 {
        for channels in [3, 4] {
            for (width, height) in SIZES {
                let pixels = make_image(width, height, channels, (width * height) as u64);

                let png = fpng::encode_to_bytes(
                    &pixels,
                    width as u32,
                    height as u32,
                    channels as u32,
                    flags
                )
                .unwrap();

                let decoded = fpng::decode_from_bytes(&png, 0).unwrap();

                assert_eq!(decoded.width as usize, width);
                assert_eq!(decoded.height as usize, height);
                assert_eq!(decoded.channels_in_file as usize, channels);
                assert!(
                    decoded.pixels == pixels,
                    "mismatch for flags {flags}, {channels} channels, {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn test_reference_decoder_reads_our_output() {
    for flags in 0..3 {
        for channels in [3, 4] {
            let (width, height) = (97, 41);
            let pixels = make_image(width, height, channels, 42);

            let png = fpng::encode_to_bytes(&pixels, 97, 41, channels as u32, flags).unwrap();
            let (decoded, color) = decode_ref(&png);

            let expected_color = if channels == 3 {
                png::ColorType::Rgb
            } else {
                png::ColorType::Rgba
            };
            assert_eq!(color, expected_color);
            assert!(decoded == pixels, "flags {flags}, {channels} channels");
        }
    }
}

#[test]
fn test_random_noise_round_trips() {
    let mut rng = WyRand::new_seed(0xdead_beef);

    for _ in 0..10 {
        let width = rng.generate_range(1_usize..120);
        let height = rng.generate_range(1_usize..120);
        let channels = if rng.generate::<bool>() { 4 } else { 3 };

        let mut pixels = vec![0_u8; width * height * channels];
        rng.fill(&mut pixels);

        for flags in 0..3 {
            let png =
                fpng::encode_to_bytes(&pixels, width as u32, height as u32, 0, flags).unwrap();

            assert_eq!(fpng::decode_from_bytes(&png, 0).unwrap().pixels, pixels);
        }
    }
}

#[test]
fn test_channel_conversion() {
    let (width, height) = (10, 6);
    let rgba = make_image(width, height, 4, 3);
    let png = fpng::encode_to_bytes(&rgba, 10, 6, 4, 0).unwrap();

    let as_rgb = fpng::decode_from_bytes(&png, 3).unwrap();
    assert_eq!(as_rgb.channels_in_file, 4);

    for (rgb, rgba) in as_rgb.pixels.chunks_exact(3).zip(rgba.chunks_exact(4)) {
        assert_eq!(rgb, &rgba[..3]);
    }

    let rgb = make_image(width, height, 3, 4);
    let png = fpng::encode_to_bytes(&rgb, 10, 6, 3, 1).unwrap();

    let as_rgba = fpng::decode_from_bytes(&png, 4).unwrap();
    assert_eq!(as_rgba.channels_in_file, 3);
    assert_eq!(as_rgba.pixels.len(), width * height * 4);

    for (rgba, rgb) in as_rgba.pixels.chunks_exact(4).zip(rgb.chunks_exact(3)) {
        assert_eq!(&rgba[..3], rgb);
        assert_eq!(rgba[3], 255);
    }
}

#[test]
fn test_compression_modes_shrink_smooth_images() {
    let pixels = make_smooth_image(256, 256, 3);

    let fast = fpng::encode_to_bytes(&pixels, 256, 256, 3, 0).unwrap();
    let slower = fpng::encode_to_bytes(&pixels, 256, 256, 3, 1).unwrap();
    let stored = fpng::encode_to_bytes(&pixels, 256, 256, 3, 2).unwrap();

    assert!(stored.len() > pixels.len());
    assert!(fast.len() < stored.len());
    assert!(slower.len() < stored.len());
}

#[test]
fn test_struct_api() {
    use fpng::fpng_core::colorspace::ColorSpace;
    use fpng::fpng_core::options::{DecoderOptions, EncodeFlags, EncoderOptions};
    use fpng::{PngDecoder, PngEncoder};

    let pixels = make_image(20, 20, 4, 9);
    let options = EncoderOptions::new(20, 20, ColorSpace::RGBA, EncodeFlags::Slower);
    let png = PngEncoder::new(&pixels, options).encode().unwrap();

    let mut decoder = PngDecoder::new_with_options(&png, DecoderOptions::new_fast());
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.get_dimensions(), Some((20, 20)));
    assert_eq!(decoder.get_colorspace(), Some(ColorSpace::RGBA));
    assert_eq!(decoder.decode_raw().unwrap(), pixels);
}

#[test]
fn test_parallel_calls_are_independent() {
    let expected_fast_path = fpng::cpu_supports_fast_path();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8_u32)
            .map(|thread| {
                scope.spawn(move || {
                    let (width, height) = (40 + thread as usize * 7, 25);
                    let channels = if thread % 2 == 0 { 3 } else { 4 };
                    let pixels = make_image(width, height, channels, u64::from(thread));

                    for flags in 0..3 {
                        let png = fpng::encode_to_bytes(
                            &pixels,
                            width as u32,
                            height as u32,
                            channels as u32,
                            flags
                        )
                        .unwrap();

                        assert_eq!(fpng::decode_from_bytes(&png, 0).unwrap().pixels, pixels);
                    }
                    fpng::cpu_supports_fast_path()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected_fast_path);
        }
    });
}
