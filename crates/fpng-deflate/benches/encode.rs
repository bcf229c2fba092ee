/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fpng_deflate::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

fn encode_flate2(data: &[u8]) -> Vec<u8>
{
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn encode_fpng(data: &[u8], strategy: DeflateEncodingStrategy) -> Vec<u8>
{
    let options = DeflateEncodingOptions::default()
        .set_strategy(strategy)
        .set_pixel_distance(4)
        .set_row_distance(4 * 512 + 1);
    DeflateEncoder::new_with_options(data, options).encode_zlib()
}

fn encode_bench(c: &mut Criterion)
{
    // a smooth gradient, close to what filtered photos look like
    let data: Vec<u8> = (0..(4 * 512 + 1) * 512)
        .map(|x: usize| ((x % 7) * (x % 13)) as u8)
        .collect();

    let mut group = c.benchmark_group("deflate: 1 MiB gradient");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("fpng fixed fast", |b| {
        b.iter(|| black_box(encode_fpng(&data, DeflateEncodingStrategy::FixedHuffmanFast)))
    });
    group.bench_function("fpng fixed slow", |b| {
        b.iter(|| black_box(encode_fpng(&data, DeflateEncodingStrategy::FixedHuffmanSlow)))
    });
    group.bench_function("flate2 fast", |b| b.iter(|| black_box(encode_flate2(&data))));
}

criterion_group!(benches, encode_bench);
criterion_main!(benches);
