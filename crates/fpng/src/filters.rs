/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline filtering for the encoder and
//! reconstruction for the decoder
//!
//! The encoder has two ways of picking filters
//!
//! - [`choose_image_filter`]: estimate the cost of every filter on a few
//!   sampled rows and use the cheapest for the whole image
//! - [`filter_adaptive`]: try every filter on every scanline and keep the
//!   one with the smallest sum of absolute values
use alloc::vec;
use alloc::vec::Vec;

pub use de_filter::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};

use crate::constants::FILTER_SAMPLE_ROWS;
use crate::enums::FilterMethod;
use crate::filters::de_filter::paeth;

mod de_filter;

/// Filter one scanline
///
/// `previous_row` is the unfiltered row above, all zeroes for the first row.
/// `output` receives `input.len()` bytes, without the filter byte.
pub fn filter_scanline(
    input: &[u8], previous_row: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
)
{
    let end = input.len().min(previous_row.len()).min(output.len());
    let components = components.min(end);

    let (input, previous_row, output) = (&input[..end], &previous_row[..end], &mut output[..end]);

    match filter
    {
        FilterMethod::None => output.copy_from_slice(input),
        FilterMethod::Sub | FilterMethod::PaethFirst =>
        {
            output[..components].copy_from_slice(&input[..components]);

            for i in components..end
            {
                output[i] = input[i].wrapping_sub(input[i - components]);
            }
        }
        FilterMethod::Up =>
        {
            for ((out, cur), up) in output.iter_mut().zip(input).zip(previous_row)
            {
                *out = cur.wrapping_sub(*up);
            }
        }
        FilterMethod::Average | FilterMethod::AvgFirst =>
        {
            for i in 0..components
            {
                output[i] = input[i].wrapping_sub(previous_row[i] >> 1);
            }
            for i in components..end
            {
                let a = u16::from(input[i - components]);
                let b = u16::from(previous_row[i]);

                output[i] = input[i].wrapping_sub(((a + b) >> 1) as u8);
            }
        }
        FilterMethod::Paeth =>
        {
            for i in 0..components
            {
                output[i] = input[i].wrapping_sub(paeth(0, previous_row[i], 0));
            }
            for i in components..end
            {
                let predictor = paeth(
                    input[i - components],
                    previous_row[i],
                    previous_row[i - components]
                );
                output[i] = input[i].wrapping_sub(predictor);
            }
        }
    }
}

/// Sum of the filtered bytes read as signed values
///
/// The usual heuristic for how well a filtered row will compress,
/// smaller is better.
fn sum_of_absolute_values(filtered: &[u8]) -> u64
{
    filtered
        .iter()
        .map(|x| u64::from((*x as i8).unsigned_abs()))
        .sum()
}

/// At most `FILTER_SAMPLE_ROWS` rows spread over the whole image
fn sampled_rows(height: usize) -> impl Iterator<Item = usize>
{
    let samples = height.min(FILTER_SAMPLE_ROWS);

    (0..samples).map(move |sample| sample * height / samples)
}

/// Pick one filter for a whole image by filtering a handful of
/// evenly spaced rows with every filter and comparing the cost
pub fn choose_image_filter(
    pixels: &[u8], width_stride: usize, height: usize, components: usize
) -> FilterMethod
{
    if width_stride == 0 || height == 0
    {
        return FilterMethod::None;
    }
    let zero_row = vec![0_u8; width_stride];
    let mut scratch = vec![0_u8; width_stride];

    let mut costs = [0_u64; 5];

    for row in sampled_rows(height)
    {
        let current = &pixels[row * width_stride..(row + 1) * width_stride];
        let previous = if row == 0
        {
            &zero_row[..]
        }
        else
        {
            &pixels[(row - 1) * width_stride..row * width_stride]
        };

        for (cost, filter) in costs.iter_mut().zip(FilterMethod::ALL)
        {
            filter_scanline(current, previous, &mut scratch, filter, components);
            *cost += sum_of_absolute_values(&scratch);
        }
    }

    let mut best = FilterMethod::None;
    let mut best_cost = u64::MAX;

    for (cost, filter) in costs.iter().zip(FilterMethod::ALL)
    {
        if *cost < best_cost
        {
            best = filter;
            best_cost = *cost;
        }
    }
    best
}

/// Filter the whole image with one filter, every scanline
/// is prefixed with the filter byte
pub fn filter_with(
    pixels: &[u8], width_stride: usize, height: usize, components: usize, filter: FilterMethod,
    output: &mut Vec<u8>
)
{
    let zero_row = vec![0_u8; width_stride];
    let mut previous: &[u8] = &zero_row;

    for current in pixels.chunks_exact(width_stride).take(height)
    {
        output.push(filter.to_int());

        let start = output.len();
        output.resize(start + width_stride, 0);

        filter_scanline(current, previous, &mut output[start..], filter, components);
        previous = current;
    }
}

/// Filter each scanline with every filter and keep the one
/// with the smallest sum of absolute values
pub fn filter_adaptive(
    pixels: &[u8], width_stride: usize, height: usize, components: usize, output: &mut Vec<u8>
)
{
    let zero_row = vec![0_u8; width_stride];
    let mut previous: &[u8] = &zero_row;

    let mut scratch = vec![0_u8; width_stride];
    let mut best_row = vec![0_u8; width_stride];

    for current in pixels.chunks_exact(width_stride).take(height)
    {
        let mut best_filter = FilterMethod::None;
        let mut best_cost = u64::MAX;

        for filter in FilterMethod::ALL
        {
            filter_scanline(current, previous, &mut scratch, filter, components);

            let cost = sum_of_absolute_values(&scratch);

            if cost < best_cost
            {
                best_cost = cost;
                best_filter = filter;
                core::mem::swap(&mut scratch, &mut best_row);
            }
        }
        output.push(best_filter.to_int());
        output.extend_from_slice(&best_row);

        previous = current;
    }
}
