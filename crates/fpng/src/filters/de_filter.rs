/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline reconstruction
//!
//! Each function takes the filtered bytes of one scanline (`raw`), without
//! the filter byte, and writes the reconstructed bytes into `current`.
//! `prev_row` is the already reconstructed scanline above.

/// Reconstruct one scanline
///
/// Bytes of the first pixel get `first(i)` added, the rest get
/// `rest(current, i)` where `current` holds the bytes reconstructed so far.
/// Nothing is written when the rows are shorter than a pixel.
#[inline(always)]
fn reconstruct<F, R>(raw: &[u8], current: &mut [u8], components: usize, end: usize, first: F, rest: R)
where
    F: Fn(usize) -> u8,
    R: Fn(&[u8], usize) -> u8
{
    if end < components
    {
        return;
    }
    for (i, (out, filtered)) in current[..components].iter_mut().zip(raw).enumerate()
    {
        *out = filtered.wrapping_add(first(i));
    }
    for i in components..end
    {
        let prediction = rest(&*current, i);
        current[i] = raw[i].wrapping_add(prediction);
    }
}

pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize)
{
    let end = current.len().min(raw.len());

    reconstruct(raw, current, components, end, |_| 0, |cur, i| cur[i - components]);
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8])
{
    for ((out, filtered), up) in current.iter_mut().zip(raw).zip(prev_row)
    {
        *out = filtered.wrapping_add(*up);
    }
}

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    let end = current.len().min(raw.len()).min(prev_row.len());

    reconstruct(
        raw,
        current,
        components,
        end,
        |i| prev_row[i] >> 1,
        |cur, i| {
            let (a, b) = (cur[i - components], prev_row[i]);
            // floor((a + b) / 2) without widening
            (a & b) + ((a ^ b) >> 1)
        }
    );
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    let end = current.len().min(raw.len()).min(prev_row.len());

    // left and upper left are zero for the first pixel, paeth picks up
    reconstruct(
        raw,
        current,
        components,
        end,
        |i| prev_row[i],
        |cur, i| paeth(cur[i - components], prev_row[i], prev_row[i - components])
    );
}

/// Paeth on the first scanline, the row above is zero so this is sub
pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize)
{
    handle_sub(raw, current, components);
}

/// Average on the first scanline, only the left byte contributes
pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize)
{
    let end = current.len().min(raw.len());

    reconstruct(raw, current, components, end, |_| 0, |cur, i| cur[i - components] >> 1);
}

#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8
{
    // Branch free formulation from stb_image, equivalent to
    // the predictor described in the PNG specification.
    let a = i32::from(a);
    let b = i32::from(b);
    let c = i32::from(c);
    let thresh = c * 3 - (a + b);
    let lo = if a < b { a } else { b };
    let hi = if a < b { b } else { a };

    let t0 = if hi <= thresh { lo } else { c };
    let t1 = if thresh <= lo { hi } else { t0 };
    t1 as u8
}
