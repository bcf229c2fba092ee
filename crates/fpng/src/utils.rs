/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

/// Expand RGB pixels to RGBA with an opaque alpha channel
pub(crate) fn add_alpha(rgb: &[u8]) -> Vec<u8>
{
    let mut out = vec![255_u8; rgb.len() / 3 * 4];

    for (input, output) in rgb.chunks_exact(3).zip(out.chunks_exact_mut(4))
    {
        output[0..3].copy_from_slice(input);
    }
    out
}

/// Drop the alpha channel of RGBA pixels, in place
pub(crate) fn strip_alpha(rgba: &mut Vec<u8>)
{
    let pixels = rgba.len() / 4;

    // the write position never passes the read position
    for i in 0..pixels
    {
        rgba.copy_within(i * 4..i * 4 + 3, i * 3);
    }
    rgba.truncate(pixels * 3);
}
