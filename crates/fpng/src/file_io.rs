/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Path based encoding and decoding
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use fpng_core::log::trace;
use fpng_core::options::DecoderOptions;

use crate::error::PngErrors;
use crate::{decode_from_bytes_with_options, encode_to_bytes, DecodeResult};

/// Encode pixels and write the PNG to `path`
///
/// The image is encoded in memory first, so nothing is created
/// when the arguments are invalid.
pub fn encode_to_path<P: AsRef<Path>>(
    path: P, pixels: &[u8], width: u32, height: u32, channels: u32, flags: u32
) -> Result<(), PngErrors>
{
    let png = encode_to_bytes(pixels, width, height, channels, flags)?;

    let mut file =
        File::create(path.as_ref()).map_err(|e| PngErrors::FileOpen(format!("{e}")))?;

    file.write_all(&png)
        .and_then(|_| file.flush())
        .map_err(|e| PngErrors::FileWrite(format!("{e}")))?;

    trace!("Wrote {} bytes to {:?}", png.len(), path.as_ref());

    Ok(())
}

/// Read a whole file, refusing files above `max_size` bytes
///
/// The limit also holds for files that grow while being read.
pub fn read_from_path<P: AsRef<Path>>(path: P, max_size: u64) -> Result<Vec<u8>, PngErrors>
{
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| PngErrors::FileOpen(format!("{e}")))?;

    let size = file
        .metadata()
        .map_err(|e| PngErrors::FileSeek(format!("{e}")))?
        .len();

    if size > max_size
    {
        return Err(PngErrors::FileTooLarge(size, max_size));
    }
    let mut buffer = Vec::with_capacity(size as usize);

    // one byte past the limit tells a grown file apart from one at the limit
    (&mut file)
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| PngErrors::FileRead(format!("{e}")))?;

    if buffer.len() as u64 > max_size
    {
        return Err(PngErrors::FileTooLarge(buffer.len() as u64, max_size));
    }
    trace!("Read {} bytes from {:?}", buffer.len(), path);

    Ok(buffer)
}

/// Decode the PNG stored at `path`, see [`decode_from_bytes`](crate::decode_from_bytes)
pub fn decode_from_path<P: AsRef<Path>>(
    path: P, desired_channels: u32
) -> Result<DecodeResult, PngErrors>
{
    decode_from_path_with_options(path, desired_channels, DecoderOptions::default())
}

/// Decode the PNG stored at `path` with custom limits
pub fn decode_from_path_with_options<P: AsRef<Path>>(
    path: P, desired_channels: u32, options: DecoderOptions
) -> Result<DecodeResult, PngErrors>
{
    let data = read_from_path(path, options.get_max_file_size())?;

    decode_from_bytes_with_options(&data, desired_channels, options)
}
