/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A fast png codec for a restricted subset of PNG
//!
//! The encoder writes standard PNG files that any PNG reader can open,
//! the decoder reads the files the encoder writes and refuses everything
//! else with an error that says so, see [`PngErrors::needs_general_decoder`].
//!
//! # What is written
//! - 8 bit RGB or RGBA images, not interlaced
//! - one zlib stream made of stored blocks or a single fixed huffman block
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! fpng="0.1"
//! ```
//!
//! #### Encode and decode a buffer
//!
//!```
//! let (width, height) = (32, 16);
//! let pixels: Vec<u8> = (0..width * height * 3).map(|x| (x % 251) as u8).collect();
//!
//! // channels = 0 infers 3 from the buffer length, flags = 0 is the fast mode
//! let png = fpng::encode_to_bytes(&pixels, width, height, 0, 0).unwrap();
//!
//! assert_eq!(fpng::get_info(&png).unwrap(), (width, height, 3));
//!
//! let decoded = fpng::decode_from_bytes(&png, 4).unwrap();
//! assert_eq!(decoded.channels_in_file, 3);
//! assert_eq!(decoded.pixels.len(), (width * height * 4) as usize);
//! ```
//!
//! #### Fall back on foreign files
//!
//!```no_run
//! let data = std::fs::read("image.png").unwrap();
//!
//! match fpng::decode_from_bytes(&data, 0) {
//!     Ok(image) => { /* use image.pixels */ }
//!     Err(e) if e.needs_general_decoder() => { /* hand data to a general decoder */ }
//!     Err(e) => panic!("corrupt image, error code {}", e.code())
//! }
//! ```
//!
//! # Features
//! - `std`: path based helpers [`encode_to_path`] and [`decode_from_path`]
//! - `log`: log chunks and the encoder's choices through the `log` crate
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::PngColor;
pub use error::PngErrors;
#[cfg(feature = "std")]
pub use file_io::{decode_from_path, decode_from_path_with_options, encode_to_path, read_from_path};
pub use fpng_checksum::{adler32, cpu_supports_fast_path, crc32};
pub use fpng_core;
use fpng_core::colorspace::ColorSpace;
use fpng_core::options::{DecoderOptions, EncodeFlags, EncoderOptions};

mod constants;
mod decoder;
mod encoder;
mod enums;
pub mod error;
#[cfg(feature = "std")]
mod file_io;
mod filters;
mod headers;
mod utils;

/// A decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult
{
    /// Interleaved pixels with the requested number of channels
    pub pixels:           Vec<u8>,
    pub width:            u32,
    pub height:           u32,
    /// Channels stored in the file, which may differ from
    /// the channels of `pixels`
    pub channels_in_file: u32
}

/// Turn the numeric encode arguments into encoder options
///
/// `channels == 0` infers 3 or 4 from the buffer length.
fn encoder_options(
    pixels: &[u8], width: u32, height: u32, channels: u32, flags: u32
) -> Result<EncoderOptions, PngErrors>
{
    let flags = EncodeFlags::from_u32(flags)
        .ok_or_else(|| PngErrors::InvalidArg(format!("Unknown encode flags {flags}")))?;

    let num_pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| PngErrors::InvalidArg("Image size overflows".into()))?;

    let channels = match channels
    {
        0 =>
        {
            if num_pixels != 0 && num_pixels.checked_mul(3) == Some(pixels.len())
            {
                3
            }
            else if num_pixels != 0 && num_pixels.checked_mul(4) == Some(pixels.len())
            {
                4
            }
            else
            {
                return Err(PngErrors::InvalidArg(format!(
                    "Cannot infer channels from {} bytes for a {width}x{height} image",
                    pixels.len()
                )));
            }
        }
        3 | 4 => channels as usize,
        _ =>
        {
            return Err(PngErrors::InvalidArg(format!(
                "Channels must be 3 or 4, found {channels}"
            )))
        }
    };
    let colorspace = ColorSpace::from_components(channels)
        .ok_or_else(|| PngErrors::InvalidArg(format!("Unsupported channels {channels}")))?;

    Ok(EncoderOptions::new(
        width as usize,
        height as usize,
        colorspace,
        flags
    ))
}

/// Encode interleaved 8 bit pixels into a PNG file in memory
///
/// # Arguments
/// - `channels`: 3 for RGB, 4 for RGBA or 0 to infer it from the buffer length
/// - `flags`: 0 is fast, 1 is slower with better compression and 2 stores
///   the image uncompressed
pub fn encode_to_bytes(
    pixels: &[u8], width: u32, height: u32, channels: u32, flags: u32
) -> Result<Vec<u8>, PngErrors>
{
    let options = encoder_options(pixels, width, height, channels, flags)?;

    PngEncoder::new(pixels, options).encode()
}

/// Return `(width, height, channels)` of a PNG
///
/// Only the signature and IHDR are read, the image data is not checked.
pub fn get_info(bytes: &[u8]) -> Result<(u32, u32, u32), PngErrors>
{
    let mut decoder = PngDecoder::new(bytes);
    decoder.decode_headers()?;

    let info = decoder.png_info;

    Ok((
        info.width as u32,
        info.height as u32,
        info.component as u32
    ))
}

/// Decode a PNG written by [`encode_to_bytes`]
///
/// `desired_channels` is 0 to keep the channels of the file,
/// or 3 or 4 to convert to RGB or RGBA.
pub fn decode_from_bytes(bytes: &[u8], desired_channels: u32) -> Result<DecodeResult, PngErrors>
{
    decode_from_bytes_with_options(bytes, desired_channels, DecoderOptions::default())
}

/// Decode a PNG with custom limits
pub fn decode_from_bytes_with_options(
    bytes: &[u8], desired_channels: u32, options: DecoderOptions
) -> Result<DecodeResult, PngErrors>
{
    let mut decoder = PngDecoder::new_with_options(bytes, options);

    let pixels = decoder.decode(desired_channels as usize)?;
    let info = decoder.png_info;

    Ok(DecodeResult {
        pixels,
        width: info.width as u32,
        height: info.height as u32,
        channels_in_file: info.component as u32
    })
}
