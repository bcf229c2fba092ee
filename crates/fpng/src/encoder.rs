/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec::Vec;

use fpng_core::bytestream::ZByteWriter;
use fpng_core::log::debug;
use fpng_core::options::{EncodeFlags, EncoderOptions};
use fpng_deflate::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

use crate::constants::{MAX_ENCODE_DIMENSIONS, PNG_SIGNATURE};
use crate::enums::FilterMethod;
use crate::error::PngErrors;
use crate::filters::{choose_image_filter, filter_adaptive, filter_with};
use crate::headers::writers::{write_iend, write_idat, write_ihdr};

/// A PNG encoder
///
/// Writes a signature, an IHDR chunk, the image data as one zlib stream
/// and an IEND chunk. How the image is filtered and compressed is decided by
/// the [`EncodeFlags`] in the options.
///
/// # Example
/// ```
/// use fpng::PngEncoder;
/// use fpng_core::colorspace::ColorSpace;
/// use fpng_core::options::{EncodeFlags, EncoderOptions};
///
/// let pixels = vec![128_u8; 16 * 16 * 3];
/// let options = EncoderOptions::new(16, 16, ColorSpace::RGB, EncodeFlags::Fast);
///
/// let png = PngEncoder::new(&pixels, options).encode().unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub struct PngEncoder<'a>
{
    pub(crate) options: EncoderOptions,
    pub(crate) data:    &'a [u8]
}

impl<'a> PngEncoder<'a>
{
    /// Create a new encoder that can encode an image into a PNG
    pub fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a>
    {
        PngEncoder { options, data }
    }

    pub const fn options(&self) -> &EncoderOptions
    {
        &self.options
    }

    /// Check the options against the pixel buffer, returning the
    /// expected length of the filtered image on success
    fn validate(&self) -> Result<usize, PngErrors>
    {
        let width = self.options.get_width();
        let height = self.options.get_height();
        let components = self.options.get_colorspace().num_components();

        if width == 0 || height == 0
        {
            return Err(PngErrors::InvalidArg(format!(
                "Width and height must be non-zero, found {width}x{height}"
            )));
        }
        if width > MAX_ENCODE_DIMENSIONS || height > MAX_ENCODE_DIMENSIONS
        {
            return Err(PngErrors::InvalidArg(format!(
                "Dimensions {width}x{height} larger than maximum {MAX_ENCODE_DIMENSIONS}"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(components))
            .ok_or_else(|| PngErrors::InvalidArg("Image size overflows".into()))?;

        if self.data.len() != expected
        {
            return Err(PngErrors::InvalidArg(format!(
                "Expected {expected} bytes for a {width}x{height} image with {components} channels, found {}",
                self.data.len()
            )));
        }
        // row bytes plus one filter byte for each row
        width
            .checked_mul(components)
            .and_then(|x| x.checked_add(1))
            .and_then(|x| x.checked_mul(height))
            .ok_or_else(|| PngErrors::InvalidArg("Image size overflows".into()))
    }

    /// Filter the image according to the encode flags, every scanline
    /// is prefixed by its filter byte
    fn add_filters(&self, filtered_size: usize) -> Vec<u8>
    {
        let height = self.options.get_height();
        let components = self.options.get_colorspace().num_components();
        let width_stride = self.options.get_width() * components;

        let mut filtered = Vec::with_capacity(filtered_size);

        match self.options.get_flags()
        {
            EncodeFlags::Fast =>
            {
                let filter = choose_image_filter(self.data, width_stride, height, components);
                debug!("Using filter {:?} for all scanlines", filter);

                filter_with(
                    self.data,
                    width_stride,
                    height,
                    components,
                    filter,
                    &mut filtered
                );
            }
            EncodeFlags::Slower =>
            {
                debug!("Using adaptive filtering");
                filter_adaptive(self.data, width_stride, height, components, &mut filtered);
            }
            EncodeFlags::ForceUncompressed =>
            {
                filter_with(
                    self.data,
                    width_stride,
                    height,
                    components,
                    FilterMethod::None,
                    &mut filtered
                );
            }
        }
        filtered
    }

    fn compress(&self, filtered: &[u8]) -> Vec<u8>
    {
        let components = self.options.get_colorspace().num_components();
        let width_stride = self.options.get_width() * components;

        let strategy = match self.options.get_flags()
        {
            EncodeFlags::Fast => DeflateEncodingStrategy::FixedHuffmanFast,
            EncodeFlags::Slower => DeflateEncodingStrategy::FixedHuffmanSlow,
            EncodeFlags::ForceUncompressed => DeflateEncodingStrategy::NoCompression
        };
        debug!("Using deflate strategy {:?}", strategy);

        let options = DeflateEncodingOptions::default()
            .set_strategy(strategy)
            .set_pixel_distance(components)
            // the row above is one scanline and one filter byte away
            .set_row_distance(width_stride + 1);

        DeflateEncoder::new_with_options(filtered, options).encode_zlib()
    }

    /// Encode the image returning a vector containing a complete PNG file
    pub fn encode(&self) -> Result<Vec<u8>, PngErrors>
    {
        let filtered_size = self.validate()?;

        let filtered = self.add_filters(filtered_size);
        let compressed = self.compress(&filtered);

        drop(filtered);

        // signature, IHDR, IEND and one IDAT header
        let mut out = Vec::with_capacity(compressed.len() + 8 + 25 + 12 + 12);
        let mut writer = ZByteWriter::new(&mut out);

        writer.write_u64_be(PNG_SIGNATURE);
        write_ihdr(self, &mut writer);
        write_idat(&compressed, &mut writer);
        write_iend(&mut writer);

        Ok(out)
    }
}
