/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use fpng_core::log::trace;

use crate::constants::IHDR_LENGTH;
use crate::decoder::PngChunk;
use crate::enums::PngColor;
use crate::error::PngErrors;
use crate::PngDecoder;

pub(crate) mod writers;

impl<'a> PngDecoder<'a>
{
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngErrors>
    {
        if self.seen_hdr
        {
            return Err(PngErrors::NotFpng("Multiple IHDR chunks".into()));
        }

        if chunk.length != IHDR_LENGTH
        {
            return Err(PngErrors::ChunkParsing(format!(
                "Bad IHDR length {}, expected {IHDR_LENGTH}",
                chunk.length
            )));
        }

        let width = self.stream.get_u32_be_err()? as usize;
        let height = self.stream.get_u32_be_err()? as usize;

        if width == 0 || height == 0
        {
            return Err(PngErrors::InvalidDimensions(width, height));
        }

        if width > self.options.get_max_width() || height > self.options.get_max_height()
        {
            trace!(
                "Image dimensions {width}x{height} above configured limit {}x{}",
                self.options.get_max_width(),
                self.options.get_max_height()
            );
            return Err(PngErrors::InvalidDimensions(width, height));
        }

        let depth = self.stream.get_u8_err()?;
        let color = self.stream.get_u8_err()?;
        let compression_method = self.stream.get_u8_err()?;
        let filter_method = self.stream.get_u8_err()?;
        let interlace_method = self.stream.get_u8_err()?;

        if depth != 8
        {
            return Err(PngErrors::NotFpng(format!("Unsupported bit depth {depth}")));
        }

        let color = PngColor::from_int(color)
            .ok_or_else(|| PngErrors::NotFpng(format!("Unsupported color type {color}")))?;

        if compression_method != 0 || filter_method != 0
        {
            return Err(PngErrors::NotFpng(format!(
                "Unknown compression method {compression_method} or filter method {filter_method}"
            )));
        }
        if interlace_method != 0
        {
            return Err(PngErrors::NotFpng("Interlaced images".into()));
        }
        // skip crc, it was checked when reading the chunk header
        self.stream.skip(4)?;

        self.png_info.width = width;
        self.png_info.height = height;
        self.png_info.depth = depth;
        self.png_info.color = color;
        self.png_info.component = color.num_components();

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Colorspace: {:?}", color);

        self.seen_hdr = true;

        Ok(())
    }
}
