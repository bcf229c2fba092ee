/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::borrow::Cow;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use fpng_checksum::crc32;
use fpng_core::bytestream::ZByteReader;
use fpng_core::colorspace::ColorSpace;
use fpng_core::log::{debug, trace};
use fpng_core::options::DecoderOptions;
use fpng_deflate::{DeflateDecoder, DeflateOptions};

use crate::constants::{MIN_IDAT_SIZE, PNG_MAX_CHUNK_LENGTH, PNG_SIGNATURE};
use crate::enums::{FilterMethod, PngChunkType, PngColor};
use crate::error::PngErrors;
use crate::filters::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
use crate::utils::{add_alpha, strip_alpha};

#[derive(Copy, Clone)]
pub(crate) struct PngChunk
{
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32
}

/// Image information read from the IHDR chunk
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo
{
    pub width:     usize,
    pub height:    usize,
    pub depth:     u8,
    pub color:     PngColor,
    pub component: usize
}

/// A decoder for PNG images written by this crate's encoder
///
/// Images using features the encoder never writes (dynamic huffman blocks,
/// palettes, interlacing, other bit depths) are refused with
/// [`PngErrors::NotFpng`], and the caller should use a general png decoder
/// for those.
pub struct PngDecoder<'a>
{
    pub(crate) seen_hdr:    bool,
    pub(crate) stream:      ZByteReader<'a>,
    pub(crate) options:     DecoderOptions,
    pub(crate) png_info:    PngInfo,
    pub(crate) idat_chunks: Vec<&'a [u8]>
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a>
    {
        PngDecoder {
            seen_hdr: false,
            stream: ZByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            idat_chunks: Vec::new()
        }
    }

    /// Return image dimensions as `(width, height)` or `None` if
    /// the headers have not been decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)>
    {
        if !self.seen_hdr
        {
            return None;
        }

        Some((self.png_info.width, self.png_info.height))
    }

    /// Return the colorspace of the image as stored in the file
    pub const fn get_colorspace(&self) -> Option<ColorSpace>
    {
        if !self.seen_hdr
        {
            return None;
        }
        match self.png_info.color
        {
            PngColor::RGB => Some(ColorSpace::RGB),
            PngColor::RGBA => Some(ColorSpace::RGBA)
        }
    }

    /// Return image information or `None` if the headers
    /// have not been decoded
    pub const fn get_info(&self) -> Option<&PngInfo>
    {
        if !self.seen_hdr
        {
            return None;
        }
        Some(&self.png_info)
    }

    /// Decode the signature and the IHDR chunk
    ///
    /// This does not look at any other chunk, so it succeeds on images
    /// whose image data is corrupt or too large to decode.
    pub fn decode_headers(&mut self) -> Result<(), PngErrors>
    {
        if self.seen_hdr
        {
            return Ok(());
        }
        if !self.stream.has(8)
        {
            return Err(PngErrors::BadSignature);
        }
        let signature = self.stream.get_u64_be_err()?;

        if signature != PNG_SIGNATURE
        {
            return Err(PngErrors::BadSignature);
        }

        // check if first chunk is ihdr here
        if self.stream.peek_at(4, 4)? != b"IHDR"
        {
            return Err(PngErrors::BadSignature);
        }

        let header = self.read_chunk_header()?;

        self.parse_ihdr(header)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngErrors>
    {
        // Format is length - chunk type - [data] -  crc chunk, load crc chunk now
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk_type_int = self.stream.read_fixed_bytes_or_error::<4>()?;

        let chunk_type = PngChunkType::from_name(chunk_type_int);

        if chunk_length > PNG_MAX_CHUNK_LENGTH || !self.stream.has(chunk_length + 4)
        {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                chunk_type,
                chunk_length.saturating_add(4),
                self.stream.remaining()
            );

            return Err(PngErrors::ChunkParsing(err));
        }

        let data = self.stream.peek_at(0, chunk_length)?;
        let crc_bytes = self.stream.peek_at(chunk_length, 4)?;
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        if self.options.get_confirm_crc()
        {
            let calc_crc = crc32(data, crc32(&chunk_type_int, 0));

            if crc != calc_crc
            {
                return Err(PngErrors::BadCrc(crc, calc_crc));
            }
        }
        trace!(
            "Chunk {:?}, length {}",
            core::str::from_utf8(&chunk_type_int).unwrap_or("XXXX"),
            chunk_length
        );

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_type_int,
            chunk_type,
            crc
        })
    }

    /// Walk the chunks after IHDR until IEND, collecting IDAT payloads
    fn parse_chunks(&mut self) -> Result<(), PngErrors>
    {
        let mut idat_ended = false;

        loop
        {
            let header = self.read_chunk_header()?;

            match header.chunk_type
            {
                PngChunkType::IDAT =>
                {
                    if idat_ended
                    {
                        return Err(PngErrors::NotFpng("IDAT chunks not consecutive".into()));
                    }
                    let data = self.stream.get_slice(header.length)?;
                    self.idat_chunks.push(data);
                    self.stream.skip(4)?;
                }
                PngChunkType::IEND =>
                {
                    self.stream.skip(header.length + 4)?;
                    break;
                }
                PngChunkType::Ancillary =>
                {
                    trace!(
                        "Skipping ancillary chunk {:?} (crc {:08X})",
                        core::str::from_utf8(&header.chunk).unwrap_or("XXXX"),
                        header.crc
                    );
                    idat_ended = !self.idat_chunks.is_empty();
                    self.stream.skip(header.length + 4)?;
                }
                PngChunkType::IHDR =>
                {
                    return Err(PngErrors::NotFpng("Multiple IHDR chunks".into()));
                }
                PngChunkType::PLTE | PngChunkType::Critical =>
                {
                    let name = core::str::from_utf8(&header.chunk).unwrap_or("XXXX");

                    return Err(PngErrors::NotFpng(format!("Unsupported critical chunk {name}")));
                }
            }
        }
        let idat_size = self.idat_chunks.iter().map(|x| x.len()).sum::<usize>();

        if idat_size < MIN_IDAT_SIZE
        {
            return Err(PngErrors::IdatTooSmall(idat_size));
        }
        trace!("IDAT chunks: {}, total size {}", self.idat_chunks.len(), idat_size);

        Ok(())
    }

    /// Size of the filtered image, a filter byte plus one row for every scanline
    fn filtered_size(&self) -> Option<usize>
    {
        let info = &self.png_info;

        info.width
            .checked_mul(info.component)?
            .checked_add(1)?
            .checked_mul(info.height)
    }

    /// Refuse images whose buffers would be larger than the configured memory limit
    fn check_memory(&self, desired_channels: usize) -> Result<(), PngErrors>
    {
        let info = &self.png_info;
        let max = self.options.get_max_memory_bytes();

        let needed = info
            .width
            .checked_mul(info.height)
            .and_then(|x| x.checked_mul(info.component.max(desired_channels)))
            .and_then(|x| x.checked_add(self.filtered_size()?));

        match needed
        {
            Some(needed) if needed <= max => Ok(()),
            Some(needed) => Err(PngErrors::TooMuchMemory(needed, max)),
            None => Err(PngErrors::TooMuchMemory(usize::MAX, max))
        }
    }

    /// Decode the image and return pixels in the file's own
    /// channel layout, RGB or RGBA
    pub fn decode_raw(&mut self) -> Result<Vec<u8>, PngErrors>
    {
        self.decode_with_channels(0)
    }

    /// Decode the image and return pixels with `desired_channels` channels
    ///
    /// - `0`: keep what the file has
    /// - `3`: RGB, alpha is dropped if present
    /// - `4`: RGBA, alpha is set to 255 if absent
    ///
    /// Any other value is an error
    pub fn decode(&mut self, desired_channels: usize) -> Result<Vec<u8>, PngErrors>
    {
        if !matches!(desired_channels, 0 | 3 | 4)
        {
            return Err(PngErrors::InvalidArg(format!(
                "Desired channels must be 0, 3 or 4, found {desired_channels}"
            )));
        }
        self.decode_with_channels(desired_channels)
    }

    fn decode_with_channels(&mut self, desired_channels: usize) -> Result<Vec<u8>, PngErrors>
    {
        self.decode_headers()?;
        self.check_memory(desired_channels)?;
        self.parse_chunks()?;

        let deflate_data = self.inflate()?;
        // no longer needed
        self.idat_chunks = Vec::new();

        let info = self.png_info;
        let mut out = vec![0; info.width * info.height * info.component];

        self.create_png_image_raw(&deflate_data, &mut out)?;

        drop(deflate_data);

        match (info.component, desired_channels)
        {
            (3, 4) => Ok(add_alpha(&out)),
            (4, 3) =>
            {
                strip_alpha(&mut out);
                Ok(out)
            }
            _ => Ok(out)
        }
    }

    /// Undo deflate decoding
    fn inflate(&self) -> Result<Vec<u8>, PngErrors>
    {
        let expected = self.filtered_size().ok_or(PngErrors::TooMuchMemory(
            usize::MAX,
            self.options.get_max_memory_bytes()
        ))?;

        // a single IDAT is decoded in place, several are stitched together
        let data: Cow<[u8]> = match self.idat_chunks.as_slice()
        {
            [single] => Cow::Borrowed(*single),
            chunks => Cow::Owned(chunks.concat())
        };

        let options = DeflateOptions::default()
            .set_limit(expected)
            .set_size_hint(expected)
            .set_confirm_checksum(self.options.get_confirm_adler());

        let out = DeflateDecoder::new_with_options(&data, options).decode_zlib()?;

        if out.len() != expected
        {
            return Err(PngErrors::NotFpng(format!(
                "Inflated size {} does not match expected size {expected}",
                out.len()
            )));
        }
        Ok(out)
    }

    /// Undo scanline filtering, writing pixels to `out`
    ///
    /// `deflate_data` holds `height` rows of a filter byte followed by a
    /// scanline and `out` must hold `height` scanlines.
    fn create_png_image_raw(&self, deflate_data: &[u8], out: &mut [u8]) -> Result<(), PngErrors>
    {
        let info = &self.png_info;
        let components = info.component;
        let width_stride = info.width * components;

        let mut first_row = true;
        let mut out_position = 0;
        let mut prev_row_start = 0;

        for in_stride in deflate_data.chunks_exact(width_stride + 1).take(info.height)
        {
            // Split output into current and previous
            // current points to the start of the row where we are writing de-filtered output to
            // prev is all rows we already wrote output to.
            let (prev, current) = out.split_at_mut(out_position);
            let current = &mut current[..width_stride];

            let filter_byte = in_stride[0];
            let raw = &in_stride[1..];

            let mut filter = FilterMethod::from_int(filter_byte)
                .ok_or_else(|| PngErrors::NotFpng(format!("Unknown filter {filter_byte}")))?;

            let prev_row: &[u8] = if first_row
            {
                // these special filters do not need the previous
                // scanline and treat it as zero
                filter = filter.first_row_variant();
                first_row = false;
                &[]
            }
            else
            {
                let row = &prev[prev_row_start..prev_row_start + width_stride];
                prev_row_start += width_stride;
                row
            };

            match filter
            {
                FilterMethod::None => current.copy_from_slice(raw),

                FilterMethod::Average => handle_avg(prev_row, raw, current, components),

                FilterMethod::Sub => handle_sub(raw, current, components),

                FilterMethod::Up => handle_up(prev_row, raw, current),

                FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components),

                FilterMethod::PaethFirst => handle_paeth_first(raw, current, components),

                FilterMethod::AvgFirst => handle_avg_first(raw, current, components)
            }
            out_position += width_stride;
        }
        debug!("Defiltered {} scanlines", info.height);

        Ok(())
    }
}
