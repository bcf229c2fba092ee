/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fpng_checksum::crc32;
use fpng_core::bytestream::ZByteWriter;

use crate::constants::PNG_MAX_CHUNK_LENGTH;
use crate::encoder::PngEncoder;
use crate::enums::PngColor;

/// Write one png chunk
///
/// format is length - chunk type - [data] - crc chunk,
/// the crc covers the chunk type and the data.
///
/// `data` must be at most [`PNG_MAX_CHUNK_LENGTH`] bytes long, the caller splits
/// anything longer.
pub(crate) fn write_chunk(name: &[u8; 4], data: &[u8], writer: &mut ZByteWriter)
{
    debug_assert!(data.len() <= PNG_MAX_CHUNK_LENGTH);

    writer.write_u32_be(data.len() as u32);
    writer.write_all(name);
    writer.write_all(data);
    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc
    let crc = crc32(data, crc32(name, 0));
    writer.write_u32_be(crc);
}

/// Write the IHDR chunk of an image described by `ctx`
pub(crate) fn write_ihdr(ctx: &PngEncoder, writer: &mut ZByteWriter)
{
    let options = ctx.options();
    let color = if options.get_colorspace().has_alpha()
    {
        PngColor::RGBA
    }
    else
    {
        PngColor::RGB
    };

    let mut ihdr = [0_u8; 13];
    // width and height
    ihdr[0..4].copy_from_slice(&(options.get_width() as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(options.get_height() as u32).to_be_bytes());
    // depth, always 8
    ihdr[8] = 8;
    ihdr[9] = color.to_int();
    // compression, filter and interlace methods are all zero
    write_chunk(b"IHDR", &ihdr, writer);
}

/// Write IDAT chunks, splitting `data` when it does not fit one chunk
pub(crate) fn write_idat(data: &[u8], writer: &mut ZByteWriter)
{
    for chunk in data.chunks(PNG_MAX_CHUNK_LENGTH)
    {
        write_chunk(b"IDAT", chunk, writer);
    }
}

// iend has no payload
pub(crate) fn write_iend(writer: &mut ZByteWriter)
{
    write_chunk(b"IEND", &[], writer);
}

#[cfg(test)]
mod tests
{
    use alloc::vec::Vec;

    use fpng_core::bytestream::ZByteWriter;

    use crate::headers::writers::write_iend;

    #[test]
    fn iend_is_byte_exact()
    {
        let mut out = Vec::new();
        write_iend(&mut ZByteWriter::new(&mut out));

        assert_eq!(
            out,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }
}
