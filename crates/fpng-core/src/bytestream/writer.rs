/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
///
/// Writes go to the end of a growable vector so they cannot fail.
pub struct ZByteWriter<'a> {
    buffer: &'a mut Vec<u8>
}

impl<'a> ZByteWriter<'a> {
    /// Create a new writer appending to `buffer`
    pub fn new(buffer: &'a mut Vec<u8>) -> ZByteWriter<'a> {
        ZByteWriter { buffer }
    }

    /// Total length of the underlying buffer
    ///
    /// ```
    /// use fpng_core::bytestream::ZByteWriter;
    /// let mut storage = vec![];
    /// let mut writer = ZByteWriter::new(&mut storage);
    /// writer.write_u32_be(1);
    /// assert_eq!(writer.position(), 4);
    /// ```
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Reserve room for `additional` more bytes
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    pub fn write_all(&mut self, buf: &[u8]) {
        self.buffer.extend_from_slice(buf);
    }

    pub fn write_u8(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// The bytes written from `start` to the current end
    pub fn written_since(&self, start: usize) -> &[u8] {
        self.buffer.get(start..).unwrap_or(&[])
    }
}

macro_rules! write_single_type {
    ($be_name:tt,$le_name:tt,$int_type:tt) => {
        impl<'a> ZByteWriter<'a> {
            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[inline]
            pub fn $be_name(&mut self, value: $int_type) {
                self.write_all(&value.to_be_bytes());
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[inline]
            pub fn $le_name(&mut self, value: $int_type) {
                self.write_all(&value.to_le_bytes());
            }
        }
    };
}

write_single_type!(write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_be, write_u32_le, u32);
write_single_type!(write_u64_be, write_u64_le, u64);
