/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

/// Errors from reading or writing a bytestream
pub enum ZByteIoError {
    // requested, remaining
    NotEnoughBytes(usize, usize),
    Generic(&'static str)
}

impl core::fmt::Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ZByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZByteIoError {}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// A bounds checked cursor over a byte slice
///
/// All positions are relative to the start of the slice,
/// reads that would run past the end fail without moving the cursor.
///
/// ```
/// use fpng_core::bytestream::ZByteReader;
///
/// let mut reader = ZByteReader::new(&[0, 0, 0, 13, b'I']);
/// assert_eq!(reader.get_u32_be_err().unwrap(), 13);
/// assert!(reader.get_u32_be_err().is_err());
/// assert_eq!(reader.remaining(), 1);
/// ```
pub struct ZByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ZByteReader<'a> {
    pub const fn new(stream: &'a [u8]) -> ZByteReader<'a> {
        ZByteReader {
            stream,
            position: 0
        }
    }

    /// Number of bytes not yet consumed
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    /// Return true if at least `num` more bytes can be read
    #[inline(always)]
    pub const fn has(&self, num: usize) -> bool {
        self.remaining() >= num
    }

    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }

    /// Set the absolute position of the cursor, which may
    /// be at most the slice length
    pub fn set_position(&mut self, position: usize) -> Result<(), ZByteIoError> {
        if position > self.stream.len() {
            return Err(ZByteIoError::NotEnoughBytes(position, self.stream.len()));
        }
        self.position = position;
        Ok(())
    }

    /// Skip `num` bytes
    pub fn skip(&mut self, num: usize) -> Result<(), ZByteIoError> {
        if !self.has(num) {
            return Err(ZByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }

    /// Return `num_bytes` starting `offset` bytes ahead of the
    /// cursor without consuming them
    pub fn peek_at(&self, offset: usize, num_bytes: usize) -> Result<&'a [u8], ZByteIoError> {
        let start = self
            .position
            .checked_add(offset)
            .ok_or(ZByteIoError::Generic("Offset overflows"))?;
        let end = start
            .checked_add(num_bytes)
            .ok_or(ZByteIoError::Generic("Offset overflows"))?;

        self.stream
            .get(start..end)
            .ok_or(ZByteIoError::NotEnoughBytes(end - self.position, self.remaining()))
    }

    /// Consume and return the next `num` bytes
    pub fn get_slice(&mut self, num: usize) -> Result<&'a [u8], ZByteIoError> {
        let slice = self.peek_at(0, num)?;
        self.position += num;
        Ok(slice)
    }

    /// Read a fixed size array or error out
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.get_slice(N)?);
        Ok(bytes)
    }

    pub fn get_u8_err(&mut self) -> Result<u8, ZByteIoError> {
        Ok(self.read_fixed_bytes_or_error::<1>()?[0])
    }

    /// The bytes from the cursor to the end
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.stream.get(self.position..).unwrap_or(&[])
    }
}

macro_rules! get_single_type {
    ($be_name:tt,$le_name:tt,$int_type:tt) => {
        impl<'a> ZByteReader<'a> {
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $be_name(&mut self) -> Result<$int_type, ZByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();
                Ok($int_type::from_be_bytes(self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?))
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $le_name(&mut self) -> Result<$int_type, ZByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();
                Ok($int_type::from_le_bytes(self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?))
            }
        }
    };
}

get_single_type!(get_u16_be_err, get_u16_le_err, u16);
get_single_type!(get_u32_be_err, get_u32_le_err, u32);
get_single_type!(get_u64_be_err, get_u64_le_err, u64);

#[cfg(test)]
mod tests {
    use super::ZByteReader;

    #[test]
    fn reads_do_not_move_on_failure() {
        let data = [1, 2, 3];
        let mut reader = ZByteReader::new(&data);

        assert!(reader.get_u32_be_err().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0102);
        assert!(reader.skip(2).is_err());
        assert_eq!(reader.get_u8_err().unwrap(), 3);
        assert!(reader.eof());
    }

    #[test]
    fn peek_is_relative_to_cursor() {
        let data = [9, 8, 7, 6, 5];
        let mut reader = ZByteReader::new(&data);
        reader.skip(1).unwrap();

        assert_eq!(reader.peek_at(1, 2).unwrap(), &[7, 6]);
        assert!(reader.peek_at(3, 2).is_err());
        assert!(reader.peek_at(usize::MAX, 2).is_err());
        assert_eq!(reader.position(), 1);
    }
}
