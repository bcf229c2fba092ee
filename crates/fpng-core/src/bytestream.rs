/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader never reads past the end of its slice, every read
//! that could go out of bounds returns an error instead.
pub use reader::{ZByteIoError, ZByteReader};
pub use writer::ZByteWriter;

mod reader;
mod writer;
