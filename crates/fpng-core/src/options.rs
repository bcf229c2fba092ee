/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and Encoder Options
//!
//! This module exposes a struct for which all implemented
//! decoders get shared options for decoding
//!
//! All supported options are put into one _Options to allow for global configurations
//! options e.g the same  `DecoderOption` can be reused for all other decoders
//!
pub use decoder::{
    DecoderOptions, DEFAULT_MAX_DIMENSIONS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_MEMORY
};
pub use encoder::{EncodeFlags, EncoderOptions};

mod decoder;
mod encoder;
