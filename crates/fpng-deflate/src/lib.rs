/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A deflate codec restricted to two block shapes.
//!
//! The encoder writes either stored blocks or a single block coded with
//! the fixed huffman tables of RFC 1951, the decoder accepts exactly those
//! shapes and refuses everything else (dynamic huffman blocks, a fixed block
//! followed by anything, preset dictionaries).
//!
//! A refusal does not mean the stream is broken, only that a general purpose
//! inflater is needed for it.
//!
//! # Usage
//!
//! Compressing and decompressing zlib data
//! ```
//! use fpng_deflate::{DeflateDecoder, DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};
//!
//! let data = b"abcabcabcabcabcabc".repeat(20);
//! let options = DeflateEncodingOptions::default()
//!     .set_strategy(DeflateEncodingStrategy::FixedHuffmanSlow);
//!
//! let compressed = DeflateEncoder::new_with_options(&data, options).encode_zlib();
//! let decompressed = DeflateDecoder::new(&compressed).decode_zlib().unwrap();
//! assert_eq!(decompressed, data);
//! ```
//!
//! Decoding zlib data without confirming the adler32 checksum
//! ```no_run
//! use fpng_deflate::DeflateDecoder;
//! use fpng_deflate::DeflateOptions;
//! let totally_valid_data=[0;23];
//! let options = DeflateOptions::default()
//!                     .set_confirm_checksum(false);
//! let mut decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//! let _ = decoder.decode_zlib();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::decoder::{DeflateDecoder, DeflateOptions};
pub use crate::encoder::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

mod bitstream;
mod constants;
mod decoder;
mod encoder;
pub mod errors;
mod matcher;
