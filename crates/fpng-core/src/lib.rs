/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the fpng crates
//!
//! It currently contains
//!
//! - A bounds checked bytestream reader and a writer with endian aware reads and writes
//! - Colorspace information for the two layouts the codec handles
//! - Encoder and decoder options
//! - Logging macros that compile to nothing when the `log` feature is off
//!
//! # Features
//!  - `std`: Enables conversions from `std::io` errors.
//!
//!  - `log`: Forward the logging macros to the [`log`](https://docs.rs/log) crate
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod log;
pub mod options;
pub mod serde;
