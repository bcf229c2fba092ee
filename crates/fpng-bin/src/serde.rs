/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use fpng_core::colorspace::ColorSpace;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub struct Metadata {
    file:     OsString,
    size:     u64,
    width:    u32,
    height:   u32,
    channels: u32
}

impl Metadata {
    pub fn new(file: OsString, size: u64, (width, height, channels): (u32, u32, u32)) -> Metadata {
        Metadata {
            file,
            size,
            width,
            height,
            channels
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Metadata", 6)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("channels", &self.channels)?;
        state.serialize_field(
            "colorspace",
            &ColorSpace::from_components(self.channels as usize)
        )?;

        state.end()
    }
}
