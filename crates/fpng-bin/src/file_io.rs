/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use fpng::PngErrors;
use log::debug;

/// Read raw input such as pixel dumps, keeping open and read failures apart
pub fn read_file(path: &Path) -> Result<Vec<u8>, PngErrors> {
    let mut file = File::open(path).map_err(|e| PngErrors::FileOpen(format!("{path:?}: {e}")))?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| PngErrors::FileRead(format!("{path:?}: {e}")))?;

    debug!("Read {} bytes from {:?}", contents.len(), path);

    Ok(contents)
}

/// Write `data` to `path`, replacing whatever was there
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), PngErrors> {
    let mut file =
        File::create(path).map_err(|e| PngErrors::FileOpen(format!("{path:?}: {e}")))?;

    file.write_all(data)
        .map_err(|e| PngErrors::FileWrite(format!("{path:?}: {e}")))?;

    debug!("Wrote {} bytes to {:?}", data.len(), path);

    Ok(())
}
