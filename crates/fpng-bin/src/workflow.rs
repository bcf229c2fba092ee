/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use clap::ArgMatches;
use fpng::fpng_core::options::DecoderOptions;
use fpng::PngErrors;
use log::{info, warn};

use crate::file_io::{read_file, write_file};
use crate::serde::Metadata;

fn get_path<'a>(args: &'a ArgMatches, name: &str) -> &'a Path {
    // required arguments, clap refuses to go on without them
    args.get_one::<String>(name)
        .map(|x| Path::new(x.as_str()))
        .unwrap_or_else(|| Path::new(""))
}

fn get_u32(args: &ArgMatches, name: &str) -> u32 {
    args.get_one::<u32>(name).copied().unwrap_or(0)
}

fn get_files(args: &ArgMatches) -> Vec<&Path> {
    args.get_many::<String>("files")
        .map(|files| files.map(|x| Path::new(x.as_str())).collect())
        .unwrap_or_default()
}

/// Print metadata of every file as json
pub fn probe_files(args: &ArgMatches) -> Result<(), PngErrors> {
    for file in get_files(args) {
        let contents = fpng::read_from_path(file, DecoderOptions::default().get_max_file_size())?;
        let info = fpng::get_info(&contents)?;

        let metadata = Metadata::new(file.as_os_str().to_os_string(), contents.len() as u64, info);

        match serde_json::to_string_pretty(&metadata) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!("Could not serialize metadata for {:?}: {e}", file)
        }
    }
    Ok(())
}

pub fn encode(args: &ArgMatches) -> Result<(), PngErrors> {
    let input = get_path(args, "in");
    let output = get_path(args, "out");

    let (width, height) = (get_u32(args, "width"), get_u32(args, "height"));
    let channels = get_u32(args, "channels");
    let flags = get_u32(args, "flags");

    let pixels = read_file(input)?;

    info!("Encoding {width}x{height} image from {:?} with flags {flags}", input);

    let png = fpng::encode_to_bytes(&pixels, width, height, channels, flags)?;

    info!(
        "Compressed {} bytes to {} bytes",
        pixels.len(),
        png.len()
    );
    write_file(output, &png)
}

pub fn decode(args: &ArgMatches) -> Result<(), PngErrors> {
    let input = get_path(args, "in");
    let output = get_path(args, "out");
    let channels = get_u32(args, "channels");

    let image = fpng::decode_from_path(input, channels)?;

    info!(
        "Decoded {:?}: {}x{}, {} channels in file",
        input, image.width, image.height, image.channels_in_file
    );

    write_file(output, &image.pixels)
}

pub fn checksum(args: &ArgMatches) -> Result<(), PngErrors> {
    info!(
        "Accelerated checksums: {}",
        fpng::cpu_supports_fast_path()
    );

    for file in get_files(args) {
        let contents = read_file(file)?;

        println!(
            "{:?}: crc32 {:08x} adler32 {:08x}",
            file,
            fpng::crc32(&contents, 0),
            fpng::adler32(&contents, 1)
        );
    }
    Ok(())
}

/// Run the subcommand present in `options`
pub fn create_and_exec_workflow_from_cmd(options: &ArgMatches) -> Result<(), PngErrors> {
    match options.subcommand() {
        Some(("info", args)) => probe_files(args),
        Some(("encode", args)) => encode(args),
        Some(("decode", args)) => decode(args),
        Some(("checksum", args)) => checksum(args),
        _ => Err(PngErrors::InvalidArg("No subcommand given".into()))
    }
}
