/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

fn info_command() -> Command {
    Command::new("info")
        .about("Print width, height and channels of png files as json")
        .arg(
            Arg::new("files")
                .help("Files to inspect")
                .action(ArgAction::Append)
                .required(true)
        )
}

fn encode_command() -> Command {
    Command::new("encode")
        .about("Encode raw interleaved RGB or RGBA pixels into a png file")
        .arg(
            Arg::new("width")
                .long("width")
                .help("Image width")
                .value_parser(value_parser!(u32))
                .required(true)
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Image height")
                .value_parser(value_parser!(u32))
                .required(true)
        )
        .arg(
            Arg::new("channels")
                .long("channels")
                .help("Channels per pixel, 3 or 4, 0 infers it from the input size")
                .value_parser(value_parser!(u32))
                .default_value("0")
        )
        .arg(
            Arg::new("flags")
                .long("flags")
                .help("0: fast, 1: slower with better compression, 2: uncompressed")
                .value_parser(value_parser!(u32))
                .default_value("0")
        )
        .arg(
            Arg::new("in")
                .help("File with raw pixels")
                .required(true)
        )
        .arg(Arg::new("out").help("Png file to write").required(true))
}

fn decode_command() -> Command {
    Command::new("decode")
        .about("Decode a png written by fpng into raw interleaved pixels")
        .arg(
            Arg::new("channels")
                .long("channels")
                .help("Output channels, 3 or 4, 0 keeps the channels of the file")
                .value_parser(value_parser!(u32))
                .default_value("0")
        )
        .arg(Arg::new("in").help("Png file to read").required(true))
        .arg(
            Arg::new("out")
                .help("File to write raw pixels to")
                .required(true)
        )
}

fn checksum_command() -> Command {
    Command::new("checksum")
        .about("Print the CRC-32 and Adler-32 of files")
        .arg(
            Arg::new("files")
                .help("Files to checksum")
                .action(ArgAction::Append)
                .required(true)
        )
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("fpng")
        .about("Fast png encoding and decoding")
        .subcommand_required(true)
        .subcommand(info_command())
        .subcommand(encode_command())
        .subcommand(decode_command())
        .subcommand(checksum_command())
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display information about the encoding and decoding options"))
}
