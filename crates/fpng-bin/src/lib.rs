/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::create_and_exec_workflow_from_cmd;

mod cmd_args;
mod cmd_parsers;
mod file_io;
mod serde;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    if let Err(err) = create_and_exec_workflow_from_cmd(&options) {
        println!();
        if err.needs_general_decoder() {
            error!(
                " The image was not written by fpng, decode it with a general purpose png decoder"
            );
        }
        error!(
            " Could not complete workflow, error code {}, reason {:?}",
            err.code(),
            err
        );

        println!();
        exit(-1);
    }
}
