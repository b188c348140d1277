/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::config::{Config, DataRange, Sink, Source};
use crate::error::Result;

const LONG_ABOUT: &str = "Intel 8080 disassembler.

Reads a binary image loaded at address 0 and prints assembler source. Every address used
by a 16 bit operand gets a label. Labels that do not fall on an instruction boundary are
defined as constants after the code.

Use -d ADDR COUNT (repeatable) to keep a block of bytes out of instruction decoding, e.g.
tables or strings. Numbers are decimal, 0x-prefixed hex or 0-prefixed octal.";

#[derive(Parser, Debug)]
#[command(
    name = "dis8080",
    version,
    about = "Intel 8080 disassembler with label resolution",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Force COUNT bytes starting at ADDR to be emitted as data (repeatable).
    #[arg(
        short = 'd',
        long = "data",
        value_names = ["ADDR", "COUNT"],
        num_args = 2,
        action = ArgAction::Append
    )]
    pub data: Vec<String>,

    /// Write the listing to FILE instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Binary image to disassemble. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Validates the arguments into a run configuration.
    pub fn config(&self) -> Result<Config> {
        let data_ranges = self
            .data
            .chunks_exact(2)
            .map(|pair| DataRange::parse(&pair[0], &pair[1]))
            .collect::<Result<Vec<_>>>()?;
        let source = match self.input {
            Some(ref path) if path.as_os_str() != "-" => Source::File(path.clone()),
            _ => Source::Stdin,
        };
        let sink = match self.output {
            Some(ref path) => Sink::File(path.clone()),
            None => Sink::Stdout,
        };
        Ok(Config {
            data_ranges,
            source,
            sink,
        })
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
