/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! # Intel 8080 disassembler
//!
//! This crate turns a raw 8080 binary image into assembler source where every 16 bit operand
//! is replaced by a label.
//!
//! Disassembly happens in two passes. [`decode_all`](decode/fn.decode_all.html) reads the
//! whole input once from address 0, splitting it into instructions and data bytes and
//! recording every referenced address. [`write_listing`](listing/fn.write_listing.html) then
//! prints the units, placing a label before each referenced unit and defining the labels it
//! could not place as constants after the code.
//!
//! Here is a minimal disassembler reading a file given as argument :
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use dis8080::config::DataRange;
//!
//! fn main() -> Result<(), dis8080::DisasmError> {
//!     let path = std::env::args().nth(1).expect("usage: disassembler <file>");
//!     let input = io::BufReader::new(File::open(path)?);
//!     // the first 16 bytes are a jump table
//!     let ranges = [DataRange::new(0, 16)?];
//!     dis8080::disassemble(input, &ranges, &mut io::stdout())
//! }
//! ```

use std::io::{BufRead, Write};

pub mod address_space;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod listing;
pub mod opcode;

pub use crate::decode::{decode_all, Disassembly};
pub use crate::error::DisasmError;
pub use crate::listing::write_listing;

/// Decodes `input` and writes the complete listing to `out`.
///
/// Nothing is written when decoding fails.
pub fn disassemble<U: BufRead, W: Write>(
    input: U,
    ranges: &[config::DataRange],
    out: &mut W,
) -> error::Result<()> {
    let mut dis = decode_all(input, ranges)?;
    write_listing(&mut dis, out)?;
    out.flush()?;
    Ok(())
}
