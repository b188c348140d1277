/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisasmError>;

#[derive(Debug, Error)]
pub enum DisasmError {
    /// A forced-data range is empty or does not fit the 16 bit address space.
    #[error("-d ADDR COUNT: invalid range (start {start:#06x}, count {count})")]
    ConfigRange { start: u64, count: u64 },

    #[error("-d ADDR COUNT: invalid number `{0}`")]
    InvalidNumber(String),

    /// An operand byte would lie past address 0xffff.
    #[error("too much input: unit at {unit:#06x} runs past the end of the address space")]
    AddressSpaceOverrun { unit: u16 },

    /// The input ended between an opcode and its last operand byte.
    #[error("unexpected end of input inside unit at {unit:#06x}")]
    UnexpectedEof { unit: u16 },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl DisasmError {
    /// True for both ways a unit can be cut short by the end of the stream.
    pub fn is_stream_overrun(&self) -> bool {
        matches!(
            self,
            DisasmError::AddressSpaceOverrun { .. } | DisasmError::UnexpectedEof { .. }
        )
    }
}
