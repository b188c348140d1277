/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! First pass: decode the whole input stream into units and collect referenced addresses.

use std::io::BufRead;

use log::{debug, trace};

use crate::address_space::AddressSpace;
use crate::config::DataRange;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::opcode::{self, Operand, OperandKind, Unit};

/// Result of the decode pass, consumed by the listing printer.
#[derive(Debug)]
pub struct Disassembly {
    pub space: AddressSpace,
    /// Exclusive end of the decoded range, i.e. the number of bytes read.
    pub end: u32,
}

impl Disassembly {
    /// Units in address order, with their start address.
    pub fn units(&self) -> impl Iterator<Item = (u16, Unit)> + '_ {
        self.space
            .records()
            .take(self.end as usize)
            .filter_map(|(address, record)| record.unit.map(|unit| (address, unit)))
    }
}

/// Decodes `reader` from address 0 until it is exhausted or the address space is full.
///
/// Addresses covered by `ranges` are emitted as data bytes and never looked up as opcodes.
/// The stream is read once, front to back.
pub fn decode_all<U: BufRead>(reader: U, ranges: &[DataRange]) -> Result<Disassembly> {
    let mut space = AddressSpace::new();
    for range in ranges {
        debug!("forcing data at {:#06x}, {} byte(s)", range.start(), range.count());
        range.apply(&mut space);
    }

    let mut cursor = Cursor::new(reader);
    while let Some((address, byte)) = cursor.next_leading()? {
        let unit = decode_unit(&mut cursor, &space, address, byte)?;
        trace!("{:04x}: {}", address, unit);
        if let Some(target) = unit.target() {
            space.mark_referenced(target);
        }
        space.record_unit(address, unit);
    }

    let end = cursor.position();
    debug!("decoded {} byte(s)", end);
    Ok(Disassembly { space, end })
}

fn decode_unit<U: BufRead>(
    cursor: &mut Cursor<U>,
    space: &AddressSpace,
    address: u16,
    byte: u8,
) -> Result<Unit> {
    if space.record(address).forced_data {
        return Ok(Unit::Data(byte));
    }
    let shape = match opcode::lookup(byte) {
        Some(shape) => shape,
        None => return Ok(Unit::Data(byte)),
    };
    let operand = match shape.operand {
        OperandKind::None => Operand::None,
        OperandKind::Byte => Operand::Byte(cursor.next_operand(address)?),
        OperandKind::Word => {
            let low = cursor.next_operand(address)?;
            let high = cursor.next_operand(address)?;
            Operand::Word((high as u16) << 8 | low as u16)
        }
    };
    Ok(Unit::Instruction(shape, operand))
}
