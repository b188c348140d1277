/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::io::BufRead;

use log::warn;

use crate::address_space::ADDRESS_SPACE_SIZE;
use crate::error::{DisasmError, Result};

/// Pulls bytes one at a time from a reader and keeps track of their address.
pub struct Cursor<U: BufRead> {
    reader: U,
    next: u32,
}

impl<U: BufRead> Cursor<U> {
    pub fn new(reader: U) -> Cursor<U> {
        Cursor { reader, next: 0 }
    }

    /// Address the next pulled byte will have. After the last byte this is the exclusive end
    /// of the decoded range.
    pub fn position(&self) -> u32 {
        self.next
    }

    /// Reads the first byte of a new unit. Returns `None` at the end of input or once the
    /// address space is exhausted.
    pub fn next_leading(&mut self) -> Result<Option<(u16, u8)>> {
        if self.next as usize == ADDRESS_SPACE_SIZE {
            if !self.fill()?.is_empty() {
                warn!("input continues past address 0xffff, ignoring the rest");
            }
            return Ok(None);
        }
        let address = self.next as u16;
        Ok(self.pull()?.map(|byte| (address, byte)))
    }

    /// Reads an operand byte of the unit starting at `unit`. The byte must exist.
    pub fn next_operand(&mut self, unit: u16) -> Result<u8> {
        if self.next as usize == ADDRESS_SPACE_SIZE {
            return Err(DisasmError::AddressSpaceOverrun { unit });
        }
        self.pull()?.ok_or(DisasmError::UnexpectedEof { unit })
    }

    fn pull(&mut self) -> Result<Option<u8>> {
        let byte = match self.fill()?.first() {
            Some(byte) => *byte,
            None => return Ok(None),
        };
        self.reader.consume(1);
        self.next += 1;
        Ok(Some(byte))
    }

    fn fill(&mut self) -> Result<&[u8]> {
        Ok(self.reader.fill_buf()?)
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::error::DisasmError;

    #[test]
    fn pulls_bytes_with_addresses() {
        let mut cursor = Cursor::new(&[0x3eu8, 0x05][..]);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_leading().unwrap(), Some((0, 0x3e)));
        assert_eq!(cursor.next_operand(0).unwrap(), 0x05);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next_leading().unwrap(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn missing_operand_is_an_error() {
        let mut cursor = Cursor::new(&[0xc3u8, 0x00][..]);
        cursor.next_leading().unwrap();
        cursor.next_operand(0).unwrap();
        match cursor.next_operand(0) {
            Err(DisasmError::UnexpectedEof { unit: 0 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn stops_at_end_of_address_space() {
        let input = vec![0u8; 0x10001];
        let mut cursor = Cursor::new(&input[..]);
        for _ in 0..0x10000 {
            assert!(cursor.next_leading().unwrap().is_some());
        }
        assert_eq!(cursor.position(), 0x10000);
        assert_eq!(cursor.next_leading().unwrap(), None);
        match cursor.next_operand(0xffff) {
            Err(DisasmError::AddressSpaceOverrun { unit: 0xffff }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
