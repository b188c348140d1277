/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Run configuration: forced-data ranges and where to read and write.

use std::path::PathBuf;

use crate::address_space::{AddressSpace, ADDRESS_SPACE_SIZE};
use crate::error::{DisasmError, Result};

/// A block of bytes that must be emitted as `db` lines instead of being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRange {
    start: u32,
    count: u32,
}

impl DataRange {
    /// Validates that the last address of the range, `start + count - 1`, is addressable.
    ///
    /// An empty range is accepted as long as `start` is at least 1; it forces no data but still
    /// requests a label at `start`.
    pub fn new(start: u64, count: u64) -> Result<DataRange> {
        let fits = start
            .checked_add(count)
            .and_then(|end| end.checked_sub(1))
            .map_or(false, |last| last < ADDRESS_SPACE_SIZE as u64);
        if !fits {
            return Err(DisasmError::ConfigRange { start, count });
        }
        Ok(DataRange {
            start: start as u32,
            count: count as u32,
        })
    }

    /// Parses the two values of a `-d ADDR COUNT` option.
    pub fn parse(start: &str, count: &str) -> Result<DataRange> {
        DataRange::new(parse_number(start)?, parse_number(count)?)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn contains(&self, address: u16) -> bool {
        let address = address as u32;
        address >= self.start && address < self.start + self.count
    }

    /// First address after the range, if it is still addressable.
    pub fn resume_address(&self) -> Option<u16> {
        let next = self.start + self.count;
        if (next as usize) < ADDRESS_SPACE_SIZE {
            Some(next as u16)
        } else {
            None
        }
    }

    /// Marks the range as data and requests a label where decoding resumes.
    pub fn apply(&self, space: &mut AddressSpace) {
        let first = self.start.min(ADDRESS_SPACE_SIZE as u32 - 1) as u16;
        for address in first..=0xffff {
            if !self.contains(address) {
                break;
            }
            space.force_data(address);
        }
        if let Some(next) = self.resume_address() {
            space.mark_referenced(next);
        }
    }
}

/// Parses an unsigned number the way C's `strtoul(s, NULL, 0)` does: `0x` prefix for hex,
/// a leading `0` for octal, decimal otherwise. `$ff` and `0ffh` are accepted as hex too.
pub fn parse_number(text: &str) -> Result<u64> {
    let s = text.trim();
    let invalid = || DisasmError::InvalidNumber(text.to_string());
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(hex) = s.strip_prefix('$') {
        (hex, 16)
    } else if let Some(hex) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if digits.is_empty() {
        return Err(invalid());
    }
    u64::from_str_radix(digits, radix).map_err(|_| invalid())
}

/// Where the input comes from and where the listing goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

/// Everything a run needs, validated before any input is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_ranges: Vec<DataRange>,
    pub source: Source,
    pub sink: Sink,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            data_ranges: Vec::new(),
            source: Source::Stdin,
            sink: Sink::Stdout,
        }
    }
}
