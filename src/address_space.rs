/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::opcode::Unit;

/// Number of addressable bytes of an 8080.
pub const ADDRESS_SPACE_SIZE: usize = 0x10000;

/// Decode results and label flags for one memory location.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// Set iff a decoded unit starts at this address.
    pub unit: Option<Unit>,
    /// Some operand or data range end refers to this address.
    pub needs_label: bool,
    /// The listing printed an inline label here.
    pub label_emitted: bool,
    /// Decode this location as a raw data byte whatever its value.
    pub forced_data: bool,
}

impl AddressRecord {
    /// Bytes covered by the unit starting here, 1 when there is none.
    pub fn unit_size(&self) -> u16 {
        self.unit.map(|unit| unit.size()).unwrap_or(1)
    }
}

/// Per-address state for the whole 16 bit address space.
pub struct AddressSpace {
    records: Box<[AddressRecord]>,
}

impl AddressSpace {
    pub fn new() -> AddressSpace {
        AddressSpace {
            records: vec![AddressRecord::default(); ADDRESS_SPACE_SIZE].into_boxed_slice(),
        }
    }

    pub fn record(&self, address: u16) -> &AddressRecord {
        &self.records[address as usize]
    }

    pub fn mark_referenced(&mut self, address: u16) {
        self.records[address as usize].needs_label = true;
    }

    pub fn force_data(&mut self, address: u16) {
        self.records[address as usize].forced_data = true;
    }

    pub fn record_unit(&mut self, address: u16, unit: Unit) {
        self.records[address as usize].unit = Some(unit);
    }

    pub fn mark_label_emitted(&mut self, address: u16) {
        self.records[address as usize].label_emitted = true;
    }

    /// Iterates over every record in increasing address order.
    pub fn records(&self) -> impl Iterator<Item = (u16, &AddressRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(address, record)| (address as u16, record))
    }

    /// Addresses referenced by an operand or a range end.
    pub fn referenced(&self) -> impl Iterator<Item = u16> + '_ {
        self.records()
            .filter(|(_, record)| record.needs_label)
            .map(|(address, _)| address)
    }
}

impl Default for AddressSpace {
    fn default() -> AddressSpace {
        AddressSpace::new()
    }
}

impl fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let units = self.records.iter().filter(|r| r.unit.is_some()).count();
        let labels = self.records.iter().filter(|r| r.needs_label).count();
        write!(f, "AddressSpace {{ units: {}, labels: {} }}", units, labels)
    }
}
