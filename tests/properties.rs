/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::collections::BTreeSet;

use proptest::prelude::*;

use dis8080::config::DataRange;
use dis8080::decode_all;
use dis8080::opcode::{lookup, Label, Operand, Unit};

/// Random bytes followed by two nops, so the last instruction always has its operands.
fn program() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256).prop_map(|mut bytes| {
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes
    })
}

fn ranges() -> impl Strategy<Value = Vec<DataRange>> {
    prop::collection::vec((0u64..300, 1u64..16), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(start, count)| DataRange::new(start, count).unwrap())
            .collect()
    })
}

proptest! {
    #[test]
    fn output_is_deterministic(bytes in program(), ranges in ranges()) {
        let first = decode_all(&bytes[..], &ranges).unwrap().render();
        let second = decode_all(&bytes[..], &ranges).unwrap().render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn units_partition_the_input(bytes in program(), ranges in ranges()) {
        let dis = decode_all(&bytes[..], &ranges).unwrap();
        prop_assert_eq!(dis.end as usize, bytes.len());
        let mut expected_start = 0u32;
        for (address, unit) in dis.units() {
            prop_assert_eq!(address as u32, expected_start);
            expected_start += unit.size() as u32;
        }
        prop_assert_eq!(expected_start, dis.end);
    }

    #[test]
    fn every_reference_gets_exactly_one_label(bytes in program(), ranges in ranges()) {
        let mut dis = decode_all(&bytes[..], &ranges).unwrap();
        let mut referenced: BTreeSet<u16> = dis.units().filter_map(|(_, unit)| unit.target()).collect();
        referenced.extend(ranges.iter().filter_map(|range| range.resume_address()));

        let text = dis.render();
        for address in referenced {
            let inline = format!("{}:", Label(address));
            let defined = format!("{}\t= ${:04X}", Label(address), address);
            let inline_count = text.lines().filter(|line| *line == inline).count();
            let defined_count = text.lines().filter(|line| *line == defined).count();
            prop_assert_eq!(inline_count + defined_count, 1, "address {:04x}", address);
        }
    }

    #[test]
    fn operands_round_trip(bytes in program()) {
        let dis = decode_all(&bytes[..], &[]).unwrap();
        for (address, unit) in dis.units() {
            let start = address as usize;
            match unit {
                Unit::Instruction(_, Operand::Byte(v)) => {
                    prop_assert_eq!(v, bytes[start + 1]);
                    let literal = format!("${:02x}", v);
                    prop_assert!(unit.to_string().ends_with(&literal));
                }
                Unit::Instruction(_, Operand::Word(target)) => {
                    let expected = bytes[start + 2] as u16 * 256 + bytes[start + 1] as u16;
                    prop_assert_eq!(target, expected);
                    prop_assert!(dis.space.record(target).needs_label);
                }
                Unit::Instruction(shape, Operand::None) => {
                    prop_assert_eq!(shape.size(), 1);
                }
                Unit::Data(v) => {
                    prop_assert_eq!(v, bytes[start]);
                    prop_assert!(lookup(v).is_none());
                }
            }
        }
    }

    #[test]
    fn forced_bytes_are_single_data_units(bytes in program(), ranges in ranges()) {
        let dis = decode_all(&bytes[..], &ranges).unwrap();
        for (address, unit) in dis.units() {
            if ranges.iter().any(|range| range.contains(address)) {
                prop_assert_eq!(unit, Unit::Data(bytes[address as usize]));
            }
        }
    }
}
