/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Second pass: print decoded units with labels, then define the labels that could not be
//! placed inline.

use std::io::{self, Write};

use log::debug;

use crate::address_space::{AddressSpace, ADDRESS_SPACE_SIZE};
use crate::decode::Disassembly;
use crate::opcode::Label;

/// Writes the complete assembler listing for `dis`.
///
/// Referenced addresses that start a unit get an inline label. All the others, inside a
/// multi-byte instruction or outside the decoded range, are defined as constants after the
/// body.
///
/// The body stops short of 0xffff: a unit starting at the very last address is never printed
/// inline, and a label there is defined after the body.
pub fn write_listing<W: Write>(dis: &mut Disassembly, out: &mut W) -> io::Result<()> {
    let end = dis.end.min(ADDRESS_SPACE_SIZE as u32 - 1);
    write_body(&mut dis.space, end, out)?;
    writeln!(out)?;
    write_definitions(&dis.space, out)?;
    writeln!(out)?;
    writeln!(out, "end")?;
    writeln!(out)?;
    Ok(())
}

fn write_body<W: Write>(space: &mut AddressSpace, end: u32, out: &mut W) -> io::Result<()> {
    let mut address: u32 = 0;
    while address < end {
        let current = address as u16;
        let record = space.record(current);
        let unit = match record.unit {
            Some(unit) => unit,
            None => {
                address += 1;
                continue;
            }
        };
        if record.needs_label {
            writeln!(out, "{}:", Label(current))?;
            space.mark_label_emitted(current);
        }
        writeln!(out, "\t{}", unit)?;
        address += unit.size() as u32;
    }
    Ok(())
}

fn write_definitions<W: Write>(space: &AddressSpace, out: &mut W) -> io::Result<()> {
    let mut count = 0;
    for address in space.referenced() {
        if !space.record(address).label_emitted {
            writeln!(out, "{}\t= ${:04X}", Label(address), address)?;
            count += 1;
        }
    }
    debug!("{} label(s) defined outside the decoded units", count);
    Ok(())
}

impl Disassembly {
    /// Renders the listing into a string.
    pub fn render(&mut self) -> String {
        let mut out: Vec<u8> = Vec::new();
        write_listing(self, &mut out).expect("listing into a Vec");
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DataRange;
    use crate::decode::decode_all;

    fn listing(input: &[u8], ranges: &[DataRange]) -> String {
        decode_all(input, ranges).unwrap().render()
    }

    #[test]
    fn label_at_jump_target() {
        assert_eq!(
            listing(&[0x3e, 0x05, 0xc3, 0x00, 0x00], &[]),
            "L0000:\n\tmvi\ta,$05\n\tjmp\tL0000\n\n\nend\n\n"
        );
    }

    #[test]
    fn label_inside_instruction_is_defined() {
        // jmp into the operand of the jmp itself
        assert_eq!(
            listing(&[0xc3, 0x01, 0x00], &[]),
            "\tjmp\tL0001\n\nL0001\t= $0001\n\nend\n\n"
        );
    }

    #[test]
    fn label_past_end_is_defined() {
        assert_eq!(
            listing(&[0xcd, 0x00, 0x80, 0xc9], &[]),
            "\tcall\tL8000\n\tret\n\nL8000\t= $8000\n\nend\n\n"
        );
    }

    #[test]
    fn forced_data_resumes_with_label() {
        let ranges = [DataRange::new(0, 2).unwrap()];
        assert_eq!(
            listing(&[0x48, 0x49, 0xc9], &ranges),
            "\tdb\t$48\t\t; 'H'\n\tdb\t$49\t\t; 'I'\nL0002:\n\tret\n\n\nend\n\n"
        );
    }

    #[test]
    fn last_unit_is_printed() {
        assert_eq!(listing(&[0x00], &[]), "\tnop\n\n\nend\n\n");
    }

    #[test]
    fn empty_input() {
        let ranges = [DataRange::new(0, 4).unwrap()];
        assert_eq!(listing(&[], &ranges), "\nL0004\t= $0004\n\nend\n\n");
    }

    #[test]
    fn definitions_are_sorted() {
        let text = listing(&[0xc3, 0x00, 0x90, 0xc3, 0x00, 0x10], &[]);
        assert_eq!(text, "\tjmp\tL9000\n\tjmp\tL1000\n\nL1000\t= $1000\nL9000\t= $9000\n\nend\n\n");
    }

    #[test]
    fn last_address_of_space_is_not_listed_inline() {
        let mut input = vec![0u8; 0x10000];
        input[0] = 0xc3;
        input[1] = 0xff;
        input[2] = 0xff;
        let text = listing(&input, &[]);
        assert!(text.starts_with("\tjmp\tLFFFF\n\tnop\n"));
        assert!(text.ends_with("\tnop\n\nLFFFF\t= $FFFF\n\nend\n\n"));
        assert_eq!(text.lines().filter(|line| *line == "\tnop").count(), 0xfffc);
    }

    #[test]
    fn instruction_ending_at_last_address_is_listed() {
        let mut input = vec![0u8; 0x10000];
        input[0xfffd] = 0xcd;
        input[0xfffe] = 0xfd;
        input[0xffff] = 0xff;
        let text = listing(&input, &[]);
        assert!(text.ends_with("\tnop\nLFFFD:\n\tcall\tLFFFD\n\n\nend\n\n"));
    }

    #[test]
    fn empty_range_requests_label_only() {
        let ranges = [DataRange::new(2, 0).unwrap()];
        assert_eq!(listing(&[0x00, 0x00, 0x00], &ranges), "\tnop\n\tnop\nL0002:\n\tnop\n\n\nend\n\n");
    }
}
