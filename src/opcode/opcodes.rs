/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use self::OperandKind::*;

/// Trailing bytes an instruction takes after its opcode.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OperandKind {
    None,
    /// An 8 bit immediate value or port.
    Byte,
    /// A little-endian 16 bit address or immediate, rendered as a label.
    Word,
}

impl OperandKind {
    pub const fn size(&self) -> u16 {
        match *self {
            None => 1,
            Byte => 2,
            Word => 3,
        }
    }
}

/// Static description of one 8080 instruction encoding.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct InstructionShape {
    pub opcode: u8,
    pub mnemonic: &'static str,
    /// Fixed operand text printed before any immediate, e.g. `"a,"` for `mvi a,`.
    pub operands: &'static str,
    pub operand: OperandKind,
}

impl InstructionShape {
    pub fn size(&self) -> u16 {
        self.operand.size()
    }
}

/// Symbolic name for an address, `LXXXX`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Label(pub u16);

impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "L{:04X}", self.0)
    }
}

/// Operand value consumed after an opcode.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
}

/// What one decode step produced at a unit start address.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Unit {
    Instruction(&'static InstructionShape, Operand),
    Data(u8),
}

impl Unit {
    pub fn size(&self) -> u16 {
        match *self {
            Unit::Instruction(shape, _) => shape.size(),
            Unit::Data(_) => 1,
        }
    }

    /// Address referenced by a word operand, if any.
    pub fn target(&self) -> Option<u16> {
        match *self {
            Unit::Instruction(_, Operand::Word(adr)) => Some(adr),
            _ => Option::None,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Unit::Instruction(shape, operand) => {
                write!(f, "{}", shape.mnemonic)?;
                if shape.operand != None || !shape.operands.is_empty() {
                    write!(f, "\t{}", shape.operands)?;
                }
                match operand {
                    Operand::None => Ok(()),
                    Operand::Byte(v) => write!(f, "${:02x}", v),
                    Operand::Word(adr) => write!(f, "{}", Label(adr)),
                }
            }
            Unit::Data(v) => {
                write!(f, "db\t${:02x}", v)?;
                if v.is_ascii_graphic() || v == b' ' {
                    write!(f, "\t\t; '{}'", char::from(v))?;
                }
                Ok(())
            }
        }
    }
}

const fn op(opcode: u8, mnemonic: &'static str, operands: &'static str) -> InstructionShape {
    InstructionShape { opcode, mnemonic, operands, operand: None }
}

const fn op_byte(opcode: u8, mnemonic: &'static str, operands: &'static str) -> InstructionShape {
    InstructionShape { opcode, mnemonic, operands, operand: Byte }
}

const fn op_word(opcode: u8, mnemonic: &'static str, operands: &'static str) -> InstructionShape {
    InstructionShape { opcode, mnemonic, operands, operand: Word }
}

/// Every documented 8080 instruction. The undocumented aliases
/// (0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xcb, 0xd9, 0xdd, 0xed, 0xfd)
/// are left out on purpose and decode as data.
const INSTRUCTIONS: &[InstructionShape] = &[
    // Data transfer
    op(0x78, "mov", "a,b"),
    op(0x79, "mov", "a,c"),
    op(0x7a, "mov", "a,d"),
    op(0x7b, "mov", "a,e"),
    op(0x7c, "mov", "a,h"),
    op(0x7d, "mov", "a,l"),
    op(0x7e, "mov", "a,m"),
    op(0x7f, "mov", "a,a"),
    op(0x40, "mov", "b,b"),
    op(0x41, "mov", "b,c"),
    op(0x42, "mov", "b,d"),
    op(0x43, "mov", "b,e"),
    op(0x44, "mov", "b,h"),
    op(0x45, "mov", "b,l"),
    op(0x46, "mov", "b,m"),
    op(0x47, "mov", "b,a"),
    op(0x48, "mov", "c,b"),
    op(0x49, "mov", "c,c"),
    op(0x4a, "mov", "c,d"),
    op(0x4b, "mov", "c,e"),
    op(0x4c, "mov", "c,h"),
    op(0x4d, "mov", "c,l"),
    op(0x4e, "mov", "c,m"),
    op(0x4f, "mov", "c,a"),
    op(0x50, "mov", "d,b"),
    op(0x51, "mov", "d,c"),
    op(0x52, "mov", "d,d"),
    op(0x53, "mov", "d,e"),
    op(0x54, "mov", "d,h"),
    op(0x55, "mov", "d,l"),
    op(0x56, "mov", "d,m"),
    op(0x57, "mov", "d,a"),
    op(0x58, "mov", "e,b"),
    op(0x59, "mov", "e,c"),
    op(0x5a, "mov", "e,d"),
    op(0x5b, "mov", "e,e"),
    op(0x5c, "mov", "e,h"),
    op(0x5d, "mov", "e,l"),
    op(0x5e, "mov", "e,m"),
    op(0x5f, "mov", "e,a"),
    op(0x60, "mov", "h,b"),
    op(0x61, "mov", "h,c"),
    op(0x62, "mov", "h,d"),
    op(0x63, "mov", "h,e"),
    op(0x64, "mov", "h,h"),
    op(0x65, "mov", "h,l"),
    op(0x66, "mov", "h,m"),
    op(0x67, "mov", "h,a"),
    op(0x68, "mov", "l,b"),
    op(0x69, "mov", "l,c"),
    op(0x6a, "mov", "l,d"),
    op(0x6b, "mov", "l,e"),
    op(0x6c, "mov", "l,h"),
    op(0x6d, "mov", "l,l"),
    op(0x6e, "mov", "l,m"),
    op(0x6f, "mov", "l,a"),
    op(0x70, "mov", "m,b"),
    op(0x71, "mov", "m,c"),
    op(0x72, "mov", "m,d"),
    op(0x73, "mov", "m,e"),
    op(0x74, "mov", "m,h"),
    op(0x75, "mov", "m,l"),
    op(0x77, "mov", "m,a"),
    op_byte(0x06, "mvi", "b,"),
    op_byte(0x0e, "mvi", "c,"),
    op_byte(0x16, "mvi", "d,"),
    op_byte(0x1e, "mvi", "e,"),
    op_byte(0x26, "mvi", "h,"),
    op_byte(0x2e, "mvi", "l,"),
    op_byte(0x36, "mvi", "m,"),
    op_byte(0x3e, "mvi", "a,"),
    op_word(0x3a, "lda", ""),
    op_word(0x32, "sta", ""),
    op_word(0x2a, "lhld", ""),
    op_word(0x22, "shld", ""),
    op_word(0x01, "lxi", "b,"),
    op_word(0x11, "lxi", "d,"),
    op_word(0x21, "lxi", "h,"),
    op_word(0x31, "lxi", "sp,"),
    op(0x0a, "ldax", "b"),
    op(0x1a, "ldax", "d"),
    op(0x02, "stax", "b"),
    op(0x12, "stax", "d"),
    op(0xeb, "xchg", ""),

    // Arithmetic
    op(0x80, "add", "b"),
    op(0x81, "add", "c"),
    op(0x82, "add", "d"),
    op(0x83, "add", "e"),
    op(0x84, "add", "h"),
    op(0x85, "add", "l"),
    op(0x86, "add", "m"),
    op(0x87, "add", "a"),
    op_byte(0xc6, "adi", ""),
    op(0x88, "adc", "b"),
    op(0x89, "adc", "c"),
    op(0x8a, "adc", "d"),
    op(0x8b, "adc", "e"),
    op(0x8c, "adc", "h"),
    op(0x8d, "adc", "l"),
    op(0x8e, "adc", "m"),
    op(0x8f, "adc", "a"),
    op_byte(0xce, "aci", ""),
    op(0x90, "sub", "b"),
    op(0x91, "sub", "c"),
    op(0x92, "sub", "d"),
    op(0x93, "sub", "e"),
    op(0x94, "sub", "h"),
    op(0x95, "sub", "l"),
    op(0x96, "sub", "m"),
    op(0x97, "sub", "a"),
    op_byte(0xd6, "sui", ""),
    op(0x98, "sbb", "b"),
    op(0x99, "sbb", "c"),
    op(0x9a, "sbb", "d"),
    op(0x9b, "sbb", "e"),
    op(0x9c, "sbb", "h"),
    op(0x9d, "sbb", "l"),
    op(0x9e, "sbb", "m"),
    op(0x9f, "sbb", "a"),
    op_byte(0xde, "sbi", ""),
    op(0x04, "inr", "b"),
    op(0x0c, "inr", "c"),
    op(0x14, "inr", "d"),
    op(0x1c, "inr", "e"),
    op(0x24, "inr", "h"),
    op(0x2c, "inr", "l"),
    op(0x34, "inr", "m"),
    op(0x3c, "inr", "a"),
    op(0x05, "dcr", "b"),
    op(0x0d, "dcr", "c"),
    op(0x15, "dcr", "d"),
    op(0x1d, "dcr", "e"),
    op(0x25, "dcr", "h"),
    op(0x2d, "dcr", "l"),
    op(0x35, "dcr", "m"),
    op(0x3d, "dcr", "a"),
    op(0x03, "inx", "b"),
    op(0x13, "inx", "d"),
    op(0x23, "inx", "h"),
    op(0x33, "inx", "sp"),
    op(0x0b, "dcx", "b"),
    op(0x1b, "dcx", "d"),
    op(0x2b, "dcx", "h"),
    op(0x3b, "dcx", "sp"),
    op(0x09, "dad", "b"),
    op(0x19, "dad", "d"),
    op(0x29, "dad", "h"),
    op(0x39, "dad", "sp"),
    op(0x27, "daa", ""),

    // Logical
    op(0xa0, "ana", "b"),
    op(0xa1, "ana", "c"),
    op(0xa2, "ana", "d"),
    op(0xa3, "ana", "e"),
    op(0xa4, "ana", "h"),
    op(0xa5, "ana", "l"),
    op(0xa6, "ana", "m"),
    op(0xa7, "ana", "a"),
    op_byte(0xe6, "ani", ""),
    op(0xb0, "ora", "b"),
    op(0xb1, "ora", "c"),
    op(0xb2, "ora", "d"),
    op(0xb3, "ora", "e"),
    op(0xb4, "ora", "h"),
    op(0xb5, "ora", "l"),
    op(0xb6, "ora", "m"),
    op(0xb7, "ora", "a"),
    op_byte(0xf6, "ori", ""),
    op(0xa8, "xra", "b"),
    op(0xa9, "xra", "c"),
    op(0xaa, "xra", "d"),
    op(0xab, "xra", "e"),
    op(0xac, "xra", "h"),
    op(0xad, "xra", "l"),
    op(0xae, "xra", "m"),
    op(0xaf, "xra", "a"),
    op_byte(0xee, "xri", ""),
    op(0xb8, "cmp", "b"),
    op(0xb9, "cmp", "c"),
    op(0xba, "cmp", "d"),
    op(0xbb, "cmp", "e"),
    op(0xbc, "cmp", "h"),
    op(0xbd, "cmp", "l"),
    op(0xbe, "cmp", "m"),
    op(0xbf, "cmp", "a"),
    op_byte(0xfe, "cpi", ""),
    op(0x07, "rlc", ""),
    op(0x0f, "rrc", ""),
    op(0x17, "ral", ""),
    op(0x1f, "rar", ""),
    op(0x2f, "cma", ""),
    op(0x3f, "cmc", ""),
    op(0x37, "stc", ""),

    // Branch
    op_word(0xc3, "jmp", ""),
    op_word(0xcd, "call", ""),
    op(0xc9, "ret", ""),
    op(0xe9, "pchl", ""),
    op(0xc7, "rst", "0"),
    op(0xcf, "rst", "1"),
    op(0xd7, "rst", "2"),
    op(0xdf, "rst", "3"),
    op(0xe7, "rst", "4"),
    op(0xef, "rst", "5"),
    op(0xf7, "rst", "6"),
    op(0xff, "rst", "7"),
    op_word(0xda, "jc", ""),
    op_word(0xd2, "jnc", ""),
    op_word(0xca, "jz", ""),
    op_word(0xc2, "jnz", ""),
    op_word(0xf2, "jp", ""),
    op_word(0xfa, "jm", ""),
    op_word(0xea, "jpe", ""),
    op_word(0xe2, "jpo", ""),
    op_word(0xdc, "cc", ""),
    op_word(0xd4, "cnc", ""),
    op_word(0xcc, "cz", ""),
    op_word(0xc4, "cnz", ""),
    op_word(0xf4, "cp", ""),
    op_word(0xfc, "cm", ""),
    op_word(0xec, "cpe", ""),
    op_word(0xe4, "cpo", ""),
    op(0xd8, "rc", ""),
    op(0xd0, "rnc", ""),
    op(0xc8, "rz", ""),
    op(0xc0, "rnz", ""),
    op(0xf0, "rp", ""),
    op(0xf8, "rm", ""),
    op(0xe8, "rpe", ""),
    op(0xe0, "rpo", ""),

    // Stack, I/O, and Machine Control
    op(0xc5, "push", "b"),
    op(0xd5, "push", "d"),
    op(0xe5, "push", "h"),
    op(0xf5, "push", "psw"),
    op(0xc1, "pop", "b"),
    op(0xd1, "pop", "d"),
    op(0xe1, "pop", "h"),
    op(0xf1, "pop", "psw"),
    op(0xe3, "xthl", ""),
    op(0xf9, "sphl", ""),
    op_byte(0xdb, "in", ""),
    op_byte(0xd3, "out", ""),
    op(0xfb, "ei", ""),
    op(0xf3, "di", ""),
    op(0x76, "hlt", ""),
    op(0x00, "nop", ""),
];

/// Opcode-indexed view of `INSTRUCTIONS`. A duplicated opcode fails to compile.
pub(crate) static TABLE: [Option<InstructionShape>; 256] = build_table(INSTRUCTIONS);

const fn build_table(entries: &[InstructionShape]) -> [Option<InstructionShape>; 256] {
    let mut table: [Option<InstructionShape>; 256] = [Option::None; 256];
    let mut i = 0;
    while i < entries.len() {
        let shape = entries[i];
        if table[shape.opcode as usize].is_some() {
            panic!("duplicate opcode in instruction table");
        }
        table[shape.opcode as usize] = Some(shape);
        i += 1;
    }
    table
}
