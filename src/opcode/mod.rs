/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod opcodes;
pub use self::opcodes::InstructionShape;
pub use self::opcodes::Label;
pub use self::opcodes::Operand;
pub use self::opcodes::OperandKind;
pub use self::opcodes::Unit;

/// Returns the instruction encoded by `opcode`, or `None` when the byte is not a documented
/// 8080 instruction and should be treated as data.
pub fn lookup(opcode: u8) -> Option<&'static InstructionShape> {
    opcodes::TABLE[opcode as usize].as_ref()
}
