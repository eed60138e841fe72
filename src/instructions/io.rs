//! # I/O Instructions
//!
//! SETQ and RESETQ, both IO-line-in-opcode: `opcode & 0b111` selects Q0–Q7.

use super::selector;
use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_setq(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let q = selector(desc.opcode);
    cpu.registers.set_q_line(q);
}

pub(crate) fn execute_resetq(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let q = selector(desc.opcode);
    cpu.registers.clear_q_line(q);
}
