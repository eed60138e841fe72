//! # Increment / Decrement Instructions
//!
//! INC and DEC, both register-in-opcode: `opcode & 0b111` selects R0–R7.

use super::selector;
use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_inc(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let result = cpu.registers.reg(reg).wrapping_add(1);
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}

pub(crate) fn execute_dec(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let result = cpu.registers.reg(reg).wrapping_sub(1);
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}
