//! # Status Register Instructions
//!
//! SPSR (set flags from an Immediate mask) and CPSR (clear flags from an
//! Immediate mask). Unmasked flags are untouched — see
//! [`crate::flags::StatusFlags::set_from_mask`] and
//! [`crate::flags::StatusFlags::clear_from_mask`].

use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_spsr(cpu: &mut Cpu, _desc: &InstructionDescriptor, operand: &[u8]) {
    cpu.registers.flags.set_from_mask(operand[0]);
}

pub(crate) fn execute_cpsr(cpu: &mut Cpu, _desc: &InstructionDescriptor, operand: &[u8]) {
    cpu.registers.flags.clear_from_mask(operand[0]);
}
