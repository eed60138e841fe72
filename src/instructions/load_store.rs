//! # Load / Store Instructions
//!
//! LDI loads an Immediate literal into a register-in-opcode register. LDM
//! and STI move a byte between a register and an Absolute memory address.
//! None of these touch the flags.

use super::{absolute_address, selector};
use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_ldi(cpu: &mut Cpu, desc: &InstructionDescriptor, operand: &[u8]) {
    let reg = selector(desc.opcode);
    cpu.registers.set_reg(reg, operand[0]);
}

pub(crate) fn execute_ldm(cpu: &mut Cpu, desc: &InstructionDescriptor, operand: &[u8]) {
    let reg = selector(desc.opcode);
    let addr = absolute_address(operand);
    let value = cpu.memory.load_byte(addr);
    cpu.registers.set_reg(reg, value);
}

pub(crate) fn execute_sti(cpu: &mut Cpu, desc: &InstructionDescriptor, operand: &[u8]) {
    let reg = selector(desc.opcode);
    let addr = absolute_address(operand);
    let value = cpu.registers.reg(reg);
    cpu.store_byte(addr, value);
}
