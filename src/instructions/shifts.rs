//! # Shift Instructions
//!
//! SHL/SHR set Carry from the bit shifted out. SHLC/SHRC shift a carry-in
//! instead of a zero bit and leave Carry as-is — a design choice carried
//! over unchanged from the source machine (spec.md §9).

use super::selector;
use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_shl(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let value = cpu.registers.reg(reg);
    cpu.registers.flags.carry = value & 0x80 != 0;
    let result = value << 1;
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}

pub(crate) fn execute_shr(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let value = cpu.registers.reg(reg);
    cpu.registers.flags.carry = value & 0x01 != 0;
    let result = value >> 1;
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}

pub(crate) fn execute_shlc(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let value = cpu.registers.reg(reg);
    let carry_in = cpu.registers.flags.carry as u8;
    let result = (value << 1) | carry_in;
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}

pub(crate) fn execute_shrc(cpu: &mut Cpu, desc: &InstructionDescriptor, _operand: &[u8]) {
    let reg = selector(desc.opcode);
    let value = cpu.registers.reg(reg);
    let carry_in = (cpu.registers.flags.carry as u8) << 7;
    let result = (value >> 1) | carry_in;
    cpu.registers.set_reg(reg, result);
    cpu.registers.flags.update_nz(result);
}
