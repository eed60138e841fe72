//! # Register Transfer Instructions
//!
//! EX: swaps two registers selected by a dual-register operand byte. Flags
//! are untouched.

use super::dual_register;
use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

pub(crate) fn execute_ex(cpu: &mut Cpu, _desc: &InstructionDescriptor, operand: &[u8]) {
    let (x, y) = dual_register(operand[0]);
    let vx = cpu.registers.reg(x);
    let vy = cpu.registers.reg(y);
    cpu.registers.set_reg(x, vy);
    cpu.registers.set_reg(y, vx);
}
