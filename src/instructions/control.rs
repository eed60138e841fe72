//! # Control Instructions
//!
//! NOP and HALT, plus the shared handler every unused opcode slot points
//! at — an unused slot runs exactly as a NOP.

use crate::cpu::Cpu;
use crate::instruction_set::InstructionDescriptor;

/// No operation. `step` has already charged the cycle cost and advanced
/// `PC`; there is nothing left to do.
pub(crate) fn execute_nop(_cpu: &mut Cpu, _desc: &InstructionDescriptor, _operand: &[u8]) {}

/// Halts execution by resetting `PC` back to the HALT opcode's own address,
/// so the next `step` fetches HALT again.
pub(crate) fn execute_halt(cpu: &mut Cpu, _desc: &InstructionDescriptor, _operand: &[u8]) {
    let halt_addr = cpu.last_pc;
    cpu.set_pc(halt_addr);
}
