//! Property-based coverage for the invariants spec.md §8 states over
//! arbitrary inputs rather than fixed examples.

use cpu1::{Architecture, Cpu, Memory, StatusFlags};
use proptest::prelude::*;

fn setup_cpu() -> Cpu {
    let mut memory = Memory::new();
    memory.store_address(0xFFFC, 0x0200);
    let mut cpu = Cpu::new(Architecture::Nmos, memory);
    cpu.reset();
    cpu
}

proptest! {
    /// Invariant 3: every non-branching, non-CALL/RET instruction advances
    /// PC by exactly its descriptor length and Cycles by exactly its
    /// descriptor cycle count.
    #[test]
    fn pc_and_cycles_advance_by_exactly_the_descriptor_length_and_cost(
        register in 0u8..8,
        value in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        let opcode = 0xE0 + register; // LDI
        cpu.memory_mut().store_bytes(0x0200, &[opcode, value]);
        let descriptor = *cpu.lookup(opcode);

        cpu.step();

        prop_assert_eq!(cpu.pc(), 0x0200u16.wrapping_add(descriptor.length as u16));
        prop_assert_eq!(cpu.cycles(), descriptor.cycles as u64);
        prop_assert_eq!(cpu.reg(register), value);
    }

    /// Invariant 4: PUSH r followed by POP r' restores the pushed byte into
    /// r' and leaves SP exactly where it started.
    #[test]
    fn push_then_pop_round_trips_the_value_and_restores_sp(
        push_reg in 0u8..8,
        pop_reg in 0u8..8,
        value in any::<u8>(),
        sp in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_sp(sp);
        cpu.set_reg(push_reg, value);
        cpu.memory_mut().store_bytes(0x0200, &[0x40 + push_reg, 0x48 + pop_reg]);

        cpu.step(); // PUSH
        cpu.step(); // POP

        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.reg(pop_reg), value);
    }

    /// Invariant 5: CALL addr followed by RET returns to the instruction
    /// immediately after CALL and restores SP, regardless of starting SP.
    #[test]
    fn call_then_ret_returns_past_the_call_site_and_restores_sp(
        sp in 2u8..=0xFF,
        target_hi in any::<u8>(),
        target_lo in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_sp(sp);
        let target = u16::from_be_bytes([target_hi, target_lo]);
        cpu.memory_mut().store_bytes(0x0200, &[0x1B, target_hi, target_lo]);
        cpu.memory_mut().store_byte(target, 0x1F); // RET at the call target

        cpu.step(); // CALL
        prop_assert_eq!(cpu.pc(), target);
        cpu.step(); // RET

        prop_assert_eq!(cpu.pc(), 0x0203);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// Invariant 6: updateNZ sets Zero iff the value is zero and Sign iff
    /// bit 7 is set, and never touches Carry or Overflow.
    #[test]
    fn update_nz_matches_its_definition_for_any_value(
        value in any::<u8>(),
        carry in any::<bool>(),
        overflow in any::<bool>(),
    ) {
        let mut flags = StatusFlags { carry, overflow, ..Default::default() };
        flags.update_nz(value);

        prop_assert_eq!(flags.zero, value == 0);
        prop_assert_eq!(flags.sign, value & 0x80 != 0);
        prop_assert_eq!(flags.carry, carry);
        prop_assert_eq!(flags.overflow, overflow);
    }

    /// Invariant 7 (register file): ADR's sum always wraps modulo 256
    /// rather than panicking, for any pair of register values.
    #[test]
    fn adr_wraps_modulo_256_for_any_operand_pair(
        a in any::<u8>(),
        b in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_reg(0, a);
        cpu.set_reg(1, b);
        cpu.memory_mut().store_bytes(0x0200, &[0x80, 0x01]); // ADR X=0,Y=1
        cpu.step();

        prop_assert_eq!(cpu.reg(0), a.wrapping_add(b));
    }
}
