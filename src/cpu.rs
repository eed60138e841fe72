//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct: CPU1's architectural state plus
//! the fetch-decode-execute loop described in spec.md §4.4.
//!
//! ## Execution Model
//!
//! - `step()`: execute exactly one instruction.
//! - `run_for_cycles()`: keep stepping until the cycle budget is spent.
//! - `reset()`: load `PC` from the reset vector at `$FFFC`.
//!
//! `step` never fails. Undefined opcodes, register wraparound, and stack
//! pointer wraparound are all documented behavior, not errors — see
//! [`crate::error::InstructionSetError`] for the one fatal error path this
//! crate has, which lives entirely in instruction-set construction, not
//! here.

use crate::flags::StatusFlags;
use crate::instruction_set::{get_instruction_set, Architecture, InstructionDescriptor, InstructionSet};
use crate::memory::Memory;
use crate::registers::Registers;

/// Address of the two-byte, big-endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Observes state changes as a CPU steps, without influencing them.
///
/// Intended for external debuggers and disassemblers: attach a `DebugHook`
/// to watch memory writes and PC transitions as they happen, rather than
/// diffing state snapshots after the fact.
pub trait DebugHook {
    /// Called immediately after a byte is written to memory, with the
    /// address and the value that was stored.
    fn on_memory_store(&mut self, addr: u16, value: u8);

    /// Called immediately after `PC` changes, with the old and new values.
    fn on_pc_update(&mut self, old_pc: u16, new_pc: u16);
}

/// CPU1 state and execution context: [`Registers`], [`Memory`], a
/// monotonically increasing cycle counter, and a reference to the static,
/// architecture-wide [`InstructionSet`] table.
///
/// # Examples
///
/// ```
/// use cpu1::{Architecture, Cpu, Memory};
///
/// let mut memory = Memory::new();
/// memory.store_address(0xFFFC, 0x0200);
/// memory.store_bytes(0x0200, &[0x01]); // HALT
///
/// let mut cpu = Cpu::new(Architecture::Nmos, memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x0200);
///
/// cpu.step();
/// assert_eq!(cpu.pc(), 0x0200);
/// assert_eq!(cpu.cycles(), 1);
/// ```
pub struct Cpu {
    pub(crate) memory: Memory,
    pub(crate) registers: Registers,
    instruction_set: &'static InstructionSet,
    cycles: u64,
    pub(crate) last_pc: u16,
    observer: Option<Box<dyn DebugHook>>,
}

impl Cpu {
    /// Creates a new CPU with `PC = 0`; call [`Cpu::reset`] to load the
    /// reset vector, or [`Cpu::set_pc`] to start somewhere specific.
    pub fn new(architecture: Architecture, memory: Memory) -> Self {
        Self {
            memory,
            registers: Registers::new(),
            instruction_set: get_instruction_set(architecture),
            cycles: 0,
            last_pc: 0,
            observer: None,
        }
    }

    /// Loads `PC` from the reset vector at `$FFFC`.
    pub fn reset(&mut self) {
        let target = self.memory.load_address(RESET_VECTOR);
        log::debug!("reset: loaded PC = 0x{:04X} from reset vector", target);
        self.set_pc(target);
    }

    /// Executes exactly one instruction: fetch, decode, advance `PC` and
    /// the cycle counter, then invoke the handler. See spec.md §4.4 for the
    /// full algorithm this implements step for step.
    pub fn step(&mut self) {
        let pc = self.registers.pc;
        let opcode = self.memory.load_byte(pc);
        let descriptor = *self.instruction_set.lookup(opcode);
        log::trace!("step: fetch 0x{:02X} ({}) at PC=0x{:04X}", opcode, descriptor.name, pc);

        let operand = self.memory.load_bytes(pc.wrapping_add(1), descriptor.length - 1);

        self.last_pc = pc;
        self.set_pc(pc.wrapping_add(descriptor.length as u16));

        (descriptor.handler)(self, &descriptor, &operand);

        self.cycles += descriptor.cycles as u64;
        log::trace!("step: cycles={} PC=0x{:04X}", self.cycles, self.registers.pc);
    }

    /// Steps repeatedly until the cycle counter has advanced by at least
    /// `budget` cycles, returning the number of instructions executed.
    ///
    /// A single instruction can overshoot `budget` — CPU1 does not model
    /// partial instructions — so the cycle counter may end up past the
    /// requested budget.
    pub fn run_for_cycles(&mut self, budget: u64) -> u64 {
        let target = self.cycles + budget;
        let mut steps = 0;
        while self.cycles < target {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Directly sets `PC`, notifying any attached [`DebugHook`].
    pub fn set_pc(&mut self, addr: u16) {
        let old_pc = self.registers.pc;
        self.registers.pc = addr;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_pc_update(old_pc, addr);
        }
    }

    /// Writes `value` to `addr`, notifying any attached [`DebugHook`].
    /// Every handler that stores to memory goes through this path, so
    /// observers see every write regardless of which instruction caused
    /// it.
    pub(crate) fn store_byte(&mut self, addr: u16, value: u8) {
        self.memory.store_byte(addr, value);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_memory_store(addr, value);
        }
    }

    /// Pushes `value` onto the stack, then decrements `SP`, wrapping
    /// silently at the page boundary.
    pub(crate) fn push_byte(&mut self, value: u8) {
        let addr = self.registers.stack_addr();
        self.store_byte(addr, value);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
    }

    /// Increments `SP`, wrapping silently at the page boundary, then pops
    /// and returns a byte from the stack.
    pub(crate) fn pop_byte(&mut self) -> u8 {
        self.registers.sp = self.registers.sp.wrapping_add(1);
        let addr = self.registers.stack_addr();
        self.memory.load_byte(addr)
    }

    /// Attaches a debugger/disassembler observer. Replaces any
    /// previously-attached observer.
    pub fn attach_observer(&mut self, observer: Box<dyn DebugHook>) {
        self.observer = Some(observer);
    }

    /// Detaches and returns the currently attached observer, if any.
    pub fn detach_observer(&mut self) -> Option<Box<dyn DebugHook>> {
        self.observer.take()
    }

    /// Looks up a descriptor by opcode byte.
    pub fn lookup(&self, opcode: u8) -> &InstructionDescriptor {
        self.instruction_set.lookup(opcode)
    }

    /// All descriptors sharing `mnemonic`, case-insensitive.
    pub fn get_instructions(&self, mnemonic: &str) -> Vec<&InstructionDescriptor> {
        self.instruction_set.get_instructions(mnemonic)
    }

    /// Shared read access to memory, for tests and external tooling.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Exclusive access to memory, for test setup (e.g. loading a program)
    /// and debugger-driven patching.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// The PC value at the moment the most recently executed instruction
    /// was fetched. Used by HALT, and useful to an external disassembler
    /// stepping alongside this CPU.
    pub fn last_pc(&self) -> u16 {
        self.last_pc
    }

    pub fn sp(&self) -> u8 {
        self.registers.sp
    }

    pub fn set_sp(&mut self, sp: u8) {
        self.registers.sp = sp;
    }

    pub fn reg(&self, index: u8) -> u8 {
        self.registers.reg(index)
    }

    pub fn set_reg(&mut self, index: u8, value: u8) {
        self.registers.set_reg(index, value);
    }

    pub fn q(&self) -> u8 {
        self.registers.q
    }

    pub fn q_line(&self, q: u8) -> bool {
        self.registers.q_line(q)
    }

    pub fn flags(&self) -> StatusFlags {
        self.registers.flags
    }

    pub fn set_flags(&mut self, flags: StatusFlags) {
        self.registers.flags = flags;
    }

    /// Total cycles executed since this CPU was created.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
