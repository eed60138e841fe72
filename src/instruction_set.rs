//! # Instruction Set Table
//!
//! The 256-entry opcode table is built once per [`Architecture`] and cached
//! in a [`std::sync::OnceLock`]; everything else in this crate looks
//! instructions up through [`get_instruction_set`] rather than rebuilding
//! the table.
//!
//! ## Opcode Map
//!
//! Ranges pinned by spec.md's end-to-end scenarios are marked "(pinned)";
//! everything else is this crate's own assignment, chosen to keep every
//! register-in-opcode and IO-line-in-opcode family byte-aligned on its low
//! three bits and to leave `0x06`, `0x07`, `0x1C`–`0x1E` undefined.
//!
//! | Range         | Mnemonic(s)                  | Mode     | Len | Cycles |
//! |---------------|-------------------------------|----------|-----|--------|
//! | `0x00`         | NOP (pinned)                 | Implied  | 1   | 1      |
//! | `0x01`         | HALT (pinned)                | Implied  | 1   | 1      |
//! | `0x08`-`0x0F`  | INC r0..r7                    | Implied  | 1   | 2      |
//! | `0x10`-`0x17`  | DEC r0..r7                    | Implied  | 1   | 2      |
//! | `0x18`         | LBR (pinned)                  | Absolute | 3   | 3      |
//! | `0x19`         | LBRC                          | Absolute | 3   | 3      |
//! | `0x1A`         | LBRZ                          | Absolute | 3   | 3      |
//! | `0x1B`         | CALL                          | Absolute | 3   | 6      |
//! | `0x1F`         | RET                           | Implied  | 1   | 6      |
//! | `0x20`-`0x27`  | SHL r0..r7                    | Implied  | 1   | 2      |
//! | `0x28`-`0x2F`  | SHR r0..r7                    | Implied  | 1   | 2      |
//! | `0x30`-`0x37`  | SHLC r0..r7                   | Implied  | 1   | 2      |
//! | `0x38`-`0x3F`  | SETQ q0..q7 (pinned)          | Implied  | 1   | 1      |
//! | `0x40`-`0x47`  | PUSH r0..r7 (pinned)          | Implied  | 1   | 3      |
//! | `0x48`-`0x4F`  | POP r0..r7 (pinned)           | Implied  | 1   | 4      |
//! | `0x50`-`0x57`  | SHRC r0..r7                   | Implied  | 1   | 2      |
//! | `0x58`-`0x5F`  | RESETQ q0..q7                 | Implied  | 1   | 1      |
//! | `0x60`-`0x67`  | LBRQ q0..q7                   | Absolute | 3   | 3      |
//! | `0x68`         | SPSR                          | Immediate| 2   | 2      |
//! | `0x69`         | CPSR                          | Immediate| 2   | 2      |
//! | `0x80`         | ADR (pinned)                  | Immediate| 2   | 3      |
//! | `0x81`         | SUB                           | Immediate| 2   | 3      |
//! | `0x82`         | AND                           | Immediate| 2   | 3      |
//! | `0x83`         | OR                            | Immediate| 2   | 3      |
//! | `0x84`         | XOR                           | Immediate| 2   | 3      |
//! | `0x85`         | EX                            | Immediate| 2   | 3      |
//! | `0x86`         | CMP                           | Immediate| 2   | 3      |
//! | `0xA0`-`0xA7`  | ADI r0..r7                    | Immediate| 2   | 2      |
//! | `0xA8`-`0xAF`  | SUBI r0..r7                   | Immediate| 2   | 2      |
//! | `0xB0`-`0xB7`  | ANI r0..r7                    | Immediate| 2   | 2      |
//! | `0xB8`-`0xBF`  | ORI r0..r7                    | Immediate| 2   | 2      |
//! | `0xC0`-`0xC7`  | XRI r0..r7                    | Immediate| 2   | 2      |
//! | `0xC8`-`0xCF`  | ADM r0..r7                    | Absolute | 3   | 4      |
//! | `0xD0`-`0xD7`  | SUBM r0..r7                   | Absolute | 3   | 4      |
//! | `0xD8`-`0xDF`  | LDM r0..r7                    | Absolute | 3   | 4      |
//! | `0xE0`-`0xE7`  | LDI r0..r7 (pinned)           | Immediate| 2   | 2      |
//! | `0xE8`-`0xEF`  | STI r0..r7 (pinned)           | Absolute | 3   | 4      |
//! | everything else| undefined (timed no-op)      | Implied  | 1   | 1      |

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::error::InstructionSetError;
use crate::instructions::{alu, branches, control, inc_dec, io, load_store, shifts, stack, status, transfer};

/// The two processor variants CPU1 is decoded as. Every defined opcode in
/// this crate behaves identically under both; the distinction exists so a
/// disassembler or debugger built on this crate can report which variant a
/// program was assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Nmos,
    Cmos,
}

/// A handler receives the CPU, its own descriptor (to recover the opcode
/// byte for register/IO-line selection), and the operand bytes already
/// sliced out of memory.
pub(crate) type HandlerFn = fn(&mut Cpu, &InstructionDescriptor, &[u8]);

/// A single opcode's complete behavior: how it's encoded, how long it
/// takes, and what it does.
#[derive(Clone, Copy)]
pub struct InstructionDescriptor {
    pub name: &'static str,
    pub mode: AddressingMode,
    pub opcode: u8,
    pub length: u8,
    pub cycles: u8,
    pub(crate) handler: HandlerFn,
}

impl std::fmt::Debug for InstructionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstructionDescriptor")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("opcode", &format_args!("0x{:02X}", self.opcode))
            .field("length", &self.length)
            .field("cycles", &self.cycles)
            .finish()
    }
}

const UNUSED_NAME: &str = "???";

fn unused_descriptor(opcode: u8) -> InstructionDescriptor {
    InstructionDescriptor {
        name: UNUSED_NAME,
        mode: AddressingMode::Implied,
        opcode,
        length: 1,
        cycles: 1,
        handler: control::execute_nop,
    }
}

/// The full 256-entry opcode table plus a case-insensitive mnemonic index.
pub struct InstructionSet {
    architecture: Architecture,
    table: [InstructionDescriptor; 256],
    by_mnemonic: HashMap<String, Vec<InstructionDescriptor>>,
}

impl InstructionSet {
    /// Which architecture this table was built for.
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Looks up the descriptor for `opcode`. Every one of the 256 possible
    /// byte values has an entry — undefined opcodes decode to a documented
    /// no-op rather than failing.
    pub fn lookup(&self, opcode: u8) -> &InstructionDescriptor {
        &self.table[opcode as usize]
    }

    /// All descriptors sharing `mnemonic`, case-insensitive. Empty if the
    /// mnemonic names no defined opcode (including `"???"`, the unused-slot
    /// marker, which is intentionally not indexed).
    pub fn get_instructions(&self, mnemonic: &str) -> Vec<&InstructionDescriptor> {
        self.by_mnemonic
            .get(&mnemonic.to_ascii_uppercase())
            .map(|descs| descs.iter().collect())
            .unwrap_or_default()
    }
}

type RawEntry = (u8, &'static str, AddressingMode, u8, u8, HandlerFn);

/// Expands a register-in-opcode or IO-line-in-opcode family into its eight
/// `base..=base+7` entries.
fn family(base: u8, name: &'static str, mode: AddressingMode, length: u8, cycles: u8, handler: HandlerFn) -> Vec<RawEntry> {
    (0..8u8).map(|n| (base + n, name, mode, length, cycles, handler)).collect()
}

fn defined_opcodes() -> Vec<RawEntry> {
    use AddressingMode::{Absolute, Immediate, Implied};

    let mut entries = vec![
        (0x00, "NOP", Implied, 1, 1, control::execute_nop as HandlerFn),
        (0x01, "HALT", Implied, 1, 1, control::execute_halt as HandlerFn),
        (0x18, "LBR", Absolute, 3, 3, branches::execute_lbr as HandlerFn),
        (0x19, "LBRC", Absolute, 3, 3, branches::execute_lbrc as HandlerFn),
        (0x1A, "LBRZ", Absolute, 3, 3, branches::execute_lbrz as HandlerFn),
        (0x1B, "CALL", Absolute, 3, 6, stack::execute_call as HandlerFn),
        (0x1F, "RET", Implied, 1, 6, stack::execute_ret as HandlerFn),
        (0x68, "SPSR", Immediate, 2, 2, status::execute_spsr as HandlerFn),
        (0x69, "CPSR", Immediate, 2, 2, status::execute_cpsr as HandlerFn),
        (0x80, "ADR", Immediate, 2, 3, alu::execute_adr as HandlerFn),
        (0x81, "SUB", Immediate, 2, 3, alu::execute_sub_reg as HandlerFn),
        (0x82, "AND", Immediate, 2, 3, alu::execute_and as HandlerFn),
        (0x83, "OR", Immediate, 2, 3, alu::execute_or as HandlerFn),
        (0x84, "XOR", Immediate, 2, 3, alu::execute_xor as HandlerFn),
        (0x85, "EX", Immediate, 2, 3, transfer::execute_ex as HandlerFn),
        (0x86, "CMP", Immediate, 2, 3, alu::execute_cmp as HandlerFn),
    ];

    entries.extend(family(0x08, "INC", Implied, 1, 2, inc_dec::execute_inc));
    entries.extend(family(0x10, "DEC", Implied, 1, 2, inc_dec::execute_dec));
    entries.extend(family(0x20, "SHL", Implied, 1, 2, shifts::execute_shl));
    entries.extend(family(0x28, "SHR", Implied, 1, 2, shifts::execute_shr));
    entries.extend(family(0x30, "SHLC", Implied, 1, 2, shifts::execute_shlc));
    entries.extend(family(0x38, "SETQ", Implied, 1, 1, io::execute_setq));
    entries.extend(family(0x40, "PUSH", Implied, 1, 3, stack::execute_push));
    entries.extend(family(0x48, "POP", Implied, 1, 4, stack::execute_pop));
    entries.extend(family(0x50, "SHRC", Implied, 1, 2, shifts::execute_shrc));
    entries.extend(family(0x58, "RESETQ", Implied, 1, 1, io::execute_resetq));
    entries.extend(family(0x60, "LBRQ", Absolute, 3, 3, branches::execute_lbrq));
    entries.extend(family(0xA0, "ADI", Immediate, 2, 2, alu::execute_adi));
    entries.extend(family(0xA8, "SUBI", Immediate, 2, 2, alu::execute_subi));
    entries.extend(family(0xB0, "ANI", Immediate, 2, 2, alu::execute_ani));
    entries.extend(family(0xB8, "ORI", Immediate, 2, 2, alu::execute_ori));
    entries.extend(family(0xC0, "XRI", Immediate, 2, 2, alu::execute_xri));
    entries.extend(family(0xC8, "ADM", Absolute, 3, 4, alu::execute_adm));
    entries.extend(family(0xD0, "SUBM", Absolute, 3, 4, alu::execute_subm));
    entries.extend(family(0xD8, "LDM", Absolute, 3, 4, load_store::execute_ldm));
    entries.extend(family(0xE0, "LDI", Immediate, 2, 2, load_store::execute_ldi));
    entries.extend(family(0xE8, "STI", Absolute, 3, 4, load_store::execute_sti));

    entries
}

/// Builds a fresh 256-entry table: populate defined opcodes, fill every
/// remaining slot with a documented-cost no-op, fail if any opcode byte was
/// claimed twice.
pub(crate) fn build_instruction_set(architecture: Architecture) -> Result<InstructionSet, InstructionSetError> {
    let mut slots: [Option<InstructionDescriptor>; 256] = [None; 256];

    for (opcode, name, mode, length, cycles, handler) in defined_opcodes() {
        if slots[opcode as usize].is_some() {
            return Err(InstructionSetError::DuplicateOpcode(opcode));
        }
        slots[opcode as usize] = Some(InstructionDescriptor {
            name,
            mode,
            opcode,
            length,
            cycles,
            handler,
        });
    }

    let mut table = [unused_descriptor(0); 256];
    for (opcode, slot) in slots.into_iter().enumerate() {
        table[opcode] = slot.unwrap_or_else(|| unused_descriptor(opcode as u8));
    }

    let mut by_mnemonic: HashMap<String, Vec<InstructionDescriptor>> = HashMap::new();
    for descriptor in table.iter().filter(|d| d.name != UNUSED_NAME) {
        by_mnemonic
            .entry(descriptor.name.to_ascii_uppercase())
            .or_default()
            .push(*descriptor);
    }

    log::debug!(
        "built {:?} instruction set: {} defined opcodes, {} undefined",
        architecture,
        table.iter().filter(|d| d.name != UNUSED_NAME).count(),
        table.iter().filter(|d| d.name == UNUSED_NAME).count(),
    );

    Ok(InstructionSet {
        architecture,
        table,
        by_mnemonic,
    })
}

static NMOS_SET: OnceLock<InstructionSet> = OnceLock::new();
static CMOS_SET: OnceLock<InstructionSet> = OnceLock::new();

/// Returns the static, memoized instruction-set table for `architecture`,
/// building it on first use.
///
/// # Panics
///
/// Panics if the crate's own static opcode table has a duplicate opcode —
/// that would be a bug in this crate, not a condition any caller can
/// trigger, per spec.md §7.
pub fn get_instruction_set(architecture: Architecture) -> &'static InstructionSet {
    let cell = match architecture {
        Architecture::Nmos => &NMOS_SET,
        Architecture::Cmos => &CMOS_SET,
    };
    cell.get_or_init(|| {
        build_instruction_set(architecture).expect("CPU1 static opcode table must not assign an opcode twice")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opcode_has_an_entry() {
        let set = get_instruction_set(Architecture::Nmos);
        for opcode in 0..=255u8 {
            assert_eq!(set.lookup(opcode).opcode, opcode);
        }
    }

    #[test]
    fn pinned_opcodes_match_spec_scenarios() {
        let set = get_instruction_set(Architecture::Nmos);
        assert_eq!(set.lookup(0x00).name, "NOP");
        assert_eq!(set.lookup(0x01).name, "HALT");
        assert_eq!(set.lookup(0x18).name, "LBR");
        assert_eq!(set.lookup(0x80).name, "ADR");
        assert_eq!(set.lookup(0x40).name, "PUSH");
        assert_eq!(set.lookup(0x48).name, "POP");
        assert_eq!(set.lookup(0x38).name, "SETQ");
        assert_eq!(set.lookup(0xE0).name, "LDI");
        assert_eq!(set.lookup(0xE8).name, "STI");

        assert_eq!(set.lookup(0xE0).cycles, 2);
        assert_eq!(set.lookup(0xE8).cycles, 4);
        assert_eq!(set.lookup(0x80).cycles, 3);
        assert_eq!(set.lookup(0x38).cycles, 1);
        assert_eq!(set.lookup(0x00).cycles, 1);
    }

    #[test]
    fn required_undefined_opcodes_stay_undefined() {
        let set = get_instruction_set(Architecture::Nmos);
        for opcode in [0x06u8, 0x07, 0x1C, 0x1D, 0x1E] {
            assert_eq!(set.lookup(opcode).name, UNUSED_NAME);
            assert_eq!(set.lookup(opcode).length, 1);
            assert_eq!(set.lookup(opcode).cycles, 1);
        }
    }

    #[test]
    fn register_in_opcode_families_cover_all_eight_registers() {
        let set = get_instruction_set(Architecture::Nmos);
        let ldi = set.get_instructions("LDI");
        assert_eq!(ldi.len(), 8);
        let opcodes: Vec<u8> = ldi.iter().map(|d| d.opcode).collect();
        assert_eq!(opcodes, (0xE0..=0xE7).collect::<Vec<u8>>());
    }

    #[test]
    fn mnemonic_lookup_is_case_insensitive() {
        let set = get_instruction_set(Architecture::Nmos);
        assert_eq!(set.get_instructions("nop").len(), 1);
        assert_eq!(set.get_instructions("NOP").len(), 1);
    }

    #[test]
    fn unused_slot_marker_is_not_indexed_by_mnemonic() {
        let set = get_instruction_set(Architecture::Nmos);
        assert!(set.get_instructions(UNUSED_NAME).is_empty());
    }

    #[test]
    fn both_architectures_share_the_same_defined_opcode_count() {
        let nmos = get_instruction_set(Architecture::Nmos);
        let cmos = get_instruction_set(Architecture::Cmos);
        let count = |s: &InstructionSet| (0..=255u8).filter(|&op| s.lookup(op).name != UNUSED_NAME).count();
        assert_eq!(count(nmos), count(cmos));
        assert_eq!(count(nmos), 184);
    }
}
