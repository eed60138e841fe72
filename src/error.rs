//! # Construction-Time Errors
//!
//! Per spec.md §7, the core has exactly one class of fatal error:
//! instruction-set construction. Everything else — undefined opcodes,
//! 8-bit/stack-pointer wraparound — is documented behavior, not failure,
//! and has no `Result` anywhere in its path.

use thiserror::Error;

/// Errors that can occur while building an [`crate::InstructionSet`].
///
/// These are configuration errors: they indicate a bug in the static
/// opcode table baked into this crate, not a runtime condition a caller can
/// trigger or recover from.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionSetError {
    /// Two defined-opcode table entries claim the same opcode byte.
    #[error("opcode 0x{0:02X} is assigned to more than one instruction")]
    DuplicateOpcode(u8),
}
