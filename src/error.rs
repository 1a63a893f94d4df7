// Error types
//
// The interpreter classifies exactly two fault kinds (see spec §7):
// an undefined opcode reaching dispatch, and a ROM image the loader
// can't accept. Every other memory/register operation on the SM83
// always succeeds.

use thiserror::Error;

/// Errors the emulator core can report to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    /// An undefined base or CB-prefixed opcode reached the step engine.
    #[error("unknown opcode 0x{opcode:02X} at 0x{pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// `load_rom` was given bytes it cannot accept.
    #[error("failed to load ROM: {reason}")]
    RomLoadFailed { reason: String },
}
