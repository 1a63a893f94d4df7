// Emulator configuration
//
// Passed to `Emulator::create`. The only switch the core itself reads
// is `debug`, which enables the per-step trace log (see spec §7).

/// Construction-time options for an `Emulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// When true, `Emulator::step` logs a per-step trace line
    /// (PC, SP, opcode, register contents) at `log::Level::Trace`.
    pub debug: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self { debug: false }
    }
}
