//! One-shot audible alert played when a segment completes.
//!
//! Alerts are best effort: the sequencer logs and drops any error.

use std::io::Write;

use crate::error::AlertError;

pub trait Chime {
    fn ring(&self) -> Result<(), AlertError>;
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Chime for Silent {
    fn ring(&self) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Rings the terminal bell on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn ring(&self) -> Result<(), AlertError> {
        let mut out = std::io::stdout().lock();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}
