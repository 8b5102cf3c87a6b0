//! Terminal bell as the flip sound.

use std::io::Write;
use strictly_memory::SoundEffects;
use tracing::debug;

/// Rings the terminal bell on every flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl SoundEffects for TerminalBell {
    fn play_flip(&mut self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            debug!(error = %e, "Bell failed");
        }
    }
}
