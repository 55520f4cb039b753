mod alert;
mod sequence;
mod sequencer;

pub use alert::{Chime, Silent, TerminalBell};
pub use sequence::{Durations, Mode, Sequence, SequenceEntry, MAX_REPEAT, MIN_REPEAT};
pub use sequencer::{format_time, Countdown, PomodoroSequencer};
