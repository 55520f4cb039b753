//! Pomodoro sequencer.
//!
//! A tick-driven state machine over work and break segments. It owns no
//! thread or timer; the caller invokes `tick()` once per second while the
//! sequencer is running.
//!
//! ## Transitions
//!
//! ```text
//! tick at 00:00  -> advance cursor (wrapping), load next segment, keep running
//! switch_mode(m) -> stop, load m, cursor = first occurrence of m
//! reset()        -> stop, reload current segment, cursor unchanged
//! sequence edit  -> cursor = 0
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::alert::Chime;
use super::sequence::{Durations, Mode, Sequence, SequenceEntry};
use crate::error::ValidationError;
use crate::events::Event;

/// A `(minutes, seconds)` pair that only moves toward 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    pub fn full(minutes: u32) -> Self {
        Self { minutes, seconds: 0 }
    }

    /// The countdown one second later, or `None` once it sits at 00:00.
    pub fn tick(self) -> Option<Self> {
        match (self.minutes, self.seconds) {
            (_, s) if s > 0 => Some(Self {
                minutes: self.minutes,
                seconds: s - 1,
            }),
            (m, _) if m > 0 => Some(Self {
                minutes: m - 1,
                seconds: 59,
            }),
            _ => None,
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }

    pub fn display(&self) -> String {
        format_time(i64::from(self.minutes), i64::from(self.seconds))
    }
}

/// Render `MM:SS`, flooring negative parts at zero.
pub fn format_time(minutes: i64, seconds: i64) -> String {
    format!("{:02}:{:02}", minutes.max(0), seconds.max(0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroSequencer {
    sequence: Sequence,
    durations: Durations,
    mode: Mode,
    remaining: Countdown,
    running: bool,
    /// Index into the expanded sequence.
    cursor: usize,
    sound_enabled: bool,
}

impl PomodoroSequencer {
    /// Idle at the first segment of `sequence`.
    pub fn new(sequence: Sequence, durations: Durations) -> Self {
        let mode = sequence.expand().first().copied().unwrap_or(Mode::Work);
        Self {
            remaining: Countdown::full(durations.get(mode)),
            sequence,
            durations,
            mode,
            running: false,
            cursor: 0,
            sound_enabled: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> Countdown {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn display(&self) -> String {
        self.remaining.display()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            running: self.running,
            cursor: self.cursor,
            minutes: self.remaining.minutes,
            seconds: self.remaining.seconds,
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            cursor: self.cursor,
            remaining_secs: self.remaining.total_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining.total_secs(),
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advance one second. Returns `Some(Event::SegmentCompleted)` when the
    /// segment that was sitting at 00:00 hands over to the next one.
    pub fn tick(&mut self, chime: &dyn Chime) -> Option<Event> {
        if !self.running {
            return None;
        }
        match self.remaining.tick() {
            Some(next) => {
                self.remaining = next;
                None
            }
            None => Some(self.complete(chime)),
        }
    }

    /// Stop and select `mode` directly.
    ///
    /// The cursor jumps to the first occurrence of `mode`, not the nearest.
    pub fn switch_mode(&mut self, mode: Mode) -> Event {
        self.running = false;
        self.mode = mode;
        self.remaining = Countdown::full(self.durations.get(mode));
        self.cursor = self.sequence.first_index_of(mode).unwrap_or(0);
        debug!(mode = %mode, cursor = self.cursor, "mode switched");
        Event::ModeSwitched {
            mode,
            cursor: self.cursor,
            at: Utc::now(),
        }
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.remaining = Countdown::full(self.durations.get(self.mode));
        Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        }
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Change a mode's length. The active segment picks it up immediately,
    /// even mid-countdown.
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) -> Result<Event, ValidationError> {
        self.durations.set(mode, minutes)?;
        if mode == self.mode {
            self.remaining = Countdown::full(minutes);
        }
        Ok(Event::DurationChanged {
            mode,
            minutes,
            at: Utc::now(),
        })
    }

    // ── Sequence editing ─────────────────────────────────────────────

    pub fn add_entry(&mut self, entry: SequenceEntry) -> Event {
        self.sequence.push(entry);
        self.sequence_edited()
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Event, ValidationError> {
        self.sequence.remove(index)?;
        Ok(self.sequence_edited())
    }

    pub fn move_entry_up(&mut self, index: usize) -> Result<Event, ValidationError> {
        self.sequence.move_up(index)?;
        Ok(self.sequence_edited())
    }

    pub fn move_entry_down(&mut self, index: usize) -> Result<Event, ValidationError> {
        self.sequence.move_down(index)?;
        Ok(self.sequence_edited())
    }

    pub fn set_entry_mode(&mut self, index: usize, mode: Mode) -> Result<Event, ValidationError> {
        self.sequence.set_mode(index, mode)?;
        Ok(self.sequence_edited())
    }

    pub fn set_entry_count(&mut self, index: usize, count: u32) -> Result<Event, ValidationError> {
        self.sequence.set_count(index, count)?;
        Ok(self.sequence_edited())
    }

    /// Replace the whole sequence.
    pub fn set_sequence(&mut self, sequence: Sequence) -> Event {
        self.sequence = sequence;
        self.sequence_edited()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn sequence_edited(&mut self) -> Event {
        self.cursor = 0;
        Event::SequenceChanged {
            expanded_len: self.sequence.expanded_len(),
            at: Utc::now(),
        }
    }

    fn complete(&mut self, chime: &dyn Chime) -> Event {
        if self.sound_enabled {
            if let Err(e) = chime.ring() {
                debug!(error = %e, "completion alert failed");
            }
        }

        let expanded = self.sequence.expand();
        let from_mode = self.mode;
        self.cursor = if expanded.is_empty() {
            0
        } else {
            (self.cursor + 1) % expanded.len()
        };
        self.mode = expanded.get(self.cursor).copied().unwrap_or(self.mode);
        self.remaining = Countdown::full(self.durations.get(self.mode));
        self.running = true;

        info!(from = %from_mode, to = %self.mode, cursor = self.cursor, "segment completed");
        Event::SegmentCompleted {
            from_mode,
            to_mode: self.mode,
            cursor: self.cursor,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroSequencer {
    fn default() -> Self {
        Self::new(Sequence::default(), Durations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlertError;
    use crate::timer::Silent;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingChime {
        rings: Cell<u32>,
    }

    impl Chime for CountingChime {
        fn ring(&self) -> Result<(), AlertError> {
            self.rings.set(self.rings.get() + 1);
            Ok(())
        }
    }

    struct BrokenChime;

    impl Chime for BrokenChime {
        fn ring(&self) -> Result<(), AlertError> {
            Err(AlertError::Unavailable("autoplay blocked".into()))
        }
    }

    fn work_then_short() -> PomodoroSequencer {
        let sequence = Sequence::new(vec![
            SequenceEntry::new(Mode::Work, 1),
            SequenceEntry::new(Mode::ShortBreak, 1),
        ])
        .unwrap();
        PomodoroSequencer::new(sequence, Durations::default())
    }

    /// Run ticks until the current segment completes.
    fn run_out(seq: &mut PomodoroSequencer, chime: &dyn Chime) -> Event {
        let ticks = seq.remaining().total_secs() + 1;
        for _ in 1..ticks {
            assert!(seq.tick(chime).is_none());
        }
        seq.tick(chime).expect("segment should complete")
    }

    #[test]
    fn countdown_borrows_a_minute() {
        let c = Countdown { minutes: 1, seconds: 0 };
        assert_eq!(c.tick(), Some(Countdown { minutes: 0, seconds: 59 }));
        assert_eq!(Countdown { minutes: 0, seconds: 0 }.tick(), None);
    }

    #[test]
    fn format_time_never_goes_negative() {
        assert_eq!(format_time(-1, -5), "00:00");
        assert_eq!(format_time(5, 7), "05:07");
        assert_eq!(format_time(125, 0), "125:00");
    }

    #[test]
    fn tick_does_nothing_while_idle() {
        let mut seq = PomodoroSequencer::default();
        let before = seq.remaining();
        assert!(seq.tick(&Silent).is_none());
        assert_eq!(seq.remaining(), before);
    }

    #[test]
    fn completion_advances_and_keeps_running() {
        let mut seq = work_then_short();
        seq.start();
        let event = run_out(&mut seq, &Silent);
        assert!(matches!(
            event,
            Event::SegmentCompleted {
                from_mode: Mode::Work,
                to_mode: Mode::ShortBreak,
                cursor: 1,
                ..
            }
        ));
        assert_eq!(seq.mode(), Mode::ShortBreak);
        assert!(seq.is_running());
        assert_eq!(seq.remaining(), Countdown::full(5));

        run_out(&mut seq, &Silent);
        assert_eq!(seq.mode(), Mode::Work);
        assert_eq!(seq.cursor(), 0);
        assert!(seq.is_running());
    }

    #[test]
    fn reset_mid_countdown_restores_full_duration() {
        let mut seq = PomodoroSequencer::default();
        seq.start();
        for _ in 0..(14 * 60 + 30) {
            seq.tick(&Silent);
        }
        assert_eq!(seq.remaining(), Countdown { minutes: 10, seconds: 30 });
        seq.reset();
        assert_eq!(seq.remaining(), Countdown { minutes: 25, seconds: 0 });
        assert!(!seq.is_running());
    }

    #[test]
    fn reset_keeps_cursor() {
        let mut seq = PomodoroSequencer::default();
        seq.start();
        run_out(&mut seq, &Silent);
        assert_eq!(seq.cursor(), 1);
        seq.reset();
        assert_eq!(seq.cursor(), 1);
    }

    #[test]
    fn switch_mode_jumps_to_first_occurrence() {
        let mut seq = PomodoroSequencer::default();
        seq.start();
        seq.switch_mode(Mode::LongBreak);
        assert_eq!(seq.cursor(), 8);
        assert!(!seq.is_running());
        assert_eq!(seq.remaining(), Countdown::full(15));

        seq.switch_mode(Mode::ShortBreak);
        assert_eq!(seq.cursor(), 4);
    }

    #[test]
    fn switch_to_mode_missing_from_sequence_uses_cursor_zero() {
        let mut seq = work_then_short();
        let event = seq.switch_mode(Mode::LongBreak);
        assert!(matches!(event, Event::ModeSwitched { cursor: 0, .. }));
        assert_eq!(seq.mode(), Mode::LongBreak);
    }

    #[test]
    fn editing_the_sequence_resets_cursor_only() {
        let mut seq = PomodoroSequencer::default();
        seq.start();
        run_out(&mut seq, &Silent);
        seq.tick(&Silent);
        let remaining = seq.remaining();

        seq.set_entry_count(0, 2).unwrap();
        assert_eq!(seq.cursor(), 0);
        assert!(seq.is_running());
        assert_eq!(seq.remaining(), remaining);
    }

    #[test]
    fn failed_edit_leaves_cursor_alone() {
        let mut seq = work_then_short();
        seq.start();
        run_out(&mut seq, &Silent);
        assert!(seq.remove_entry(9).is_err());
        assert_eq!(seq.cursor(), 1);
    }

    #[test]
    fn duration_edit_applies_to_active_mode_even_while_running() {
        let mut seq = PomodoroSequencer::default();
        seq.start();
        seq.tick(&Silent);
        seq.set_duration(Mode::Work, 50).unwrap();
        assert_eq!(seq.remaining(), Countdown::full(50));

        seq.set_duration(Mode::LongBreak, 20).unwrap();
        assert_eq!(seq.remaining(), Countdown::full(50));
        assert_eq!(seq.durations().long_break, 20);
    }

    #[test]
    fn chime_rings_once_per_completion_when_enabled() {
        let chime = CountingChime::default();
        let mut seq = work_then_short();
        seq.set_duration(Mode::Work, 1).unwrap();
        seq.start();
        run_out(&mut seq, &chime);
        assert_eq!(chime.rings.get(), 1);

        seq.set_sound_enabled(false);
        run_out(&mut seq, &chime);
        assert_eq!(chime.rings.get(), 1);
    }

    #[test]
    fn broken_chime_does_not_stop_sequencing() {
        let mut seq = work_then_short();
        seq.set_duration(Mode::Work, 1).unwrap();
        seq.start();
        run_out(&mut seq, &BrokenChime);
        assert_eq!(seq.mode(), Mode::ShortBreak);
        assert!(seq.is_running());
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut seq = PomodoroSequencer::default();
        assert!(seq.start().is_some());
        assert!(seq.start().is_none());
        assert!(seq.toggle().is_some());
        assert!(!seq.is_running());
    }
}
