use std::io::Write;

use clap::Subcommand;
use questlog_core::timer::TerminalBell;
use questlog_core::{format_time, Config, Event, Mode, PomodoroSequencer, SequenceEntry, Ticker};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the sequence, advancing automatically until Ctrl-C
    Run {
        /// Start from this mode instead of the first segment
        #[arg(long)]
        mode: Option<Mode>,
        /// Do not ring the bell when a segment ends
        #[arg(long)]
        no_sound: bool,
        /// Stop after this many completed segments
        #[arg(long)]
        segments: Option<u32>,
    },
    /// Show or edit the work/break sequence
    Sequence {
        #[command(subcommand)]
        action: Option<SequenceAction>,
    },
    /// Set the length of a mode in minutes
    Duration {
        /// work, shortBreak or longBreak
        mode: Mode,
        minutes: u32,
    },
    /// Render minutes and seconds as MM:SS
    Format {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
}

#[derive(Subcommand)]
pub enum SequenceAction {
    /// Append an entry
    Add {
        mode: Mode,
        #[arg(default_value = "1")]
        count: u32,
    },
    /// Remove the entry at INDEX
    Remove { index: usize },
    /// Move the entry at INDEX one place earlier
    Up { index: usize },
    /// Move the entry at INDEX one place later
    Down { index: usize },
    /// Change the mode and/or repeat count of the entry at INDEX
    Edit {
        index: usize,
        #[arg(long)]
        mode: Option<Mode>,
        #[arg(long)]
        count: Option<u32>,
    },
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            mode,
            no_sound,
            segments,
        } => {
            let config = Config::load()?;
            let mut seq = config.sequencer();
            if no_sound {
                seq.set_sound_enabled(false);
            }
            if let Some(mode) = mode {
                seq.switch_mode(mode);
            }
            run_loop(&mut seq, segments).await?;
        }
        TimerAction::Sequence { action } => {
            let mut config = Config::load()?;
            let mut seq = config.sequencer();
            if let Some(action) = action {
                let event = edit_sequence(&mut seq, action)?;
                config.pomodoro.sequence = seq.sequence().clone();
                config.save()?;
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            print_sequence(&seq);
        }
        TimerAction::Duration { mode, minutes } => {
            let mut config = Config::load()?;
            let mut seq = config.sequencer();
            let event = seq.set_duration(mode, minutes)?;
            let durations = seq.durations();
            config.pomodoro.work_duration = durations.work;
            config.pomodoro.short_break_duration = durations.short_break;
            config.pomodoro.long_break_duration = durations.long_break;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Format { minutes, seconds } => {
            println!("{}", format_time(minutes, seconds));
        }
    }
    Ok(())
}

fn edit_sequence(
    seq: &mut PomodoroSequencer,
    action: SequenceAction,
) -> Result<Event, Box<dyn std::error::Error>> {
    let event = match action {
        SequenceAction::Add { mode, count } => seq.add_entry(SequenceEntry::new(mode, count)),
        SequenceAction::Remove { index } => seq.remove_entry(index)?,
        SequenceAction::Up { index } => seq.move_entry_up(index)?,
        SequenceAction::Down { index } => seq.move_entry_down(index)?,
        SequenceAction::Edit { index, mode, count } => {
            if mode.is_none() && count.is_none() {
                return Err("nothing to change: pass --mode and/or --count".into());
            }
            let mut event = None;
            if let Some(mode) = mode {
                event = Some(seq.set_entry_mode(index, mode)?);
            }
            if let Some(count) = count {
                event = Some(seq.set_entry_count(index, count)?);
            }
            event.ok_or("nothing to change")?
        }
    };
    Ok(event)
}

fn print_sequence(seq: &PomodoroSequencer) {
    for (i, entry) in seq.sequence().entries().iter().enumerate() {
        println!("{i}: {} x{}", entry.mode, entry.count);
    }
    let expanded: Vec<String> = seq
        .sequence()
        .expand()
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            if i == seq.cursor() {
                format!("[{mode}]")
            } else {
                mode.to_string()
            }
        })
        .collect();
    println!("expanded: {}", expanded.join(" -> "));
}

/// Drive the sequencer from a one-second ticker until Ctrl-C or the
/// requested number of segments completed.
async fn run_loop(
    seq: &mut PomodoroSequencer,
    segments: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chime = TerminalBell;
    let mut ticker = Ticker::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if let Some(event) = seq.start() {
        println!("{}", serde_json::to_string(&event)?);
    }
    print_banner(seq.mode());

    let mut completed = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = seq.tick(&chime) {
                    println!();
                    println!("{}", serde_json::to_string(&event)?);
                    print_banner(seq.mode());
                    completed += 1;
                    if segments.is_some_and(|limit| completed >= limit) {
                        break;
                    }
                }
                print!("\r{} {}", seq.mode().label(), seq.display());
                std::io::stdout().flush()?;
            }
            _ = &mut ctrl_c => {
                println!();
                if let Some(event) = seq.pause() {
                    println!("{}", serde_json::to_string(&event)?);
                }
                break;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&seq.snapshot())?);
    Ok(())
}

fn print_banner(mode: Mode) {
    let (title, line) = mode.banner();
    println!("{title}");
    println!("  {line}");
}
