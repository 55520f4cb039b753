//! Themed notification copy.
//!
//! Lookup is a fallback chain, not a flat table:
//!
//! ```text
//! theme  (unknown -> DEFAULT_THEME)
//!   type (unset or unknown -> FALLBACK_TYPE)
//!     stage (1..=3, anything else -> no message)
//! ```

use chrono::{DateTime, Utc};

use super::stage::NotificationStage;
use crate::task::TaskType;

/// Theme used when the requested theme has no copy.
pub const DEFAULT_THEME: &str = "sci-fi / space mission";
/// Type used when the task has no type or the theme lacks it.
pub const FALLBACK_TYPE: TaskType = TaskType::Everyday;

/// Whole units left until a deadline, as fed to the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl TimeLeft {
    /// Days round up; hours and minutes round up and never drop below 1.
    pub fn until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let ms = (deadline - now).num_milliseconds();
        Self {
            days: ceil_div(ms, 86_400_000),
            hours: ceil_div(ms, 3_600_000).max(1),
            minutes: ceil_div(ms, 60_000).max(1),
        }
    }
}

fn ceil_div(value: i64, unit: i64) -> i64 {
    if value > 0 {
        (value + unit - 1) / unit
    } else {
        value / unit
    }
}

/// Stage lines for one task type: approaching, due soon, imminent.
type StageLines = [&'static str; 3];

struct ThemeCopy {
    name: &'static str,
    prefix: &'static str,
    types: &'static [(TaskType, StageLines)],
}

const CATALOG: &[ThemeCopy] = &[
    ThemeCopy {
        name: "spy thriller",
        prefix: "Agent",
        types: &[
            (TaskType::Everyday, [
                "Maintain cover and stay sharp.",
                "Rendezvous imminent.",
                "Finalize your mission dossier!",
            ]),
            (TaskType::Math, [
                "Crack the code for the operation.",
                "Prepare for cipher decryption.",
                "Solve the equation to unlock the safe!",
            ]),
            (TaskType::English, [
                "Compose your secret report.",
                "Edit your message for HQ.",
                "Transmit your final draft!",
            ]),
            (TaskType::Science, [
                "Prepare your experiment log.",
                "Analyze and report findings.",
                "Submit your results to HQ!",
            ]),
            (TaskType::History, [
                "Chronicle your covert journey.",
                "Archive your discoveries.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "Stay vigilant for new intel.",
                "Prepare for the next operation.",
                "Complete your mission!",
            ]),
        ],
    },
    ThemeCopy {
        name: "sci-fi / space mission",
        prefix: "Mission",
        types: &[
            (TaskType::Everyday, [
                "Maintain life support and systems check.",
                "Prepare for countdown.",
                "Initiate launch sequence!",
            ]),
            (TaskType::Math, [
                "Calculate trajectory for orbit.",
                "Finalize navigation equations.",
                "Solve for mission success!",
            ]),
            (TaskType::English, [
                "Compose your log for the archives.",
                "Edit and transmit your message.",
                "Final draft required for uplink!",
            ]),
            (TaskType::Science, [
                "Prepare your experiment log.",
                "Analyze and report findings.",
                "Submit your results to Mission Control!",
            ]),
            (TaskType::History, [
                "Chronicle your journey.",
                "Archive your discoveries.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "Stay vigilant, new quest awaits.",
                "Prepare for the next challenge.",
                "Complete your mission!",
            ]),
        ],
    },
    ThemeCopy {
        name: "fantasy rpg",
        prefix: "Quest",
        types: &[
            (TaskType::Everyday, [
                "Prepare your party and supplies.",
                "The final battle approaches.",
                "Complete your quest for glory!",
            ]),
            (TaskType::Math, [
                "Solve the ancient riddle.",
                "The puzzle awaits your mind.",
                "Unlock the magic door!",
            ]),
            (TaskType::English, [
                "Write your legend in the tome.",
                "Edit your epic tale.",
                "Scribe your final words!",
            ]),
            (TaskType::Science, [
                "Brew your potions and study the stars.",
                "Complete your magical research.",
                "Present your findings to the guild!",
            ]),
            (TaskType::History, [
                "Chronicle your adventure.",
                "Archive your saga.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "A new adventure awaits.",
                "Prepare for the unknown.",
                "Complete your mission!",
            ]),
        ],
    },
    ThemeCopy {
        name: "theatre / drama",
        prefix: "Act",
        types: &[
            (TaskType::Everyday, [
                "Rehearse your lines and cues.",
                "The curtain rises soon.",
                "Take your place on stage!",
            ]),
            (TaskType::Math, [
                "Calculate the perfect timing.",
                "The spotlight is on your solution.",
                "Deliver your answer with flair!",
            ]),
            (TaskType::English, [
                "Write your monologue.",
                "Edit your script.",
                "Perform your final lines!",
            ]),
            (TaskType::Science, [
                "Prepare your stage experiment.",
                "Analyze your dramatic results.",
                "Present your findings to the audience!",
            ]),
            (TaskType::History, [
                "Chronicle your dramatic journey.",
                "Archive your performance.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "The next act awaits.",
                "Prepare for your encore.",
                "Complete your mission!",
            ]),
        ],
    },
    ThemeCopy {
        name: "greek mythology",
        prefix: "Trial",
        types: &[
            (TaskType::Everyday, [
                "Prepare for the gods' challenge.",
                "Zeus is watching.",
                "Complete your heroic deed!",
            ]),
            (TaskType::Math, [
                "Solve the riddle of the Sphinx.",
                "The Oracle awaits your answer.",
                "Prove your wisdom to the gods!",
            ]),
            (TaskType::English, [
                "Write your epic for Olympus.",
                "Edit your mythic tale.",
                "Scribe your final words!",
            ]),
            (TaskType::Science, [
                "Prepare your experiment for the gods.",
                "Analyze your divine results.",
                "Present your findings to Olympus!",
            ]),
            (TaskType::History, [
                "Chronicle your mythic journey.",
                "Archive your legend.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "The next labor awaits.",
                "Prepare for your fate.",
                "Complete your mission!",
            ]),
        ],
    },
    ThemeCopy {
        name: "arcade / retro",
        prefix: "Level",
        types: &[
            (TaskType::Everyday, [
                "Get ready for the next stage.",
                "Insert coin to continue.",
                "Beat the high score!",
            ]),
            (TaskType::Math, [
                "Calculate your bonus points.",
                "Prepare for the boss fight.",
                "Solve to win the game!",
            ]),
            (TaskType::English, [
                "Write your name on the leaderboard.",
                "Edit your entry for the hall of fame.",
                "Enter your final initials!",
            ]),
            (TaskType::Science, [
                "Prepare your power-ups and gadgets.",
                "Analyze your score multipliers.",
                "Present your findings to the arcade master!",
            ]),
            (TaskType::History, [
                "Chronicle your retro journey.",
                "Archive your high scores.",
                "Complete your logbook!",
            ]),
            (TaskType::Other, [
                "The next challenge awaits.",
                "Prepare for the next round.",
                "Complete your mission!",
            ]),
        ],
    },
];

/// One link of the chain: the entry for `key`, else the entry for `fallback`.
fn resolve<'a, K, V>(entries: &'a [V], key: &K, fallback: &K, key_of: impl Fn(&V) -> &K) -> Option<&'a V>
where
    K: PartialEq + ?Sized,
{
    entries
        .iter()
        .find(|e| key_of(e) == key)
        .or_else(|| entries.iter().find(|e| key_of(e) == fallback))
}

/// Themed copy for `(theme_name, task_type, stage)`, or `None` when the
/// stage carries no banner.
pub fn message(
    theme_name: &str,
    task_type: Option<TaskType>,
    stage: NotificationStage,
    left: TimeLeft,
) -> Option<String> {
    let theme_key = theme_name.trim().to_lowercase();
    let theme = resolve(CATALOG, theme_key.as_str(), DEFAULT_THEME, |t| t.name)?;

    let wanted = task_type.unwrap_or(FALLBACK_TYPE);
    let (_, lines) = resolve(theme.types, &wanted, &FALLBACK_TYPE, |(t, _)| t)?;

    let prefix = theme.prefix;
    match stage {
        NotificationStage::Approaching => Some(format!(
            "{prefix}: {} days left. {}",
            left.days, lines[0]
        )),
        NotificationStage::DueSoon => Some(format!("{prefix}: Less than a day left. {}", lines[1])),
        NotificationStage::Imminent => Some(format!(
            "{prefix}: {} hours ({} min) left. {}",
            left.hours, left.minutes, lines[2]
        )),
        NotificationStage::Distant => None,
    }
}

/// Names of every theme that has notification copy.
pub fn themes_with_copy() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|t| t.name)
}
