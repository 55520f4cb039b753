//! Selectable UI themes.
//!
//! Only copy lives here (headings, prefixes, taglines). Notification copy is
//! keyed by display name in [`crate::notification::catalog`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKey {
    Spy,
    Scifi,
    Arcade,
}

impl ThemeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKey::Spy => "spy",
            ThemeKey::Scifi => "scifi",
            ThemeKey::Arcade => "arcade",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    pub key: ThemeKey,
    pub name: &'static str,
    pub heading: &'static str,
    pub task_prefix: &'static str,
    /// Shown under every task that is still open.
    pub incomplete_line: &'static str,
}

pub static THEMES: [ThemeConfig; 3] = [
    ThemeConfig {
        key: ThemeKey::Spy,
        name: "Spy Thriller",
        heading: "Agent: Focus Protocol",
        task_prefix: "Encrypted Directive:",
        incomplete_line: "Agent: This directive is still active. Proceed with caution.",
    },
    ThemeConfig {
        key: ThemeKey::Scifi,
        name: "Sci-Fi / Space Mission",
        heading: "Mission Control",
        task_prefix: "Protocol:",
        incomplete_line: "Mission Control: Task incomplete. Awaiting your next move.",
    },
    ThemeConfig {
        key: ThemeKey::Arcade,
        name: "Arcade / Retro",
        heading: "Task Invaders",
        task_prefix: "Level:",
        incomplete_line: "Insert coin to continue your quest!",
    },
];

/// Theme with the given display name, or the spy theme.
pub fn theme_config(name: &str) -> &'static ThemeConfig {
    THEMES
        .iter()
        .find(|t| t.name == name)
        .unwrap_or(&THEMES[0])
}

/// Case-insensitive lookup by display name or key; `None` when unknown.
pub fn find_theme(name: &str) -> Option<&'static ThemeConfig> {
    let wanted = name.trim().to_lowercase();
    THEMES
        .iter()
        .find(|t| t.name.to_lowercase() == wanted || t.key.as_str() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_spy() {
        assert_eq!(theme_config("Vaporwave").key, ThemeKey::Spy);
        assert_eq!(theme_config("Arcade / Retro").heading, "Task Invaders");
    }

    #[test]
    fn find_accepts_key_or_name() {
        assert_eq!(find_theme("scifi").map(|t| t.key), Some(ThemeKey::Scifi));
        assert_eq!(find_theme("arcade / retro").map(|t| t.key), Some(ThemeKey::Arcade));
        assert!(find_theme("vaporwave").is_none());
    }
}
