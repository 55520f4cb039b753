use clap::Subcommand;
use questlog_core::theme::{find_theme, THEMES};
use questlog_core::{theme_config, Config};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// List available themes
    List,
    /// Show the active theme
    Show,
    /// Select a theme by key or display name
    Set {
        /// e.g. "spy", "scifi", "Arcade / Retro"
        name: String,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ThemeAction::List => {
            let config = Config::load()?;
            let active = theme_config(&config.ui.theme).key;
            for theme in &THEMES {
                let marker = if theme.key == active { "*" } else { " " };
                println!("{marker} {:<8} {}", theme.key.as_str(), theme.name);
            }
        }
        ThemeAction::Show => {
            let config = Config::load()?;
            let theme = theme_config(&config.ui.theme);
            println!("{}", serde_json::to_string_pretty(theme)?);
        }
        ThemeAction::Set { name } => {
            let theme = find_theme(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
            let mut config = Config::load()?;
            config.set("ui.theme", theme.name)?;
            println!("theme set to {}", theme.name);
        }
    }
    Ok(())
}
