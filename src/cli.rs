use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::config::GameConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
}

impl FromStr for GameKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "snake" => Ok(GameKind::Snake),
            other => Err(Error::InvalidCliArgument(format!(
                "unknown game `{}`, expected one of: snake",
                other
            ))),
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about = "Snake with menus and a leaderboard", long_about = None)]
pub struct Cli {
    /// Game to run. Only `snake` exists.
    #[arg(long, value_name = "GAME")]
    pub game: GameKind,
    /// JSON file overriding grid size, level speeds and other tunables.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Where winners' names are kept. Overrides the config file.
    #[arg(long, value_name = "PATH")]
    pub leaderboard: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(path) = &self.leaderboard {
            config.leaderboard_file = path.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake() {
        let cli = Cli::try_parse_from(["snake_menus", "--game=snake"]).unwrap();
        assert_eq!(cli.game, GameKind::Snake);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn missing_game_is_rejected() {
        assert!(Cli::try_parse_from(["snake_menus"]).is_err());
    }

    #[test]
    fn unknown_game_is_rejected() {
        let err = Cli::try_parse_from(["snake_menus", "--game", "tetris"]).unwrap_err();
        assert!(err.to_string().contains("unknown game `tetris`"));
        assert!(matches!(
            "tetris".parse::<GameKind>(),
            Err(Error::InvalidCliArgument(_))
        ));
    }

    #[test]
    fn leaderboard_flag_overrides_config() {
        let args = ["snake_menus", "--game", "snake", "--leaderboard", "w.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.game_config().unwrap().leaderboard_file, PathBuf::from("w.json"));
    }
}
