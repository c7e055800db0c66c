use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::Player;

/// Display labels for the two players, used in status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    player_a: String,
    player_b: String,
}

/// Partial configuration as supplied by the page. Missing fields keep the
/// game's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub player_a: Option<String>,
    pub player_b: Option<String>,
}

impl GameConfig {
    pub fn new(player_a: impl Into<String>, player_b: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            player_a: player_a.into(),
            player_b: player_b.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn tic_tac_toe() -> Self {
        Self {
            player_a: "X".to_string(),
            player_b: "O".to_string(),
        }
    }

    pub fn connect_four() -> Self {
        Self {
            player_a: "Red".to_string(),
            player_b: "Yellow".to_string(),
        }
    }

    /// Applies overrides on top of `self` and validates the result.
    pub fn merged(self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::new(
            overrides.player_a.unwrap_or(self.player_a),
            overrides.player_b.unwrap_or(self.player_b),
        )
    }

    pub fn label(&self, player: Player) -> &str {
        match player {
            Player::A => &self.player_a,
            Player::B => &self.player_b,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.player_a.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("A"));
        }
        if self.player_b.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("B"));
        }
        if self.player_a == self.player_b {
            return Err(ConfigError::DuplicateLabel(self.player_a.clone()));
        }
        Ok(())
    }
}
