//! Application configuration loaded from TOML.
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! allowed_origin = "http://localhost:3000"
//! min_pot_value = 1
//! max_pot_value = 9
//!
//! [game]
//! pot_count = 6
//! difficulty = "EASY"
//! first_turn = "USER"
//! service_url = "http://127.0.0.1:8080"
//! request_timeout_ms = 5000
//! think_ms = 0
//! ```

use crate::games::pots::rules::PotRange;
use crate::games::pots::{Claimant, Difficulty, PotCount};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// HTTP service settings.
    #[serde(default)]
    server: ServerSettings,

    /// Settings for a played game.
    #[serde(default)]
    game: GameSettings,
}

/// Settings for the `serve` command.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ServerSettings {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Origin allowed by CORS.
    #[serde(default = "default_allowed_origin")]
    allowed_origin: String,

    /// Smallest generated pot value.
    #[serde(default = "default_min_pot_value")]
    min_pot_value: u32,

    /// Largest generated pot value.
    #[serde(default = "default_max_pot_value")]
    max_pot_value: u32,
}

/// Settings for the `play` command.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameSettings {
    /// Pots per game.
    #[serde(default)]
    pot_count: PotCount,

    /// Strength of the automated player.
    #[serde(default)]
    difficulty: Difficulty,

    /// Who moves first in a new game.
    #[serde(default)]
    first_turn: Claimant,

    /// Base URL of the remote services.
    #[serde(default = "default_service_url")]
    service_url: String,

    /// Timeout for a single service request.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Pause before each computer move.
    #[serde(default)]
    think_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_min_pot_value() -> u32 {
    1
}

fn default_max_pot_value() -> u32 {
    9
}

fn default_service_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            min_pot_value: default_min_pot_value(),
            max_pot_value: default_max_pot_value(),
        }
    }
}

impl ServerSettings {
    /// Range generated pot values fall in.
    pub fn pot_range(&self) -> PotRange {
        PotRange {
            min: self.min_pot_value,
            max: self.max_pot_value,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            pot_count: PotCount::default(),
            difficulty: Difficulty::default(),
            first_turn: Claimant::default(),
            service_url: default_service_url(),
            request_timeout_ms: default_request_timeout_ms(),
            think_ms: 0,
        }
    }
}

impl GameSettings {
    /// Service request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Computer pause as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

impl AppConfig {
    /// Loads configuration from `path`, or defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or the values are inconsistent.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            port = config.server.port,
            pot_count = %config.game.pot_count,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = &self.server;
        if server.min_pot_value == 0 {
            return Err(ConfigError::new("min_pot_value must be at least 1"));
        }
        if server.min_pot_value > server.max_pot_value {
            return Err(ConfigError::new(format!(
                "min_pot_value {} exceeds max_pot_value {}",
                server.min_pot_value, server.max_pot_value
            )));
        }
        if self.game.request_timeout_ms == 0 {
            return Err(ConfigError::new("request_timeout_ms must be positive"));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
