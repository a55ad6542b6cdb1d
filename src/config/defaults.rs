//! Seed-data configuration loading from config.toml
//!
//! This module provides functionality to load the initial envelope and goal
//! rows from a TOML configuration file. The rows defined in config.toml are
//! used to seed the database the first time the app runs against an empty
//! store; when no file is present the built-in defaults apply.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Envelope rows inserted when the envelope collection is empty
    pub envelopes: Vec<EnvelopeSeed>,
    /// Goal rows inserted when the goal collection is empty
    pub goals: Vec<GoalSeed>,
}

/// Seed row for a single envelope
#[derive(Debug, Deserialize, Clone)]
pub struct EnvelopeSeed {
    /// Stable identifier the envelope keeps for its whole lifetime
    pub id: String,
    /// Display name
    pub name: String,
    /// Icon hint for the presentation layer
    pub icon: String,
    /// Starting balance
    pub amount: f64,
}

/// Seed row for a single savings goal
#[derive(Debug, Deserialize, Clone)]
pub struct GoalSeed {
    /// Stable identifier the goal keeps for its whole lifetime
    pub id: String,
    /// Display name
    pub name: String,
    /// Target amount
    pub target: f64,
    /// Amount already saved at seed time
    pub saved: f64,
    /// Emoji shown next to the goal
    pub emoji: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        let envelope = |id: &str, name: &str, icon: &str| EnvelopeSeed {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            amount: 20.0,
        };
        let goal = |id: &str, name: &str, target: f64, saved: f64, emoji: &str| GoalSeed {
            id: id.to_string(),
            name: name.to_string(),
            target,
            saved,
            emoji: emoji.to_string(),
        };

        Self {
            envelopes: vec![
                envelope("1", "Travels", "airplane"),
                envelope("2", "Car", "car"),
                envelope("3", "Vacation", "sunny"),
                envelope("4", "House", "home"),
                envelope("5", "Investments", "trending-up"),
                envelope("6", "Emergencies", "medical"),
            ],
            goals: vec![
                goal("1", "New Car", 15000.0, 3500.0, "\u{1f697}"),
                goal("2", "Viaje Europa", 5000.0, 1200.0, "\u{2708}\u{fe0f}"),
                goal("3", "Fondo Emergencia", 10000.0, 1500.0, "\u{1f6e1}\u{fe0f}"),
            ],
        }
    }
}

/// Loads seed configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(SeedConfig)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml),
/// falling back to the built-in defaults when no file is present.
///
/// A file that exists but fails to parse is an error, not a silent fallback.
pub fn load_default_config() -> Result<SeedConfig> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(SeedConfig::default())
    }
}
