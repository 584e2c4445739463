use std::str::FromStr;

use serde::Serialize;

use crate::domain::ConfigError;

/// Default number of simultaneous transfers per batch.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Named timeout presets for different expected file sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeoutPreset {
    /// Several GB to tens of GB per file.
    ForLargeFiles,
    /// Mixed file sizes. The default.
    Balanced,
    /// KB-MB range payloads, fast feedback on failure.
    ForSmallFiles,
}

impl TimeoutPreset {
    pub const fn seconds(self) -> u64 {
        match self {
            Self::ForLargeFiles => 300,
            Self::Balanced => 60,
            Self::ForSmallFiles => 15,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ForLargeFiles => {
                "For downloading large files (several GB to tens of GB). Uses a longer timeout."
            }
            Self::Balanced => "Balanced configuration for mixed file sizes.",
            Self::ForSmallFiles => {
                "For downloading small files (KB-MB range). Uses a shorter timeout for faster feedback."
            }
        }
    }
}

impl FromStr for TimeoutPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOR_LARGE_FILES" => Ok(Self::ForLargeFiles),
            "BALANCED" => Ok(Self::Balanced),
            "FOR_SMALL_FILES" => Ok(Self::ForSmallFiles),
            other => Err(ConfigError::UnknownPreset {
                name: other.to_string(),
            }),
        }
    }
}

/// HTTP timeout for the whole request/response cycle: a named preset or an
/// explicit positive second count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Preset(TimeoutPreset),
    Secs(u64),
}

impl Timeout {
    /// Resolve to a second count, rejecting a zero timeout.
    pub fn resolve(self) -> Result<u64, ConfigError> {
        match self {
            Self::Preset(preset) => Ok(preset.seconds()),
            Self::Secs(0) => Err(ConfigError::InvalidTimeout { seconds: 0 }),
            Self::Secs(secs) => Ok(secs),
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::Preset(TimeoutPreset::Balanced)
    }
}

impl From<TimeoutPreset> for Timeout {
    fn from(preset: TimeoutPreset) -> Self {
        Self::Preset(preset)
    }
}

impl From<u64> for Timeout {
    fn from(secs: u64) -> Self {
        Self::Secs(secs)
    }
}
