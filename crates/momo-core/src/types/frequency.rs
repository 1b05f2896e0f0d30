//! Sampling frequencies for historical price windows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar frequency for history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// 1 minute bars
    #[serde(rename = "1m")]
    #[default]
    Min1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Min5,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Min30,
}

impl Frequency {
    /// Get the duration of one bar in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Frequency::Min1 => 60,
            Frequency::Min5 => 300,
            Frequency::Min30 => 1800,
        }
    }

    /// Get the duration of one bar in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.as_secs() as i64 * 1000
    }

    /// Get all supported frequencies.
    pub fn all() -> &'static [Frequency] {
        &[Frequency::Min1, Frequency::Min5, Frequency::Min30]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Min1 => "1m",
            Frequency::Min5 => "5m",
            Frequency::Min30 => "30m",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Ok(Frequency::Min1),
            "5m" | "5min" => Ok(Frequency::Min5),
            "30m" | "30min" => Ok(Frequency::Min30),
            _ => Err(format!("Invalid frequency: {}", s)),
        }
    }
}
