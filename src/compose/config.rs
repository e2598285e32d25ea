use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SmawfError, SmawfResult};

/// Weather condition; the code selects the weather block's sub-image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Weather {
    Sunny,
    #[default]
    PartlyCloudy,
    Cloudy,
    Overcast,
    LightRain,
    HeavyRain,
    Thunderstorm,
    Snow,
    Sleet,
    Fog,
    Wind,
}

impl Weather {
    /// Sub-image index within a weather block.
    pub fn code(self) -> u8 {
        match self {
            Self::Sunny => 0,
            Self::PartlyCloudy => 1,
            Self::Cloudy => 2,
            Self::Overcast => 3,
            Self::LightRain => 4,
            Self::HeavyRain => 5,
            Self::Thunderstorm => 6,
            Self::Snow => 7,
            Self::Sleet => 8,
            Self::Fog => 9,
            Self::Wind => 10,
        }
    }
}

/// Time, date, health and weather values a preview is rendered for.
///
/// Missing JSON fields take the defaults shown on [`PreviewConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct PreviewConfig {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub date_year: u32,
    pub date_month: u32,
    pub date_day: u32,
    pub week_day: u32,
    pub steps: u32,
    pub steps_goal: u32,
    pub distance: f64,
    pub distance_goal: f64,
    pub calories: u32,
    pub calories_goal: u32,
    pub heart_rate: u32,
    pub max_heart_rate: u32,
    pub battery: u32,
    pub weather: Weather,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            hour: 9,
            minute: 0,
            second: 23,
            date_year: 25,
            date_month: 3,
            date_day: 9,
            week_day: 3,
            steps: 23456,
            steps_goal: 6000,
            distance: 22.5,
            distance_goal: 5.0,
            calories: 2345,
            calories_goal: 300,
            heart_rate: 106,
            max_heart_rate: 150,
            battery: 100,
            weather: Weather::PartlyCloudy,
        }
    }
}

impl PreviewConfig {
    /// Battery strips fill against a fixed full charge.
    pub const BATTERY_FULL: u32 = 100;

    /// Load a JSON config from disk.
    pub fn from_path(path: impl AsRef<Path>) -> SmawfResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SmawfError::validation(format!("open preview config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a JSON config.
    pub fn from_reader(r: impl Read) -> SmawfResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SmawfError::validation(format!("parse preview config: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/config.rs"]
mod tests;
