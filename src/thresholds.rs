//! Flags each sample against the configured adverse-weather thresholds.
//!
//! Hot and cold use the apparent-temperature indices where those are defined
//! and fall back to the air temperature otherwise; wet compares the hourly
//! precipitation rate. Flagging never fails.

use crate::condition::ConditionKind;
use crate::sampling::WeatherSample;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// The four adverse-condition flags for one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionFlags {
    pub very_hot: bool,
    pub very_cold: bool,
    pub very_windy: bool,
    pub very_wet: bool,
}

impl ConditionFlags {
    /// True if any condition is flagged.
    pub fn any_flagged(&self) -> bool {
        self.very_hot || self.very_cold || self.very_windy || self.very_wet
    }

    /// Number of flagged conditions.
    pub fn count_flagged(&self) -> u32 {
        [self.very_hot, self.very_cold, self.very_windy, self.very_wet]
            .iter()
            .filter(|&&flag| flag)
            .count() as u32
    }

    /// Whether this flag set satisfies the given condition kind.
    pub fn matches(&self, kind: ConditionKind) -> bool {
        match kind {
            ConditionKind::Hot => self.very_hot,
            ConditionKind::Cold => self.very_cold,
            ConditionKind::Windy => self.very_windy,
            ConditionKind::Wet => self.very_wet,
            ConditionKind::Any => self.any_flagged(),
            ConditionKind::Multiple => self.count_flagged() >= 2,
        }
    }
}

/// Evaluates all four thresholds for one sample.
pub fn flag_conditions(sample: &WeatherSample, settings: &Settings) -> ConditionFlags {
    let very_hot = sample
        .heat_index_c
        .unwrap_or(sample.temperature_c)
        >= settings.hot_heat_index_c;

    let very_cold = sample
        .wind_chill_c
        .unwrap_or(sample.temperature_c)
        <= settings.cold_wind_chill_c;

    let very_windy = sample.wind_speed_ms >= settings.windy_wind_ms;

    let very_wet = sample.hourly_precip_rate() >= settings.wet_rain_mm_per_h;

    ConditionFlags {
        very_hot,
        very_cold,
        very_windy,
        very_wet,
    }
}
