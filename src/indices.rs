//! Apparent-temperature indices: NWS heat index (Rothfusz), NWS 2001 wind
//! chill, and the combined feels-like temperature.
//!
//! Each index is only defined inside its meteorological validity domain and
//! returns `None` outside it; callers branch on presence, never on NaN.

/// Heat index applies from 26.7 °C (80 °F) upward.
pub const HEAT_INDEX_MIN_TEMP_C: f64 = 26.7;
/// Heat index applies from 40 % relative humidity upward.
pub const HEAT_INDEX_MIN_RH: f64 = 40.0;
/// Wind chill applies up to 10 °C (50 °F).
pub const WIND_CHILL_MAX_TEMP_C: f64 = 10.0;
/// Wind chill applies from 1.34 m/s (3 mph) upward.
pub const WIND_CHILL_MIN_WIND_MS: f64 = 1.34;

/// NWS heat index (Rothfusz regression), in °C.
///
/// Defined only for `temperature_c >= 26.7` and `relative_humidity >= 40`;
/// returns `None` otherwise, and for humidity outside `[0, 100]`. The formula
/// runs in °F internally: a simple approximation first, and when that reaches
/// 80 °F the full regression with the NWS dry- and humid-air adjustments.
pub fn heat_index(temperature_c: f64, relative_humidity: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&relative_humidity) {
        return None;
    }
    if temperature_c < HEAT_INDEX_MIN_TEMP_C || relative_humidity < HEAT_INDEX_MIN_RH {
        return None;
    }

    let t = celsius_to_fahrenheit(temperature_c);
    let rh = relative_humidity;

    // Simple approximation; averaged with the temperature it is the NWS
    // screening value.
    let mut hi = 0.5 * (t + 61.0 + ((t - 68.0) * 1.2) + (rh * 0.094));

    if hi >= 80.0 {
        hi = -42.379 + 2.04901523 * t + 10.14333127 * rh
            - 0.22475541 * t * rh
            - 0.00683783 * t * t
            - 0.05481717 * rh * rh
            + 0.00122874 * t * t * rh
            + 0.00085282 * t * rh * rh
            - 0.00000199 * t * t * rh * rh;

        if rh < 13.0 && (80.0..=112.0).contains(&t) {
            // Dry air pulls the index down.
            hi -= ((13.0 - rh) / 4.0) * (((17.0 - (t - 95.0).abs()) / 17.0).sqrt());
        } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
            // Saturated air pushes it up.
            hi += ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0);
        }
    }

    Some(fahrenheit_to_celsius(hi))
}

/// NWS 2001 wind chill, in °C.
///
/// Defined only for `temperature_c <= 10` and `wind_speed_ms >= 1.34`;
/// returns `None` otherwise, and for negative wind speeds.
pub fn wind_chill(temperature_c: f64, wind_speed_ms: f64) -> Option<f64> {
    if wind_speed_ms < 0.0 {
        return None;
    }
    if temperature_c > WIND_CHILL_MAX_TEMP_C || wind_speed_ms < WIND_CHILL_MIN_WIND_MS {
        return None;
    }

    let t = celsius_to_fahrenheit(temperature_c);
    let v = ms_to_mph(wind_speed_ms).powf(0.16);

    let wc = 35.74 + 0.6215 * t - 35.75 * v + 0.4275 * t * v;
    Some(fahrenheit_to_celsius(wc))
}

/// Feels-like temperature: heat index when it applies, else wind chill when
/// it applies, else the air temperature. The two domains are disjoint, so
/// the preference order never actually has to break a tie.
pub fn feels_like(
    temperature_c: f64,
    relative_humidity: Option<f64>,
    wind_speed_ms: Option<f64>,
) -> f64 {
    if let Some(rh) = relative_humidity {
        if let Some(hi) = heat_index(temperature_c, rh) {
            return hi;
        }
    }
    if let Some(wind) = wind_speed_ms {
        if let Some(wc) = wind_chill(temperature_c, wind) {
            return wc;
        }
    }
    temperature_c
}

pub(crate) fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub(crate) fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub(crate) fn ms_to_mph(meters_per_second: f64) -> f64 {
    meters_per_second * 2.23694
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_index_defined_exactly_on_domain_boundary() {
        assert!(heat_index(27.0, 45.0).is_some());
        assert!(heat_index(26.7, 40.0).is_some());
        assert!(heat_index(26.6, 45.0).is_none());
        assert!(heat_index(27.0, 39.0).is_none());
    }

    #[test]
    fn heat_index_exceeds_air_temperature_in_humid_heat() {
        let hi = heat_index(35.0, 80.0).unwrap();
        assert!(hi > 35.0, "expected amplification, got {hi}");
        // NWS tables put 35 °C / 80 % near 50 °C.
        assert!((45.0..60.0).contains(&hi), "implausible heat index {hi}");
    }

    #[test]
    fn heat_index_rejects_invalid_humidity() {
        assert!(heat_index(30.0, -1.0).is_none());
        assert!(heat_index(30.0, 101.0).is_none());
    }

    #[test]
    fn wind_chill_defined_exactly_on_domain_boundary() {
        assert!(wind_chill(10.0, 1.34).is_some());
        assert!(wind_chill(10.1, 5.0).is_none());
        assert!(wind_chill(0.0, 1.3).is_none());
        assert!(wind_chill(0.0, -0.1).is_none());
    }

    #[test]
    fn wind_chill_is_colder_than_air_temperature() {
        let wc = wind_chill(-5.0, 10.0).unwrap();
        assert!(wc < -5.0, "expected cooling, got {wc}");
        // NWS chart: -5 °C at 10 m/s is roughly -13 °C.
        assert!((-18.0..-9.0).contains(&wc), "implausible wind chill {wc}");
    }

    #[test]
    fn feels_like_prefers_indices_then_falls_back() {
        let hot = feels_like(35.0, Some(80.0), Some(2.0));
        assert_eq!(hot, heat_index(35.0, 80.0).unwrap());

        let cold = feels_like(-5.0, Some(50.0), Some(10.0));
        assert_eq!(cold, wind_chill(-5.0, 10.0).unwrap());

        // Neither domain applies: plain air temperature.
        let mild = feels_like(18.0, Some(50.0), Some(3.0));
        assert_eq!(mild, 18.0);

        // Missing sensors: plain air temperature.
        assert_eq!(feels_like(35.0, None, None), 35.0);
    }

    #[test]
    fn unit_conversions_round_trip() {
        assert!((celsius_to_fahrenheit(26.7) - 80.06).abs() < 1e-9);
        assert!((fahrenheit_to_celsius(celsius_to_fahrenheit(12.34)) - 12.34).abs() < 1e-12);
        assert!((ms_to_mph(1.34) - 2.9975).abs() < 1e-3);
    }
}
