//! Categorical codes used by the snapshots and their display labels

use bikeshare_common::{DashboardError, Result};
use std::fmt;

/// Working-day flag: weekday (1) versus weekend or holiday (0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayType {
    Weekend,
    Weekday,
}

impl DayType {
    /// Both day types, in chart order
    pub const ALL: [DayType; 2] = [DayType::Weekend, DayType::Weekday];

    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekend => "Weekend",
            DayType::Weekday => "Weekday",
        }
    }
}

impl TryFrom<u8> for DayType {
    type Error = DashboardError;

    fn try_from(flag: u8) -> Result<Self> {
        match flag {
            0 => Ok(DayType::Weekend),
            1 => Ok(DayType::Weekday),
            other => Err(DashboardError::data_field(
                format!("working-day flag must be 0 or 1, got {other}"),
                "workingday",
            )),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar season code (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl TryFrom<u8> for Season {
    type Error = DashboardError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            other => Err(DashboardError::data_field(
                format!("unknown season code {other}"),
                "season",
            )),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weather situation code (1-4), from clear skies to heavy rain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeatherSituation {
    Clear = 1,
    Mist = 2,
    LightSnow = 3,
    HeavyRain = 4,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightSnow,
        WeatherSituation::HeavyRain,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Legend label shown on the season/weather chart
    pub fn label(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear/Few clouds",
            WeatherSituation::Mist => "Mist/Cloudy",
            WeatherSituation::LightSnow => "Light Snow/Light Rain",
            WeatherSituation::HeavyRain => "Heavy Rain/Ice Pallets",
        }
    }

    /// Position in [`WeatherSituation::ALL`], used to pick a palette color
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for WeatherSituation {
    type Error = DashboardError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(WeatherSituation::Clear),
            2 => Ok(WeatherSituation::Mist),
            3 => Ok(WeatherSituation::LightSnow),
            4 => Ok(WeatherSituation::HeavyRain),
            other => Err(DashboardError::data_field(
                format!("unknown weather situation code {other}"),
                "weathersit",
            )),
        }
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_mapping_is_total_over_known_codes() {
        let labels: Vec<&str> = (1..=4)
            .map(|code| WeatherSituation::try_from(code).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            vec!["Clear/Few clouds", "Mist/Cloudy", "Light Snow/Light Rain", "Heavy Rain/Ice Pallets"]
        );

        for situation in WeatherSituation::ALL {
            assert_eq!(WeatherSituation::try_from(situation.code()).unwrap(), situation);
            assert_eq!(WeatherSituation::ALL[situation.index()], situation);
        }
    }

    #[test]
    fn test_unknown_weather_code_is_a_data_error() {
        for code in [0u8, 5, 255] {
            let err = WeatherSituation::try_from(code).unwrap_err();
            assert!(matches!(err, DashboardError::Data { .. }));
            assert_eq!(err.field(), Some("weathersit"));
        }
    }

    #[test]
    fn test_season_codes() {
        assert_eq!(Season::try_from(1).unwrap(), Season::Spring);
        assert_eq!(Season::try_from(4).unwrap().label(), "Winter");
        assert_eq!(Season::Fall.code(), 3);
        assert_eq!(Season::try_from(0).unwrap_err().field(), Some("season"));
    }

    #[test]
    fn test_day_type_flag() {
        assert_eq!(DayType::try_from(0).unwrap(), DayType::Weekend);
        assert_eq!(DayType::try_from(1).unwrap(), DayType::Weekday);
        assert_eq!(DayType::try_from(2).unwrap_err().field(), Some("workingday"));
        assert_eq!(DayType::Weekday.to_string(), "Weekday");
    }
}
