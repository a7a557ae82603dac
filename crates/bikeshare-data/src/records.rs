//! Row types for the daily and hourly usage snapshots

use chrono::NaiveDate;
use serde::Deserialize;

/// One row of `data_day.csv`: usage for a single calendar day.
///
/// Only the columns the charts read are required; the remaining columns of
/// the snapshot are kept when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRecord {
    /// Season code (1-4)
    pub season: u8,
    /// 1 for a working day, 0 for weekends and holidays
    pub workingday: u8,
    /// Weather situation code (1-4)
    pub weathersit: u8,
    /// Rentals by non-members
    pub casual: u32,
    /// Rentals by members
    pub registered: u32,
    /// Total rentals
    pub cnt: u32,

    #[serde(default)]
    pub instant: Option<u32>,
    #[serde(default)]
    pub dteday: Option<NaiveDate>,
    #[serde(default)]
    pub yr: Option<u8>,
    #[serde(default)]
    pub mnth: Option<u8>,
    #[serde(default)]
    pub holiday: Option<u8>,
    #[serde(default)]
    pub weekday: Option<u8>,
    /// Normalized temperature
    #[serde(default)]
    pub temp: Option<f64>,
    /// Normalized feeling temperature
    #[serde(default)]
    pub atemp: Option<f64>,
    /// Normalized humidity
    #[serde(default)]
    pub hum: Option<f64>,
    /// Normalized wind speed
    #[serde(default)]
    pub windspeed: Option<f64>,
}

impl DailyRecord {
    /// Minimal record with only the columns the charts read
    pub fn new(season: u8, workingday: u8, weathersit: u8, casual: u32, registered: u32, cnt: u32) -> Self {
        Self {
            season,
            workingday,
            weathersit,
            casual,
            registered,
            cnt,
            instant: None,
            dteday: None,
            yr: None,
            mnth: None,
            holiday: None,
            weekday: None,
            temp: None,
            atemp: None,
            hum: None,
            windspeed: None,
        }
    }
}

/// One row of `data_hour.csv`: usage for one hour of one day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyRecord {
    /// Hour of day (0-23)
    pub hr: u8,
    /// Total rentals
    pub cnt: u32,

    #[serde(default)]
    pub instant: Option<u32>,
    #[serde(default)]
    pub dteday: Option<NaiveDate>,
    #[serde(default)]
    pub season: Option<u8>,
    #[serde(default)]
    pub yr: Option<u8>,
    #[serde(default)]
    pub mnth: Option<u8>,
    #[serde(default)]
    pub holiday: Option<u8>,
    #[serde(default)]
    pub weekday: Option<u8>,
    #[serde(default)]
    pub workingday: Option<u8>,
    #[serde(default)]
    pub weathersit: Option<u8>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub atemp: Option<f64>,
    #[serde(default)]
    pub hum: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub casual: Option<u32>,
    #[serde(default)]
    pub registered: Option<u32>,
}

impl HourlyRecord {
    /// Minimal record with only the columns the charts read
    pub fn new(hr: u8, cnt: u32) -> Self {
        Self {
            hr,
            cnt,
            instant: None,
            dteday: None,
            season: None,
            yr: None,
            mnth: None,
            holiday: None,
            weekday: None,
            workingday: None,
            weathersit: None,
            temp: None,
            atemp: None,
            hum: None,
            windspeed: None,
            casual: None,
            registered: None,
        }
    }
}
