//! # Bikeshare Data
//!
//! Loading of the daily and hourly usage snapshots and the group-by
//! reductions behind each dashboard chart.

pub mod aggregator;
pub mod codes;
pub mod loader;
pub mod records;
pub mod stats;

pub use aggregator::{
    day_type_usage, hourly_usage, season_weather_usage, user_type_usage, DayTypeUsage,
    GroupUsage, HourlyUsage, SeasonWeatherTotal, SeasonWeatherUsage, UsageSummary, UserTypeUsage,
};
pub use codes::{DayType, Season, WeatherSituation};
pub use loader::{load_daily, load_hourly, DataPaths, Dataset, DAILY_FILE, HOURLY_FILE};
pub use records::{DailyRecord, HourlyRecord};
pub use stats::{mean, pie_shares, HistogramBins, Share, DEFAULT_BINS};
