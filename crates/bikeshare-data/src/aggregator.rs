//! Group-by reductions feeding the dashboard charts

use crate::stats::{self, Share};
use crate::{DailyRecord, Dataset, DayType, HourlyRecord, Season, WeatherSituation};
use bikeshare_common::{DashboardError, Result};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Totals and raw counts for one working-day group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupUsage {
    /// Sum of `cnt` over the group
    pub total: u64,
    /// Raw `cnt` values, in file order
    pub counts: Vec<u32>,
}

impl GroupUsage {
    fn push(&mut self, cnt: u32) {
        self.total += u64::from(cnt);
        self.counts.push(cnt);
    }

    /// Mean daily count, `None` when the group has no days
    pub fn mean(&self) -> Option<f64> {
        stats::mean(&self.counts)
    }
}

/// Usage split by working-day flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayTypeUsage {
    pub weekend: GroupUsage,
    pub weekday: GroupUsage,
}

impl DayTypeUsage {
    pub fn group(&self, day_type: DayType) -> &GroupUsage {
        match day_type {
            DayType::Weekend => &self.weekend,
            DayType::Weekday => &self.weekday,
        }
    }

    pub fn total(&self) -> u64 {
        self.weekend.total + self.weekday.total
    }

    /// Pie wedges in chart order (Weekend, Weekday)
    pub fn shares(&self) -> Vec<Share> {
        stats::pie_shares(
            DayType::ALL
                .iter()
                .map(|&day_type| (day_type.label(), self.group(day_type).total as f64)),
        )
    }
}

/// Sum `cnt` by working-day flag, keeping each group's raw counts
#[instrument(skip_all, fields(rows = records.len()))]
pub fn day_type_usage(records: &[DailyRecord]) -> Result<DayTypeUsage> {
    let mut usage = DayTypeUsage::default();
    for record in records {
        match DayType::try_from(record.workingday)? {
            DayType::Weekend => usage.weekend.push(record.cnt),
            DayType::Weekday => usage.weekday.push(record.cnt),
        }
    }
    debug!(weekend = usage.weekend.total, weekday = usage.weekday.total, "Aggregated day-type usage");
    Ok(usage)
}

/// Total rentals per hour of day, ascending by hour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyUsage {
    totals: BTreeMap<u8, u64>,
}

impl HourlyUsage {
    /// `(hour, total)` pairs in ascending hour order
    pub fn series(&self) -> Vec<(u8, u64)> {
        self.totals.iter().map(|(&hour, &total)| (hour, total)).collect()
    }

    /// Hours present in the data, ascending
    pub fn hours(&self) -> Vec<u8> {
        self.totals.keys().copied().collect()
    }

    pub fn get(&self, hour: u8) -> Option<u64> {
        self.totals.get(&hour).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn max_total(&self) -> u64 {
        self.totals.values().copied().max().unwrap_or(0)
    }
}

/// Sum `cnt` by hour of day
#[instrument(skip_all, fields(rows = records.len()))]
pub fn hourly_usage(records: &[HourlyRecord]) -> Result<HourlyUsage> {
    let mut totals = BTreeMap::new();
    for record in records {
        if record.hr > 23 {
            return Err(DashboardError::data_field(
                format!("hour must be between 0 and 23, got {}", record.hr),
                "hr",
            ));
        }
        *totals.entry(record.hr).or_insert(0u64) += u64::from(record.cnt);
    }
    debug!(hours = totals.len(), "Aggregated hourly usage");
    Ok(HourlyUsage { totals })
}

/// One bar of the season/weather chart
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonWeatherTotal {
    pub season: Season,
    pub weather: WeatherSituation,
    pub total: u64,
}

/// Usage grouped by season and weather situation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonWeatherUsage {
    /// Ordered by season code, then weather code
    pub totals: Vec<SeasonWeatherTotal>,
}

impl SeasonWeatherUsage {
    /// Seasons present in the data, ascending
    pub fn seasons(&self) -> Vec<Season> {
        let mut seasons: Vec<Season> = self.totals.iter().map(|t| t.season).collect();
        seasons.dedup();
        seasons
    }

    /// Weather situations present in the data, ascending
    pub fn weather_situations(&self) -> Vec<WeatherSituation> {
        let mut situations: Vec<WeatherSituation> = self.totals.iter().map(|t| t.weather).collect();
        situations.sort();
        situations.dedup();
        situations
    }

    pub fn get(&self, season: Season, weather: WeatherSituation) -> Option<u64> {
        self.totals
            .iter()
            .find(|t| t.season == season && t.weather == weather)
            .map(|t| t.total)
    }

    pub fn max_total(&self) -> u64 {
        self.totals.iter().map(|t| t.total).max().unwrap_or(0)
    }

    pub fn grand_total(&self) -> u64 {
        self.totals.iter().map(|t| t.total).sum()
    }
}

/// Sum `cnt` by (season, weather label)
#[instrument(skip_all, fields(rows = records.len()))]
pub fn season_weather_usage(records: &[DailyRecord]) -> Result<SeasonWeatherUsage> {
    let mut grouped: BTreeMap<(Season, WeatherSituation), u64> = BTreeMap::new();
    for record in records {
        let season = Season::try_from(record.season)?;
        let weather = WeatherSituation::try_from(record.weathersit)?;
        *grouped.entry((season, weather)).or_insert(0) += u64::from(record.cnt);
    }

    let totals = grouped
        .into_iter()
        .map(|((season, weather), total)| SeasonWeatherTotal { season, weather, total })
        .collect::<Vec<_>>();
    debug!(groups = totals.len(), "Aggregated season/weather usage");
    Ok(SeasonWeatherUsage { totals })
}

/// Casual versus registered riders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTypeUsage {
    pub casual_total: u64,
    pub registered_total: u64,
    /// Raw daily `casual` column
    pub casual: Vec<u32>,
    /// Raw daily `registered` column
    pub registered: Vec<u32>,
}

impl UserTypeUsage {
    /// Pie wedges in chart order (Casual, Registered)
    pub fn shares(&self) -> Vec<Share> {
        stats::pie_shares([
            ("Casual", self.casual_total as f64),
            ("Registered", self.registered_total as f64),
        ])
    }

    /// Whether casual + registered matches the given `cnt` total
    pub fn is_consistent_with(&self, cnt_total: u64) -> bool {
        self.casual_total + self.registered_total == cnt_total
    }
}

/// Sum the casual and registered columns, keeping the raw columns
#[instrument(skip_all, fields(rows = records.len()))]
pub fn user_type_usage(records: &[DailyRecord]) -> UserTypeUsage {
    let mut usage = UserTypeUsage {
        casual: Vec::with_capacity(records.len()),
        registered: Vec::with_capacity(records.len()),
        ..UserTypeUsage::default()
    };
    for record in records {
        usage.casual_total += u64::from(record.casual);
        usage.registered_total += u64::from(record.registered);
        usage.casual.push(record.casual);
        usage.registered.push(record.registered);
    }
    usage
}

/// Every aggregate the dashboard draws, computed in one pass over a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSummary {
    pub day_type: DayTypeUsage,
    pub hourly: HourlyUsage,
    pub season_weather: SeasonWeatherUsage,
    pub user_type: UserTypeUsage,
}

impl UsageSummary {
    /// Any data error aborts the whole summary
    #[instrument(skip_all, fields(days = dataset.daily.len(), hours = dataset.hourly.len()))]
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        Ok(Self {
            day_type: day_type_usage(&dataset.daily)?,
            hourly: hourly_usage(&dataset.hourly)?,
            season_weather: season_weather_usage(&dataset.daily)?,
            user_type: user_type_usage(&dataset.daily),
        })
    }
}
