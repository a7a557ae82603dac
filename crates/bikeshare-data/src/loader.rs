//! CSV snapshot loading

use crate::{DailyRecord, HourlyRecord};
use bikeshare_common::{DashboardError, Result};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default file name of the daily snapshot
pub const DAILY_FILE: &str = "data_day.csv";

/// Default file name of the hourly snapshot
pub const HOURLY_FILE: &str = "data_hour.csv";

/// Location of the two snapshot files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub daily: PathBuf,
    pub hourly: PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_names(dir, DAILY_FILE, HOURLY_FILE)
    }

    /// Custom file names inside `dir`
    pub fn with_names(dir: impl AsRef<Path>, daily: &str, hourly: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            daily: dir.join(daily),
            hourly: dir.join(hourly),
        }
    }
}

/// Both snapshots, loaded together
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// Load both snapshots; either failing aborts the whole load
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let daily = load_daily(&paths.daily)?;
        let hourly = load_hourly(&paths.hourly)?;
        Ok(Self { daily, hourly })
    }
}

/// Load `data_day.csv`-shaped records
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_daily(path: impl AsRef<Path>) -> Result<Vec<DailyRecord>> {
    let records = read_records(path.as_ref())?;
    info!(rows = records.len(), "Loaded daily records");
    Ok(records)
}

/// Load `data_hour.csv`-shaped records
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_hourly(path: impl AsRef<Path>) -> Result<Vec<HourlyRecord>> {
    let records = read_records(path.as_ref())?;
    info!(rows = records.len(), "Loaded hourly records");
    Ok(records)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| {
        DashboardError::with_source(format!("Failed to open {}", path.display()), e)
    })?;

    let records = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|e| DashboardError::csv(path, e))?;

    debug!(path = %path.display(), rows = records.len(), "Parsed CSV");
    Ok(records)
}
