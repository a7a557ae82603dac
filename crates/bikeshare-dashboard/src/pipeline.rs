//! Load, aggregate and render: one full pass per page view

use crate::page::{render_page, PageMeta};
use bikeshare_common::Result;
use bikeshare_config::Config;
use bikeshare_data::{DataPaths, Dataset, UsageSummary};
use bikeshare_graphs::{render_dashboard, ChartStyle, RenderedSection};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Sample snapshots shipped with the crate sources
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// Data directory used when the configuration names none: `data/` next to
/// the running executable if it exists, else the bundled snapshots
pub fn default_data_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let dir = resolve_data_dir(exe_dir.as_deref());
    debug!(dir = %dir.display(), "Resolved default data directory");
    dir
}

fn resolve_data_dir(exe_dir: Option<&Path>) -> PathBuf {
    exe_dir
        .map(|dir| dir.join("data"))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA_DIR))
}

/// Everything needed to produce the dashboard page, fixed at startup
#[derive(Debug, Clone)]
pub struct DashboardPipeline {
    paths: DataPaths,
    figure_size: (u32, u32),
    style: ChartStyle,
    meta: PageMeta,
}

impl DashboardPipeline {
    pub fn new(paths: DataPaths, figure_size: (u32, u32)) -> Self {
        Self {
            paths,
            figure_size,
            style: ChartStyle::dashboard(),
            meta: PageMeta::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let dir = config
            .data
            .dir
            .clone()
            .unwrap_or_else(default_data_dir);
        let paths = DataPaths::with_names(dir, &config.data.day_file, &config.data.hour_file);
        Self::new(paths, (config.chart.width, config.chart.height))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn figure_size(&self) -> (u32, u32) {
        self.figure_size
    }

    /// Read both snapshots and reduce them to chart inputs
    pub fn summarize(&self) -> Result<UsageSummary> {
        let dataset = Dataset::load(&self.paths)?;
        UsageSummary::from_dataset(&dataset)
    }

    /// Render every section's figure
    pub fn render_sections(&self) -> Result<Vec<RenderedSection>> {
        let summary = self.summarize()?;
        render_dashboard(&summary, self.figure_size, &self.style)
    }

    /// The complete HTML page; any failure yields no page at all
    #[instrument(skip_all, fields(daily = %self.paths.daily.display()))]
    pub fn render_html(&self) -> Result<String> {
        let sections = self.render_sections()?;
        let html = render_page(&self.meta, &sections);
        info!(bytes = html.len(), "Dashboard page rendered");
        Ok(html)
    }
}
