//! # Bikeshare Graphs
//!
//! SVG chart rendering for the bike sharing dashboard, built on plotters.
//!
//! Every chart implements [`GraphRenderer`] and draws onto one panel of a
//! [`Figure`]; [`sections`] assembles the figures shown on the page.

pub mod bar;
pub mod histogram;
pub mod pie;
pub mod renderer;
pub mod sections;
pub mod style;

pub use bar::{BarChart, BarGroup, GroupedBarChart};
pub use histogram::{BinLayout, HistogramChart, MeanLine};
pub use pie::PieChart;
pub use renderer::{Figure, GraphRenderer, Panel, DEFAULT_FIGURE_SIZE};
pub use sections::{
    daily_usage_section, dashboard_sections, hourly_usage_section, render_dashboard,
    season_weather_section, user_type_section, RenderedSection, Section,
};
pub use style::{ChartStyle, PALETTE};
