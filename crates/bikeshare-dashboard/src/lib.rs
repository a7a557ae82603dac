//! # Bikeshare Dashboard
//!
//! Serves the bike sharing analysis page: the CSV snapshots are loaded,
//! aggregated and drawn as SVG charts on every page view.

pub mod page;
pub mod pipeline;
pub mod server;

pub use page::{render_page, PageMeta};
pub use pipeline::{default_data_dir, DashboardPipeline, BUNDLED_DATA_DIR};
pub use server::{create_router, start_server, AppState, HealthResponse};
