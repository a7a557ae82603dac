//! Graph rendering trait and figure assembly

use crate::ChartStyle;
use bikeshare_common::{DashboardError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, instrument};

/// Drawing area handed to a renderer: one panel of an SVG figure
pub type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Trait for charts that can draw themselves onto a figure panel
pub trait GraphRenderer: Send + Sync {
    /// Draw the chart, title included, filling `area`
    fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()>;

    /// Gets the name of this graph type
    fn name(&self) -> &'static str;

    /// Title drawn above the chart
    fn title(&self) -> &str;
}

/// Default figure size in pixels, 35:15
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (1750, 750);

/// A single SVG image holding one or more charts side by side
pub struct Figure {
    size: (u32, u32),
    panels: Vec<Box<dyn GraphRenderer>>,
}

impl Figure {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            panels: Vec::new(),
        }
    }

    /// Append a panel to the right of the existing ones
    pub fn with_panel(mut self, panel: impl GraphRenderer + 'static) -> Self {
        self.panels.push(Box::new(panel));
        self
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn panels(&self) -> impl Iterator<Item = &dyn GraphRenderer> {
        self.panels.iter().map(|panel| panel.as_ref())
    }

    /// Render every panel into one SVG document
    #[instrument(skip_all, fields(panels = self.panels.len()))]
    pub fn render_svg(&self, style: &ChartStyle) -> Result<String> {
        if self.panels.is_empty() {
            return Err(DashboardError::chart("Figure has no panels"));
        }

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&style.background)?;

            let areas = root.split_evenly((1, self.panels.len()));
            for (panel, area) in self.panels.iter().zip(areas.iter()) {
                debug!(graph = panel.name(), title = panel.title(), "Rendering panel");
                panel.render(area, style)?;
            }
            root.present()?;
        }

        debug!(bytes = svg.len(), "Rendered figure");
        Ok(svg)
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(DEFAULT_FIGURE_SIZE)
    }
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("size", &self.size)
            .field("panels", &self.panels().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer {
        title: String,
    }

    impl GraphRenderer for MockRenderer {
        fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()> {
            area.titled(&self.title, style.title_font())?;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "mock"
        }

        fn title(&self) -> &str {
            &self.title
        }
    }

    fn mock(title: &str) -> MockRenderer {
        MockRenderer {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_figure_renders_all_panels() {
        let figure = Figure::new((800, 300))
            .with_panel(mock("Left panel"))
            .with_panel(mock("Right panel"));

        let svg = figure.render_svg(&ChartStyle::dashboard()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("Left panel"));
        assert!(svg.contains("Right panel"));
    }

    #[test]
    fn test_empty_figure_is_an_error() {
        let err = Figure::default().render_svg(&ChartStyle::dashboard()).unwrap_err();
        assert!(matches!(err, DashboardError::Chart { .. }));
    }

    #[test]
    fn test_default_size() {
        let figure = Figure::default().with_panel(mock("only"));
        assert_eq!(figure.size(), DEFAULT_FIGURE_SIZE);
        assert_eq!(figure.panels().count(), 1);
        assert!(format!("{figure:?}").contains("mock"));
    }
}
