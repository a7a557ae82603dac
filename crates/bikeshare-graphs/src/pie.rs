//! Pie chart with labelled, percentage-annotated wedges

use crate::renderer::{GraphRenderer, Panel};
use crate::ChartStyle;
use bikeshare_common::Result;
use bikeshare_data::Share;
use plotters::prelude::*;

/// Wedge labels sit just outside the rim
const LABEL_DISTANCE: f64 = 1.15;
/// Percentages sit inside the wedge
const PERCENT_DISTANCE: f64 = 0.6;

/// Pie chart of labelled shares, drawn counterclockwise from `start_angle`
#[derive(Debug, Clone)]
pub struct PieChart {
    title: String,
    shares: Vec<Share>,
    /// Degrees counterclockwise from the positive x axis
    start_angle: f64,
}

impl PieChart {
    pub fn new(title: impl Into<String>, shares: Vec<Share>) -> Self {
        Self {
            title: title.into(),
            shares,
            start_angle: 0.0,
        }
    }

    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    fn has_data(&self) -> bool {
        self.shares.iter().any(|share| share.percentage > 0.0)
    }

    /// `(start, end)` angles in degrees of each wedge
    pub fn wedge_angles(&self) -> Vec<(f64, f64)> {
        let mut start = self.start_angle;
        self.shares
            .iter()
            .map(|share| {
                let end = start + share.percentage * 3.6;
                let wedge = (start, end);
                start = end;
                wedge
            })
            .collect()
    }
}

/// Point at `radius` from `center` along `degrees`, with screen y pointing down
fn polar(center: (i32, i32), radius: f64, degrees: f64) -> (i32, i32) {
    let theta = degrees.to_radians();
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 - (radius * theta.sin()).round() as i32,
    )
}

fn wedge_outline(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = ((end - start).abs().ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    points.extend((0..=steps).map(|i| polar(center, radius, start + (end - start) * i as f64 / steps as f64)));
    points
}

impl GraphRenderer for PieChart {
    fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()> {
        let area = area.titled(&self.title, style.title_font())?;
        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);

        if !self.has_data() {
            area.draw(&Text::new("No data", center, style.pie_label_font()))?;
            return Ok(());
        }

        let radius = f64::from(width.min(height)) * 0.32;
        let wedges = self.wedge_angles();

        for (index, ((start, end), share)) in wedges.iter().zip(&self.shares).enumerate() {
            if share.percentage <= 0.0 {
                continue;
            }
            area.draw(&Polygon::new(
                wedge_outline(center, radius, *start, *end),
                style.color(index).filled(),
            ))?;
        }

        for ((start, end), share) in wedges.iter().zip(&self.shares) {
            if share.percentage <= 0.0 {
                continue;
            }
            let middle = (start + end) / 2.0;
            area.draw(&Text::new(
                share.label.clone(),
                polar(center, radius * LABEL_DISTANCE, middle),
                style.pie_label_font(),
            ))?;
            area.draw(&Text::new(
                share.percentage_label(),
                polar(center, radius * PERCENT_DISTANCE, middle),
                style.pie_label_font(),
            ))?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "pie"
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Figure;
    use bikeshare_data::pie_shares;

    #[test]
    fn test_wedges_cover_full_circle() {
        let pie = PieChart::new("Bike Usage by Day", pie_shares([("Weekend", 100.0), ("Weekday", 300.0)]))
            .with_start_angle(90.0);

        let wedges = pie.wedge_angles();
        assert_eq!(wedges[0], (90.0, 180.0));
        assert_eq!(wedges[1].0, 180.0);
        assert!((wedges[1].1 - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_polar_orientation() {
        assert_eq!(polar((100, 100), 10.0, 0.0), (110, 100));
        assert_eq!(polar((100, 100), 10.0, 90.0), (100, 90));
        assert_eq!(polar((100, 100), 10.0, 180.0), (90, 100));
    }

    #[test]
    fn test_render_shows_labels_and_percentages() {
        let pie = PieChart::new("Bike Usage by Day", pie_shares([("Weekend", 100.0), ("Weekday", 300.0)]));
        let svg = Figure::new((900, 600))
            .with_panel(pie)
            .render_svg(&ChartStyle::dashboard())
            .unwrap();

        assert!(svg.contains("Bike Usage by Day"));
        assert!(svg.contains("Weekend"));
        assert!(svg.contains("25.0%"));
        assert!(svg.contains("75.0%"));
        assert!(svg.to_uppercase().contains("#4285F4"));
    }

    #[test]
    fn test_zero_total_renders_no_data() {
        let pie = PieChart::new("User Type Distribution", pie_shares([("Casual", 0.0), ("Registered", 0.0)]));
        let svg = Figure::new((600, 600))
            .with_panel(pie)
            .render_svg(&ChartStyle::dashboard())
            .unwrap();

        assert!(svg.contains("No data"));
        assert!(!svg.contains("0.0%"));
    }
}
