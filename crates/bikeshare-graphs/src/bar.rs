//! Bar charts: a single-series category chart and a grouped chart

use crate::renderer::{GraphRenderer, Panel};
use crate::ChartStyle;
use bikeshare_common::Result;
use plotters::prelude::*;

/// Headroom above the tallest bar
const Y_HEADROOM: f64 = 1.1;

fn y_limit(max: u64) -> f64 {
    if max == 0 {
        1.0
    } else {
        max as f64 * Y_HEADROOM
    }
}

/// One color, one bar per category, categories in the given order
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    x_desc: String,
    y_desc: String,
    bars: Vec<(String, u64)>,
    color_index: usize,
}

impl BarChart {
    pub fn new(title: impl Into<String>, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            bars: Vec::new(),
            color_index: 0,
        }
    }

    pub fn with_bars(mut self, bars: impl IntoIterator<Item = (String, u64)>) -> Self {
        self.bars = bars.into_iter().collect();
        self
    }

    /// Palette entry used for every bar
    pub fn with_color(mut self, color_index: usize) -> Self {
        self.color_index = color_index;
        self
    }

    fn max_value(&self) -> u64 {
        self.bars.iter().map(|(_, value)| *value).max().unwrap_or(0)
    }
}

impl GraphRenderer for BarChart {
    fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()> {
        // an integer axis needs at least two ticks
        let last = (self.bars.len().max(2) - 1) as u32;
        let y_max = y_limit(self.max_value()).ceil() as u64;

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, style.title_font())
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(140)
            .build_cartesian_2d((0u32..last).into_segmented(), 0u64..y_max)?;

        let x_formatter = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(index) => self
                .bars
                .get(*index as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(style.grid_line())
            .x_labels(self.bars.len().max(1))
            .x_label_formatter(&x_formatter)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style(style.axis_label_font())
            .label_style(style.tick_font())
            .axis_style(style.axis_line())
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(style.color(self.color_index).filled())
                .margin(4)
                .data(
                    self.bars
                        .iter()
                        .enumerate()
                        .map(|(index, (_, value))| (index as u32, *value)),
                ),
        )?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "bar"
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// One legend group of a [`GroupedBarChart`]
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub color_index: usize,
}

/// Bars for several groups side by side within each category
#[derive(Debug, Clone)]
pub struct GroupedBarChart {
    title: String,
    x_desc: String,
    y_desc: String,
    legend_title: Option<String>,
    categories: Vec<String>,
    groups: Vec<BarGroup>,
    /// `values[category][group]`, `None` where the pair has no data
    values: Vec<Vec<Option<u64>>>,
}

impl GroupedBarChart {
    pub fn new(title: impl Into<String>, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            legend_title: None,
            categories: Vec::new(),
            groups: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }

    pub fn with_groups(mut self, groups: Vec<BarGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Add a category with one value slot per group
    pub fn with_category(mut self, label: impl Into<String>, values: Vec<Option<u64>>) -> Self {
        self.categories.push(label.into());
        self.values.push(values);
        self
    }

    pub fn value(&self, category: usize, group: usize) -> Option<u64> {
        self.values.get(category)?.get(group).copied().flatten()
    }

    fn max_value(&self) -> u64 {
        self.values.iter().flatten().flatten().copied().max().unwrap_or(0)
    }

    /// Horizontal extent of the bar for `group` within `category`
    fn bar_span(&self, category: usize, group: usize) -> (f64, f64) {
        let slot = 0.8 / self.groups.len().max(1) as f64;
        let left = category as f64 - 0.4 + slot * group as f64;
        (left, left + slot)
    }
}

impl GraphRenderer for GroupedBarChart {
    fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()> {
        // one unit per category, centered on its index
        let category_count = self.categories.len().max(1);
        let x_range = -0.5..category_count as f64 - 0.5;

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, style.title_font())
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(140)
            .build_cartesian_2d(x_range, 0f64..y_limit(self.max_value()))?;

        let x_formatter = |x: &f64| {
            let index = x.round();
            if index < 0.0 || (x - index).abs() > 1e-6 {
                return String::new();
            }
            self.categories.get(index as usize).cloned().unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(style.grid_line())
            .x_labels(category_count)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&|y: &f64| format!("{y:.0}"))
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style(style.axis_label_font())
            .label_style(style.tick_font())
            .axis_style(style.axis_line())
            .draw()?;

        if let Some(legend_title) = &self.legend_title {
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label(legend_title.as_str());
        }

        for (group_index, group) in self.groups.iter().enumerate() {
            let color = style.color(group.color_index);
            let bars = (0..self.categories.len()).filter_map(|category| {
                let value = self.value(category, group_index)?;
                let (left, right) = self.bar_span(category, group_index);
                Some(Rectangle::new([(left, 0.0), (right, value as f64)], color.filled()))
            });

            chart
                .draw_series(bars)?
                .label(group.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled()));
        }

        style.draw_legend(&mut chart)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "grouped_bar"
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Figure;

    /// Text elements of an SVG document; the backend writes each on its own line
    fn text_lines(svg: &str) -> Vec<&str> {
        svg.lines().map(str::trim).filter(|line| !line.starts_with('<')).collect()
    }

    fn render(panel: impl GraphRenderer + 'static) -> String {
        Figure::new((1200, 600))
            .with_panel(panel)
            .render_svg(&ChartStyle::dashboard())
            .unwrap()
    }

    #[test]
    fn test_bar_chart_labels_every_category() {
        let chart = BarChart::new("Bike Usage by Hour", "Hour", "Count")
            .with_bars((0..24u8).map(|hour| (hour.to_string(), (u64::from(hour) + 1) * 100)))
            .with_color(2);

        let svg = render(chart);
        let texts = text_lines(&svg);
        assert!(texts.contains(&"Bike Usage by Hour"));
        assert!(texts.contains(&"Hour"));
        for hour in 0..24 {
            assert!(texts.contains(&hour.to_string().as_str()), "missing hour {hour}");
        }
        assert_eq!(svg.to_uppercase().matches("#FBBC05").count(), 24);
    }

    #[test]
    fn test_empty_bar_chart_still_renders() {
        let svg = render(BarChart::new("Bike Usage by Hour", "Hour", "Count"));
        assert!(svg.contains("Bike Usage by Hour"));
    }

    #[test]
    fn test_grouped_bar_layout() {
        let chart = GroupedBarChart::new("Bike Rental by Season and Weather", "Season", "Count")
            .with_groups(vec![
                BarGroup {
                    label: "Clear/Few clouds".into(),
                    color_index: 0,
                },
                BarGroup {
                    label: "Mist/Cloudy".into(),
                    color_index: 1,
                },
            ])
            .with_category("Spring", vec![Some(10), None])
            .with_category("Summer", vec![Some(30), Some(20)]);

        assert_eq!(chart.value(0, 1), None);
        assert_eq!(chart.value(1, 1), Some(20));
        assert_eq!(chart.value(5, 0), None);
        assert_eq!(chart.max_value(), 30);

        let (left, right) = chart.bar_span(1, 0);
        assert!((left - 0.6).abs() < 1e-9);
        assert!((right - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_grouped_bar_legend() {
        let chart = GroupedBarChart::new("Bike Rental by Season and Weather", "Season", "Count")
            .with_legend_title("Weather Situation")
            .with_groups(vec![BarGroup {
                label: "Light Snow/Light Rain".into(),
                color_index: 2,
            }])
            .with_category("Fall", vec![Some(1600)]);

        let svg = render(chart);
        let texts = text_lines(&svg);
        assert!(texts.contains(&"Weather Situation"));
        assert!(texts.contains(&"Light Snow/Light Rain"));
        assert!(texts.contains(&"Fall"));
    }

    #[test]
    fn test_grouped_bar_labels_each_category_once() {
        let seasons = ["Spring", "Summer", "Fall", "Winter"];
        let mut chart = GroupedBarChart::new("Bike Rental by Season and Weather", "Season", "Count")
            .with_groups(vec![
                BarGroup {
                    label: "Clear/Few clouds".into(),
                    color_index: 0,
                },
                BarGroup {
                    label: "Mist/Cloudy".into(),
                    color_index: 1,
                },
            ]);
        for (i, season) in seasons.iter().enumerate() {
            chart = chart.with_category(*season, vec![Some(100 * (i as u64 + 1)), Some(50)]);
        }

        let svg = render(chart);
        let texts = text_lines(&svg);
        for season in seasons {
            assert_eq!(texts.iter().filter(|t| **t == season).count(), 1, "{season}");
        }
        assert!(texts.contains(&"Season"));
        assert!(texts.contains(&"Count"));
    }
}
