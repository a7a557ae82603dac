//! Frequency histograms with optional dashed mean markers

use crate::renderer::{GraphRenderer, Panel};
use crate::ChartStyle;
use bikeshare_common::Result;
use bikeshare_data::{HistogramBins, DEFAULT_BINS};
use plotters::prelude::*;

/// Number of dashes in a full-height mean line
const DASHES: usize = 30;

/// How several series share the bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLayout {
    /// Common bins, bars of each series side by side within a bin
    Dodge,
    /// Each series binned over its own range, bars drawn on top of each other
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
struct HistogramSeries {
    label: String,
    values: Vec<u32>,
    color_index: usize,
}

/// Dashed vertical marker with its own legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct MeanLine {
    pub label: String,
    pub value: f64,
    pub color_index: usize,
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    title: String,
    x_desc: String,
    y_desc: String,
    legend_title: Option<String>,
    layout: BinLayout,
    bins: usize,
    series: Vec<HistogramSeries>,
    mean_lines: Vec<MeanLine>,
}

impl HistogramChart {
    pub fn new(
        title: impl Into<String>,
        x_desc: impl Into<String>,
        y_desc: impl Into<String>,
        layout: BinLayout,
    ) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            legend_title: None,
            layout,
            bins: DEFAULT_BINS,
            series: Vec::new(),
            mean_lines: Vec::new(),
        }
    }

    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }

    pub fn with_series(mut self, label: impl Into<String>, values: Vec<u32>, color_index: usize) -> Self {
        self.series.push(HistogramSeries {
            label: label.into(),
            values,
            color_index,
        });
        self
    }

    /// Add a mean marker; `None` (an empty group) adds nothing
    pub fn with_mean_line(mut self, label: impl Into<String>, value: Option<f64>, color_index: usize) -> Self {
        if let Some(value) = value {
            self.mean_lines.push(MeanLine {
                label: label.into(),
                value,
                color_index,
            });
        }
        self
    }

    pub fn mean_lines(&self) -> &[MeanLine] {
        &self.mean_lines
    }

    /// Bins per series: one shared set for [`BinLayout::Dodge`], one set
    /// per series for [`BinLayout::Overlay`]
    pub fn binned(&self) -> Vec<HistogramBins> {
        match self.layout {
            BinLayout::Dodge => {
                let values: Vec<&[u32]> = self.series.iter().map(|s| s.values.as_slice()).collect();
                vec![HistogramBins::shared(&values, self.bins)]
            }
            BinLayout::Overlay => self
                .series
                .iter()
                .map(|s| HistogramBins::single(&s.values, self.bins))
                .collect(),
        }
    }

    /// `(frequency, left, right)` of every non-empty bar of series `index`
    fn bars(&self, binned: &[HistogramBins], index: usize) -> Vec<(u32, f64, f64)> {
        let (bins, counts, slot) = match self.layout {
            BinLayout::Dodge => (&binned[0], &binned[0].counts[index], Some(index)),
            BinLayout::Overlay => (&binned[index], &binned[index].counts[0], None),
        };
        let series_count = self.series.len().max(1) as f64;

        (0..bins.bin_count())
            .filter(|&bin| counts[bin] > 0)
            .map(|bin| {
                let (start, end) = bins.bin_range(bin);
                let (left, right) = match slot {
                    Some(slot) => {
                        let width = (end - start) * 0.9 / series_count;
                        let left = start + (end - start) * 0.05 + width * slot as f64;
                        (left, left + width)
                    }
                    None => (start, end),
                };
                (counts[bin], left, right)
            })
            .collect()
    }

    fn x_range(&self, binned: &[HistogramBins]) -> (f64, f64) {
        let start = binned
            .iter()
            .filter_map(|b| b.edges.first())
            .chain(self.mean_lines.iter().map(|m| &m.value))
            .copied()
            .fold(f64::INFINITY, f64::min);
        let end = binned
            .iter()
            .filter_map(|b| b.edges.last())
            .chain(self.mean_lines.iter().map(|m| &m.value))
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        if !start.is_finite() || !end.is_finite() {
            return (0.0, 1.0);
        }
        let padding = (end - start) * 0.02;
        (start - padding, end + padding)
    }
}

/// Dash segments of a vertical line at `x` from 0 to `top`
fn dashed_segments(x: f64, top: f64) -> Vec<Vec<(f64, f64)>> {
    let step = top / (DASHES as f64 * 2.0);
    (0..DASHES)
        .map(|i| {
            let y = step * 2.0 * i as f64;
            vec![(x, y), (x, y + step)]
        })
        .collect()
}

impl GraphRenderer for HistogramChart {
    fn render(&self, area: &Panel<'_>, style: &ChartStyle) -> Result<()> {
        let binned = self.binned();
        let (x_start, x_end) = self.x_range(&binned);
        let max_frequency = binned.iter().map(HistogramBins::max_frequency).max().unwrap_or(0);
        let y_top = f64::from(max_frequency.max(1)) * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, style.title_font())
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(100)
            .build_cartesian_2d(x_start..x_end, 0f64..y_top)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(style.grid_line())
            .x_label_formatter(&|x: &f64| format!("{x:.0}"))
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

        for (index, series) in self.series.iter().enumerate() {
            let fill = style.color(series.color_index).mix(style.bar_alpha);
            let bars = self
                .bars(&binned, index)
                .into_iter()
                .map(|(count, left, right)| Rectangle::new([(left, 0.0), (right, f64::from(count))], fill.filled()));

            chart
                .draw_series(bars)?
                .label(series.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], fill.filled()));
        }

        for mean in &self.mean_lines {
            let color = style.color(mean.color_index);
            let width = style.mean_line_width;
            let dashes = dashed_segments(mean.value, y_top)
                .into_iter()
                .map(|segment| PathElement::new(segment, color.stroke_width(width)));

            chart
                .draw_series(dashes)?
                .label(mean.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
        }

        style.draw_legend(&mut chart)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "histogram"
    }

    fn title(&self) -> &str {
        &self.title
    }
}
