//! The four dashboard sections, each one figure under a numbered heading

use crate::{BarChart, BarGroup, BinLayout, ChartStyle, Figure, GroupedBarChart, HistogramChart, PieChart};
use bikeshare_common::Result;
use bikeshare_data::{
    DayType, DayTypeUsage, HourlyUsage, SeasonWeatherUsage, UsageSummary, UserTypeUsage,
};
use tracing::{info, instrument};

/// Palette slot of each day type's bars
fn day_type_color(day_type: DayType) -> usize {
    match day_type {
        DayType::Weekend => 0,
        DayType::Weekday => 1,
    }
}

/// Mean lines are drawn in the opposite group's bar color
const WEEKDAY_AVG_COLOR: usize = 0;
const WEEKEND_AVG_COLOR: usize = 1;

const HOURLY_COLOR: usize = 2;
const CASUAL_COLOR: usize = 0;
const REGISTERED_COLOR: usize = 1;

/// A heading and the figure drawn below it
#[derive(Debug)]
pub struct Section {
    pub heading: String,
    pub figure: Figure,
}

/// A section after rendering: its heading and an SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub heading: String,
    pub svg: String,
}

impl Section {
    #[instrument(skip_all, fields(heading = %self.heading))]
    pub fn render(&self, style: &ChartStyle) -> Result<RenderedSection> {
        let svg = self.figure.render_svg(style)?;
        Ok(RenderedSection {
            heading: self.heading.clone(),
            svg,
        })
    }
}

fn day_type_histogram(usage: &DayTypeUsage) -> HistogramChart {
    let mut histogram = HistogramChart::new(
        "Bike Usage Histogram by Weekday and Weekend",
        "Bike Usage Count",
        "Frequency",
        BinLayout::Dodge,
    );
    for day_type in DayType::ALL {
        histogram = histogram.with_series(
            day_type.label(),
            usage.group(day_type).counts.clone(),
            day_type_color(day_type),
        );
    }
    histogram
        .with_mean_line("Weekday Avg", usage.weekday.mean(), WEEKDAY_AVG_COLOR)
        .with_mean_line("Weekend Avg", usage.weekend.mean(), WEEKEND_AVG_COLOR)
}

/// Weekend/weekday pie next to the daily count histogram
pub fn daily_usage_section(usage: &DayTypeUsage, size: (u32, u32)) -> Section {
    let pie = PieChart::new("Bike Usage by Day", usage.shares()).with_start_angle(90.0);
    let histogram = day_type_histogram(usage);

    Section {
        heading: "1. Daily Bike Usage".to_string(),
        figure: Figure::new(size).with_panel(pie).with_panel(histogram),
    }
}

/// Total rentals for each hour of the day
pub fn hourly_usage_section(usage: &HourlyUsage, size: (u32, u32)) -> Section {
    let chart = BarChart::new("Bike Usage by Hour", "Hour", "Count")
        .with_bars(usage.series().into_iter().map(|(hour, total)| (hour.to_string(), total)))
        .with_color(HOURLY_COLOR);

    Section {
        heading: "2. Hourly Bike Usage".to_string(),
        figure: Figure::new(size).with_panel(chart),
    }
}

/// Rentals per season, one bar per weather situation
pub fn season_weather_section(usage: &SeasonWeatherUsage, size: (u32, u32)) -> Section {
    let situations = usage.weather_situations();
    let groups = situations
        .iter()
        .map(|weather| BarGroup {
            label: weather.label().to_string(),
            color_index: weather.index(),
        })
        .collect();

    let mut chart = GroupedBarChart::new("Bike Rental by Season and Weather", "Season", "Count")
        .with_legend_title("Weather Situation")
        .with_groups(groups);
    for season in usage.seasons() {
        let values = situations.iter().map(|&weather| usage.get(season, weather)).collect();
        chart = chart.with_category(season.label(), values);
    }

    Section {
        heading: "3. Bike Usage by Season and Weather".to_string(),
        figure: Figure::new(size).with_panel(chart),
    }
}

/// Casual/registered pie next to the overlapping per-day histograms
pub fn user_type_section(usage: &UserTypeUsage, size: (u32, u32)) -> Section {
    let pie = PieChart::new("User Type Distribution", usage.shares()).with_start_angle(100.0);
    let histogram = HistogramChart::new(
        "User Type Comparison",
        "Bike Usage Count (cnt)",
        "Frequency",
        BinLayout::Overlay,
    )
    .with_legend_title("User Type")
    .with_series("Casual", usage.casual.clone(), CASUAL_COLOR)
    .with_series("Registered", usage.registered.clone(), REGISTERED_COLOR);

    Section {
        heading: "4. User Type Comparison".to_string(),
        figure: Figure::new(size).with_panel(pie).with_panel(histogram),
    }
}

/// All four sections, in page order
pub fn dashboard_sections(summary: &UsageSummary, size: (u32, u32)) -> Vec<Section> {
    vec![
        daily_usage_section(&summary.day_type, size),
        hourly_usage_section(&summary.hourly, size),
        season_weather_section(&summary.season_weather, size),
        user_type_section(&summary.user_type, size),
    ]
}

/// Build and render every section; the first failure aborts the lot
#[instrument(skip_all)]
pub fn render_dashboard(summary: &UsageSummary, size: (u32, u32), style: &ChartStyle) -> Result<Vec<RenderedSection>> {
    let rendered = dashboard_sections(summary, size)
        .iter()
        .map(|section| section.render(style))
        .collect::<Result<Vec<_>>>()?;

    info!(sections = rendered.len(), "Rendered dashboard charts");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_data::{
        day_type_usage, hourly_usage, season_weather_usage, user_type_usage, DailyRecord, HourlyRecord,
    };

    const SIZE: (u32, u32) = (1400, 600);

    fn days() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(1, 0, 1, 40, 60, 100),
            DailyRecord::new(2, 1, 2, 100, 100, 200),
            DailyRecord::new(3, 1, 3, 30, 70, 100),
        ]
    }

    #[test]
    fn test_daily_usage_section() {
        let section = daily_usage_section(&day_type_usage(&days()).unwrap(), SIZE);
        assert_eq!(section.heading, "1. Daily Bike Usage");

        let names: Vec<&str> = section.figure.panels().map(|p| p.title()).collect();
        assert_eq!(names, vec!["Bike Usage by Day", "Bike Usage Histogram by Weekday and Weekend"]);

        let rendered = section.render(&ChartStyle::dashboard()).unwrap();
        assert!(rendered.svg.contains("25.0%"));
        assert!(rendered.svg.contains("75.0%"));
        assert!(rendered.svg.contains("Weekday Avg"));
        assert!(rendered.svg.contains("Weekend Avg"));
    }

    #[test]
    fn test_mean_lines_use_opposite_group_colors() {
        let histogram = day_type_histogram(&day_type_usage(&days()).unwrap());

        let lines: Vec<(&str, usize)> = histogram
            .mean_lines()
            .iter()
            .map(|line| (line.label.as_str(), line.color_index))
            .collect();
        assert_eq!(lines, vec![("Weekday Avg", 0), ("Weekend Avg", 1)]);

        let weekday = &histogram.mean_lines()[0];
        assert!((weekday.value - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_line_strokes_in_rendered_svg() {
        // weekend only: its mean line is the sole green stroke
        let usage = day_type_usage(&[DailyRecord::new(1, 0, 1, 40, 60, 100)]).unwrap();
        let svg = Figure::new(SIZE)
            .with_panel(day_type_histogram(&usage))
            .render_svg(&ChartStyle::dashboard())
            .unwrap()
            .to_uppercase();

        assert!(svg.contains("STROKE=\"#34A853\""));
        assert!(!svg.contains("STROKE=\"#4285F4\""));
    }

    #[test]
    fn test_hourly_section_has_a_bar_per_hour() {
        let records: Vec<HourlyRecord> = (0..24u8).map(|h| HourlyRecord::new(h, 10 + u32::from(h))).collect();
        let section = hourly_usage_section(&hourly_usage(&records).unwrap(), SIZE);

        assert_eq!(section.heading, "2. Hourly Bike Usage");
        let rendered = section.render(&ChartStyle::dashboard()).unwrap();
        assert!(rendered.svg.contains("Bike Usage by Hour"));
    }

    #[test]
    fn test_season_weather_section() {
        let section = season_weather_section(&season_weather_usage(&days()).unwrap(), SIZE);
        assert_eq!(section.heading, "3. Bike Usage by Season and Weather");

        let svg = section.render(&ChartStyle::dashboard()).unwrap().svg;
        for text in ["Bike Rental by Season and Weather", "Weather Situation", "Spring", "Fall", "Mist/Cloudy"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    #[test]
    fn test_user_type_section() {
        let section = user_type_section(&user_type_usage(&days()), SIZE);
        assert_eq!(section.heading, "4. User Type Comparison");

        let svg = section.render(&ChartStyle::dashboard()).unwrap().svg;
        for text in ["User Type Distribution", "User Type Comparison", "Casual", "Registered"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    #[test]
    fn test_sections_in_page_order() {
        let daily = days();
        let summary = UsageSummary {
            day_type: day_type_usage(&daily).unwrap(),
            hourly: hourly_usage(&[HourlyRecord::new(8, 5)]).unwrap(),
            season_weather: season_weather_usage(&daily).unwrap(),
            user_type: user_type_usage(&daily),
        };

        let rendered = render_dashboard(&summary, SIZE, &ChartStyle::dashboard()).unwrap();
        let headings: Vec<&str> = rendered.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "1. Daily Bike Usage",
                "2. Hourly Bike Usage",
                "3. Bike Usage by Season and Weather",
                "4. User Type Comparison",
            ]
        );
        assert!(rendered.iter().all(|s| s.svg.starts_with("<svg")));
    }
}
