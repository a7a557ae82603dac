//! Shared chart styling

use bikeshare_common::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Dashboard palette: blue, green, yellow, red
pub const PALETTE: [RGBColor; 4] = [
    RGBColor(0x42, 0x85, 0xF4),
    RGBColor(0x34, 0xA8, 0x53),
    RGBColor(0xFB, 0xBC, 0x05),
    RGBColor(0xEA, 0x43, 0x35),
];

/// Immutable styling handed to every renderer.
///
/// Charts are drawn for a dark page: transparent backgrounds and white text,
/// with legends kept readable as black text on a light box.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub palette: Vec<RGBColor>,
    pub font_family: String,
    pub background: RGBAColor,
    pub text_color: RGBColor,
    pub legend_text_color: RGBColor,
    pub legend_background: RGBAColor,
    pub tick_size: u32,
    pub axis_label_size: u32,
    pub title_size: u32,
    pub pie_label_size: u32,
    pub legend_size: u32,
    /// Opacity of overlapping histogram bars
    pub bar_alpha: f64,
    pub mean_line_width: u32,
}

impl ChartStyle {
    /// The dashboard look
    pub fn dashboard() -> Self {
        Self {
            palette: PALETTE.to_vec(),
            font_family: "sans-serif".to_string(),
            background: TRANSPARENT,
            text_color: WHITE,
            legend_text_color: BLACK,
            legend_background: WHITE.mix(0.8),
            tick_size: 20,
            axis_label_size: 30,
            title_size: 30,
            pie_label_size: 40,
            legend_size: 20,
            bar_alpha: 0.5,
            mean_line_width: 1,
        }
    }

    /// Palette color `index`, wrapping around
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    fn text(&self, size: u32, color: &RGBColor) -> TextStyle<'_> {
        (self.font_family.as_str(), size).into_font().color(color)
    }

    pub fn tick_font(&self) -> TextStyle<'_> {
        self.text(self.tick_size, &self.text_color)
    }

    pub fn axis_label_font(&self) -> TextStyle<'_> {
        self.text(self.axis_label_size, &self.text_color)
    }

    pub fn title_font(&self) -> TextStyle<'_> {
        self.text(self.title_size, &self.text_color)
    }

    /// Pie wedge labels, centered on their anchor point
    pub fn pie_label_font(&self) -> TextStyle<'_> {
        self.text(self.pie_label_size, &self.text_color)
            .pos(Pos::new(HPos::Center, VPos::Center))
    }

    pub fn legend_font(&self) -> TextStyle<'_> {
        self.text(self.legend_size, &self.legend_text_color)
    }

    pub fn axis_line(&self) -> ShapeStyle {
        self.text_color.stroke_width(1)
    }

    /// Faint horizontal grid lines
    pub fn grid_line(&self) -> ShapeStyle {
        self.text_color.mix(0.2).stroke_width(1)
    }

    /// Draw the series legend in the upper right corner
    pub fn draw_legend<'a, 'b: 'a, CT: CoordTranslate>(
        &self,
        chart: &mut ChartContext<'a, SVGBackend<'b>, CT>,
    ) -> Result<()> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(15)
            .background_style(self.legend_background)
            .border_style(self.legend_text_color)
            .label_font(self.legend_font())
            .draw()?;
        Ok(())
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_style() {
        let style = ChartStyle::dashboard();

        assert_eq!(style.color(0), RGBColor(66, 133, 244));
        assert_eq!(style.color(2), RGBColor(251, 188, 5));
        assert_eq!(style.color(5), style.color(1));
        assert_eq!(style.background.3, 0.0);
        assert_eq!((style.tick_size, style.axis_label_size, style.title_size), (20, 30, 30));
        assert_eq!(style.pie_label_size, 40);
    }

    #[test]
    fn test_empty_palette_falls_back_to_black() {
        let style = ChartStyle {
            palette: Vec::new(),
            ..ChartStyle::dashboard()
        };
        assert_eq!(style.color(3), BLACK);
    }
}
