//! HTML page assembly

use bikeshare_graphs::RenderedSection;
use std::fmt::Write;

/// Page-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    /// Browser tab title
    pub title: String,
    /// Emoji used as the favicon
    pub icon: String,
    /// Main heading shown above the sections
    pub header: String,
    /// Let figures span the full window width
    pub wide: bool,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: "Bike Sharing Analysis".to_string(),
            icon: "\u{1F6B4}\u{200D}\u{2642}\u{FE0F}".to_string(),
            header: "Bike Sharing Analysis \u{2728}".to_string(),
            wide: true,
        }
    }
}

const STYLE: &str = "body{margin:0;background:#0e1117;color:#fafafa;\
font-family:\"Source Sans Pro\",sans-serif}\
main{margin:0 auto;padding:2rem 3rem}\
h1{font-size:2.75rem;font-weight:700}\
h3{font-size:1.75rem;font-weight:600;margin-top:2.5rem}\
figure{margin:0}figure svg{width:100%;height:auto}";

/// Escape text for use in element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Favicon as an inline SVG data URI drawing the icon emoji
fn favicon_href(icon: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22%3E\
         %3Ctext y=%22.9em%22 font-size=%2290%22%3E{}%3C/text%3E%3C/svg%3E",
        escape_html(icon)
    )
}

/// Build the dashboard page: header, then each heading followed by its figure
pub fn render_page(meta: &PageMeta, sections: &[RenderedSection]) -> String {
    let max_width = if meta.wide { "none" } else { "736px" };
    let mut html = String::with_capacity(sections.iter().map(|s| s.svg.len()).sum::<usize>() + 2048);

    // writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"icon\" href=\"{icon}\">\n\
         <style>{STYLE}main{{max-width:{max_width}}}</style>\n\
         </head>\n<body>\n<main>\n<h1>{header}</h1>\n",
        title = escape_html(&meta.title),
        icon = favicon_href(&meta.icon),
        header = escape_html(&meta.header),
    );

    for section in sections {
        let _ = write!(
            html,
            "<section>\n<h3>{}</h3>\n<figure>\n{}\n</figure>\n</section>\n",
            escape_html(&section.heading),
            section.svg
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}
