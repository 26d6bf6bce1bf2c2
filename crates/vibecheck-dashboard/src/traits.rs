//! Chart renderer trait definitions.

use crate::chart::ChartSeries;
use plotters::style::RGBColor;
use std::path::Path;
use vibecheck_common::Result;

/// Fallback color for series and styles that cannot be parsed.
pub const FALLBACK_COLOR: RGBColor = RGBColor(0x99, 0x99, 0x99);

/// A renderer turning chart series into an image.
pub trait ChartRenderer {
    /// Render to an in-memory document.
    fn render_to_string(&self, series: &ChartSeries) -> Result<String>;

    /// Render to a file at `path`.
    fn render_to_file(&self, series: &ChartSeries, path: &Path) -> Result<()>;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Parse a `#rrggbb` color, falling back to [`FALLBACK_COLOR`].
    fn parse_color(&self, color: &str) -> RGBColor {
        if let Some(hex) = color.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        FALLBACK_COLOR
    }
}
