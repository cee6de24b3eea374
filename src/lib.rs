//! Publisher × genre mosaic charts.
//!
//! Records are grouped by publisher (column width ∝ the publisher's share of
//! all sales) and by genre (row height ∝ the genre's share within that
//! publisher), then drawn onto a [`Surface`](surface::Surface).

pub mod aggregate;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod fonts;
pub mod html;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod surface;
pub mod svg;
pub mod xml;

pub use config::ChartConfig;
pub use data::{Record, load_records, parse_records};
pub use error::{Error, Result};
pub use layout::{Cell, Column, MosaicLayout};
pub use render::render_chart;

use fonts::TextMeasure;
use svg::{SvgSurface, TooltipMode};

/// Standalone SVG with embedded hover tooltips.
pub fn render_svg<T: TextMeasure>(
    records: &[Record],
    config: &ChartConfig,
    measure: &mut T,
) -> Result<String> {
    let mut surface = SvgSurface::new(measure, config, TooltipMode::Embedded);
    render_chart(records, &mut surface, config)?;
    Ok(surface.into_svg())
}

/// HTML page with the chart and a pointer-following tooltip.
pub fn render_html<T: TextMeasure>(
    records: &[Record],
    config: &ChartConfig,
    measure: &mut T,
    title: &str,
) -> Result<String> {
    let mut surface = SvgSurface::new(measure, config, TooltipMode::External);
    render_chart(records, &mut surface, config)?;
    html::wrap_html(surface.svg(), surface.bindings(), config, title)
}
