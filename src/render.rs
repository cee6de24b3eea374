use crate::aggregate::Aggregate;
use crate::color::CategoricalScale;
use crate::config::ChartConfig;
use crate::data::Record;
use crate::error::Result;
use crate::interaction::HoverBinding;
use crate::layout::{MosaicLayout, compute_layout};
use crate::surface::{RectShape, Rotation, Surface, TextAnchor, TextShape};

const FALLBACK_FILL: &str = "#cccccc";

/// Aggregate, lay out and draw the mosaic onto `surface`.
///
/// Draw order: background, cells (as hover targets), publisher labels in
/// the plot group, then the genre legend to the right of the plot.
pub fn render_chart<S: Surface + ?Sized>(
    records: &[Record],
    surface: &mut S,
    config: &ChartConfig,
) -> Result<MosaicLayout> {
    let palette = config.resolve_palette()?;
    let agg = Aggregate::from_records(records);
    let layout = compute_layout(&agg, config.chart_width(), config.chart_height());
    let colors = CategoricalScale::new(&layout.genres, palette);

    surface.begin(config.width, config.height, &config.background);

    surface.push_group(config.margin.left, config.margin.top);
    draw_cells(surface, &layout, &colors, config);
    draw_publisher_labels(surface, &layout, config);
    surface.pop_group();

    surface.push_group(
        config.width - config.margin.right + config.legend.offset,
        config.margin.top,
    );
    draw_legend(surface, &layout, &colors, config);
    surface.pop_group();

    surface.finish();
    Ok(layout)
}

fn draw_cells<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &MosaicLayout,
    colors: &CategoricalScale,
    config: &ChartConfig,
) {
    for (index, cell) in layout.cells.iter().enumerate() {
        let rect = RectShape {
            x: cell.x,
            y: cell.y,
            // f64::max ignores NaN, so degenerate cells collapse to zero size.
            width: cell.width.max(0.0),
            height: cell.height.max(0.0),
            fill: colors
                .color(&cell.genre)
                .unwrap_or(FALLBACK_FILL)
                .to_string(),
            stroke: Some((config.cell_stroke.color.clone(), config.cell_stroke.width)),
        };
        let hover = HoverBinding::for_cell(cell, config);
        surface.hover_target(index, &rect, &hover);
    }
}

fn draw_publisher_labels<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &MosaicLayout,
    config: &ChartConfig,
) {
    let style = &config.labels;
    for column in &layout.columns {
        let cx = column.center_x();
        surface.text(&TextShape {
            x: cx + style.offset_x,
            y: style.offset_y,
            content: column.publisher.clone(),
            font_size: style.font_size,
            bold: false,
            fill: style.color.clone(),
            anchor: TextAnchor::Middle,
            rotation: Some(Rotation {
                degrees: style.rotation,
                cx,
                cy: style.pivot_y,
            }),
        });
    }
}

fn draw_legend<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &MosaicLayout,
    colors: &CategoricalScale,
    config: &ChartConfig,
) {
    let legend = &config.legend;
    surface.text(&TextShape {
        x: 0.0,
        y: 0.0,
        content: legend.title.clone(),
        font_size: legend.title_font_size,
        bold: true,
        fill: legend.color.clone(),
        anchor: TextAnchor::Start,
        rotation: None,
    });

    let label_x = legend.swatch_size + 6.0;
    for (i, genre) in layout.genres.iter().enumerate() {
        let row_y = i as f64 * legend.row_height;
        surface.rect(&RectShape {
            x: 0.0,
            y: row_y + 10.0,
            width: legend.swatch_size,
            height: legend.swatch_size,
            fill: colors.color(genre).unwrap_or(FALLBACK_FILL).to_string(),
            stroke: None,
        });
        surface.text(&TextShape {
            x: label_x,
            y: row_y + 22.0,
            content: genre.clone(),
            font_size: legend.font_size,
            bold: false,
            fill: legend.color.clone(),
            anchor: TextAnchor::Start,
            rotation: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Element, RecordingSurface};

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("A", "RPG", "PC", 50.0),
            Record::new("A", "Action", "PS4", 50.0),
            Record::new("B", "RPG", "PC", 100.0),
        ]
    }

    #[test]
    fn draws_groups_in_order() {
        let mut surface = RecordingSurface::new();
        render_chart(&scenario(), &mut surface, &ChartConfig::default()).expect("renders");

        assert_eq!(
            surface.elements.first(),
            Some(&Element::Begin {
                width: 700.0,
                height: 500.0,
                background: "#fafafa".to_string(),
            })
        );
        assert_eq!(surface.elements[1], Element::PushGroup { dx: 100.0, dy: 80.0 });
        assert_eq!(surface.elements.last(), Some(&Element::Finish));

        let legend_group = surface
            .elements
            .iter()
            .filter(|el| matches!(el, Element::PushGroup { .. }))
            .nth(1);
        assert_eq!(legend_group, Some(&Element::PushGroup { dx: 580.0, dy: 80.0 }));
    }

    #[test]
    fn cells_share_genre_colours_and_white_borders() {
        let mut surface = RecordingSurface::new();
        render_chart(&scenario(), &mut surface, &ChartConfig::default()).expect("renders");

        let targets: Vec<_> = surface.hover_targets().collect();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].0.fill, "#4e79a7");
        assert_eq!(targets[1].0.fill, "#f28e2c");
        assert_eq!(targets[2].0.fill, targets[0].0.fill);
        assert!(
            targets
                .iter()
                .all(|(rect, _)| rect.stroke == Some(("#ffffff".to_string(), 1.0)))
        );
    }

    #[test]
    fn publisher_labels_rotate_about_column_centres() {
        let mut surface = RecordingSurface::new();
        render_chart(&scenario(), &mut surface, &ChartConfig::default()).expect("renders");

        let label = surface
            .texts()
            .find(|t| t.content == "B")
            .expect("label for B");
        assert_eq!(label.x, 345.0 + 25.0);
        assert_eq!(label.y, -30.0);
        assert_eq!(label.anchor, TextAnchor::Middle);
        assert_eq!(
            label.rotation,
            Some(Rotation {
                degrees: -45.0,
                cx: 345.0,
                cy: -10.0
            })
        );
    }

    #[test]
    fn legend_lists_genres_with_swatches() {
        let mut surface = RecordingSurface::new();
        render_chart(&scenario(), &mut surface, &ChartConfig::default()).expect("renders");

        let title = surface.texts().find(|t| t.bold).expect("legend title");
        assert_eq!(title.content, "Genre");

        let swatches: Vec<_> = surface.rects().collect();
        assert_eq!(swatches.len(), 2);
        assert_eq!((swatches[1].y, swatches[1].width), (32.0, 16.0));
        assert_eq!(swatches[1].fill, "#f28e2c");

        let action = surface
            .texts()
            .find(|t| t.content == "Action")
            .expect("legend label");
        assert_eq!((action.x, action.y), (22.0, 44.0));
    }

    #[test]
    fn negative_and_nan_sizes_are_clamped() {
        let records = vec![Record::new("A", "RPG", "PC", 0.0)];
        let mut surface = RecordingSurface::new();
        render_chart(&records, &mut surface, &ChartConfig::default()).expect("renders");

        let (rect, _) = surface.hover_targets().next().expect("one cell");
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn unknown_palette_is_an_error() {
        let config = ChartConfig {
            palette: "nope".to_string(),
            ..ChartConfig::default()
        };
        let mut surface = RecordingSurface::new();
        assert!(render_chart(&scenario(), &mut surface, &config).is_err());
        assert!(surface.elements.is_empty());
    }
}
