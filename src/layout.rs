use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::error::Result;

/// One publisher column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub publisher: String,
    pub total: f64,
    pub x: f64,
    pub width: f64,
}

impl Column {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// One publisher × genre rectangle, in plot-area coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub publisher: String,
    pub genre: String,
    pub platform: String,
    pub count: f64,
    pub percent: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Cell {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Columns, cells and the genre order that drives colours and the legend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MosaicLayout {
    pub columns: Vec<Column>,
    pub cells: Vec<Cell>,
    pub genres: Vec<String>,
}

impl MosaicLayout {
    pub fn cells_for<'s>(&'s self, publisher: &'s str) -> impl Iterator<Item = &'s Cell> + 's {
        self.cells.iter().filter(move |cell| cell.publisher == publisher)
    }

    /// JSON with `columns`, `cells` and `genres` keys. Non-finite
    /// coordinates come out as `null`.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let json = if compact {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(json)
    }
}

/// Lay out the mosaic inside a `chart_width × chart_height` plot area.
///
/// Columns are placed left to right in publisher order, each as wide as
/// the publisher's share of the grand total. Inside a column, genres are
/// visited in global genre order and present pairs stack downwards with
/// no gap left for absent genres.
pub fn compute_layout(agg: &Aggregate<'_>, chart_width: f64, chart_height: f64) -> MosaicLayout {
    let grand_total = agg.grand_total();
    if grand_total == 0.0 && !agg.publishers().is_empty() {
        tracing::warn!("Grand total is zero; chart geometry will be degenerate");
    }

    let mut columns = Vec::with_capacity(agg.publishers().len());
    let mut cells = Vec::new();
    let mut x = 0.0;

    for &publisher in agg.publishers() {
        let total = agg.publisher_total(publisher);
        let width = total / grand_total * chart_width;
        columns.push(Column {
            publisher: publisher.to_string(),
            total,
            x,
            width,
        });

        let mut y = 0.0;
        for &genre in agg.genres() {
            let Some(record) = agg.lookup(publisher, genre) else {
                continue;
            };

            let share = record.count / total;
            let height = share * chart_height;
            cells.push(Cell {
                publisher: record.publisher.clone(),
                genre: record.genre.clone(),
                platform: record.platform.clone(),
                count: record.count,
                percent: share * 100.0,
                x,
                y,
                width,
                height,
            });
            y += height;
        }

        x += width;
    }

    tracing::debug!(
        "Layout: {} columns, {} cells in {:.1}x{:.1}",
        columns.len(),
        cells.len(),
        chart_width,
        chart_height
    );

    MosaicLayout {
        columns,
        cells,
        genres: agg.genres().iter().map(|g| g.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    const W: f64 = 460.0;
    const H: f64 = 380.0;

    fn layout_of(records: &[Record]) -> MosaicLayout {
        compute_layout(&Aggregate::from_records(records), W, H)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_publisher_scenario() {
        let records = vec![
            Record::new("A", "RPG", "PC", 50.0),
            Record::new("A", "Action", "PS4", 50.0),
            Record::new("B", "RPG", "PC", 100.0),
        ];
        let layout = layout_of(&records);

        assert_eq!(layout.columns.len(), 2);
        assert!(approx(layout.columns[0].width, W / 2.0));
        assert!(approx(layout.columns[1].width, W / 2.0));
        assert!(approx(layout.columns[1].x, W / 2.0));

        let a: Vec<_> = layout.cells_for("A").collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].genre, "RPG");
        assert!(approx(a[0].height, H / 2.0));
        assert!(approx(a[1].y, H / 2.0));
        assert!(a.iter().all(|cell| approx(cell.percent, 50.0)));

        let b: Vec<_> = layout.cells_for("B").collect();
        assert_eq!(b.len(), 1);
        assert!(approx(b[0].y, 0.0));
        assert!(approx(b[0].height, H));
        assert!(approx(b[0].percent, 100.0));
    }

    #[test]
    fn absent_genre_leaves_no_gap() {
        let records = vec![
            Record::new("A", "RPG", "PC", 10.0),
            Record::new("A", "Action", "PC", 10.0),
            Record::new("A", "Sports", "PC", 20.0),
            Record::new("B", "RPG", "PS4", 30.0),
            Record::new("B", "Sports", "PS4", 10.0),
        ];
        let layout = layout_of(&records);

        let b: Vec<_> = layout.cells_for("B").collect();
        assert_eq!(b.len(), 2);
        assert!(b.iter().all(|cell| cell.genre != "Action"));
        assert!(approx(b[0].height, H * 0.75));
        assert!(approx(b[1].y, b[0].height));
        assert!(approx(b[1].height, H * 0.25));
    }

    #[test]
    fn cells_follow_global_genre_order() {
        let records = vec![
            Record::new("A", "Puzzle", "DS", 1.0),
            Record::new("B", "Racing", "PS2", 1.0),
            Record::new("B", "Puzzle", "PS2", 1.0),
        ];
        let layout = layout_of(&records);
        let b: Vec<_> = layout.cells_for("B").map(|c| c.genre.as_str()).collect();
        assert_eq!(b, ["Puzzle", "Racing"]);
        assert_eq!(layout.genres, ["Puzzle", "Racing"]);
    }

    #[test]
    fn zero_grand_total_produces_non_finite_geometry() {
        let records = vec![Record::new("A", "RPG", "PC", 0.0)];
        let layout = layout_of(&records);
        assert!(layout.columns[0].width.is_nan());
        assert!(layout.cells[0].height.is_nan());
    }

    #[test]
    fn json_dump_carries_columns_cells_and_genres() {
        let records = vec![
            Record::new("A", "RPG", "PS2", 30.0),
            Record::new("B", "Action", "X360", 10.0),
        ];
        let json = layout_of(&records).to_json(true).expect("serializes");
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["columns"][1]["publisher"], "B");
        assert_eq!(value["columns"][0]["width"], 345.0);
        assert_eq!(value["cells"][0]["genre"], "RPG");
        assert_eq!(value["cells"][1]["percent"], 100.0);
        assert_eq!(value["genres"], serde_json::json!(["RPG", "Action"]));
    }

    #[test]
    fn json_dump_writes_nan_geometry_as_null() {
        let records = vec![Record::new("A", "RPG", "PC", 0.0)];
        let json = layout_of(&records).to_json(false).expect("serializes");
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert!(value["columns"][0]["width"].is_null());
        assert!(value["cells"][0]["height"].is_null());
        assert_eq!(value["cells"][0]["count"], 0.0);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = layout_of(&[]);
        assert!(layout.columns.is_empty());
        assert!(layout.cells.is_empty());
    }
}
