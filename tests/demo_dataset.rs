use std::path::PathBuf;

use mosaic::export::svg_to_png;
use mosaic::fonts::FixedAdvanceMeasure;
use mosaic::{ChartConfig, load_records, render_svg};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn loads_sample_dataset_and_config() {
    let records = load_records(demo("vgs_cleaned.json").to_str().expect("utf-8 path"))
        .expect("sample loads");
    assert_eq!(records.len(), 22);
    assert_eq!(records[0].publisher, "Nintendo");

    let config = ChartConfig::load(&demo("mosaic.toml")).expect("sample config loads");
    assert_eq!(config.width, 760.0);
    assert_eq!(config.margin.top, 90.0);
    assert_eq!(config.margin.bottom, 40.0);
    assert_eq!(config.chart_width(), 760.0 - 110.0 - 140.0);
}

#[test]
fn renders_sample_to_png() {
    let records = load_records(demo("vgs_cleaned.json").to_str().expect("utf-8 path"))
        .expect("sample loads");
    let config = ChartConfig::default();
    let mut measure = FixedAdvanceMeasure::default();

    let svg = render_svg(&records, &config, &mut measure).expect("renders");
    let png = svg_to_png(&svg, 1.0).expect("rasterizes");
    assert!(png.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}
