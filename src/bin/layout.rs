use clap::Parser;
use mosaic::aggregate::Aggregate;
use mosaic::layout::compute_layout;
use mosaic::{ChartConfig, load_records};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print the computed mosaic layout as JSON
#[derive(Parser, Debug)]
#[command(name = "mosaic-layout")]
#[command(version)]
#[command(about = "Compute publisher columns and genre cells without drawing them", long_about = None)]
struct Args {
    /// Input JSON dataset: file path, http(s) URL, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Chart config file (TOML or YAML) providing canvas size and margins
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => ChartConfig::load(path).map_err(|e| e.to_string())?,
        None => ChartConfig::default(),
    };

    let records = load_records(&args.input).map_err(|e| e.to_string())?;
    let agg = Aggregate::from_records(&records);
    let layout = compute_layout(&agg, config.chart_width(), config.chart_height());

    let json = layout
        .to_json(args.compact)
        .map_err(|e| format!("Failed to serialize layout: {}", e))?;

    println!("{}", json);
    Ok(())
}
