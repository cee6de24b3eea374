use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use mosaic::export::{OutputFormat, svg_to_pdf, svg_to_png};
use mosaic::fonts::CosmicTextMeasure;
use mosaic::{ChartConfig, load_records, render_html, render_svg};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Publisher/genre mosaic chart renderer
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(version)]
#[command(about = "Render a publisher/genre mosaic chart to SVG, HTML, PNG or PDF", long_about = None)]
struct Args {
    /// Input JSON dataset: file path, http(s) URL, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file path (extension determines format: .svg, .html, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT", required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Chart config file (TOML or YAML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Built-in palette: tableau10, category10, dark2 or set3
    #[arg(long, value_name = "NAME")]
    palette: Option<String>,

    /// Canvas width
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height
    #[arg(long)]
    height: Option<f64>,

    /// Page title for HTML output
    #[arg(long, default_value = "Publishers by Genre")]
    title: String,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "mosaic", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    let (Some(input), Some(output)) = (args.input.as_deref(), args.output.as_ref()) else {
        return Err("INPUT and --output are required".to_string());
    };
    let format = OutputFormat::from_path(output).map_err(|e| e.to_string())?;

    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path).map_err(|e| e.to_string())?,
        None => ChartConfig::default(),
    };
    if let Some(palette) = args.palette {
        config.palette = palette;
        config.colors = None;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let records = load_records(input).map_err(|e| e.to_string())?;

    let mut measure = CosmicTextMeasure::new();
    let data = match format {
        OutputFormat::Svg => render_svg(&records, &config, &mut measure).map(String::into_bytes),
        OutputFormat::Html => {
            render_html(&records, &config, &mut measure, &args.title).map(String::into_bytes)
        }
        OutputFormat::Png => render_svg(&records, &config, &mut measure)
            .and_then(|svg| svg_to_png(&svg, args.png_scale)),
        OutputFormat::Pdf => {
            render_svg(&records, &config, &mut measure).and_then(|svg| svg_to_pdf(&svg))
        }
    }
    .map_err(|e| e.to_string())?;

    std::fs::write(output, data)
        .map_err(|e| format!("Failed to write {}: {}", format.name(), e))?;
    eprintln!("{} saved to: {}", format.name(), output.display());

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
