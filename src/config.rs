use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_PALETTE, builtin_palette};
use crate::error::{Error, Result};

const CANVAS_WIDTH: f64 = 700.0;
const CANVAS_HEIGHT: f64 = 500.0;
const BACKGROUND: &str = "#fafafa";
const FONT_FAMILY: &str = "sans-serif";
const HIGHLIGHT_MS: u32 = 100;
const REVERT_MS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 80.0,
            bottom: 40.0,
            left: 100.0,
            right: 140.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

/// Rotated publisher names above the columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_size: f64,
    pub rotation: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub pivot_y: f64,
    pub color: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            rotation: -45.0,
            offset_x: 25.0,
            offset_y: -30.0,
            pivot_y: -10.0,
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendStyle {
    pub title: String,
    pub title_font_size: f64,
    pub font_size: f64,
    pub swatch_size: f64,
    pub row_height: f64,
    /// Gap between the plot's right edge and the legend.
    pub offset: f64,
    pub color: String,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            title: "Genre".to_string(),
            title_font_size: 11.0,
            font_size: 10.0,
            swatch_size: 16.0,
            row_height: 22.0,
            offset: 20.0,
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub background: String,
    pub border: String,
    pub text_color: String,
    pub padding: f64,
    pub radius: f64,
    pub font_size: f64,
    pub line_height: f64,
    /// Offset from the pointer (or the cell centre in static SVG).
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            border: "#b6b6b6".to_string(),
            text_color: "#000000".to_string(),
            padding: 10.0,
            radius: 4.0,
            font_size: 12.0,
            line_height: 1.4,
            offset_x: 10.0,
            offset_y: -10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub margin: Margins,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Built-in palette name, ignored when `colors` is set.
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    #[serde(default = "default_cell_stroke")]
    pub cell_stroke: Stroke,
    #[serde(default = "default_hover_stroke")]
    pub hover_stroke: Stroke,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u32,
    #[serde(default = "default_revert_ms")]
    pub revert_ms: u32,

    #[serde(default)]
    pub labels: LabelStyle,
    #[serde(default)]
    pub legend: LegendStyle,
    #[serde(default)]
    pub tooltip: TooltipStyle,
}

fn default_width() -> f64 {
    CANVAS_WIDTH
}
fn default_height() -> f64 {
    CANVAS_HEIGHT
}
fn default_background() -> String {
    BACKGROUND.to_string()
}
fn default_font_family() -> String {
    FONT_FAMILY.to_string()
}
fn default_palette() -> String {
    DEFAULT_PALETTE.to_string()
}
fn default_cell_stroke() -> Stroke {
    Stroke::new("#ffffff", 1.0)
}
fn default_hover_stroke() -> Stroke {
    Stroke::new("#000000", 2.0)
}
fn default_highlight_ms() -> u32 {
    HIGHLIGHT_MS
}
fn default_revert_ms() -> u32 {
    REVERT_MS
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            margin: Margins::default(),
            background: default_background(),
            font_family: default_font_family(),
            palette: default_palette(),
            colors: None,
            cell_stroke: default_cell_stroke(),
            hover_stroke: default_hover_stroke(),
            highlight_ms: HIGHLIGHT_MS,
            revert_ms: REVERT_MS,
            labels: LabelStyle::default(),
            legend: LegendStyle::default(),
            tooltip: TooltipStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn chart_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Explicit `colors` win over the named palette.
    pub fn resolve_palette(&self) -> Result<Vec<String>> {
        if let Some(colors) = &self.colors {
            if colors.is_empty() {
                return Err(Error::Config("`colors` must not be empty".to_string()));
            }
            return Ok(colors.clone());
        }
        let colors = builtin_palette(&self.palette)?;
        Ok(colors.iter().map(|c| c.to_string()).collect())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {}", e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(format!("invalid YAML: {}", e)))
    }

    /// Read a config file, trying TOML first and YAML second.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if let Ok(config) = Self::from_toml(&content) {
            Ok(config)
        } else if let Ok(config) = Self::from_yaml(&content) {
            Ok(config)
        } else {
            Err(Error::Config(format!(
                "Failed to parse {} as TOML or YAML",
                path.display()
            )))
        }
    }
}
