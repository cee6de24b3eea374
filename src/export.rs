use std::path::Path;

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Html,
    Png,
    Pdf,
}

impl OutputFormat {
    /// Pick the format from the output file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Export("Output file has no extension".to_string()))?
            .to_ascii_lowercase();

        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(Error::Export(format!(
                "Unsupported output format: .{} (use .svg, .html, .png or .pdf)",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Html => "HTML",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        }
    }
}

const LOCAL_FONTS_DIR: &str = "fonts";

/// Generic family names resolved against whatever fonts are installed.
#[derive(Debug, Default, PartialEq)]
struct FontFallbacks {
    sans: Option<String>,
    serif: Option<String>,
    mono: Option<String>,
}

impl FontFallbacks {
    fn pick<'f>(families: impl IntoIterator<Item = &'f str>) -> Self {
        let mut first: Option<&str> = None;
        let mut sans: Option<&str> = None;
        let mut serif: Option<&str> = None;
        let mut mono: Option<&str> = None;

        for family in families {
            if first.is_none() {
                first = Some(family);
            }
            let lower = family.to_ascii_lowercase();
            if sans.is_none() && lower.contains("sans") {
                sans = Some(family);
            }
            if serif.is_none() && lower.contains("serif") && !lower.contains("sans") {
                serif = Some(family);
            }
            if mono.is_none() && (lower.contains("mono") || lower.contains("code")) {
                mono = Some(family);
            }
        }

        Self {
            sans: sans.or(first).map(str::to_string),
            serif: serif.or(first).map(str::to_string),
            mono: mono.or(sans).or(first).map(str::to_string),
        }
    }
}

macro_rules! configure_fontdb {
    ($db:expr) => {{
        let db = $db;
        db.load_system_fonts();
        let local = Path::new(LOCAL_FONTS_DIR);
        if local.is_dir() {
            db.load_fonts_dir(local);
        }

        let fallbacks = FontFallbacks::pick(
            db.faces()
                .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str())),
        );
        tracing::debug!("Font fallbacks: {:?}", fallbacks);

        if let Some(family) = &fallbacks.sans {
            db.set_sans_serif_family(family.as_str());
        }
        if let Some(family) = &fallbacks.serif {
            db.set_serif_family(family.as_str());
        }
        if let Some(family) = &fallbacks.mono {
            db.set_monospace_family(family.as_str());
        }
    }};
}

pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Export(format!("Invalid --png-scale value: {}", scale)));
    }

    let mut opts = usvg::Options::default();
    configure_fontdb!(opts.fontdb_mut());

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Export(format!("Failed to parse SVG: {}", e)))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Export("Failed to create pixmap".to_string()))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::Export(format!("Failed to encode PNG: {}", e)))
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    use svg2pdf::usvg::fontdb;

    let mut db = fontdb::Database::new();
    configure_fontdb!(&mut db);

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Export(format!("Failed to parse SVG: {}", e)))?;

    // Text as paths: no missing glyphs when embedding fails.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };

    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| Error::Export(format!("Failed to convert SVG to PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.SVG")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.htm")).unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Path::new("chart.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("chart.pdf")).unwrap(), OutputFormat::Pdf);
        assert!(OutputFormat::from_path(Path::new("chart")).is_err());
        assert!(OutputFormat::from_path(Path::new("chart.gif")).is_err());
    }

    #[test]
    fn fallbacks_prefer_named_families() {
        let picked = FontFallbacks::pick(["Noto Serif", "DejaVu Sans", "Fira Code"]);
        assert_eq!(
            picked,
            FontFallbacks {
                sans: Some("DejaVu Sans".to_string()),
                serif: Some("Noto Serif".to_string()),
                mono: Some("Fira Code".to_string()),
            }
        );
    }

    #[test]
    fn fallbacks_use_first_family_when_nothing_matches() {
        let picked = FontFallbacks::pick(["Comic Neue"]);
        assert_eq!(picked.sans.as_deref(), Some("Comic Neue"));
        assert_eq!(picked.mono.as_deref(), Some("Comic Neue"));
        assert_eq!(FontFallbacks::pick(Vec::<&str>::new()), FontFallbacks::default());
    }

    #[test]
    fn rejects_bad_png_scale() {
        assert!(svg_to_png("<svg/>", 0.0).is_err());
        assert!(svg_to_png("<svg/>", f32::NAN).is_err());
    }
}
