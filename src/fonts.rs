use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};

/// Average advance of a sans-serif glyph relative to the font size.
const FALLBACK_ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.2;

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
    is_bold: bool,
}

pub trait TextMeasure {
    /// Width and height of a single line of text.
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32);
}

pub struct CosmicTextMeasure {
    font_system: FontSystem,
    cache: HashMap<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            cache: HashMap::new(),
        }
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
            is_bold,
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let line_height = font_size * LINE_HEIGHT;
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size,
                line_height,
            },
        );
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new()
            .family(Family::SansSerif)
            .weight(if is_bold { Weight::BOLD } else { Weight::NORMAL });

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        // No installed font covered the text.
        if width == 0.0 && !text.is_empty() {
            tracing::debug!("No glyphs measured for {:?}, using estimate", text);
            (width, height) = FixedAdvanceMeasure::default().measure_text(text, font_size, is_bold);
        }

        let measured = (width, height);
        self.cache.insert(key, measured);
        measured
    }
}

/// Font-free measurement: every character advances `ratio × font_size`.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasure {
    pub ratio: f32,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self {
            ratio: FALLBACK_ADVANCE,
        }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
        let weight = if is_bold { 1.1 } else { 1.0 };
        let width = text.chars().count() as f32 * font_size * self.ratio * weight;
        (width, font_size * LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedAdvanceMeasure, TextMeasure};

    #[test]
    fn fixed_advance_scales_with_length_and_size() {
        let mut measure = FixedAdvanceMeasure { ratio: 0.5 };
        let (width, height) = measure.measure_text("abcd", 10.0, false);
        assert_eq!(width, 20.0);
        assert!((height - 12.0).abs() < 1e-4);
        assert_eq!(measure.measure_text("", 10.0, false).0, 0.0);

        let (bold, _) = measure.measure_text("abcd", 10.0, true);
        assert!(bold > 20.0);
    }
}
