use crate::config::ChartConfig;
use crate::fonts::TextMeasure;
use crate::interaction::HoverBinding;
use crate::surface::{RectShape, Surface, TextShape};
use crate::xml::{escape_xml, num};

const SHADOW_OFFSET: f64 = 2.0;

/// Where hover tooltips live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipMode {
    /// Tooltips are SVG groups in a top layer, revealed by SMIL `<set>`
    /// while their cell is hovered. Works in a standalone `.svg` file.
    Embedded,
    /// Cells only carry `class="cell"` and `data-cell`; their hover
    /// bindings are collected for a host page to act on.
    External,
}

/// Writes the chart as an SVG document.
pub struct SvgSurface<'a, T: TextMeasure> {
    measure: &'a mut T,
    config: &'a ChartConfig,
    mode: TooltipMode,
    width: f64,
    height: f64,
    background: String,
    body: String,
    overlay: String,
    bindings: Vec<HoverBinding>,
    open_groups: usize,
    document: Option<String>,
}

impl<'a, T: TextMeasure> SvgSurface<'a, T> {
    pub fn new(measure: &'a mut T, config: &'a ChartConfig, mode: TooltipMode) -> Self {
        Self {
            measure,
            config,
            mode,
            width: config.width,
            height: config.height,
            background: config.background.clone(),
            body: String::new(),
            overlay: String::new(),
            bindings: Vec::new(),
            open_groups: 0,
            document: None,
        }
    }

    /// Hover bindings indexed by `data-cell`, filled in `External` mode.
    pub fn bindings(&self) -> &[HoverBinding] {
        &self.bindings
    }

    /// The finished document; empty until [`Surface::finish`] has run.
    pub fn svg(&self) -> &str {
        self.document.as_deref().unwrap_or("")
    }

    pub fn into_svg(self) -> String {
        self.document.unwrap_or_default()
    }

    fn stroke_attrs(stroke: &Option<(String, f64)>) -> String {
        match stroke {
            Some((color, width)) => format!(
                r#" stroke="{}" stroke-width="{}""#,
                escape_xml(color),
                num(*width)
            ),
            None => String::new(),
        }
    }

    fn push_hover_animations(&mut self, hover: &HoverBinding) {
        let phases = [
            ("mouseover", &hover.highlight, hover.highlight_ms),
            ("mouseout", &hover.idle, hover.revert_ms),
        ];
        for (event, stroke, ms) in phases {
            self.body.push_str(&format!(
                r#"<animate attributeName="stroke" to="{}" dur="{}ms" begin="{}" fill="freeze" />"#,
                escape_xml(&stroke.color),
                ms,
                event
            ));
            self.body.push_str(&format!(
                r#"<animate attributeName="stroke-width" to="{}" dur="{}ms" begin="{}" fill="freeze" />"#,
                num(stroke.width),
                ms,
                event
            ));
        }
    }

    fn push_tooltip_layer(&mut self, index: usize, hover: &HoverBinding) {
        let style = &self.config.tooltip;
        let font_size = style.font_size;
        let line_height = font_size * style.line_height;

        let title = hover.tooltip.title.clone();
        let rows: Vec<String> = hover.tooltip.row_lines().collect();

        let (title_w, _) = self
            .measure
            .measure_text(&title, font_size as f32, true);
        let text_w = rows.iter().fold(title_w as f64, |widest, line| {
            let (w, _) = self.measure.measure_text(line, font_size as f32, false);
            widest.max(w as f64)
        });

        let box_w = text_w + style.padding * 2.0;
        let box_h = (rows.len() + 1) as f64 * line_height + style.padding * 2.0;

        // Keep the box on the canvas.
        let (ax, ay) = hover.anchor;
        let x = (ax + style.offset_x).min(self.width - box_w).max(0.0);
        let y = (ay + style.offset_y).min(self.height - box_h).max(0.0);

        let mut layer = String::new();
        layer.push_str(&format!(
            r#"<g class="tooltip" opacity="0" pointer-events="none" transform="translate({},{})">"#,
            num(x),
            num(y)
        ));
        layer.push_str(&format!(
            r#"<set attributeName="opacity" to="1" begin="cell-{0}.mouseover" end="cell-{0}.mouseout" />"#,
            index
        ));
        layer.push_str(&format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="#000000" fill-opacity="0.15" />"##,
            num(SHADOW_OFFSET),
            num(SHADOW_OFFSET),
            num(box_w),
            num(box_h),
            num(style.radius)
        ));
        layer.push_str(&format!(
            r#"<rect width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="1" />"#,
            num(box_w),
            num(box_h),
            num(style.radius),
            escape_xml(&style.background),
            escape_xml(&style.border)
        ));

        let lines = std::iter::once((title, true)).chain(rows.into_iter().map(|r| (r, false)));
        for (i, (line, bold)) in lines.enumerate() {
            let baseline = style.padding + font_size + i as f64 * line_height;
            let weight = if bold { r#" font-weight="700""# } else { "" };
            layer.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}"{}>{}</text>"#,
                num(style.padding),
                num(baseline),
                escape_xml(&self.config.font_family),
                num(font_size),
                escape_xml(&style.text_color),
                weight,
                escape_xml(&line)
            ));
        }
        layer.push_str("</g>");

        self.overlay.push_str(&layer);
    }
}

impl<T: TextMeasure> Surface for SvgSurface<'_, T> {
    fn begin(&mut self, width: f64, height: f64, background: &str) {
        self.width = width;
        self.height = height;
        self.background = background.to_string();
        self.body.clear();
        self.overlay.clear();
        self.bindings.clear();
        self.open_groups = 0;
        self.document = None;
    }

    fn push_group(&mut self, dx: f64, dy: f64) {
        self.open_groups += 1;
        self.body.push_str(&format!(
            r#"<g transform="translate({},{})">"#,
            num(dx),
            num(dy)
        ));
    }

    fn pop_group(&mut self) {
        if self.open_groups > 0 {
            self.open_groups -= 1;
            self.body.push_str("</g>");
        }
    }

    fn rect(&mut self, rect: &RectShape) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{} />"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            escape_xml(&rect.fill),
            Self::stroke_attrs(&rect.stroke)
        ));
    }

    fn text(&mut self, text: &TextShape) {
        let weight = if text.bold { r#" font-weight="700""# } else { "" };
        let transform = text
            .rotation
            .map(|r| {
                format!(
                    r#" transform="rotate({},{},{})""#,
                    num(r.degrees),
                    num(r.cx),
                    num(r.cy)
                )
            })
            .unwrap_or_default();

        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}"{}{}>{}</text>"#,
            num(text.x),
            num(text.y),
            escape_xml(&self.config.font_family),
            num(text.font_size),
            escape_xml(&text.fill),
            text.anchor.as_str(),
            weight,
            transform,
            escape_xml(&text.content)
        ));
    }

    fn hover_target(&mut self, index: usize, rect: &RectShape, hover: &HoverBinding) {
        let attrs = format!(
            r#"x="{}" y="{}" width="{}" height="{}" fill="{}"{} cursor="pointer""#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            escape_xml(&rect.fill),
            Self::stroke_attrs(&rect.stroke)
        );

        match self.mode {
            TooltipMode::Embedded => {
                self.body
                    .push_str(&format!(r#"<rect id="cell-{}" {}>"#, index, attrs));
                self.push_hover_animations(hover);
                self.body.push_str("</rect>");
                self.push_tooltip_layer(index, hover);
            }
            TooltipMode::External => {
                self.body.push_str(&format!(
                    r#"<rect class="cell" data-cell="{}" {} />"#,
                    self.bindings.len(),
                    attrs
                ));
                self.bindings.push(hover.clone());
            }
        }
    }

    fn finish(&mut self) {
        while self.open_groups > 0 {
            self.pop_group();
        }

        let overlay = if self.overlay.is_empty() {
            String::new()
        } else {
            format!(r#"<g class="tooltips">{}</g>"#, self.overlay)
        };

        self.document = Some(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="{bg}" />{body}{overlay}</svg>"#,
            w = num(self.width),
            h = num(self.height),
            bg = escape_xml(&self.background),
            body = self.body,
            overlay = overlay,
        ));
    }
}
