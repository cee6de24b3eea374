use crate::interaction::HoverBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub stroke: Option<(String, f64)>,
}

/// Rotation in degrees about a pivot point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
    pub bold: bool,
    pub fill: String,
    pub anchor: TextAnchor,
    pub rotation: Option<Rotation>,
}

/// Drawing target for the chart renderer.
///
/// Coordinates are relative to the innermost open group.
pub trait Surface {
    fn begin(&mut self, width: f64, height: f64, background: &str);
    fn push_group(&mut self, dx: f64, dy: f64);
    fn pop_group(&mut self);
    fn rect(&mut self, rect: &RectShape);
    fn text(&mut self, text: &TextShape);
    /// A rectangle that reacts to pointer enter/leave as `hover` describes.
    fn hover_target(&mut self, index: usize, rect: &RectShape, hover: &HoverBinding);
    fn finish(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Begin {
        width: f64,
        height: f64,
        background: String,
    },
    PushGroup {
        dx: f64,
        dy: f64,
    },
    PopGroup,
    Rect(RectShape),
    Text(TextShape),
    HoverTarget {
        index: usize,
        rect: RectShape,
        hover: HoverBinding,
    },
    Finish,
}

/// Keeps every draw call, for tests and headless callers.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub elements: Vec<Element>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_targets(&self) -> impl Iterator<Item = (&RectShape, &HoverBinding)> {
        self.elements.iter().filter_map(|el| match el {
            Element::HoverTarget { rect, hover, .. } => Some((rect, hover)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.elements.iter().filter_map(|el| match el {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectShape> {
        self.elements.iter().filter_map(|el| match el {
            Element::Rect(rect) => Some(rect),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn begin(&mut self, width: f64, height: f64, background: &str) {
        self.elements.push(Element::Begin {
            width,
            height,
            background: background.to_string(),
        });
    }

    fn push_group(&mut self, dx: f64, dy: f64) {
        self.elements.push(Element::PushGroup { dx, dy });
    }

    fn pop_group(&mut self) {
        self.elements.push(Element::PopGroup);
    }

    fn rect(&mut self, rect: &RectShape) {
        self.elements.push(Element::Rect(rect.clone()));
    }

    fn text(&mut self, text: &TextShape) {
        self.elements.push(Element::Text(text.clone()));
    }

    fn hover_target(&mut self, index: usize, rect: &RectShape, hover: &HoverBinding) {
        self.elements.push(Element::HoverTarget {
            index,
            rect: rect.clone(),
            hover: hover.clone(),
        });
    }

    fn finish(&mut self) {
        self.elements.push(Element::Finish);
    }
}
