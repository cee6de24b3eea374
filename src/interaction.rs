//! Pointer enter/leave behaviour for chart cells.
//!
//! Each cell carries a [`HoverBinding`] describing how its border changes
//! and what its tooltip says. Surfaces translate bindings into whatever the
//! host understands (SMIL animations, DOM listeners); [`HoverController`]
//! is the host-independent state machine the bindings describe.

use serde::Serialize;

use crate::config::{ChartConfig, Stroke};
use crate::layout::Cell;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    pub fn for_cell(cell: &Cell) -> Self {
        let row = |label: &str, value: String| TooltipRow {
            label: label.to_string(),
            value,
        };

        Self {
            title: cell.publisher.clone(),
            rows: vec![
                row("Type", cell.genre.clone()),
                row("Count", cell.count.to_string()),
                row("Percent", format!("{}%", to_fixed(cell.percent, 1))),
                row("Top Platform", cell.platform.clone()),
            ],
        }
    }

    /// Row lines as displayed, e.g. `Count: 50`.
    pub fn row_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .map(|row| format!("{}: {}", row.label, row.value))
    }
}

/// Fixed-point text with exact halves rounded away from zero, the way a
/// browser's `Number.prototype.toFixed` prints them.
///
/// A double sits exactly halfway between two `digits`-place decimals only
/// when `value * 2^(digits + 1)` is an odd integer; every other value
/// already formats to its nearest decimal.
fn to_fixed(value: f64, digits: usize) -> String {
    let scaled = value * 2f64.powi(digits as i32 + 1);
    let exact_half = scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0;
    if exact_half {
        let step = 10f64.powi(digits as i32);
        return format!("{:.*}", digits, (value * step).round() / step);
    }
    format!("{:.*}", digits, value)
}

/// A border change applied over `duration_ms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub stroke: Stroke,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverBinding {
    pub idle: Stroke,
    pub highlight: Stroke,
    pub highlight_ms: u32,
    pub revert_ms: u32,
    pub tooltip: TooltipContent,
    /// Cell centre in canvas coordinates.
    pub anchor: (f64, f64),
}

impl HoverBinding {
    pub fn for_cell(cell: &Cell, config: &ChartConfig) -> Self {
        let (cx, cy) = cell.center();
        Self {
            idle: config.cell_stroke.clone(),
            highlight: config.hover_stroke.clone(),
            highlight_ms: config.highlight_ms,
            revert_ms: config.revert_ms,
            tooltip: TooltipContent::for_cell(cell),
            anchor: (config.margin.left + cx, config.margin.top + cy),
        }
    }

    pub fn enter(&self) -> Transition {
        Transition {
            stroke: self.highlight.clone(),
            duration_ms: self.highlight_ms,
        }
    }

    pub fn leave(&self) -> Transition {
        Transition {
            stroke: self.idle.clone(),
            duration_ms: self.revert_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Hovered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub opacity: f64,
    pub position: (f64, f64),
    pub cell: Option<usize>,
}

impl TooltipState {
    fn hidden() -> Self {
        Self {
            opacity: 0.0,
            position: (0.0, 0.0),
            cell: None,
        }
    }
}

/// Per-cell `Idle → Hovered → Idle` machine plus the shared tooltip.
pub struct HoverController {
    bindings: Vec<HoverBinding>,
    states: Vec<HoverState>,
    strokes: Vec<Stroke>,
    tooltip: TooltipState,
    offset: (f64, f64),
}

impl HoverController {
    /// `offset` is added to the pointer position to place the tooltip.
    pub fn new(bindings: Vec<HoverBinding>, offset: (f64, f64)) -> Self {
        let states = vec![HoverState::Idle; bindings.len()];
        let strokes = bindings.iter().map(|b| b.idle.clone()).collect();
        Self {
            bindings,
            states,
            strokes,
            tooltip: TooltipState::hidden(),
            offset,
        }
    }

    /// Highlight `cell` and show its tooltip near `pointer`. Returns the
    /// border transition, or `None` when the event changes nothing.
    pub fn pointer_enter(&mut self, cell: usize, pointer: (f64, f64)) -> Option<Transition> {
        let binding = self.bindings.get(cell)?;
        if self.states[cell] == HoverState::Hovered {
            return None;
        }

        let transition = binding.enter();
        self.states[cell] = HoverState::Hovered;
        self.strokes[cell] = transition.stroke.clone();
        self.tooltip = TooltipState {
            opacity: 1.0,
            position: (pointer.0 + self.offset.0, pointer.1 + self.offset.1),
            cell: Some(cell),
        };
        Some(transition)
    }

    /// Restore the idle border of `cell` and hide the tooltip.
    pub fn pointer_leave(&mut self, cell: usize) -> Option<Transition> {
        let binding = self.bindings.get(cell)?;
        if self.states[cell] == HoverState::Idle {
            return None;
        }

        let transition = binding.leave();
        self.states[cell] = HoverState::Idle;
        self.strokes[cell] = transition.stroke.clone();
        self.tooltip.opacity = 0.0;
        self.tooltip.cell = None;
        Some(transition)
    }

    pub fn state(&self, cell: usize) -> Option<HoverState> {
        self.states.get(cell).copied()
    }

    pub fn stroke(&self, cell: usize) -> Option<&Stroke> {
        self.strokes.get(cell)
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn tooltip_content(&self) -> Option<&TooltipContent> {
        let cell = self.tooltip.cell?;
        self.bindings.get(cell).map(|b| &b.tooltip)
    }
}
