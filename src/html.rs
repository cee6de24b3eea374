use serde::Serialize;

use crate::config::ChartConfig;
use crate::error::Result;
use crate::interaction::{HoverBinding, TooltipContent, Transition};
use crate::xml::{escape_script_json, escape_xml, num};

/// One entry of the page's cell table: what to show and how the border
/// moves on enter and leave.
#[derive(Serialize)]
struct CellScript<'a> {
    #[serde(flatten)]
    tooltip: &'a TooltipContent,
    enter: Transition,
    leave: Transition,
}

/// Wrap an `External`-mode SVG in a page with a pointer-following tooltip.
///
/// `bindings[i]` belongs to the cell with `data-cell="i"`.
pub fn wrap_html(
    svg: &str,
    bindings: &[HoverBinding],
    config: &ChartConfig,
    title: &str,
) -> Result<String> {
    let cells: Vec<CellScript<'_>> = bindings
        .iter()
        .map(|binding| CellScript {
            tooltip: &binding.tooltip,
            enter: binding.enter(),
            leave: binding.leave(),
        })
        .collect();
    let table = escape_script_json(&serde_json::to_string(&cells)?);
    let tip = &config.tooltip;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: {font}; }}
#mosaic-tooltip {{
  position: absolute;
  background: {tip_bg};
  color: {tip_fg};
  border: 1px solid {tip_border};
  padding: {tip_padding}px;
  border-radius: {tip_radius}px;
  font-size: {tip_font}px;
  pointer-events: none;
  opacity: 0;
  box-shadow: 2px 2px 6px rgba(0, 0, 0, 0.15);
}}
</style>
</head>
<body>
{svg}
<div id="mosaic-tooltip"></div>
<script type="application/json" id="mosaic-tooltips">{table}</script>
<script>
(function () {{
  const cells = JSON.parse(document.getElementById('mosaic-tooltips').textContent);
  const tooltip = document.getElementById('mosaic-tooltip');

  function applyStroke(rect, transition) {{
    const ms = transition.duration_ms;
    rect.style.transition = 'stroke ' + ms + 'ms, stroke-width ' + ms + 'ms';
    rect.style.stroke = transition.stroke.color;
    rect.style.strokeWidth = transition.stroke.width;
  }}

  function fill(cell) {{
    tooltip.replaceChildren();
    const strong = document.createElement('strong');
    strong.textContent = cell.title;
    tooltip.appendChild(strong);
    for (const row of cell.rows) {{
      tooltip.appendChild(document.createElement('br'));
      tooltip.appendChild(document.createTextNode(row.label + ': ' + row.value));
    }}
  }}

  document.querySelectorAll('rect.cell').forEach(function (rect) {{
    const cell = cells[Number(rect.dataset.cell)];
    rect.addEventListener('mouseover', function (event) {{
      applyStroke(rect, cell.enter);
      fill(cell);
      tooltip.style.opacity = 1;
      tooltip.style.left = (event.pageX + {offset_x}) + 'px';
      tooltip.style.top = (event.pageY + {offset_y}) + 'px';
    }});
    rect.addEventListener('mouseout', function () {{
      applyStroke(rect, cell.leave);
      tooltip.style.opacity = 0;
    }});
  }});
}})();
</script>
</body>
</html>
"#,
        title = escape_xml(title),
        font = escape_xml(&config.font_family),
        tip_bg = escape_xml(&tip.background),
        tip_fg = escape_xml(&tip.text_color),
        tip_border = escape_xml(&tip.border),
        tip_padding = num(tip.padding),
        tip_radius = num(tip.radius),
        tip_font = num(tip.font_size),
        svg = svg,
        table = table,
        offset_x = num(tip.offset_x),
        offset_y = num(tip.offset_y),
    ))
}
