//! Standalone HTML page embedding the Vega-Lite chart.

use super::{ChartSpec, NO_DATA_MESSAGE, RawTable, View};
use crate::errors::{AppError, AppResult};
use crate::models::DateRange;

const VEGA_SCRIPTS: &str = r#"<script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>"#;

pub fn render(view: &View, range: &DateRange) -> AppResult<String> {
    let mut body = String::new();

    match view {
        View::NoData => {
            body.push_str(&format!(
                "<p class=\"warning\">{}</p>\n",
                escape(NO_DATA_MESSAGE)
            ));
        }
        View::Chart { chart, raw } => {
            body.push_str(&chart_block(chart)?);
            if let Some(raw) = raw {
                body.push_str(&raw_block(raw));
            }
        }
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Task Completion Bar Chart</title>
{VEGA_SCRIPTS}
<style>
  body {{ font-family: sans-serif; margin: 2rem; }}
  #chart {{ width: 100%; }}
  .warning {{ color: #8a6d3b; background: #fcf8e3; padding: 1rem; }}
  table {{ border-collapse: collapse; margin-top: 2rem; }}
  th, td {{ border: 1px solid #ccc; padding: 0.25rem 0.75rem; text-align: left; }}
</style>
</head>
<body>
<h1>Task Completion Bar Chart</h1>
<p>{range}</p>
{body}</body>
</html>
"#,
        range = escape(&range.to_string()),
    ))
}

fn chart_block(chart: &ChartSpec) -> AppResult<String> {
    let spec = serde_json::to_string(&chart.to_vega_lite())
        .map_err(|e| AppError::Export(format!("chart serialization error: {e}")))?;

    Ok(format!(
        "<div id=\"chart\"></div>\n<script>\nvegaEmbed('#chart', {});\n</script>\n",
        spec.replace("</", "<\\/")
    ))
}

fn raw_block(raw: &RawTable) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for c in &raw.columns {
        out.push_str(&format!("<th>{}</th>", escape(c)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for r in &raw.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(&r.task_name),
            escape(&r.completion_date)
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
