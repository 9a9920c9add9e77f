use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

/// One line on a chart.
///
/// The core computes all the numbers; the page only renders them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    /// Legend label (e.g., "TVL", "All 3")
    pub name: String,

    /// CSS colour of the line
    pub color: String,

    /// Line width in pixels
    pub width: f64,

    pub x: Vec<NaiveDate>,

    /// `None` renders as a gap
    pub y: Vec<Option<f64>>,
}

/// Number format of the y axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisFormat {
    /// 0.25 → "25%"
    Percent,
    /// 1234.5 → "1,234.50"
    Currency,
}

impl AxisFormat {
    /// d3-format string understood by Plotly.
    pub fn tick_format(&self) -> &'static str {
        match self {
            AxisFormat::Percent => ".0%",
            AxisFormat::Currency => ",.2f",
        }
    }
}

/// A complete line chart: traces plus fixed styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigure {
    pub title: String,
    pub traces: Vec<LineTrace>,
    pub y_axis_title: Option<String>,
    pub y_axis_format: AxisFormat,
    /// Nominal width; the serialized layout autosizes to its container
    pub width: u32,
    pub height: u32,
    /// Paper and plot background colour
    pub background: String,
    pub font_size: u32,
}

impl ChartFigure {
    /// Serialize as a Plotly figure (`{"data": [...], "layout": {...}}`).
    ///
    /// Width is left to the container so each chart fills its page column.
    pub fn to_plotly_json(&self) -> Value {
        let data: Vec<Value> = self
            .traces
            .iter()
            .map(|t| {
                json!({
                    "type": "scatter",
                    "mode": "lines",
                    "name": t.name,
                    "x": t.x,
                    "y": t.y,
                    "line": { "color": t.color, "width": t.width },
                })
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.title },
                "paper_bgcolor": self.background,
                "plot_bgcolor": self.background,
                "font": { "size": self.font_size },
                "legend": { "orientation": "h" },
                "autosize": true,
                "height": self.height,
                "xaxis": {
                    "title": { "text": Value::Null },
                    "showgrid": false,
                    "linewidth": 2,
                },
                "yaxis": {
                    "title": { "text": self.y_axis_title },
                    "showgrid": false,
                    "linewidth": 2,
                    "zeroline": false,
                    "tickprefix": "",
                    "tickformat": self.y_axis_format.tick_format(),
                },
            },
        })
    }

    pub fn trace(&self, name: &str) -> Option<&LineTrace> {
        self.traces.iter().find(|t| t.name == name)
    }
}
