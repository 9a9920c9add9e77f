use axum::http::StatusCode;
use chrono::NaiveDate;

use defi_dashboard_core::models::chart::ChartFigure;
use defi_dashboard_core::models::picker::DatePicker;

const PAGE_TITLE: &str = "tvl-eth-stablecoin-changes";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PAGE_ICON: &str = "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🔔</text></svg>";

const STYLE: &str = r#"
body { background: #0E1117; color: #FAFAFA; font-family: "Source Sans Pro", sans-serif; margin: 2rem; }
a { color: #79e7e7; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.picker label { display: block; font-size: 0.9rem; margin-bottom: 0.25rem; }
.picker input { background: #262730; color: #FAFAFA; border: 1px solid #555; padding: 0.3rem; }
.chart { width: 100%; min-height: 600px; }
code { background: #262730; padding: 0.1rem 0.3rem; }
hr { border-color: #333; margin: 2rem 0; }
"#;

const PROMO_LEFT: &str = r#"
<h3>If you want to master the art of LP</h3>
<ul><li>Get my <a href="https://twitter.com/coindataschool/status/1658033627035471872">Uniswap V3 LP Book</a></li></ul>
<h3>If you want to trade on chain</h3>
<ul>
<li>Get <a href="https://app.gmx.io/#/trade/?ref=coindataschool">5% discount</a> when trading on GMX.</li>
<li>Get <a href="https://app.mux.network/#/ref/coindataschool">2.5%+ discount</a> when trading on MUX.</li>
<li>Get <a href="https://app.hyperliquid.xyz/join/COINDATASCHOOL">$1 for every $10,000 trading volume</a> and qualify for <a href="https://app.hyperliquid.xyz/join/CDS">airdrop</a> when trading on Hyperliquid.</li>
</ul>
"#;

const PROMO_RIGHT: &str = r#"
<h3>Get data-driven insights and Learn DeFi analytics</h3>
<ul>
<li>Subscribe to my free <a href="https://coindataschool.substack.com/about">newsletter</a></li>
<li>Follow me on twitter: <a href="https://twitter.com/coindataschool">@coindataschool</a></li>
<li>Follow me on github: <a href="https://github.com/coindataschool">@coindataschool</a></li>
</ul>
<h3>If you'd like to support my work, you can</h3>
<ul>
<li>Send me ETH: <code>0x783c5546c863f65481bd05fd0e3fd5f26724604e</code></li>
<li>Tip me <a href="https://tippin.me/@coindataschool">sat</a></li>
<li>Get one of these <a href="https://ko-fi.com/coindataschool/tiers">membership tiers</a></li>
</ul>
"#;

/// One column of the page: a base-date picker above a chart.
pub struct Panel<'a> {
    /// Query parameter carrying this panel's base date
    pub param: &'a str,
    pub picker: &'a DatePicker,
    pub base_date: NaiveDate,
    pub figure: &'a ChartFigure,
}

/// Full dashboard: TVL/price panel on the left, stablecoin panel on the right,
/// promotional blocks underneath.
pub fn render_dashboard(left: &Panel<'_>, right: &Panel<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<link rel="icon" href="{PAGE_ICON}">
<script src="{PLOTLY_JS}"></script>
<style>{STYLE}</style>
</head>
<body>
<form id="controls" method="get" action="/"></form>
<div class="columns">
<div>{left_panel}</div>
<div>{right_panel}</div>
</div>
<hr>
<div class="columns">
<div>{PROMO_LEFT}</div>
<div>{PROMO_RIGHT}</div>
</div>
</body>
</html>
"#,
        left_panel = render_panel("chart-tvl", left),
        right_panel = render_panel("chart-stablecoins", right),
    )
}

fn render_panel(chart_id: &str, panel: &Panel<'_>) -> String {
    format!(
        r#"<div class="picker">
<label for="{param}">Start Date</label>
<input type="date" id="{param}" name="{param}" form="controls" value="{value}" min="{min}" max="{max}" onchange="this.form.submit()">
</div>
<div id="{chart_id}" class="chart"></div>
<script>
(function() {{
  var fig = {figure};
  Plotly.newPlot("{chart_id}", fig.data, fig.layout, {{responsive: true}});
}})();
</script>"#,
        param = escape_html(panel.param),
        value = panel.base_date,
        min = panel.picker.min,
        max = panel.picker.max,
        figure = figure_json(panel.figure),
    )
}

/// Page shown when a render fails.
pub fn render_error(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<link rel="icon" href="{PAGE_ICON}">
<style>{STYLE}</style>
</head>
<body>
<h2>Unable to render the dashboard ({status})</h2>
<p>{message}</p>
<p><a href="/">Try again</a></p>
</body>
</html>
"#,
        message = escape_html(message),
    )
}

/// Figure JSON that is safe to inline inside a `<script>` element.
fn figure_json(figure: &ChartFigure) -> String {
    figure.to_plotly_json().to_string().replace("</", "<\\/")
}

fn escape_html(s: &str) -> String {
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
