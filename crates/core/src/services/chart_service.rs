use crate::errors::CoreError;
use crate::models::change::{ChangeKind, ChangeSeries};
use crate::models::chart::{AxisFormat, ChartFigure, LineTrace};
use crate::models::column::ColumnId;

const BACKGROUND: &str = "#0E1117";
const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;
const FONT_SIZE: u32 = 18;

/// Legend order, colour, and line width of one series.
struct TraceStyle {
    column: ColumnId,
    color: &'static str,
    width: f64,
}

const TVL_PRICE_TRACES: [TraceStyle; 3] = [
    TraceStyle { column: ColumnId::Tvl, color: "#79e7e7", width: 2.0 },
    TraceStyle { column: ColumnId::Eth, color: "#ecf0f1", width: 1.5 },
    TraceStyle { column: ColumnId::Btc, color: "#F7931A", width: 1.5 },
];

const STABLECOIN_TRACES: [TraceStyle; 4] = [
    TraceStyle { column: ColumnId::AllThree, color: "#E31836", width: 2.0 },
    TraceStyle { column: ColumnId::Usdt, color: "#26A17B", width: 1.5 },
    TraceStyle { column: ColumnId::Usdc, color: "#2775CA", width: 1.5 },
    TraceStyle { column: ColumnId::Busd, color: "#F0B90B", width: 1.5 },
];

/// Turns change series into styled chart figures.
///
/// No arithmetic happens here; the figures carry the change values as-is.
#[derive(Debug)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// "% Change - BTC & ETH vs. TVL": TVL, ETH, BTC as percent change.
    pub fn tvl_price_chart(&self, change: &ChangeSeries) -> Result<ChartFigure, CoreError> {
        Self::expect_kind(change, ChangeKind::Percent)?;
        Ok(ChartFigure {
            title: "% Change - BTC & ETH vs. TVL".to_string(),
            traces: Self::traces(change, &TVL_PRICE_TRACES)?,
            y_axis_title: None,
            y_axis_format: AxisFormat::Percent,
            ..Self::base_figure()
        })
    }

    /// "Market Cap $ Change - Top 3 Fiat Stables": dollar change in billions.
    pub fn stablecoin_chart(&self, change: &ChangeSeries) -> Result<ChartFigure, CoreError> {
        Self::expect_kind(change, ChangeKind::Absolute)?;
        Ok(ChartFigure {
            title: "Market Cap $ Change - Top 3 Fiat Stables".to_string(),
            traces: Self::traces(change, &STABLECOIN_TRACES)?,
            y_axis_title: Some("Billions of US Dollars".to_string()),
            y_axis_format: AxisFormat::Currency,
            ..Self::base_figure()
        })
    }

    fn base_figure() -> ChartFigure {
        ChartFigure {
            title: String::new(),
            traces: Vec::new(),
            y_axis_title: None,
            y_axis_format: AxisFormat::Currency,
            width: WIDTH,
            height: HEIGHT,
            background: BACKGROUND.to_string(),
            font_size: FONT_SIZE,
        }
    }

    fn traces(change: &ChangeSeries, styles: &[TraceStyle]) -> Result<Vec<LineTrace>, CoreError> {
        let x = change.table.dates().to_vec();
        styles
            .iter()
            .map(|style| {
                Ok(LineTrace {
                    name: style.column.label().to_string(),
                    color: style.color.to_string(),
                    width: style.width,
                    x: x.clone(),
                    y: change.table.column(style.column)?.to_vec(),
                })
            })
            .collect()
    }

    fn expect_kind(change: &ChangeSeries, kind: ChangeKind) -> Result<(), CoreError> {
        if change.kind == kind {
            Ok(())
        } else {
            Err(CoreError::InvalidTable(format!(
                "expected a {kind} change series, got {}",
                change.kind
            )))
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
