//! DataFrame exports of run-up results.
//!
//! Prices are rounded to 4 decimals, single run-ups to 2 and aggregates to 3.
//! Scores are exported unrounded.

use crate::{BestPick, RunupRow, TickerYSummary};
use polars::prelude::*;
use ronda_traits::{Date, Result};

fn iso(date: Date) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Per-(ticker, earnings date, lookback) rows.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn rows_frame<'a>(rows: impl IntoIterator<Item = &'a RunupRow>) -> Result<DataFrame> {
    let rows: Vec<&RunupRow> = rows.into_iter().collect();

    Ok(df! {
        "ticker" => rows.iter().map(|r| r.symbol.clone()).collect::<Vec<_>>(),
        "earningsDate" => rows.iter().map(|r| iso(r.earnings_date)).collect::<Vec<_>>(),
        "yTradingDays" => rows.iter().map(|r| r.lookback as u64).collect::<Vec<_>>(),
        "startAnchorDate" => rows.iter().map(|r| iso(r.start.date)).collect::<Vec<_>>(),
        "startAnchorClose" => rows.iter().map(|r| round_to(r.start.close, 4)).collect::<Vec<_>>(),
        "preEarningsDate" => rows.iter().map(|r| iso(r.pre_earnings.date)).collect::<Vec<_>>(),
        "preEarningsClose" => rows.iter().map(|r| round_to(r.pre_earnings.close, 4)).collect::<Vec<_>>(),
        "runupPct" => rows.iter().map(|r| round_to(r.runup_pct, 2)).collect::<Vec<_>>(),
        "status" => rows.iter().map(|_| "ok").collect::<Vec<_>>(),
    }?)
}

fn summary_columns(rows: &[&TickerYSummary]) -> Vec<Column> {
    vec![
        Column::new(
            "ticker".into(),
            rows.iter().map(|r| r.symbol.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "xCount".into(),
            rows.iter().map(|r| r.earnings_count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "yTradingDays".into(),
            rows.iter().map(|r| r.lookback as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "avgRunupPct".into(),
            rows.iter().map(|r| round_to(r.avg_runup_pct, 3)).collect::<Vec<_>>(),
        ),
        Column::new(
            "stdRunupPct".into(),
            rows.iter().map(|r| round_to(r.std_runup_pct, 3)).collect::<Vec<_>>(),
        ),
        Column::new(
            "winRate".into(),
            rows.iter().map(|r| round_to(r.win_rate, 3)).collect::<Vec<_>>(),
        ),
        Column::new(
            "samples".into(),
            rows.iter().map(|r| r.samples as u64).collect::<Vec<_>>(),
        ),
    ]
}

/// Per-(ticker, lookback) summary grid.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn grid_frame(summaries: &[TickerYSummary]) -> Result<DataFrame> {
    let rows: Vec<&TickerYSummary> = summaries.iter().collect();
    Ok(DataFrame::new(summary_columns(&rows))?)
}

/// Best lookback per ticker, grid columns plus `score`.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn best_frame(picks: &[BestPick]) -> Result<DataFrame> {
    let rows: Vec<&TickerYSummary> = picks.iter().map(|p| &p.summary).collect();
    let mut columns = summary_columns(&rows);
    columns.push(Column::new(
        "score".into(),
        picks.iter().map(|p| p.score).collect::<Vec<_>>(),
    ));
    Ok(DataFrame::new(columns)?)
}
