//! DataFrame exports of event-study results.
//!
//! Column names are stable so successive runs can be diffed; undefined
//! statistics are written as nulls.

use crate::{EventRow, ForwardOutcome, SummaryRow};
use polars::prelude::*;
use ronda_traits::{Date, Horizons, Result};

fn iso(date: Date) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Per-horizon summary table.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn summary_frame(rows: &[SummaryRow]) -> Result<DataFrame> {
    let stat = |f: fn(&SummaryRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();

    Ok(df! {
        "Horizon" => rows.iter().map(SummaryRow::label).collect::<Vec<_>>(),
        "N" => rows.iter().map(|r| r.stats.n as u64).collect::<Vec<_>>(),
        "Mean" => stat(|r| r.stats.mean),
        "Median" => stat(|r| r.stats.median),
        "Std" => stat(|r| r.stats.std),
        "WinRate(>0)" => stat(|r| r.stats.win_rate),
        "Min" => stat(|r| r.stats.min),
        "P5" => stat(|r| r.stats.p5),
        "P25" => stat(|r| r.stats.p25),
        "P75" => stat(|r| r.stats.p75),
        "P95" => stat(|r| r.stats.p95),
        "Max" => stat(|r| r.stats.max),
    }?)
}

/// Event detail table.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn events_frame(rows: &[EventRow]) -> Result<DataFrame> {
    Ok(df! {
        "Date" => rows.iter().map(|r| iso(r.date)).collect::<Vec<_>>(),
        "EventMovePct" => rows.iter().map(|r| r.move_pct).collect::<Vec<_>>(),
        "Open" => rows.iter().map(|r| r.open).collect::<Vec<_>>(),
        "Close" => rows.iter().map(|r| r.close).collect::<Vec<_>>(),
        "Volume" => rows.iter().map(|r| r.volume as i64).collect::<Vec<_>>(),
    }?)
}

/// Forward outcomes, one `R+{h}` column per horizon.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be constructed.
pub fn outcomes_frame(outcomes: &[ForwardOutcome], horizons: &Horizons) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(horizons.len() + 1);
    columns.push(Column::new(
        "Date".into(),
        outcomes.iter().map(|o| iso(o.date)).collect::<Vec<_>>(),
    ));
    for h in horizons.iter() {
        columns.push(Column::new(
            format!("R+{h}").into(),
            outcomes.iter().map(|o| o.at(h)).collect::<Vec<_>>(),
        ));
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventStudy, EventStudyConfig};
    use ronda_traits::{Direction, PriceSeries};

    fn report() -> crate::EventStudyReport {
        let series = PriceSeries::from_closes(
            "TEST",
            Date::from_ymd_opt(2024, 1, 1).unwrap(),
            &[100.0, 100.0, 100.0, 95.0, 100.0, 105.0, 110.0, 120.0, 90.0, 95.0],
        )
        .unwrap();
        EventStudy::new(EventStudyConfig {
            threshold: 0.05,
            direction: Direction::Down,
            cooldown_days: 0,
            horizons: Horizons::new([1, 20]).unwrap(),
        })
        .run(&series)
        .unwrap()
    }

    #[test]
    fn test_summary_frame_nulls_for_undefined() {
        let report = report();
        let df = summary_frame(&report.summary).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 12);
        // +20d has no samples at all
        assert_eq!(df.column("Mean").unwrap().null_count(), 1);
        // +1d has two samples, std defined; +20d undefined
        assert_eq!(df.column("Std").unwrap().null_count(), 1);
    }

    #[test]
    fn test_events_frame_columns() {
        let report = report();
        let df = events_frame(&report.table).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["Date", "EventMovePct", "Open", "Close", "Volume"]);
    }

    #[test]
    fn test_outcomes_frame_columns() {
        let report = report();
        let df = outcomes_frame(&report.outcomes, &report.config.horizons).unwrap();
        assert_eq!(df.width(), 3);
        assert!(df.column("R+1").is_ok());
        assert_eq!(df.column("R+20").unwrap().null_count(), 2);
    }

    #[test]
    fn test_empty_frames() {
        assert_eq!(summary_frame(&[]).unwrap().height(), 0);
        assert_eq!(events_frame(&[]).unwrap().height(), 0);
        assert_eq!(outcomes_frame(&[], &Horizons::standard()).unwrap().width(), 6);
    }
}
