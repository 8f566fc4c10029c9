//! Report formatting and file output.

use anyhow::{Context, Result};
use polars::prelude::*;
use ronda_event::{EventRow, SummaryRow};
use ronda_runup::BestPick;
use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

/// Print a boxed section title.
pub(crate) fn print_banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║ {title:^60} ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Write a DataFrame as CSV with a header row.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.4}"))
}

/// Per-horizon summary as a fixed-width table.
pub(crate) fn summary_table(rows: &[SummaryRow]) -> String {
    let mut out = format!(
        "{:>7} {:>5} {:>9} {:>9} {:>9} {:>11} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "Horizon", "N", "Mean", "Median", "Std", "WinRate(>0)", "Min", "P5", "P25", "P75", "P95",
        "Max"
    );
    for row in rows {
        let s = &row.stats;
        let _ = writeln!(
            out,
            "{:>7} {:>5} {:>9} {:>9} {:>9} {:>11} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            row.label(),
            s.n,
            num(s.mean),
            num(s.median),
            num(s.std),
            num(s.win_rate),
            num(s.min),
            num(s.p5),
            num(s.p25),
            num(s.p75),
            num(s.p95),
            num(s.max),
        );
    }
    out
}

/// Event details as a fixed-width table.
pub(crate) fn events_table(rows: &[EventRow]) -> String {
    let mut out = format!(
        "{:>10} {:>12} {:>10} {:>10} {:>14}\n",
        "Date", "EventMovePct", "Open", "Close", "Volume"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>10} {:>12.4} {:>10.2} {:>10.2} {:>14.0}",
            row.date.format("%Y-%m-%d"),
            row.move_pct,
            row.open,
            row.close,
            row.volume,
        );
    }
    out
}

/// Best picks as a fixed-width table.
pub(crate) fn best_table(picks: &[BestPick]) -> String {
    let mut out = format!(
        "{:<8} {:>6} {:>12} {:>11} {:>11} {:>7} {:>7} {:>9}\n",
        "ticker", "xCount", "yTradingDays", "avgRunupPct", "stdRunupPct", "winRate", "samples",
        "score"
    );
    for pick in picks {
        let s = &pick.summary;
        let _ = writeln!(
            out,
            "{:<8} {:>6} {:>12} {:>11.3} {:>11.3} {:>7.3} {:>7} {:>9.4}",
            s.symbol,
            s.earnings_count,
            s.lookback,
            s.avg_runup_pct,
            s.std_runup_pct,
            s.win_rate,
            s.samples,
            pick.score,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_runup::TickerYSummary;
    use ronda_traits::stats::Describe;

    #[test]
    fn test_summary_table_marks_undefined() {
        let rows = vec![
            SummaryRow {
                horizon: 1,
                stats: Describe::of(&[0.01, -0.02]),
            },
            SummaryRow {
                horizon: 20,
                stats: Describe::default(),
            },
        ];
        let table = summary_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("WinRate(>0)"));
        assert!(lines[1].contains("+1d"));
        assert!(lines[2].contains("+20d"));
        assert!(lines[2].contains("NaN"));
    }

    #[test]
    fn test_best_table() {
        let picks = vec![BestPick {
            summary: TickerYSummary {
                symbol: "AAA".to_string(),
                earnings_count: 6,
                lookback: 10,
                avg_runup_pct: 2.5,
                std_runup_pct: 1.25,
                win_rate: 0.75,
                samples: 4,
            },
            score: 2.0,
        }];
        let table = best_table(&picks);
        assert!(table.lines().nth(1).unwrap().starts_with("AAA"));
    }

    #[test]
    fn test_write_csv() {
        let path = std::env::temp_dir().join(format!("ronda-cli-out-{}.csv", std::process::id()));
        let mut df = df! { "a" => [1i64, 2], "b" => ["x", "y"] }.unwrap();
        write_csv(&mut df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("a,b"));
        assert_eq!(text.lines().count(), 3);
        std::fs::remove_file(path).ok();
    }
}
