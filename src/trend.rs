use crate::calendar::{chart_label, parse_year};
use crate::models::{ChartSeries, HandicapSeries, ScoreEntry, ScoreTrend, YearRecord};
use crate::stats::round1;
use std::collections::BTreeMap;

pub const DEFAULT_WINDOW: usize = 3;

/// Par the estimated handicap is measured against.
const ESTIMATE_PAR: f64 = 72.0;
const ESTIMATE_FACTOR: f64 = 0.8;

/// Score series plus a trailing moving average, by position in `entries`.
///
/// Gaps between months are not interpolated. The first `window - 1` averages are `None`.
pub fn build_trend(entries: &[ScoreEntry], window: usize) -> ScoreTrend {
    let window = window.max(1);
    let labels = entries.iter().map(|entry| chart_label(entry.date)).collect();
    let scores: Vec<f64> = entries.iter().map(|entry| entry.score).collect();

    let leading = scores.len().min(window - 1);
    let moving_average = std::iter::repeat(None)
        .take(leading)
        .chain(
            scores
                .windows(window)
                .map(|slice| Some(round1(slice.iter().sum::<f64>() / window as f64))),
        )
        .collect();

    ScoreTrend {
        labels,
        scores,
        moving_average,
        window,
    }
}

/// Handicap per year, oldest first.
///
/// Falls back to a rough estimate from the score entries when no year records a handicap.
pub fn handicap_series(
    records: &BTreeMap<String, YearRecord>,
    entries: &[ScoreEntry],
) -> HandicapSeries {
    let mut recorded: Vec<(i32, f64)> = records
        .iter()
        .filter_map(|(key, record)| Some((parse_year(key)?, record.handicap?)))
        .collect();
    recorded.sort_by_key(|(year, _)| *year);

    if !recorded.is_empty() {
        return HandicapSeries {
            series: ChartSeries {
                labels: recorded.iter().map(|(year, _)| year.to_string()).collect(),
                values: recorded.iter().map(|(_, handicap)| Some(*handicap)).collect(),
            },
            estimated: false,
        };
    }

    HandicapSeries {
        series: ChartSeries {
            labels: entries.iter().map(|entry| chart_label(entry.date)).collect(),
            values: entries
                .iter()
                .map(|entry| Some(estimate_handicap(entry.score)))
                .collect(),
        },
        estimated: !entries.is_empty(),
    }
}

pub fn estimate_handicap(score: f64) -> f64 {
    round1((score - ESTIMATE_PAR) * ESTIMATE_FACTOR).max(0.0)
}
