use crate::models::{DateRange, HeatmapEntry, ScoreEntry};
use chrono::{Months, NaiveDate};

/// One participation cell per score entry. Same-day entries are not merged.
pub fn to_heatmap(entries: &[ScoreEntry]) -> Vec<HeatmapEntry> {
    entries
        .iter()
        .map(|entry| HeatmapEntry {
            date: entry.date,
            count: 1,
            score: entry.score,
            year: entry.year,
            month: entry.month.clone(),
        })
        .collect()
}

/// Calendar span to draw: a year before the first round, through the later of a month past
/// the last round and `today`.
pub fn display_range(entries: &[ScoreEntry], today: NaiveDate) -> Option<DateRange> {
    let first = entries.iter().map(|entry| entry.date).min()?;
    let last = entries.iter().map(|entry| entry.date).max()?;

    let start = first.checked_sub_months(Months::new(12)).unwrap_or(first);
    let after_last = last.checked_add_months(Months::new(1)).unwrap_or(last);

    Some(DateRange {
        start,
        end: after_last.max(today),
    })
}
