use crate::calendar::{month_label, month_number, parse_year, score_date};
use crate::errors::RecordError;
use crate::models::{Member, ScoreEntry, YearRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Flattens `year -> month -> score` into entries sorted by their synthesized date.
///
/// Keys are compared after trimming, so `"3월"` and `" 3월"` in one year collide and are
/// rejected with `DuplicateMonth`.
pub fn flatten_scores(
    records: &BTreeMap<String, YearRecord>,
) -> Result<Vec<ScoreEntry>, RecordError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (year_key, record) in records {
        let Some(scores) = record.scores.as_ref().filter(|scores| !scores.is_empty()) else {
            continue;
        };
        let year = parse_year(year_key).ok_or_else(|| RecordError::InvalidYear(year_key.clone()))?;

        for (label, score) in scores {
            let month = month_number(label).ok_or_else(|| RecordError::UnknownMonth {
                year: year_key.clone(),
                label: label.clone(),
            })?;
            if !seen.insert((year, month)) {
                return Err(RecordError::DuplicateMonth { year, month });
            }
            let date = score_date(year, month)
                .ok_or_else(|| RecordError::InvalidDate(format!("{year_key}/{label}")))?;

            entries.push(ScoreEntry {
                date,
                year,
                month: label.trim().to_string(),
                score: *score,
                course: None,
                notes: None,
            });
        }
    }

    entries.sort_by_key(|entry| entry.date);
    Ok(entries)
}

/// Moves scores from the old flat `[{date, score}]` layout into `records`.
///
/// Several legacy scores in one month are averaged, since a year holds at most one score per
/// month. Months that already have a nested score keep it.
pub fn migrate_legacy(mut member: Member) -> Result<Member, RecordError> {
    if member.legacy_scores.is_empty() {
        return Ok(member);
    }

    let mut buckets: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for legacy in &member.legacy_scores {
        let date = NaiveDate::parse_from_str(legacy.date.trim(), "%Y-%m-%d")
            .map_err(|_| RecordError::InvalidDate(legacy.date.clone()))?;
        buckets
            .entry((date.year(), date.month()))
            .or_default()
            .push(legacy.score);
    }

    for ((year, month), scores) in buckets {
        let Some(label) = month_label(month) else {
            continue;
        };
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let year_key = member
            .records
            .keys()
            .find(|key| parse_year(key) == Some(year))
            .cloned()
            .unwrap_or_else(|| year.to_string());
        let months = member
            .records
            .entry(year_key)
            .or_default()
            .scores
            .get_or_insert_with(BTreeMap::new);
        if !months.keys().any(|key| month_number(key) == Some(month)) {
            months.insert(label.to_string(), average);
        }
    }

    member.legacy_scores.clear();
    Ok(member)
}

/// Brings a freshly loaded roster into the canonical nested layout.
///
/// Members whose legacy scores cannot be migrated are dropped. Malformed nested records and
/// duplicate names are kept but logged; lookups by those names resolve to the first member.
pub fn normalize_members(members: Vec<Member>) -> Vec<Member> {
    let mut normalized = Vec::with_capacity(members.len());
    let mut seen = HashSet::new();

    for member in members {
        let name = member.name.clone();
        let member = match migrate_legacy(member) {
            Ok(member) => member,
            Err(err) => {
                warn!(member = %name, error = %err, "dropping member with unreadable legacy scores");
                continue;
            }
        };

        if let Err(err) = flatten_scores(&member.records) {
            warn!(member = %name, error = %err, "member has malformed score records");
        }
        if !seen.insert(name.clone()) {
            warn!(member = %name, "duplicate member name");
        }

        normalized.push(member);
    }

    normalized
}
