use crate::models::{Member, ProfileSummary, ScoreEntry};
use crate::stats::round1;

/// How many of the latest rounds feed `recent_average`.
const RECENT_ROUNDS: usize = 3;

/// Headline numbers for a member's dashboard. `entries` must be date sorted.
pub fn profile_summary(member: &Member, entries: &[ScoreEntry]) -> ProfileSummary {
    let recent = &entries[entries.len().saturating_sub(RECENT_ROUNDS)..];
    let recent_average = if recent.is_empty() {
        None
    } else {
        Some(round1(
            recent.iter().map(|entry| entry.score).sum::<f64>() / recent.len() as f64,
        ))
    };

    let best_score = member
        .records
        .values()
        .filter_map(|record| record.best_score)
        .chain(entries.iter().map(|entry| entry.score))
        .min_by(f64::total_cmp);

    ProfileSummary {
        name: member.name.clone(),
        cohort: member.cohort,
        handicap: member
            .latest_record_where(|record| record.handicap.is_some())
            .and_then(|(_, record)| record.handicap),
        recent_average,
        best_score,
        participation_count: entries.len(),
        recorded_participation: member
            .records
            .values()
            .filter_map(|record| record.participation)
            .sum(),
        last_participation: entries.last().map(|entry| entry.date),
    }
}
