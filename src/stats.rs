use crate::calendar::month_label;
use crate::compare::Period;
use crate::models::{ClubSummary, GroupAverage, Member, ParticipationStats, PeerAverage};
use std::collections::BTreeMap;

/// One-decimal display rounding, applied after the full-precision mean.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Unrounded mean and the number of values it covers.
fn mean_and_count(values: impl IntoIterator<Item = f64>) -> (Option<f64>, usize) {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        (None, 0)
    } else {
        (Some(sum / count as f64), count)
    }
}

pub fn average_for<F>(members: &[Member], selector: F) -> Option<f64>
where
    F: Fn(&Member) -> Option<f64>,
{
    mean_and_count(members.iter().filter_map(|member| selector(member)))
        .0
        .map(round1)
}

pub fn yearly_average(members: &[Member], year: i32) -> Option<f64> {
    average_for(members, |member| {
        member.year(year).and_then(|record| record.average_score)
    })
}

pub fn monthly_average(members: &[Member], year: i32, month: u32) -> Option<f64> {
    average_for(members, |member| member_month_score(member, year, month))
}

pub(crate) fn member_month_score(member: &Member, year: i32, month: u32) -> Option<f64> {
    let label = month_label(month)?;
    member
        .year(year)?
        .scores
        .as_ref()?
        .iter()
        .find(|(key, _)| key.trim() == label)
        .map(|(_, score)| *score)
}

/// Population average for one comparison period.
pub fn period_average(members: &[Member], period: Period) -> PeerAverage {
    let member_count = members
        .iter()
        .filter(|member| period_value(member, period).is_some())
        .count();
    let average = match period {
        Period::Year(year) => yearly_average(members, year),
        Period::Month { year, month } => monthly_average(members, year, month),
    };

    PeerAverage {
        period: period.label(),
        average,
        member_count,
    }
}

/// A member's own value for a period: the yearly average or that month's score.
pub(crate) fn period_value(member: &Member, period: Period) -> Option<f64> {
    match period {
        Period::Year(year) => member.year(year).and_then(|record| record.average_score),
        Period::Month { year, month } => member_month_score(member, year, month),
    }
}

pub fn cohort_average(members: &[Member], cohort: u32) -> GroupAverage {
    let mut values = Vec::new();
    let mut member_count = 0;

    for member in members.iter().filter(|member| member.cohort == cohort) {
        let before = values.len();
        values.extend(
            member
                .records
                .values()
                .filter_map(|record| record.average_score),
        );
        if values.len() > before {
            member_count += 1;
        }
    }

    match mean_and_count(values) {
        (Some(average), _) => GroupAverage {
            average: Some(round1(average)),
            member_count,
        },
        (None, _) => GroupAverage::EMPTY,
    }
}

/// Average score of members whose most recent handicap falls in `[min, max]`.
///
/// Only the newest year with a handicap is considered per member, and its `average_score`
/// feeds the mean. Members in range without an average still count toward `member_count`.
/// A NaN bound matches nobody.
pub fn handicap_range_average(members: &[Member], min: f64, max: f64) -> GroupAverage {
    let mut member_count = 0;
    let mut values = Vec::new();

    for member in members {
        let Some((_, record)) = member.latest_record_where(|record| record.handicap.is_some())
        else {
            continue;
        };
        let Some(handicap) = record.handicap else {
            continue;
        };
        if !(min..=max).contains(&handicap) {
            continue;
        }

        member_count += 1;
        if let Some(average) = record.average_score {
            values.push(average);
        }
    }

    GroupAverage {
        average: mean_and_count(values).0.map(round1),
        member_count,
    }
}

pub fn club_summary(members: &[Member]) -> ClubSummary {
    let mut gender_distribution = BTreeMap::new();
    let mut cohort_distribution = BTreeMap::new();
    let mut participation = ParticipationStats::default();
    let mut handicaps = Vec::new();

    for member in members {
        *gender_distribution
            .entry(member.gender.as_str().to_string())
            .or_insert(0) += 1;

        if member.cohort > 0 {
            *cohort_distribution.entry(member.cohort).or_insert(0) += 1;
        }

        let rounds: u64 = member
            .records
            .values()
            .filter_map(|record| record.participation)
            .map(u64::from)
            .sum();
        if rounds > 0 {
            participation.participating_members += 1;
            participation.total_participations += rounds;
        }

        // Handicap as of the latest year on file, even when that year has none.
        if let Some(handicap) = member
            .latest_record()
            .and_then(|(_, record)| record.handicap)
        {
            handicaps.push(handicap);
        }
    }

    ClubSummary {
        total_members: members.len(),
        gender_distribution,
        cohort_distribution,
        participation,
        average_handicap: mean_and_count(handicaps).0.map(round1),
    }
}
