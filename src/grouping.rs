use crate::models::{Member, Participant};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_GROUP_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMethod {
    #[default]
    Random,
    ByHandicap,
    ByCohort,
    /// Spread handicaps so every group gets a similar mix of strong and weak players.
    Mixed,
}

pub fn participant(member: &Member) -> Participant {
    Participant {
        name: member.name.clone(),
        cohort: member.cohort,
        handicap: member
            .latest_record_where(|record| record.handicap.is_some())
            .and_then(|(_, record)| record.handicap),
    }
}

/// Lower handicaps first. Players without one go last.
fn by_handicap(a: &Participant, b: &Participant) -> Ordering {
    match (a.handicap, b.handicap) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Splits participants into groups of at most `group_size` players.
///
/// `Random`, `ByHandicap` and `ByCohort` order the list and then cut it into consecutive
/// groups. `Mixed` deals the handicap-sorted list across `ceil(n / group_size)` groups in
/// snake order (1, 2, .., k, k, .., 2, 1), so group sizes differ by at most one.
pub fn group_participants<R>(
    mut participants: Vec<Participant>,
    method: GroupingMethod,
    group_size: usize,
    rng: &mut R,
) -> Vec<Vec<Participant>>
where
    R: Rng + ?Sized,
{
    let group_size = group_size.max(1);
    if participants.is_empty() {
        return Vec::new();
    }

    match method {
        GroupingMethod::Random => participants.shuffle(rng),
        GroupingMethod::ByHandicap => participants.sort_by(by_handicap),
        GroupingMethod::ByCohort => participants.sort_by_key(|participant| participant.cohort),
        GroupingMethod::Mixed => {
            participants.sort_by(by_handicap);
            return snake_deal(participants, group_size);
        }
    }

    participants
        .chunks(group_size)
        .map(<[Participant]>::to_vec)
        .collect()
}

fn snake_deal(sorted: Vec<Participant>, group_size: usize) -> Vec<Vec<Participant>> {
    let group_count = sorted.len().div_ceil(group_size);
    let mut groups: Vec<Vec<Participant>> = vec![Vec::new(); group_count];

    for (index, participant) in sorted.into_iter().enumerate() {
        let round = index / group_count;
        let position = index % group_count;
        let slot = if round % 2 == 0 {
            position
        } else {
            group_count - 1 - position
        };
        groups[slot].push(participant);
    }

    groups
}
