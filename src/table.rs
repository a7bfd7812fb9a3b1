use crate::models::{ScoreEntry, ScorePage};
use serde::Deserialize;

pub const DEFAULT_PER_PAGE: usize = 10;
const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Score,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Sorted, paginated slice of a member's rounds. Pages are 1-based and clamped into range.
pub fn score_page(entries: &[ScoreEntry], query: &TableQuery) -> ScorePage {
    let mut rows = entries.to_vec();
    rows.sort_by(|a, b| {
        let ordering = match query.sort {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Score => a.score.total_cmp(&b.score),
            SortKey::Year => a.year.cmp(&b.year),
        };
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let total_entries = rows.len();
    let total_pages = total_entries.div_ceil(per_page).max(1);
    let page = query.page.unwrap_or(1).clamp(1, total_pages);

    let rows = rows
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    ScorePage {
        rows,
        page,
        per_page,
        total_pages,
        total_entries,
    }
}
