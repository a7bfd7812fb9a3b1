use crate::calendar::parse_year;
use crate::grouping::GroupingMethod;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Top-level data file. Members stay raw so one bad entry can be skipped on its own.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MembersDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<serde_json::Value>,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cohort: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: BTreeMap<String, YearRecord>,
    /// Flat score list from the older data layout. Folded into `records` on load.
    #[serde(
        default,
        rename = "scores",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub legacy_scores: Vec<LegacyScore>,
}

impl Member {
    /// Record for a numeric year, tolerating keys like `" 2025"`.
    pub fn year(&self, year: i32) -> Option<&YearRecord> {
        self.records
            .iter()
            .find(|(key, _)| parse_year(key) == Some(year))
            .map(|(_, record)| record)
    }

    /// Years with a numeric key, newest first.
    pub fn years_desc(&self) -> Vec<(i32, &YearRecord)> {
        let mut years: Vec<_> = self
            .records
            .iter()
            .filter_map(|(key, record)| parse_year(key).map(|year| (year, record)))
            .collect();
        years.sort_by(|a, b| b.0.cmp(&a.0));
        years
    }

    pub fn latest_record(&self) -> Option<(i32, &YearRecord)> {
        self.years_desc().into_iter().next()
    }

    pub fn latest_record_where<F>(&self, predicate: F) -> Option<(i32, &YearRecord)>
    where
        F: Fn(&YearRecord) -> bool,
    {
        self.years_desc()
            .into_iter()
            .find(|(_, record)| predicate(record))
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
            Gender::Unspecified => "unspecified",
            Gender::Other(value) => value,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "남" | "남성" | "male" | "m" => Gender::Male,
            "여" | "여성" | "female" | "f" => Gender::Female,
            "" | "unspecified" => Gender::Unspecified,
            _ => Gender::Other(trimmed.to_string()),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YearRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handicap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyScore {
    pub date: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub year: i32,
    pub month: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTrend {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
    pub moving_average: Vec<Option<f64>>,
    pub window: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandicapSeries {
    #[serde(flatten)]
    pub series: ChartSeries,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapEntry {
    pub date: NaiveDate,
    pub count: u32,
    pub score: f64,
    pub year: i32,
    pub month: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerAverage {
    pub period: String,
    pub average: Option<f64>,
    pub member_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupAverage {
    pub average: Option<f64>,
    pub member_count: usize,
}

impl GroupAverage {
    pub const EMPTY: GroupAverage = GroupAverage {
        average: None,
        member_count: 0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub period: String,
    pub own_average: Option<f64>,
    pub peers: PeerAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ParticipationStats {
    pub participating_members: usize,
    pub total_participations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSummary {
    pub total_members: usize,
    pub gender_distribution: BTreeMap<String, usize>,
    pub cohort_distribution: BTreeMap<u32, usize>,
    pub participation: ParticipationStats,
    pub average_handicap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub cohort: u32,
    pub handicap: Option<f64>,
    pub recent_average: Option<f64>,
    pub best_score: Option<f64>,
    pub participation_count: usize,
    pub recorded_participation: u32,
    pub last_participation: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePage {
    pub rows: Vec<ScoreEntry>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListing {
    pub name: String,
    pub cohort: u32,
    pub gender: Gender,
    pub has_records: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub name: String,
    pub cohort: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub name: String,
    pub cohort: u32,
    pub handicap: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    pub names: Vec<String>,
    #[serde(default)]
    pub method: GroupingMethod,
    pub group_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub entries: Vec<HeatmapEntry>,
    pub range: Option<DateRange>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub profile: ProfileSummary,
    pub trend: ScoreTrend,
    pub handicap: HandicapSeries,
    pub heatmap: HeatmapResponse,
    pub monthly_comparison: Vec<PeriodComparison>,
    pub yearly_comparison: Vec<PeriodComparison>,
}
