use crate::auth::{authenticate, session_user};
use crate::compare::{compare_periods, member_years, parse_periods, trailing_months, Period};
use crate::errors::AppError;
use crate::grouping::{group_participants, participant, DEFAULT_GROUP_SIZE};
use crate::heatmap::{display_range, to_heatmap};
use crate::models::{
    ClubSummary, DashboardResponse, GroupAverage, GroupRequest, HeatmapResponse, LoginRequest,
    Member, MemberListing, Participant, PeerAverage, PeriodComparison, ScorePage, SessionUser,
};
use crate::profile::profile_summary;
use crate::records::flatten_scores;
use crate::roster::{filter_members, find_member, MemberFilter};
use crate::state::AppState;
use crate::stats::{club_summary, cohort_average, handicap_range_average, period_average};
use crate::table::{score_page, TableQuery};
use crate::trend::{build_trend, handicap_series};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Header carrying the member's phone suffix on every member endpoint.
pub const PHONE_HEADER: &str = "x-phone-suffix";

/// Months shown in the default dashboard comparison.
const COMPARISON_MONTHS: u32 = 6;

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub periods: String,
}

#[derive(Debug, Deserialize)]
pub struct HandicapRangeQuery {
    pub min: f64,
    pub max: f64,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&club_summary(&state.members)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<ClubSummary> {
    Json(club_summary(&state.members))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    let name = payload.name.trim();
    let phone = payload.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(AppError::bad_request("name and phone are required"));
    }

    match authenticate(&state.members, name, phone) {
        Some(member) => {
            info!(member = %member.name, "member logged in");
            Ok(Json(session_user(member)))
        }
        None => {
            warn!(member = %name, "login rejected");
            Err(AppError::unauthorized("name or phone number does not match"))
        }
    }
}

pub async fn list_members(
    State(state): State<AppState>,
    Query(filter): Query<MemberFilter>,
) -> Json<Vec<MemberListing>> {
    Json(filter_members(&state.members, &filter))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, AppError> {
    let member = authorize(&state, &name, &headers)?;
    Ok(Json(build_dashboard(
        member,
        &state.members,
        state.trend_window,
        today(),
    )?))
}

pub async fn get_scores(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Query(query): Query<TableQuery>,
) -> Result<Json<ScorePage>, AppError> {
    let member = authorize(&state, &name, &headers)?;
    let entries = flatten_scores(&member.records)?;
    Ok(Json(score_page(&entries, &query)))
}

pub async fn get_comparison(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<Vec<PeriodComparison>>, AppError> {
    let member = authorize(&state, &name, &headers)?;
    let periods = parse_periods(&query.periods)?;
    Ok(Json(compare_periods(member, &state.members, &periods)))
}

pub async fn get_yearly_average(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Json<PeerAverage> {
    Json(period_average(&state.members, Period::Year(year)))
}

pub async fn get_cohort_average(
    State(state): State<AppState>,
    Path(cohort): Path<u32>,
) -> Json<GroupAverage> {
    Json(cohort_average(&state.members, cohort))
}

pub async fn get_handicap_average(
    State(state): State<AppState>,
    Query(range): Query<HandicapRangeQuery>,
) -> Result<Json<GroupAverage>, AppError> {
    check_handicap_range(&range)?;
    Ok(Json(handicap_range_average(&state.members, range.min, range.max)))
}

fn check_handicap_range(range: &HandicapRangeQuery) -> Result<(), AppError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(AppError::bad_request("min and max must be finite numbers"));
    }
    if range.min > range.max {
        return Err(AppError::bad_request("min must not exceed max"));
    }
    Ok(())
}

pub async fn create_groups(
    State(state): State<AppState>,
    Json(request): Json<GroupRequest>,
) -> Result<Json<Vec<Vec<Participant>>>, AppError> {
    let groups = build_groups(&state.members, request, &mut rand::rng())?;
    Ok(Json(groups))
}

/// Resolves the requested names and splits them into playing groups.
pub fn build_groups<R>(
    members: &[Member],
    request: GroupRequest,
    rng: &mut R,
) -> Result<Vec<Vec<Participant>>, AppError>
where
    R: Rng + ?Sized,
{
    let group_size = request.group_size.unwrap_or(DEFAULT_GROUP_SIZE);
    if group_size == 0 {
        return Err(AppError::bad_request("group_size must be at least 1"));
    }
    if request.names.is_empty() {
        return Err(AppError::bad_request("names are required"));
    }

    let mut seen = HashSet::new();
    let mut participants = Vec::with_capacity(request.names.len());
    for name in &request.names {
        let member = find_member(members, name)
            .ok_or_else(|| AppError::not_found(format!("no member named {}", name.trim())))?;
        if seen.insert(member.name.as_str()) {
            participants.push(participant(member));
        }
    }

    let groups = group_participants(participants, request.method, group_size, rng);
    info!(
        method = ?request.method,
        group_size,
        groups = groups.len(),
        "built playing groups"
    );
    Ok(groups)
}

/// Every dashboard widget for one member, computed against `today`.
pub fn build_dashboard(
    member: &Member,
    all_members: &[Member],
    trend_window: usize,
    today: NaiveDate,
) -> Result<DashboardResponse, AppError> {
    let entries = flatten_scores(&member.records)?;

    Ok(DashboardResponse {
        profile: profile_summary(member, &entries),
        trend: build_trend(&entries, trend_window),
        handicap: handicap_series(&member.records, &entries),
        heatmap: HeatmapResponse {
            entries: to_heatmap(&entries),
            range: display_range(&entries, today),
        },
        monthly_comparison: compare_periods(
            member,
            all_members,
            &trailing_months(today, COMPARISON_MONTHS),
        ),
        yearly_comparison: compare_periods(member, all_members, &member_years(member)),
    })
}

fn authorize<'a>(
    state: &'a AppState,
    name: &str,
    headers: &HeaderMap,
) -> Result<&'a Member, AppError> {
    let phone = headers
        .get(PHONE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(format!("missing {PHONE_HEADER} header")))?;

    authenticate(&state.members, name, phone)
        .ok_or_else(|| AppError::unauthorized("name or phone number does not match"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::GroupingMethod;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn members() -> Vec<Member> {
        serde_json::from_str(
            r#"[
                { "name": "김민수", "phone": "010-1234-5678", "cohort": 1, "records": {
                    "2024": { "handicap": 18, "average_score": 92 },
                    "2025": { "average_score": 88,
                              "scores": { "3월": 90, "4월": 86, "5월": 85 } } } },
                { "name": "박지은", "phone": "010-2222-3333", "cohort": 1, "records": {
                    "2025": { "average_score": 84, "scores": { "3월": 80 } } } }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn dashboard_combines_widgets() {
        let members = members();
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let dashboard = build_dashboard(&members[0], &members, 3, today).unwrap();

        assert_eq!(dashboard.profile.participation_count, 3);
        assert_eq!(dashboard.trend.moving_average, vec![None, None, Some(87.0)]);
        assert!(!dashboard.handicap.estimated);
        assert_eq!(dashboard.heatmap.entries.len(), 3);
        let range = dashboard.heatmap.range.unwrap();
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());

        assert_eq!(dashboard.monthly_comparison.len(), 6);
        let march = dashboard
            .monthly_comparison
            .iter()
            .find(|row| row.period == "2025-03")
            .unwrap();
        assert_eq!(march.own_average, Some(90.0));
        assert_eq!(march.peers.average, Some(85.0));

        let years: Vec<&str> = dashboard
            .yearly_comparison
            .iter()
            .map(|row| row.period.as_str())
            .collect();
        assert_eq!(years, vec!["2024", "2025"]);
    }

    #[test]
    fn dashboard_reports_malformed_records() {
        let member: Member = serde_json::from_str(
            r#"{ "name": "x", "records": { "2025": { "scores": { "Mar": 90 } } } }"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let err = build_dashboard(&member, &[], 3, today).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn authorize_checks_phone_header() {
        let state = AppState::new(members(), 3);
        let mut headers = HeaderMap::new();
        assert_eq!(
            authorize(&state, "김민수", &headers).unwrap_err().status,
            axum::http::StatusCode::UNAUTHORIZED
        );

        headers.insert(PHONE_HEADER, "5678".parse().unwrap());
        assert_eq!(authorize(&state, "김민수", &headers).unwrap().cohort, 1);
        assert_eq!(
            authorize(&state, "박지은", &headers).unwrap_err().status,
            axum::http::StatusCode::UNAUTHORIZED
        );
        // unknown names look the same as a wrong phone number
        let unknown = authorize(&state, "없는사람", &headers).unwrap_err();
        let mismatch = authorize(&state, "박지은", &headers).unwrap_err();
        assert_eq!(unknown.status, axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.message, mismatch.message);
    }

    fn group_request(
        names: &[&str],
        method: GroupingMethod,
        group_size: Option<usize>,
    ) -> GroupRequest {
        GroupRequest {
            names: names.iter().map(|name| name.to_string()).collect(),
            method,
            group_size,
        }
    }

    #[test]
    fn groups_resolve_names_once() {
        let members = members();
        let mut rng = StdRng::seed_from_u64(1);
        let request = group_request(
            &["박지은", "김민수", " 김민수 "],
            GroupingMethod::ByHandicap,
            None,
        );
        let groups = build_groups(&members, request, &mut rng).unwrap();

        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].iter().map(|player| player.name.as_str()).collect();
        assert_eq!(names, vec!["김민수", "박지은"]);
        assert_eq!(groups[0][0].handicap, Some(18.0));
    }

    #[test]
    fn groups_reject_bad_requests() {
        let members = members();
        let mut rng = StdRng::seed_from_u64(1);
        let mut status = |request| build_groups(&members, request, &mut rng).unwrap_err().status;

        assert_eq!(
            status(group_request(&["없는사람"], GroupingMethod::Random, None)),
            axum::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(group_request(&[], GroupingMethod::Random, None)),
            axum::http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(group_request(&["김민수"], GroupingMethod::Mixed, Some(0))),
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn handicap_range_rejects_bad_bounds() {
        let range = |min, max| HandicapRangeQuery { min, max };
        assert!(check_handicap_range(&range(0.0, 20.0)).is_ok());
        assert!(check_handicap_range(&range(5.0, 5.0)).is_ok());
        for (min, max) in [
            (f64::NAN, f64::NAN),
            (0.0, f64::NAN),
            (f64::NEG_INFINITY, 10.0),
            (20.0, 0.0),
        ] {
            assert_eq!(
                check_handicap_range(&range(min, max)).unwrap_err().status,
                axum::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
