use crate::errors::RecordError;
use crate::models::{Member, PeriodComparison};
use crate::stats::{period_average, period_value, round1};
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Lookup key for a comparison: a whole year or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl Period {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{year}"),
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

impl FromStr for Period {
    type Err = RecordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || RecordError::InvalidPeriod(value.to_string());

        match trimmed.split_once('-') {
            None => {
                let year = trimmed.parse::<i32>().map_err(|_| invalid())?;
                Ok(Period::Year(year))
            }
            Some((year, month)) => {
                let year = year.parse::<i32>().map_err(|_| invalid())?;
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(Period::Month { year, month })
            }
        }
    }
}

/// Parses a comma separated list such as `2024,2025-03`.
pub fn parse_periods(list: &str) -> Result<Vec<Period>, RecordError> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Member value next to the peer average for every requested period, in request order.
///
/// Periods where the member has nothing recorded stay in the output with `own_average: None`
/// so both series line up.
pub fn compare_periods(
    member: &Member,
    all_members: &[Member],
    periods: &[Period],
) -> Vec<PeriodComparison> {
    periods
        .iter()
        .map(|period| PeriodComparison {
            period: period.label(),
            own_average: period_value(member, *period).map(round1),
            peers: period_average(all_members, *period),
        })
        .collect()
}

/// The last `count` calendar months up to and including `today`'s month, oldest first.
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<Period> {
    (0..count)
        .rev()
        .filter_map(|offset| today.checked_sub_months(Months::new(offset)))
        .map(|date| Period::Month {
            year: date.year(),
            month: date.month(),
        })
        .collect()
}

/// Every year the member has a record for, oldest first.
pub fn member_years(member: &Member) -> Vec<Period> {
    let mut years: Vec<Period> = member
        .years_desc()
        .into_iter()
        .map(|(year, _)| Period::Year(year))
        .collect();
    years.reverse();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<Member> {
        serde_json::from_str(
            r#"[
                { "name": "김민수", "records": {
                    "2024": { "average_score": 92 },
                    "2025": { "average_score": 88, "scores": { "3월": 90, "5월": 85 } } } },
                { "name": "박지은", "records": {
                    "2024": { "average_score": 84 },
                    "2025": { "scores": { "3월": 80, "4월": 82 } } } },
                { "name": "이영호", "records": {} }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn periods_parse_years_and_months() {
        assert_eq!("2025".parse::<Period>().unwrap(), Period::Year(2025));
        assert_eq!(
            " 2025-03 ".parse::<Period>().unwrap(),
            Period::Month {
                year: 2025,
                month: 3
            }
        );
        assert!("2025-13".parse::<Period>().is_err());
        assert!("March".parse::<Period>().is_err());
        assert_eq!(Period::Month { year: 2025, month: 3 }.label(), "2025-03");
    }

    #[test]
    fn period_lists_skip_blank_items() {
        let periods = parse_periods("2024, 2025-04,").unwrap();
        assert_eq!(
            periods,
            vec![
                Period::Year(2024),
                Period::Month {
                    year: 2025,
                    month: 4
                }
            ]
        );
        assert!(parse_periods("2024,x").is_err());
    }

    #[test]
    fn comparisons_keep_periods_aligned() {
        let members = members();
        let periods = vec![
            Period::Year(2024),
            Period::Month { year: 2025, month: 3 },
            Period::Month { year: 2025, month: 4 },
            Period::Year(2019),
        ];
        let rows = compare_periods(&members[0], &members, &periods);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].own_average, Some(92.0));
        assert_eq!(rows[0].peers.average, Some(88.0));
        assert_eq!(rows[0].peers.member_count, 2);

        assert_eq!(rows[1].period, "2025-03");
        assert_eq!(rows[1].own_average, Some(90.0));
        assert_eq!(rows[1].peers.average, Some(85.0));

        assert_eq!(rows[2].own_average, None);
        assert_eq!(rows[2].peers.average, Some(82.0));
        assert_eq!(rows[2].peers.member_count, 1);

        assert_eq!(rows[3].own_average, None);
        assert_eq!(rows[3].peers.average, None);
        assert_eq!(rows[3].peers.member_count, 0);
    }

    #[test]
    fn member_without_records_still_gets_rows() {
        let members = members();
        let rows = compare_periods(&members[2], &members, &[Period::Year(2025)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].own_average, None);
        assert_eq!(rows[0].peers.average, Some(88.0));
    }

    #[test]
    fn trailing_months_cross_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let labels: Vec<String> = trailing_months(today, 4)
            .iter()
            .map(Period::label)
            .collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
        assert!(trailing_months(today, 0).is_empty());
    }

    #[test]
    fn member_years_run_oldest_first() {
        let members = members();
        assert_eq!(
            member_years(&members[0]),
            vec![Period::Year(2024), Period::Year(2025)]
        );
        assert!(member_years(&members[2]).is_empty());
    }
}
