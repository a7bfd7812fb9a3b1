use chrono::{Datelike, NaiveDate};

/// Month keys used by the score sheets, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

/// Day of month every synthesized score date lands on. The source data only tracks months.
pub const SCORE_DAY: u32 = 15;

pub fn month_number(label: &str) -> Option<u32> {
    let label = label.trim();
    MONTH_LABELS
        .iter()
        .position(|known| *known == label)
        .map(|index| index as u32 + 1)
}

pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LABELS.get(index).copied()
}

pub fn parse_year(key: &str) -> Option<i32> {
    key.trim().parse::<i32>().ok()
}

pub fn score_date(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, SCORE_DAY)
}

/// Axis label in the `2025.3` form.
pub fn chart_label(date: NaiveDate) -> String {
    format!("{}.{}", date.year(), date.month())
}
