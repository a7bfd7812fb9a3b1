use crate::models::{Member, SessionUser};
use crate::roster::find_member;

/// Number of trailing phone digits used as the member password.
pub const PHONE_SUFFIX_LEN: usize = 4;

/// Last four digits of a phone number, ignoring dashes and spaces.
pub fn phone_suffix(phone: &str) -> Option<String> {
    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < PHONE_SUFFIX_LEN {
        return None;
    }
    Some(digits[digits.len() - PHONE_SUFFIX_LEN..].iter().collect())
}

/// Matches a name plus either the last four phone digits or the full number.
pub fn authenticate<'a>(members: &'a [Member], name: &str, phone: &str) -> Option<&'a Member> {
    let given = phone_suffix(phone)?;
    let member = find_member(members, name)?;
    let stored = phone_suffix(&member.phone)?;
    (stored == given).then_some(member)
}

pub fn session_user(member: &Member) -> SessionUser {
    SessionUser {
        name: member.name.clone(),
        cohort: member.cohort,
    }
}
