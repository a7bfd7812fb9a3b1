use crate::models::{Gender, Member, MemberListing};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    pub name: Option<String>,
    pub cohort: Option<u32>,
    pub gender: Option<String>,
    pub has_participated: Option<bool>,
}

pub fn find_member<'a>(members: &'a [Member], name: &str) -> Option<&'a Member> {
    let name = name.trim();
    members.iter().find(|member| member.name == name)
}

pub fn filter_members(members: &[Member], filter: &MemberFilter) -> Vec<MemberListing> {
    let name = filter.name.as_deref().map(str::trim).filter(|name| !name.is_empty());
    let gender = filter.gender.clone().map(Gender::from);

    members
        .iter()
        .filter(|member| name.is_none_or(|name| member.name.contains(name)))
        .filter(|member| filter.cohort.is_none_or(|cohort| member.cohort == cohort))
        .filter(|member| gender.as_ref().is_none_or(|gender| &member.gender == gender))
        .filter(|member| {
            filter
                .has_participated
                .is_none_or(|wanted| member.has_records() == wanted)
        })
        .map(|member| MemberListing {
            name: member.name.clone(),
            cohort: member.cohort,
            gender: member.gender.clone(),
            has_records: member.has_records(),
        })
        .collect()
}
