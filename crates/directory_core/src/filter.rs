//! Client-side search and role/location filtering over a loaded member list.

use indexmap::IndexSet;
use shared::domain::{FilterCriteria, Member, Selector};

/// Returns the members passing every active criterion, in source order.
pub fn filter_members<'a>(members: &'a [Member], criteria: &FilterCriteria) -> Vec<&'a Member> {
    let needle = criteria.search_text.to_lowercase();
    members
        .iter()
        .filter(|member| matches_search(member, &needle))
        .filter(|member| criteria.role.matches(&member.role))
        .filter(|member| criteria.location.matches(&member.location))
        .collect()
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn matches_search(member: &Member, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    member.name.to_lowercase().contains(needle)
        || member.bio.to_lowercase().contains(needle)
        || member
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
}

/// Distinct roles in first-appearance order, led by the `all` sentinel.
pub fn role_options(members: &[Member]) -> Vec<Selector> {
    distinct_options(members.iter().map(|member| member.role.as_str()))
}

/// Distinct locations in first-appearance order, led by the `all` sentinel.
pub fn location_options(members: &[Member]) -> Vec<Selector> {
    distinct_options(members.iter().map(|member| member.location.as_str()))
}

/// A value spelled like the sentinel is folded into the leading `all` option.
fn distinct_options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Selector> {
    let distinct: IndexSet<&str> = values.collect();
    std::iter::once(Selector::All)
        .chain(
            distinct
                .into_iter()
                .map(Selector::parse)
                .filter(|option| *option != Selector::All),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::MemberId;

    fn member(id: &str, name: &str, role: &str, location: &str, bio: &str, skills: &[&str]) -> Member {
        Member {
            id: MemberId(id.to_string()),
            name: name.to_string(),
            role: role.to_string(),
            location: location.to_string(),
            bio: bio.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            photo: None,
        }
    }

    fn ann_and_ben() -> Vec<Member> {
        vec![
            member("1", "Ann", "Lead", "NY", "loves Go", &["Go"]),
            member("2", "Ben", "Dev", "SF", "", &["Rust"]),
        ]
    }

    fn roster() -> Vec<Member> {
        vec![
            member("1", "Ann", "Lead", "NY", "loves Go", &["Go"]),
            member("2", "Ben", "Dev", "SF", "", &["Rust"]),
            member("3", "Cara", "Dev", "NY", "Kubernetes operator", &["Helm", "GOLANG"]),
            member("4", "Dmitri", "Designer", "Berlin", "Figma all day", &[]),
            member("5", "Eve", "Dev", "Berlin", "Security research", &["Rust", "Fuzzing"]),
        ]
    }

    fn ids(members: &[&Member]) -> Vec<String> {
        members.iter().map(|m| m.id.0.clone()).collect()
    }

    #[test]
    fn default_criteria_return_collection_unchanged() {
        let members = roster();
        let filtered = filter_members(&members, &FilterCriteria::default());
        assert_eq!(ids(&filtered), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_matches_bio_case_insensitively() {
        let members = ann_and_ben();
        let criteria = FilterCriteria::new("go", Selector::All, Selector::All);
        assert_eq!(ids(&filter_members(&members, &criteria)), ["1"]);
    }

    #[test]
    fn role_selector_picks_exact_role() {
        let members = ann_and_ben();
        let criteria = FilterCriteria::new("", Selector::parse("Dev"), Selector::All);
        assert_eq!(ids(&filter_members(&members, &criteria)), ["2"]);
    }

    #[test]
    fn unknown_role_yields_empty_result() {
        let members = ann_and_ben();
        let criteria = FilterCriteria::new("", Selector::parse("QA"), Selector::All);
        assert!(filter_members(&members, &criteria).is_empty());
    }

    #[test]
    fn role_match_is_case_sensitive() {
        let members = roster();
        let criteria = FilterCriteria::new("", Selector::parse("dev"), Selector::All);
        assert!(filter_members(&members, &criteria).is_empty());
    }

    #[test]
    fn role_filter_returns_subsequence_in_source_order() {
        let members = roster();
        let criteria = FilterCriteria::new("", Selector::parse("Dev"), Selector::All);
        assert_eq!(ids(&filter_members(&members, &criteria)), ["2", "3", "5"]);
    }

    #[test]
    fn search_covers_name_bio_and_every_skill() {
        let members = roster();
        let by_name = FilterCriteria::new("DMIT", Selector::All, Selector::All);
        assert_eq!(ids(&filter_members(&members, &by_name)), ["4"]);

        let by_late_skill = FilterCriteria::new("fuzz", Selector::All, Selector::All);
        assert_eq!(ids(&filter_members(&members, &by_late_skill)), ["5"]);

        let across_fields = FilterCriteria::new("go", Selector::All, Selector::All);
        assert_eq!(ids(&filter_members(&members, &across_fields)), ["1", "3"]);
    }

    #[test]
    fn search_text_is_not_trimmed() {
        let members = roster();
        let criteria = FilterCriteria::new(" go", Selector::All, Selector::All);
        assert_eq!(ids(&filter_members(&members, &criteria)), ["1"]);
    }

    #[test]
    fn included_and_excluded_members_agree_with_search_predicate() {
        let members = roster();
        let needle = "ru";
        let criteria = FilterCriteria::new(needle, Selector::All, Selector::All);
        let included = filter_members(&members, &criteria);
        for member in &members {
            let hit = member.name.to_lowercase().contains(needle)
                || member.bio.to_lowercase().contains(needle)
                || member.skills.iter().any(|s| s.to_lowercase().contains(needle));
            assert_eq!(included.contains(&member), hit, "member {}", member.id);
        }
    }

    #[test]
    fn combined_criteria_are_conjunctive() {
        let members = roster();
        let criteria = FilterCriteria::new("rust", Selector::parse("Dev"), Selector::parse("Berlin"));
        assert_eq!(ids(&filter_members(&members, &criteria)), ["5"]);

        let disjoint = FilterCriteria::new("figma", Selector::parse("Dev"), Selector::All);
        assert!(filter_members(&members, &disjoint).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let members = roster();
        let criteria = FilterCriteria::new("o", Selector::All, Selector::parse("NY"));
        let first = ids(&filter_members(&members, &criteria));
        let second = ids(&filter_members(&members, &criteria));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        let criteria = FilterCriteria::new("anything", Selector::All, Selector::All);
        assert!(filter_members(&[], &criteria).is_empty());
    }

    #[test]
    fn options_are_distinct_and_led_by_sentinel() {
        let members = roster();
        assert_eq!(
            role_options(&members),
            vec![
                Selector::All,
                Selector::parse("Lead"),
                Selector::parse("Dev"),
                Selector::parse("Designer"),
            ]
        );
        assert_eq!(
            location_options(&members),
            vec![
                Selector::All,
                Selector::parse("NY"),
                Selector::parse("SF"),
                Selector::parse("Berlin"),
            ]
        );
        assert_eq!(role_options(&[]), vec![Selector::All]);
    }

    #[test]
    fn literal_all_value_does_not_produce_an_exact_option() {
        let members = vec![
            member("1", "Ann", "all", "all", "", &[]),
            member("2", "Ben", "Dev", "SF", "", &[]),
        ];
        let roles = role_options(&members);
        assert_eq!(roles, vec![Selector::All, Selector::parse("Dev")]);
        assert_eq!(
            location_options(&members),
            vec![Selector::All, Selector::parse("SF")]
        );

        for option in &roles {
            assert_eq!(Selector::parse(&option.to_string()), *option);
        }

        let criteria = FilterCriteria::new("", roles[0].clone(), Selector::All);
        assert_eq!(ids(&filter_members(&members, &criteria)), ["1", "2"]);
    }
}
