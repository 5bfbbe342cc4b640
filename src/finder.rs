use crate::model::{Schedule, SessionRecord};

/// Finds sessions whose module code contains `query`, ignoring case and
/// differences in spacing. Results follow module order, then record order.
pub fn find_course<'a>(schedule: &'a Schedule, query: &str) -> Vec<(&'a str, &'a SessionRecord)> {
    let needle = squash(query);
    if needle.is_empty() {
        return Vec::new();
    }

    schedule
        .modules()
        .filter(|(module, _)| squash(module).contains(&needle))
        .flat_map(|(module, records)| records.iter().map(move |record| (module, record)))
        .collect()
}

fn squash(text: &str) -> String {
    text.split_whitespace()
        .flat_map(str::chars)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TimeRange, Weekday};

    fn schedule() -> Schedule {
        let mut schedule = Schedule::new();
        for (module, day) in [
            ("CHEM 101", Weekday::Monday),
            ("CHEM 203", Weekday::Tuesday),
            ("MATH 101", Weekday::Friday),
        ] {
            schedule.push(
                module,
                SessionRecord {
                    location: "Hall".into(),
                    day,
                    time: TimeRange::parse("0800-0850").expect("valid range"),
                    label: format!("{module} Lecture"),
                },
            );
        }
        schedule
    }

    #[test]
    fn matches_ignore_case_and_spacing() {
        let schedule = schedule();
        let hits = find_course(&schedule, "chem101");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "CHEM 101");
        assert_eq!(hits[0].1.day, Weekday::Monday);
    }

    #[test]
    fn partial_code_returns_every_module_in_order() {
        let schedule = schedule();
        let modules: Vec<&str> = find_course(&schedule, "CHEM")
            .into_iter()
            .map(|(module, _)| module)
            .collect();
        assert_eq!(modules, ["CHEM 101", "CHEM 203"]);
    }

    #[test]
    fn blank_or_unknown_query_finds_nothing() {
        let schedule = schedule();
        assert!(find_course(&schedule, "  ").is_empty());
        assert!(find_course(&schedule, "PHYS").is_empty());
    }
}
