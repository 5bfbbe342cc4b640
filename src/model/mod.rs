mod time;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

pub use time::{MINUTES_PER_DAY, TimeRange};

/// Location used for classes that appear before any venue row in the grid.
pub const DEFAULT_LOCATION: &str = "Unknown Location";

/// Teaching day of the week. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days in timetable column order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Recognises full or three-letter day names, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|day| {
            let name = day.name().to_ascii_lowercase();
            label == name || label == &name[..3]
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self> {
        Self::from_label(value).ok_or_else(|| ToolError::InvalidWeekday(value.to_string()))
    }
}

impl TryFrom<String> for Weekday {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(day: Weekday) -> Self {
        day.name().to_string()
    }
}

/// One timetable cell that mentions a module, before any merging.
///
/// The time is kept as the raw cell text: validating it is the job of the
/// consolidation pass, which skips and reports observations it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub module: String,
    pub location: String,
    pub day: Weekday,
    pub time: String,
    pub label: String,
}

/// Identity of a single class session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey {
    pub module: String,
    pub location: String,
    pub day: Weekday,
    pub label: String,
}

impl SessionKey {
    /// Derives the key of an observation. With `fold_label_case` the label is
    /// compared upper-cased, so `Lecture Group A` and `LECTURE GROUP A` meet.
    pub fn from_observation(observation: &RawObservation, fold_label_case: bool) -> Self {
        let label = if fold_label_case {
            observation.label.to_uppercase()
        } else {
            observation.label.clone()
        };

        Self {
            module: observation.module.clone(),
            location: observation.location.clone(),
            day: observation.day,
            label,
        }
    }
}

/// A consolidated class session as written to the schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub location: String,
    pub day: Weekday,
    pub time: TimeRange,
    #[serde(rename = "class", alias = "details")]
    pub label: String,
}

/// Consolidated sessions grouped by module code.
///
/// Serializes as `{"Module Schedules": {<module>: [<record>, ...]}}`. Modules
/// without sessions are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    #[serde(rename = "Module Schedules")]
    modules: BTreeMap<String, Vec<SessionRecord>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the module's list.
    pub fn push(&mut self, module: impl Into<String>, record: SessionRecord) {
        self.modules.entry(module.into()).or_default().push(record);
    }

    pub fn get(&self, module: &str) -> Option<&[SessionRecord]> {
        self.modules.get(module).map(Vec::as_slice)
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &[SessionRecord])> {
        self.modules
            .iter()
            .map(|(module, records)| (module.as_str(), records.as_slice()))
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn session_count(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Orders every module's records by day, start time, location, then label.
    pub(crate) fn sort_records(&mut self) {
        for records in self.modules.values_mut() {
            records.sort_by(|lhs, rhs| {
                lhs.day
                    .cmp(&rhs.day)
                    .then_with(|| lhs.time.cmp(&rhs.time))
                    .then_with(|| lhs.location.cmp(&rhs.location))
                    .then_with(|| lhs.label.cmp(&rhs.label))
            });
        }
    }

    /// Expands every record back into a single observation, so that a schedule
    /// can be fed through consolidation again.
    pub fn into_observations(self) -> Vec<RawObservation> {
        self.modules
            .into_iter()
            .flat_map(|(module, records)| {
                records.into_iter().map(move |record| RawObservation {
                    module: module.clone(),
                    location: record.location,
                    day: record.day,
                    time: record.time.to_string(),
                    label: record.label,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_accepts_short_and_long_names() {
        assert_eq!(Weekday::from_label("Mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_label(" thursday "), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_label("FRI"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_label("Saturday"), None);
        assert_eq!(Weekday::from_label("Monday 1"), None);
        assert!("Sun".parse::<Weekday>().is_err());
    }

    #[test]
    fn session_key_folds_label_case_on_request() {
        let observation = RawObservation {
            module: "MATH 101".into(),
            location: "BIUST - AUDITORIUM".into(),
            day: Weekday::Monday,
            time: "0800-0850".into(),
            label: "Math 101 Lecture Group A".into(),
        };

        let verbatim = SessionKey::from_observation(&observation, false);
        let folded = SessionKey::from_observation(&observation, true);
        assert_eq!(verbatim.label, "Math 101 Lecture Group A");
        assert_eq!(folded.label, "MATH 101 LECTURE GROUP A");
    }

    #[test]
    fn schedule_serializes_with_wrapper_key() {
        let mut schedule = Schedule::new();
        schedule.push(
            "MATH 101",
            SessionRecord {
                location: "RoomA".into(),
                day: Weekday::Monday,
                time: TimeRange::parse("0800-0850").expect("valid range"),
                label: "Lecture Group A".into(),
            },
        );

        let json = serde_json::to_value(&schedule).expect("serialized");
        assert_eq!(
            json,
            serde_json::json!({
                "Module Schedules": {
                    "MATH 101": [{
                        "location": "RoomA",
                        "day": "Monday",
                        "time": "0800-0850",
                        "class": "Lecture Group A"
                    }]
                }
            })
        );
    }
}
