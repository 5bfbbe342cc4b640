//! Folds raw timetable observations into one record per class session.
//!
//! Observations are bucketed by [`SessionKey`]; the time ranges in each bucket
//! are merged with [`merge_ranges`], and the results are regrouped by module.
//! Buckets never span modules, and a bucket's merge touches nothing outside it.

mod interval;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{RawObservation, Schedule, SessionKey, SessionRecord, TimeRange};

pub use interval::merge_ranges;

/// Default adjacency tolerance between consecutive slots, in minutes.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 1;

/// Knobs for the consolidation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidateOptions {
    /// Largest gap, in minutes, that still lets two ranges merge.
    pub tolerance_minutes: u32,
    /// Compare labels case-insensitively when building session keys.
    pub fold_label_case: bool,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            fold_label_case: false,
        }
    }
}

/// An observation skipped because its time could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedObservation {
    pub observation: RawObservation,
    pub reason: String,
}

/// Outcome of a consolidation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidation {
    pub schedule: Schedule,
    /// Number of observations consumed, malformed ones included.
    pub observations: usize,
    pub malformed: Vec<MalformedObservation>,
}

struct Bucket {
    location: String,
    label: String,
    ranges: Vec<TimeRange>,
}

/// Consolidates observations into a per-module schedule.
///
/// Observations whose time range does not parse are left out and listed in
/// [`Consolidation::malformed`]; the rest of their bucket is still merged.
pub fn consolidate<I>(observations: I, options: &ConsolidateOptions) -> Consolidation
where
    I: IntoIterator<Item = RawObservation>,
{
    let mut buckets: BTreeMap<SessionKey, Bucket> = BTreeMap::new();
    let mut seen = 0;
    let mut malformed = Vec::new();

    for observation in observations {
        seen += 1;
        let range = match TimeRange::parse(&observation.time) {
            Ok(range) => range,
            Err(error) => {
                warn!(
                    module = %observation.module,
                    day = %observation.day,
                    time = %observation.time,
                    %error,
                    "skipping observation with malformed time range"
                );
                malformed.push(MalformedObservation {
                    reason: error.to_string(),
                    observation,
                });
                continue;
            }
        };

        let key = SessionKey::from_observation(&observation, options.fold_label_case);
        let bucket = buckets.entry(key).or_insert_with(|| Bucket {
            location: observation.location,
            label: observation.label.clone(),
            ranges: Vec::new(),
        });
        // Folded keys can gather differently cased labels; keep the smallest.
        if observation.label < bucket.label {
            bucket.label = observation.label;
        }
        bucket.ranges.push(range);
    }

    debug!(
        observations = seen,
        buckets = buckets.len(),
        malformed = malformed.len(),
        "grouped observations into session buckets"
    );

    let schedule = assemble(buckets, options.tolerance_minutes);

    Consolidation {
        schedule,
        observations: seen,
        malformed,
    }
}

fn assemble(buckets: BTreeMap<SessionKey, Bucket>, tolerance: u32) -> Schedule {
    let mut schedule = Schedule::new();

    for (key, bucket) in buckets {
        for time in merge_ranges(&bucket.ranges, tolerance) {
            schedule.push(
                key.module.clone(),
                SessionRecord {
                    location: bucket.location.clone(),
                    day: key.day,
                    time,
                    label: bucket.label.clone(),
                },
            );
        }
    }

    schedule.sort_records();
    schedule
}
