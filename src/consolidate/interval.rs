use crate::model::{MINUTES_PER_DAY, TimeRange};

/// Folds a set of time ranges into the minimal list covering their union.
///
/// Two ranges join when the later one starts no more than `tolerance` minutes
/// after the earlier one ends. Ranges are sorted by start then end, so for a
/// shared start the longer end wins through the `max` in the fold.
///
/// After the linear fold the list is treated as circular: when the last range
/// runs past midnight, leading ranges that begin within its overflow (plus
/// tolerance) are moved onto the next day and absorbed into it.
///
/// A merged range always stays shorter than a day, since `HHMM-HHMM` cannot
/// express anything longer. Ranges whose union would reach a full day are kept
/// as separate entries; together they still cover every input minute.
pub fn merge_ranges(ranges: &[TimeRange], tolerance: u32) -> Vec<TimeRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort();

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(current)
                if range.start() <= current.end().saturating_add(tolerance)
                    && under_a_day(current.start(), current.end().max(range.end())) =>
            {
                current.extend_to(range.end());
            }
            _ => merged.push(range),
        }
    }

    wrap_past_midnight(&mut merged, tolerance);
    merged
}

fn wrap_past_midnight(merged: &mut Vec<TimeRange>, tolerance: u32) {
    while merged.len() > 1 {
        let last_index = merged.len() - 1;
        let Some(overflow) = merged[last_index].end().checked_sub(MINUTES_PER_DAY) else {
            return;
        };
        if merged[0].start() > overflow.saturating_add(tolerance) {
            return;
        }

        let carried = merged[0].next_day();
        let last = merged[last_index];
        if !under_a_day(last.start(), last.end().max(carried.end())) {
            return;
        }

        merged[last_index].extend_to(carried.end());
        merged.remove(0);
    }
}

fn under_a_day(start: u32, end: u32) -> bool {
    end - start < MINUTES_PER_DAY
}
