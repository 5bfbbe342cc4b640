use crate::model::Weekday;

/// Role of a single cell in the exported timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Blank,
    /// Names the venue for the rows that follow.
    LocationMarker,
    /// Looks like a time-slot label such as `0800-0850`.
    TimeSlot,
    /// A day column heading.
    DayHeader(Weekday),
    /// Free text, usually a class descriptor.
    Data,
}

/// Decides what a cell holds from its text alone.
pub trait CellClassifier {
    fn classify(&self, text: &str) -> CellKind;
}

/// Classifier keyed on a venue marker substring, e.g. `BIUST -`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClassifier {
    location_marker: String,
    excluded_markers: Vec<String>,
}

impl MarkerClassifier {
    pub fn new(location_marker: impl Into<String>, excluded_markers: Vec<String>) -> Self {
        Self {
            location_marker: location_marker.into(),
            excluded_markers,
        }
    }

    fn is_location(&self, text: &str) -> bool {
        !self.location_marker.is_empty()
            && text.contains(&self.location_marker)
            && !self
                .excluded_markers
                .iter()
                .any(|marker| text.contains(marker.as_str()))
    }
}

impl CellClassifier for MarkerClassifier {
    fn classify(&self, text: &str) -> CellKind {
        let text = text.trim();
        if text.is_empty() {
            return CellKind::Blank;
        }
        if self.is_location(text) {
            return CellKind::LocationMarker;
        }
        if let Some(day) = Weekday::from_label(text) {
            return CellKind::DayHeader(day);
        }
        if text.starts_with(|ch: char| ch.is_ascii_digit()) && text.contains('-') {
            return CellKind::TimeSlot;
        }
        CellKind::Data
    }
}
