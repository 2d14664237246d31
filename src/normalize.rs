use crate::constants::RANGE_SEPARATOR;
use crate::types::{FlatRecord, NormalizedRow};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

// Free text followed by a whitespace-separated alphanumeric room token
// ending in a digit; group 1 is the building name
static BUILDING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*) \w+\d").expect("building pattern compiles"));

/// Result of a normalization pass, with the row counts callers need to
/// spot upstream data drift
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub rows: Vec<NormalizedRow>,
    /// Records that entered the pass
    pub considered: usize,
    /// Records excluded for lacking a usable start/end time
    pub dropped: usize,
}

/// Cleans and types the flat records into the final rectangular rows.
///
/// Pure and order-preserving. The only way a record disappears is the
/// time filter: a record whose start or end time is absent or not a
/// 4-digit 24-hour string is excluded. Every other data-quality problem
/// degrades to an absent field on a retained row.
pub fn normalize(records: &[FlatRecord]) -> NormalizeOutcome {
    let considered = records.len();
    let rows: Vec<NormalizedRow> = records.iter().filter_map(normalize_record).collect();
    let dropped = considered - rows.len();
    NormalizeOutcome {
        rows,
        considered,
        dropped,
    }
}

fn normalize_record(record: &FlatRecord) -> Option<NormalizedRow> {
    let meeting = record.meeting.as_ref();

    let (start_raw, end_raw) = split_range(meeting.map(|m| m.time.as_str()));
    let start_time = parse_military_time(start_raw?)?;
    let end_time = parse_military_time(end_raw?)?;

    let (start_date, end_date) = split_range(meeting.map(|m| m.date_range.as_str()));
    let day_codes = meeting.map(|m| m.day_codes.as_str()).unwrap_or_default();
    let building = meeting.and_then(|m| extract_building(&m.building_raw));

    Some(NormalizedRow {
        crn: record.crn.clone(),
        course_id: record.course_id.clone(),
        display_name: record.display_name.clone(),
        section_id: record.section_id.clone(),
        credits: record.credits,
        schedule_type: record.schedule_type.clone(),
        campus: record.campus.clone(),
        building,
        start_date: start_date.map(str::to_string),
        end_date: end_date.map(str::to_string),
        start_time,
        end_time,
        monday: day_codes.contains('M'),
        tuesday: day_codes.contains('T'),
        wednesday: day_codes.contains('W'),
        thursday: day_codes.contains('R'),
        friday: day_codes.contains('F'),
    })
}

/// Splits a "start - end" value on the literal separator; a value without
/// the separator yields neither half
fn split_range(value: Option<&str>) -> (Option<&str>, Option<&str>) {
    match value.and_then(|v| v.split_once(RANGE_SEPARATOR)) {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    }
}

/// Parses a 4-digit 24-hour string ("0800") into a wall-clock time.
/// Anything else, including 3-digit or non-numeric strings, is unparsable.
fn parse_military_time(raw: &str) -> Option<NaiveTime> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        NaiveTime::parse_from_str(raw, "%H%M").ok()
    } else {
        None
    }
}

fn extract_building(raw: &str) -> Option<String> {
    BUILDING_PATTERN
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|building| building.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Meeting;
    use serde_json::json;

    fn record(meeting: Option<Meeting>) -> FlatRecord {
        FlatRecord {
            crn: "12345".to_string(),
            course_id: "CS 1331".to_string(),
            display_name: "Object-Oriented Programming".to_string(),
            section_id: "A".to_string(),
            credits: 3.0,
            schedule_type: "Lecture".to_string(),
            campus: "Atlanta".to_string(),
            attributes: vec![],
            meeting,
        }
    }

    fn meeting(time: &str, day_codes: &str, building_raw: &str, date_range: &str) -> Meeting {
        Meeting {
            time: time.to_string(),
            day_codes: day_codes.to_string(),
            building_raw: building_raw.to_string(),
            location: json!([33.7749, -84.3964]),
            professors: vec!["Smith, Jane".to_string()],
            date_range: date_range.to_string(),
        }
    }

    fn full_record() -> FlatRecord {
        record(Some(meeting(
            "0800 - 0915",
            "MWF",
            "Clough Undergraduate Learning Commons G25",
            "2025-01-06 - 2025-05-02",
        )))
    }

    #[test]
    fn splits_and_types_a_complete_record() {
        let outcome = normalize(&[full_record()]);
        assert_eq!(outcome.considered, 1);
        assert_eq!(outcome.dropped, 0);

        let row = &outcome.rows[0];
        assert_eq!(row.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(row.end_time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(row.start_date.as_deref(), Some("2025-01-06"));
        assert_eq!(row.end_date.as_deref(), Some("2025-05-02"));
        assert_eq!(
            row.building.as_deref(),
            Some("Clough Undergraduate Learning Commons")
        );
    }

    #[test]
    fn day_codes_set_exactly_the_matching_flags() {
        let row = &normalize(&[full_record()]).rows[0];
        assert!(row.monday);
        assert!(!row.tuesday);
        assert!(row.wednesday);
        assert!(!row.thursday);
        assert!(row.friday);
    }

    #[test]
    fn thursday_uses_the_r_code() {
        let rec = record(Some(meeting(
            "1100 - 1215",
            "TR",
            "Klaus 1443",
            "2025-01-06 - 2025-05-02",
        )));
        let row = &normalize(&[rec]).rows[0];
        assert!(!row.monday);
        assert!(row.tuesday);
        assert!(!row.wednesday);
        assert!(row.thursday);
        assert!(!row.friday);
    }

    #[test]
    fn meetingless_record_is_dropped() {
        let outcome = normalize(&[record(None)]);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.considered, 1);
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn three_digit_time_is_unparsable_and_drops_the_row() {
        let rec = record(Some(meeting(
            "800 - 0915",
            "MWF",
            "Clough G25",
            "2025-01-06 - 2025-05-02",
        )));
        let outcome = normalize(&[rec]);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn non_numeric_and_out_of_range_times_drop_the_row() {
        for time in ["08AM - 0915", "0800 - 2575", "TBA"] {
            let rec = record(Some(meeting(
                time,
                "MWF",
                "Clough G25",
                "2025-01-06 - 2025-05-02",
            )));
            assert!(normalize(&[rec]).rows.is_empty(), "time {time:?} survived");
        }
    }

    #[test]
    fn empty_period_string_drops_the_row() {
        let rec = record(Some(meeting("", "MWF", "Clough G25", "2025-01-06 - 2025-05-02")));
        let outcome = normalize(&[rec]);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn date_range_without_separator_keeps_the_row_with_absent_dates() {
        let rec = record(Some(meeting("0800 - 0915", "MWF", "Clough G25", "TBA")));
        let outcome = normalize(&[rec]);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].start_date, None);
        assert_eq!(outcome.rows[0].end_date, None);
    }

    #[test]
    fn unmatched_building_is_absent_not_dropped() {
        let rec = record(Some(meeting(
            "0800 - 0915",
            "MWF",
            "TBA",
            "2025-01-06 - 2025-05-02",
        )));
        let outcome = normalize(&[rec]);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].building, None);
    }

    #[test]
    fn survivors_keep_input_order() {
        let keep_a = full_record();
        let mut keep_b = full_record();
        keep_b.section_id = "B".to_string();
        let outcome = normalize(&[keep_a, record(None), keep_b]);
        let sections: Vec<&str> = outcome
            .rows
            .iter()
            .map(|r| r.section_id.as_str())
            .collect();
        assert_eq!(sections, vec!["A", "B"]);
    }

    #[test]
    fn normalize_is_idempotent_over_the_same_input() {
        let records = vec![full_record(), record(None)];
        assert_eq!(normalize(&records), normalize(&records));
    }
}
