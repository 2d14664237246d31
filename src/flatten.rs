use crate::document::{Caches, CatalogDocument};
use crate::error::{CatalogError, Result};
use crate::types::{FlatRecord, Meeting};
use serde_json::Value;

// Fixed tuple positions per the crawler's section/meeting encoding
const SECTION_ARITY: usize = 6;
const MEETING_ARITY: usize = 6;

/// Walks every course and section of the document and resolves the shared
/// cache indices into self-contained records, in input order.
///
/// Never filters: a section without meetings still yields a record (with
/// `meeting: None`). Only the first meeting block of a section is kept;
/// additional blocks are discarded, not merged. Any shape violation
/// (wrong tuple arity, wrong element type, cache index out of range) fails
/// the whole run with an error naming the offending course/section.
pub fn flatten(document: &CatalogDocument) -> Result<Vec<FlatRecord>> {
    let caches = &document.caches;
    let mut records = Vec::new();

    for (course_id, course) in &document.courses {
        let context = format!("course {course_id}");
        let course = course
            .as_array()
            .ok_or_else(|| CatalogError::malformed(&context, "course entry is not a tuple"))?;
        if course.len() < 2 {
            return Err(CatalogError::malformed(
                &context,
                format!("course tuple has {} elements, expected 2", course.len()),
            ));
        }
        let display_name = str_elem(&course[0], "display name", &context)?;
        let sections = course[1]
            .as_object()
            .ok_or_else(|| CatalogError::malformed(&context, "sections entry is not a mapping"))?;

        for (section_id, details) in sections {
            let context = format!("course {course_id}, section {section_id}");
            records.push(flatten_section(
                caches,
                course_id,
                display_name,
                section_id,
                details,
                &context,
            )?);
        }
    }

    Ok(records)
}

fn flatten_section(
    caches: &Caches,
    course_id: &str,
    display_name: &str,
    section_id: &str,
    details: &Value,
    context: &str,
) -> Result<FlatRecord> {
    let details = details
        .as_array()
        .ok_or_else(|| CatalogError::malformed(context, "section entry is not a tuple"))?;
    if details.len() < SECTION_ARITY {
        return Err(CatalogError::malformed(
            context,
            format!(
                "section tuple has {} elements, expected {SECTION_ARITY}",
                details.len()
            ),
        ));
    }

    let crn = str_elem(&details[0], "crn", context)?;
    let meetings = details[1]
        .as_array()
        .ok_or_else(|| CatalogError::malformed(context, "meetings entry is not a sequence"))?;
    let credits = details[2]
        .as_f64()
        .ok_or_else(|| CatalogError::malformed(context, "credits is not a number"))?;
    let schedule_type = cache_entry(
        &caches.schedule_types,
        index_elem(&details[3], "schedule type index", context)?,
        "scheduleTypes",
        context,
    )?;
    let campus = cache_entry(
        &caches.campuses,
        index_elem(&details[4], "campus index", context)?,
        "campuses",
        context,
    )?;

    let attribute_idxs = details[5]
        .as_array()
        .ok_or_else(|| CatalogError::malformed(context, "attributes entry is not a sequence"))?;
    let mut attributes = Vec::with_capacity(attribute_idxs.len());
    for idx in attribute_idxs {
        let idx = index_elem(idx, "attribute index", context)?;
        attributes.push(cache_entry(&caches.attributes, idx, "attributes", context)?.clone());
    }

    let meeting = meetings
        .first()
        .map(|block| flatten_meeting(caches, block, context))
        .transpose()?;

    Ok(FlatRecord {
        crn: crn.to_string(),
        course_id: course_id.to_string(),
        display_name: display_name.to_string(),
        section_id: section_id.to_string(),
        credits,
        schedule_type: schedule_type.clone(),
        campus: campus.clone(),
        attributes,
        meeting,
    })
}

fn flatten_meeting(caches: &Caches, block: &Value, context: &str) -> Result<Meeting> {
    let block = block
        .as_array()
        .ok_or_else(|| CatalogError::malformed(context, "meeting entry is not a tuple"))?;
    if block.len() < MEETING_ARITY {
        return Err(CatalogError::malformed(
            context,
            format!(
                "meeting tuple has {} elements, expected {MEETING_ARITY}",
                block.len()
            ),
        ));
    }

    let time = cache_entry(
        &caches.periods,
        index_elem(&block[0], "period index", context)?,
        "periods",
        context,
    )?;
    let day_codes = str_elem(&block[1], "day codes", context)?;
    let building_raw = str_elem(&block[2], "building", context)?;
    let location = cache_entry(
        &caches.locations,
        index_elem(&block[3], "location index", context)?,
        "locations",
        context,
    )?;

    let professor_values = block[4]
        .as_array()
        .ok_or_else(|| CatalogError::malformed(context, "professors entry is not a sequence"))?;
    let mut professors = Vec::with_capacity(professor_values.len());
    for professor in professor_values {
        professors.push(str_elem(professor, "professor name", context)?.to_string());
    }

    let date_range = cache_entry(
        &caches.date_ranges,
        index_elem(&block[5], "date range index", context)?,
        "dateRanges",
        context,
    )?;

    Ok(Meeting {
        time: time.clone(),
        day_codes: day_codes.to_string(),
        building_raw: building_raw.to_string(),
        location: location.clone(),
        professors,
        date_range: date_range.clone(),
    })
}

fn str_elem<'a>(value: &'a Value, what: &str, context: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| CatalogError::malformed(context, format!("{what} is not a string")))
}

fn index_elem(value: &Value, what: &str, context: &str) -> Result<usize> {
    value
        .as_u64()
        .map(|idx| idx as usize)
        .ok_or_else(|| CatalogError::malformed(context, format!("{what} is not a non-negative integer")))
}

fn cache_entry<'a, T>(table: &'a [T], idx: usize, table_name: &str, context: &str) -> Result<&'a T> {
    table.get(idx).ok_or_else(|| {
        CatalogError::malformed(
            context,
            format!(
                "{table_name} index {idx} out of range ({} entries)",
                table.len()
            ),
        )
    })
}
