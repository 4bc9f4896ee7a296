use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{LegislatorRecord, OutputRow, SeatType, SocialHandles, SocialMediaRecord, Term};

/// Sort key for senate seats; keeps senators after every district.
const SENATE_SORT_KEY: i64 = 999;
const SENATE_LABEL: &str = "Senate";

static JURISDICTIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
    ("PR", "Puerto Rico"),
    ("AS", "American Samoa"),
    ("GU", "Guam"),
    ("MP", "Northern Mariana Islands"),
    ("VI", "U.S. Virgin Islands"),
];

/// Full name for a two-letter jurisdiction code; unknown codes pass through.
pub fn jurisdiction_name(code: &str) -> &str {
    JURISDICTIONS
        .iter()
        .find(|(abbr, _)| *abbr == code)
        .map_or(code, |(_, name)| *name)
}

pub fn normalize_party(party: &str) -> &str {
    match party {
        "Republican" => "R",
        "Democrat" => "D",
        "Independent" => "I",
        other => other,
    }
}

pub fn seat_label(term: &Term) -> String {
    let code = term.state.as_deref().unwrap_or_default();
    match (term.seat_type, term.district) {
        (Some(SeatType::Senator), _) => SENATE_LABEL.to_string(),
        (Some(SeatType::Representative), Some(0)) => format!("{code}-AL"),
        (Some(SeatType::Representative), Some(number)) => format!("{code}-{number:02}"),
        _ => String::new(),
    }
}

/// Ordering key within one jurisdiction.
///
/// At-large (`XX-AL`) and labels without a numeric district both map to 0,
/// so they sort ahead of `XX-01`.
pub fn seat_sort_key(label: &str) -> i64 {
    if label == SENATE_LABEL {
        return SENATE_SORT_KEY;
    }
    label
        .split('-')
        .nth(1)
        .and_then(|number| number.parse().ok())
        .unwrap_or(0)
}

/// Whether the member holding `term` is still serving on `as_of`.
pub fn is_current(term: &Term, as_of: NaiveDate) -> bool {
    match term.end.as_deref() {
        None => true,
        Some(end) => match NaiveDate::parse_from_str(end, "%Y-%m-%d") {
            Ok(end) => end >= as_of,
            Err(_) => end >= as_of.format("%Y-%m-%d").to_string().as_str(),
        },
    }
}

fn display_name(record: &LegislatorRecord) -> String {
    let first = record.name.first.as_deref().unwrap_or_default();
    let last = record.name.last.as_deref().unwrap_or_default();
    format!("{first} {last}")
}

/// Builds one row per currently serving legislator, ordered by jurisdiction
/// name and then by seat.
pub fn build_rows(
    legislators: &[LegislatorRecord],
    social_media: &[SocialMediaRecord],
    as_of: NaiveDate,
) -> Vec<OutputRow> {
    let mut handles_by_id: HashMap<&str, &SocialHandles> = HashMap::new();
    for entry in social_media {
        if let Some(bioguide) = entry.id.bioguide.as_deref() {
            handles_by_id.insert(bioguide, &entry.social);
        }
    }

    let no_handles = SocialHandles::default();
    let mut rows_by_state: BTreeMap<String, Vec<OutputRow>> = BTreeMap::new();

    for legislator in legislators {
        let Some(term) = legislator.current_term() else {
            continue;
        };
        if !is_current(term, as_of) {
            continue;
        }

        let state = jurisdiction_name(term.state.as_deref().unwrap_or_default()).to_string();
        let handles = legislator
            .id
            .bioguide
            .as_deref()
            .and_then(|bioguide| handles_by_id.get(bioguide).copied())
            .unwrap_or(&no_handles);

        let row = OutputRow {
            state: state.clone(),
            name: display_name(legislator),
            party: normalize_party(term.party.as_deref().unwrap_or_default()).to_string(),
            district: seat_label(term),
            phone: term.phone.clone().unwrap_or_default(),
            url: term.url.clone().unwrap_or_default(),
            twitter: handles.twitter.clone(),
            facebook: handles.facebook.clone(),
            youtube: handles.youtube.clone(),
            instagram: handles.instagram.clone(),
        };
        rows_by_state.entry(state).or_default().push(row);
    }

    let mut rows = Vec::new();
    for (_, mut members) in rows_by_state {
        members.sort_by_key(|row| seat_sort_key(&row.district));
        rows.extend(members);
    }
    rows
}
