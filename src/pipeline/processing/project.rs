use std::collections::{BTreeMap, BTreeSet};

use super::accumulator::{PersonAccumulator, PhoneEntry};
use super::columns::PhoneCategory;
use super::derive::{estimated_engagement, interest_level};
use crate::constants::{
    HEADER_ADDRESS, HEADER_BUSINESS_EMAIL, HEADER_CITY, HEADER_DATE, HEADER_DIRECT_PHONE,
    HEADER_DIRECT_PHONE_DNC, HEADER_ESTIMATED_TIME, HEADER_FIRST_NAME, HEADER_INTEREST_LEVEL,
    HEADER_LAST_NAME, HEADER_MOBILE_PHONE, HEADER_PERSONAL_EMAIL, HEADER_PERSONAL_PHONE,
    HEADER_PROFILE_URL, HEADER_STATE, HEADER_ZIP, MAX_WIDE_EMAILS, WIDE_DNC_COLUMN,
    WIDE_EMAIL_PREFIX, WIDE_PHONE_PREFIX,
};
use crate::pipeline::pipeline_config::{PipelineConfig, SchemaVariant};

/// One output record keyed by header name. Keys outside the table headers
/// are dropped at write time.
pub type OutputRow = BTreeMap<String, String>;

const PROFILE_HEADERS: &[&str] = &[
    HEADER_DATE,
    HEADER_FIRST_NAME,
    HEADER_LAST_NAME,
    HEADER_ADDRESS,
    HEADER_CITY,
    HEADER_STATE,
    HEADER_ZIP,
    HEADER_DIRECT_PHONE,
    HEADER_MOBILE_PHONE,
    HEADER_PERSONAL_PHONE,
    HEADER_PERSONAL_EMAIL,
    HEADER_BUSINESS_EMAIL,
];

const ENGAGEMENT_HEADERS: &[&str] = &[
    HEADER_DATE,
    HEADER_FIRST_NAME,
    HEADER_LAST_NAME,
    HEADER_ADDRESS,
    HEADER_CITY,
    HEADER_STATE,
    HEADER_ZIP,
    HEADER_DIRECT_PHONE,
    HEADER_DIRECT_PHONE_DNC,
    HEADER_MOBILE_PHONE,
    HEADER_PERSONAL_PHONE,
    HEADER_PERSONAL_EMAIL,
    HEADER_BUSINESS_EMAIL,
    HEADER_PROFILE_URL,
    HEADER_INTEREST_LEVEL,
    HEADER_ESTIMATED_TIME,
];

/// Headers plus rows, ready for a table sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row values in header order; absent keys become empty cells
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |row| {
            self.headers
                .iter()
                .map(|header| row.get(header).map(String::as_str).unwrap_or(""))
                .collect()
        })
    }
}

/// Build the output table for the configured schema variant, one row per
/// accumulator in first-seen order. No accumulators yields an empty table
/// without headers.
pub fn project(people: &[PersonAccumulator], config: &PipelineConfig) -> OutputTable {
    if people.is_empty() {
        return OutputTable::default();
    }

    match config.variant {
        SchemaVariant::Profile => fixed_table(PROFILE_HEADERS, people.iter().map(profile_row)),
        SchemaVariant::Engagement => {
            fixed_table(ENGAGEMENT_HEADERS, people.iter().map(engagement_row))
        }
        SchemaVariant::Wide => wide_table(people, config),
    }
}

fn fixed_table(headers: &[&str], rows: impl Iterator<Item = OutputRow>) -> OutputTable {
    OutputTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows.collect(),
    }
}

fn first_number(person: &PersonAccumulator, category: &PhoneCategory) -> String {
    person
        .phones_in(category)
        .first()
        .map(|entry| entry.number.clone())
        .unwrap_or_default()
}

/// Columns shared by both narrow schemas
fn person_row(person: &PersonAccumulator) -> OutputRow {
    let mut row = OutputRow::new();
    row.insert(HEADER_DATE.to_string(), person.date.clone());
    row.insert(HEADER_FIRST_NAME.to_string(), person.first_name.clone());
    row.insert(HEADER_LAST_NAME.to_string(), person.last_name.clone());
    row.insert(HEADER_ADDRESS.to_string(), person.address.clone());
    row.insert(HEADER_CITY.to_string(), person.city.clone());
    row.insert(HEADER_STATE.to_string(), person.state.clone());
    row.insert(HEADER_ZIP.to_string(), person.zip.clone());
    row.insert(
        HEADER_PERSONAL_EMAIL.to_string(),
        person.personal_email.clone().unwrap_or_default(),
    );
    row.insert(
        HEADER_BUSINESS_EMAIL.to_string(),
        person.business_email.clone().unwrap_or_default(),
    );
    row
}

fn profile_row(person: &PersonAccumulator) -> OutputRow {
    let mut row = person_row(person);
    row.insert(
        HEADER_DIRECT_PHONE.to_string(),
        first_number(person, &PhoneCategory::Direct),
    );
    row.insert(
        HEADER_MOBILE_PHONE.to_string(),
        first_number(person, &PhoneCategory::Mobile),
    );
    row.insert(
        HEADER_PERSONAL_PHONE.to_string(),
        first_number(person, &PhoneCategory::Personal),
    );
    row
}

/// First entry whose number is not already taken, else the first entry
fn pick_distinct<'a>(entries: &'a [PhoneEntry], taken: &[&str]) -> Option<&'a PhoneEntry> {
    entries
        .iter()
        .find(|entry| !taken.contains(&entry.number.as_str()))
        .or_else(|| entries.first())
}

fn engagement_row(person: &PersonAccumulator) -> OutputRow {
    let mut row = person_row(person);

    let direct = person.phones_in(&PhoneCategory::Direct).first();
    let direct_number = direct.map(|e| e.number.as_str()).unwrap_or("");

    let mobile = pick_distinct(person.phones_in(&PhoneCategory::Mobile), &[direct_number]);
    let mobile_number = mobile.map(|e| e.number.as_str()).unwrap_or("");

    let personal = pick_distinct(
        person.phones_in(&PhoneCategory::Personal),
        &[direct_number, mobile_number],
    );

    row.insert(HEADER_DIRECT_PHONE.to_string(), direct_number.to_string());
    row.insert(
        HEADER_DIRECT_PHONE_DNC.to_string(),
        direct.and_then(|e| e.dnc.clone()).unwrap_or_default(),
    );
    row.insert(HEADER_MOBILE_PHONE.to_string(), mobile_number.to_string());
    row.insert(
        HEADER_PERSONAL_PHONE.to_string(),
        personal.map(|e| e.number.clone()).unwrap_or_default(),
    );
    row.insert(HEADER_PROFILE_URL.to_string(), person.profile_url.clone());
    row.insert(
        HEADER_INTEREST_LEVEL.to_string(),
        interest_level(person.occurrences).to_string(),
    );
    row.insert(
        HEADER_ESTIMATED_TIME.to_string(),
        estimated_engagement(person.timestamps.len()),
    );
    row
}

fn wide_row(person: &PersonAccumulator, first_column: &str, last_column: &str) -> OutputRow {
    let mut row = OutputRow::new();

    for (column, value) in &person.other {
        row.insert(column.clone(), value.clone());
    }
    row.insert(first_column.to_string(), person.first_name.clone());
    row.insert(last_column.to_string(), person.last_name.clone());

    for (i, email) in person.emails.iter().take(MAX_WIDE_EMAILS).enumerate() {
        row.insert(format!("{}{}", WIDE_EMAIL_PREFIX, i + 1), email.clone());
    }

    let phones = person.distinct_phones();
    for (i, entry) in phones.iter().enumerate() {
        row.insert(format!("{}{}", WIDE_PHONE_PREFIX, i + 1), entry.number.clone());
    }
    if phones.iter().any(|entry| entry.dnc.is_some()) {
        let flags: Vec<&str> = phones
            .iter()
            .map(|entry| entry.dnc.as_deref().unwrap_or(""))
            .collect();
        row.insert(WIDE_DNC_COLUMN.to_string(), flags.join("|"));
    }

    row
}

fn numbered(column: &str, prefix: &str) -> Option<usize> {
    column.strip_prefix(prefix)?.parse().ok()
}

/// Header order: identity, numbered emails, numbered phones, DNC, the rest
/// sorted. Computed from the union of every row's keys.
fn wide_headers(rows: &[OutputRow], first_column: &str, last_column: &str) -> Vec<String> {
    let union: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut emails: Vec<(usize, &str)> = Vec::new();
    let mut phones: Vec<(usize, &str)> = Vec::new();
    let mut rest: Vec<&str> = Vec::new();
    let mut has_dnc = false;

    for &column in &union {
        if column == first_column || column == last_column {
            continue;
        }
        if column == WIDE_DNC_COLUMN {
            has_dnc = true;
        } else if let Some(n) = numbered(column, WIDE_EMAIL_PREFIX) {
            emails.push((n, column));
        } else if let Some(n) = numbered(column, WIDE_PHONE_PREFIX) {
            phones.push((n, column));
        } else {
            rest.push(column);
        }
    }
    emails.sort();
    phones.sort();

    let mut headers = vec![first_column.to_string(), last_column.to_string()];
    headers.extend(emails.into_iter().map(|(_, c)| c.to_string()));
    headers.extend(phones.into_iter().map(|(_, c)| c.to_string()));
    if has_dnc {
        headers.push(WIDE_DNC_COLUMN.to_string());
    }
    headers.extend(rest.into_iter().map(str::to_string));
    headers
}

fn wide_table(people: &[PersonAccumulator], config: &PipelineConfig) -> OutputTable {
    let first_column = config.columns.first_name.trim();
    let last_column = config.columns.last_name.trim();

    let rows: Vec<OutputRow> = people
        .iter()
        .map(|person| wide_row(person, first_column, last_column))
        .collect();
    let headers = wide_headers(&rows, first_column, last_column);

    OutputTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::identity::IdentityKey;
    use chrono::NaiveDate;

    fn person(first: &str, last: &str) -> PersonAccumulator {
        let key = IdentityKey::from_names(first, last).unwrap();
        let mut person = PersonAccumulator::new(
            key,
            &[PhoneCategory::Direct, PhoneCategory::Mobile, PhoneCategory::Personal],
        );
        person.first_name = first.to_string();
        person.last_name = last.to_string();
        person.occurrences = 1;
        person
    }

    fn phone(person: &mut PersonAccumulator, category: PhoneCategory, number: &str, dnc: Option<&str>) {
        person.record_phone(
            &category,
            PhoneEntry {
                number: number.to_string(),
                dnc: dnc.map(str::to_string),
            },
        );
    }

    fn cells(table: &OutputTable, row: usize) -> Vec<String> {
        table
            .records()
            .nth(row)
            .unwrap()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_no_people_yields_empty_table() {
        let config = PipelineConfig::for_variant(SchemaVariant::Wide);
        let table = project(&[], &config);
        assert!(table.is_empty());
        assert!(table.headers.is_empty());
    }

    #[test]
    fn test_profile_schema_order_and_values() {
        let mut ada = person("Ada", "Lovelace");
        ada.date = "2025-09-29".to_string();
        ada.city = "London".to_string();
        phone(&mut ada, PhoneCategory::Mobile, "5552222222", None);
        ada.business_email = Some("ada@engine.co".to_string());

        let table = project(&[ada], &PipelineConfig::for_variant(SchemaVariant::Profile));
        assert_eq!(table.headers, PROFILE_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        assert_eq!(
            cells(&table, 0),
            vec![
                "2025-09-29", "Ada", "Lovelace", "", "London", "", "", "", "5552222222", "", "",
                "ada@engine.co"
            ]
        );
    }

    #[test]
    fn test_engagement_prefers_distinct_mobile_and_personal() {
        let mut ada = person("Ada", "Lovelace");
        phone(&mut ada, PhoneCategory::Direct, "5551111111", Some("Y"));
        phone(&mut ada, PhoneCategory::Mobile, "5551111111", None);
        phone(&mut ada, PhoneCategory::Mobile, "5552222222", None);
        phone(&mut ada, PhoneCategory::Personal, "5552222222", None);
        ada.occurrences = 3;
        ada.profile_url = "linkedin.com/in/ada".to_string();
        let ts = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap().and_hms_opt(17, 0, 0).unwrap();
        ada.timestamps = vec![ts, ts, ts];

        let table = project(&[ada], &PipelineConfig::for_variant(SchemaVariant::Engagement));
        let row = &table.rows[0];
        assert_eq!(row[HEADER_DIRECT_PHONE], "5551111111");
        assert_eq!(row[HEADER_DIRECT_PHONE_DNC], "Y");
        assert_eq!(row[HEADER_MOBILE_PHONE], "5552222222");
        // every personal candidate collides, so fall back to the first
        assert_eq!(row[HEADER_PERSONAL_PHONE], "5552222222");
        assert_eq!(row[HEADER_PROFILE_URL], "linkedin.com/in/ada");
        assert_eq!(row[HEADER_INTEREST_LEVEL], "Medium");
        assert_eq!(row[HEADER_ESTIMATED_TIME], "3 minutes");
        assert_eq!(table.headers.len(), ENGAGEMENT_HEADERS.len());
    }

    #[test]
    fn test_engagement_mobile_falls_back_to_first() {
        let mut ada = person("Ada", "Lovelace");
        phone(&mut ada, PhoneCategory::Direct, "5551111111", None);
        phone(&mut ada, PhoneCategory::Mobile, "5551111111", None);

        let table = project(&[ada], &PipelineConfig::for_variant(SchemaVariant::Engagement));
        assert_eq!(table.rows[0][HEADER_MOBILE_PHONE], "5551111111");
        assert_eq!(table.rows[0][HEADER_DIRECT_PHONE_DNC], "");
        assert_eq!(table.rows[0][HEADER_ESTIMATED_TIME], "");
        assert_eq!(table.rows[0][HEADER_INTEREST_LEVEL], "Not Interested");
    }

    #[test]
    fn test_wide_headers_follow_union_order() {
        let mut ada = person("Ada", "Lovelace");
        for n in 1..=11 {
            phone(&mut ada, PhoneCategory::Direct, &format!("55500000{:02}", n), None);
        }
        ada.emails = (1..=7).map(|n| format!("ada{}@engine.co", n)).collect();
        ada.other.insert("JOB_TITLE".to_string(), "Countess".to_string());

        let mut bob = person("Bob", "Babbage");
        phone(&mut bob, PhoneCategory::Mobile, "5559999999", Some("N"));
        bob.other.insert("COMPANY_NAME".to_string(), "Engine".to_string());

        let table = project(&[ada, bob], &PipelineConfig::for_variant(SchemaVariant::Wide));

        let mut expected = vec!["FIRST_NAME".to_string(), "LAST_NAME".to_string()];
        expected.extend((1..=5).map(|n| format!("EMAIL_{}", n)));
        expected.extend((1..=11).map(|n| format!("PHONE_{}", n)));
        expected.push("DNC".to_string());
        expected.push("COMPANY_NAME".to_string());
        expected.push("JOB_TITLE".to_string());
        assert_eq!(table.headers, expected);

        // ada has no flags, bob's only phone is flagged
        assert!(!table.rows[0].contains_key("DNC"));
        assert_eq!(table.rows[1]["DNC"], "N");
        assert_eq!(cells(&table, 1)[table.headers.len() - 1], "");
    }

    #[test]
    fn test_wide_dnc_aligns_with_phone_columns() {
        let mut ada = person("Ada", "Lovelace");
        phone(&mut ada, PhoneCategory::Direct, "5551111111", None);
        phone(&mut ada, PhoneCategory::Mobile, "5551111111", Some("Y"));
        phone(&mut ada, PhoneCategory::Mobile, "5552222222", Some("Y"));

        let table = project(&[ada], &PipelineConfig::for_variant(SchemaVariant::Wide));
        let row = &table.rows[0];
        assert_eq!(row["PHONE_1"], "5551111111");
        assert_eq!(row["PHONE_2"], "5552222222");
        assert_eq!(row["DNC"], "|Y");
    }
}
