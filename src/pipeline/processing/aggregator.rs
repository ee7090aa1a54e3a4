use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::accumulator::{fill_first_wins, fill_first_wins_opt, PersonAccumulator, PhoneEntry};
use super::columns::{ColumnLayout, PhoneCategory, ScalarField};
use super::identity::{resolve_key, IdentityKey};
use super::normalize::{
    classify_email_domain, clean_flag, clean_text, extract_date, normalize_email, normalize_phone,
    parse_timestamp, EmailClass,
};
use super::split::split_multiple;
use crate::observability::metrics;
use crate::pipeline::pipeline_config::{EmailSelection, MergePolicy, PhoneSelection};
use crate::types::RawRow;

/// Counters collected while ingesting rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub phones_rejected: usize,
    pub emails_rejected: usize,
    pub timestamps_rejected: usize,
}

/// Which email slot rules apply to a column
#[derive(Debug, Clone, Copy)]
enum EmailSource {
    Business,
    Mixed,
    VerifiedBusiness,
    /// Gathered only by collect-all; never fills a class slot
    CollectOnly,
}

/// Folds input rows into one accumulator per identity key.
///
/// Accumulators are kept in first-seen order. `finish` consumes the
/// aggregator, after which the accumulators are no longer mutated.
pub struct Aggregator {
    layout: ColumnLayout,
    policy: MergePolicy,
    categories: Vec<PhoneCategory>,
    people: Vec<PersonAccumulator>,
    index: HashMap<IdentityKey, usize>,
    stats: AggregationStats,
}

impl Aggregator {
    pub fn new(layout: ColumnLayout, policy: MergePolicy) -> Self {
        let categories = layout.phone_categories();
        Self {
            layout,
            policy,
            categories,
            people: Vec::new(),
            index: HashMap::new(),
            stats: AggregationStats::default(),
        }
    }

    /// Distinct identities seen so far
    pub fn people_seen(&self) -> usize {
        self.people.len()
    }

    pub fn stats(&self) -> &AggregationStats {
        &self.stats
    }

    /// Merge one row. Returns false when the row had no usable identity.
    pub fn ingest(&mut self, row: &RawRow) -> bool {
        self.stats.rows_read += 1;
        metrics::ingest::row_read();

        let Some(key) = resolve_key(row, &self.layout) else {
            self.stats.rows_skipped += 1;
            metrics::ingest::row_skipped();
            debug!("Skipping row {}: missing identity", row.index);
            return false;
        };

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.people.len();
                self.people
                    .push(PersonAccumulator::new(key.clone(), &self.categories));
                self.index.insert(key, slot);
                slot
            }
        };

        let Self {
            layout,
            policy,
            people,
            stats,
            ..
        } = self;
        RowMerger {
            layout,
            policy: *policy,
            stats,
        }
        .merge(&mut people[slot], row);
        true
    }

    /// Consume the aggregator, yielding accumulators in first-seen order
    pub fn finish(self) -> (Vec<PersonAccumulator>, AggregationStats) {
        (self.people, self.stats)
    }
}

/// Applies the merge policy of one row to one accumulator
struct RowMerger<'a> {
    layout: &'a ColumnLayout,
    policy: MergePolicy,
    stats: &'a mut AggregationStats,
}

impl RowMerger<'_> {
    fn merge(&mut self, person: &mut PersonAccumulator, row: &RawRow) {
        person.occurrences += 1;

        // Names are emitted exactly as first seen; only the key is cleaned
        if let Some(i) = self.layout.first_name {
            fill_first_wins(&mut person.first_name, row.get(i).to_string());
        }
        if let Some(i) = self.layout.last_name {
            fill_first_wins(&mut person.last_name, row.get(i).to_string());
        }

        self.merge_scalars(person, row);
        self.merge_phones(person, row);
        self.merge_emails(person, row);

        if self.policy.capture_other {
            for column in self.layout.other_columns() {
                let value = clean_text(row.get(column.index));
                if !value.is_empty() {
                    person.record_other(&column.name, value);
                }
            }
        }
    }

    fn merge_scalars(&mut self, person: &mut PersonAccumulator, row: &RawRow) {
        for &(index, field) in &self.layout.scalars {
            let raw = row.get(index);
            match field {
                ScalarField::Timestamp => {
                    if person.date.is_empty() {
                        if let Some(date) = extract_date(raw) {
                            person.date = clean_text(&date);
                        }
                    }
                    if self.policy.collect_timestamps && !raw.trim().is_empty() {
                        match parse_timestamp(raw) {
                            Some(ts) => person.timestamps.push(ts),
                            None => {
                                self.stats.timestamps_rejected += 1;
                                metrics::normalize::timestamp_rejected();
                            }
                        }
                    }
                }
                ScalarField::Address => fill_first_wins(&mut person.address, clean_text(raw)),
                ScalarField::City => fill_first_wins(&mut person.city, clean_text(raw)),
                ScalarField::State => fill_first_wins(&mut person.state, clean_text(raw)),
                ScalarField::Zip => fill_first_wins(&mut person.zip, clean_text(raw)),
                ScalarField::ProfileUrl => fill_first_wins(&mut person.profile_url, clean_text(raw)),
            }
        }
    }

    fn merge_phones(&mut self, person: &mut PersonAccumulator, row: &RawRow) {
        for column in &self.layout.phones {
            let candidates = split_multiple(row.get(column.index));
            if candidates.is_empty() {
                continue;
            }

            // Flags pair with candidates by position; unmatched positions get none
            let flags = column
                .dnc_index
                .map(|i| split_multiple(row.get(i)))
                .unwrap_or_default();

            for (position, candidate) in candidates.iter().enumerate() {
                let Some(number) = normalize_phone(candidate) else {
                    self.stats.phones_rejected += 1;
                    metrics::normalize::phone_rejected();
                    continue;
                };

                let dnc = flags
                    .get(position)
                    .map(|flag| clean_flag(flag))
                    .filter(|flag| !flag.is_empty());
                person.record_phone(
                    &column.category,
                    PhoneEntry { number, dnc },
                );

                if self.policy.phones == PhoneSelection::FirstPerRow {
                    break;
                }
            }
        }
    }

    fn merge_emails(&mut self, person: &mut PersonAccumulator, row: &RawRow) {
        let sources = self
            .layout
            .business_emails
            .iter()
            .map(|&i| (i, EmailSource::Business))
            .chain(self.layout.mixed_emails.iter().map(|&i| (i, EmailSource::Mixed)))
            .chain(
                self.layout
                    .verified_business_emails
                    .iter()
                    .map(|&i| (i, EmailSource::VerifiedBusiness)),
            );

        let collect_all = self.policy.emails == EmailSelection::CollectAll;
        let sources = if collect_all {
            sources
                .chain(
                    self.layout
                        .verified_emails
                        .iter()
                        .map(|&i| (i, EmailSource::CollectOnly)),
                )
                .collect::<Vec<_>>()
        } else {
            sources.collect::<Vec<_>>()
        };

        for (index, source) in sources {
            for candidate in split_multiple(row.get(index)) {
                let Some(email) = normalize_email(&candidate) else {
                    self.stats.emails_rejected += 1;
                    metrics::normalize::email_rejected();
                    continue;
                };

                if collect_all {
                    person.record_email(&email);
                }

                match source {
                    EmailSource::Business => {
                        fill_first_wins_opt(&mut person.business_email, &email);
                    }
                    EmailSource::Mixed => match classify_email_domain(&email) {
                        EmailClass::Personal => {
                            fill_first_wins_opt(&mut person.personal_email, &email);
                        }
                        EmailClass::Business => {
                            fill_first_wins_opt(&mut person.business_email, &email);
                        }
                    },
                    EmailSource::VerifiedBusiness => {
                        if classify_email_domain(&email) == EmailClass::Business {
                            fill_first_wins_opt(&mut person.business_email, &email);
                        }
                    }
                    EmailSource::CollectOnly => {}
                }
            }
        }
    }
}
