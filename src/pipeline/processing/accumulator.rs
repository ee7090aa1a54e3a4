use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::columns::PhoneCategory;
use super::identity::IdentityKey;

/// A validated phone number and the DNC flag seen alongside it the first time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneEntry {
    pub number: String,
    pub dnc: Option<String>,
}

/// Ordered, duplicate-free phones of one source category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSequence {
    pub category: PhoneCategory,
    pub entries: Vec<PhoneEntry>,
}

impl PhoneSequence {
    pub fn new(category: PhoneCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    pub fn contains(&self, number: &str) -> bool {
        self.entries.iter().any(|e| e.number == number)
    }

    /// Append unless the number is already present. An existing entry keeps
    /// its original DNC flag.
    pub fn push_if_new(&mut self, entry: PhoneEntry) -> bool {
        if self.contains(&entry.number) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn first(&self) -> Option<&PhoneEntry> {
        self.entries.first()
    }
}

/// Everything collected for one identity over the whole run
#[derive(Debug, Clone)]
pub struct PersonAccumulator {
    pub key: IdentityKey,

    // First-wins scalars
    pub first_name: String,
    pub last_name: String,
    pub date: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub profile_url: String,

    // Accumulating fields
    pub phones: Vec<PhoneSequence>,
    pub personal_email: Option<String>,
    pub business_email: Option<String>,
    pub emails: Vec<String>,

    // Provenance
    pub occurrences: usize,
    pub timestamps: Vec<NaiveDateTime>,
    pub other: BTreeMap<String, String>,
}

impl PersonAccumulator {
    /// Empty accumulator with one phone sequence per category, in header order
    pub fn new(key: IdentityKey, categories: &[PhoneCategory]) -> Self {
        Self {
            key,
            first_name: String::new(),
            last_name: String::new(),
            date: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            profile_url: String::new(),
            phones: categories.iter().cloned().map(PhoneSequence::new).collect(),
            personal_email: None,
            business_email: None,
            emails: Vec::new(),
            occurrences: 0,
            timestamps: Vec::new(),
            other: BTreeMap::new(),
        }
    }

    pub fn phones_in(&self, category: &PhoneCategory) -> &[PhoneEntry] {
        self.phones
            .iter()
            .find(|seq| &seq.category == category)
            .map(|seq| seq.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Record a phone under its category; false when it was already known
    pub fn record_phone(&mut self, category: &PhoneCategory, entry: PhoneEntry) -> bool {
        match self.phones.iter_mut().find(|seq| &seq.category == category) {
            Some(seq) => seq.push_if_new(entry),
            None => {
                let mut seq = PhoneSequence::new(category.clone());
                seq.push_if_new(entry);
                self.phones.push(seq);
                true
            }
        }
    }

    /// Every phone across categories, in category order, first occurrence of
    /// each number only
    pub fn distinct_phones(&self) -> Vec<&PhoneEntry> {
        let mut seen: Vec<&PhoneEntry> = Vec::new();
        for entry in self.phones.iter().flat_map(|seq| seq.entries.iter()) {
            if !seen.iter().any(|e| e.number == entry.number) {
                seen.push(entry);
            }
        }
        seen
    }

    pub fn record_email(&mut self, email: &str) {
        if !self.emails.iter().any(|e| e == email) {
            self.emails.push(email.to_string());
        }
    }

    pub fn record_other(&mut self, column: &str, value: String) {
        self.other.entry(column.to_string()).or_insert(value);
    }
}

/// Set `slot` from `value` only while it is still empty
pub fn fill_first_wins(slot: &mut String, value: String) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value;
    }
}

/// Set an optional slot only while it is still empty
pub fn fill_first_wins_opt(slot: &mut Option<String>, value: &str) -> bool {
    if slot.is_none() {
        *slot = Some(value.to_string());
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> IdentityKey {
        IdentityKey::from_names("Ada", "Lovelace").unwrap()
    }

    fn entry(number: &str, dnc: Option<&str>) -> PhoneEntry {
        PhoneEntry {
            number: number.to_string(),
            dnc: dnc.map(str::to_string),
        }
    }

    #[test]
    fn test_new_accumulator_is_empty() {
        let person = PersonAccumulator::new(key(), &[PhoneCategory::Direct, PhoneCategory::Mobile]);
        assert_eq!(person.occurrences, 0);
        assert_eq!(person.phones.len(), 2);
        assert!(person.phones_in(&PhoneCategory::Direct).is_empty());
        assert!(person.personal_email.is_none());
        assert!(person.other.is_empty());
    }

    #[test]
    fn test_phone_sequence_never_repeats_and_keeps_first_flag() {
        let mut person = PersonAccumulator::new(key(), &[PhoneCategory::Direct]);
        assert!(person.record_phone(&PhoneCategory::Direct, entry("5551234567", None)));
        assert!(!person.record_phone(&PhoneCategory::Direct, entry("5551234567", Some("Y"))));
        assert!(person.record_phone(&PhoneCategory::Direct, entry("5559876543", Some("N"))));

        let direct = person.phones_in(&PhoneCategory::Direct);
        assert_eq!(direct.len(), 2);
        assert_eq!(direct[0].dnc, None);
        assert_eq!(direct[1].dnc.as_deref(), Some("N"));
    }

    #[test]
    fn test_unknown_category_gets_a_sequence() {
        let mut person = PersonAccumulator::new(key(), &[]);
        let other = PhoneCategory::Other("COMPANY_PHONE".to_string());
        assert!(person.record_phone(&other, entry("5551234567", None)));
        assert_eq!(person.phones_in(&other).len(), 1);
    }

    #[test]
    fn test_distinct_phones_across_categories() {
        let mut person =
            PersonAccumulator::new(key(), &[PhoneCategory::Direct, PhoneCategory::Mobile]);
        person.record_phone(&PhoneCategory::Direct, entry("5551234567", None));
        person.record_phone(&PhoneCategory::Mobile, entry("5551234567", None));
        person.record_phone(&PhoneCategory::Mobile, entry("5550000000", None));

        let numbers: Vec<&str> = person.distinct_phones().iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["5551234567", "5550000000"]);
    }

    #[test]
    fn test_first_wins_helpers() {
        let mut slot = String::new();
        fill_first_wins(&mut slot, String::new());
        assert!(slot.is_empty());
        fill_first_wins(&mut slot, "first".to_string());
        fill_first_wins(&mut slot, "second".to_string());
        assert_eq!(slot, "first");

        let mut opt = None;
        assert!(fill_first_wins_opt(&mut opt, "a@b.com"));
        assert!(!fill_first_wins_opt(&mut opt, "c@d.com"));
        assert_eq!(opt.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_other_bag_is_first_wins() {
        let mut person = PersonAccumulator::new(key(), &[]);
        person.record_other("JOB_TITLE", "Engineer".to_string());
        person.record_other("JOB_TITLE", "Manager".to_string());
        assert_eq!(person.other.get("JOB_TITLE").map(String::as_str), Some("Engineer"));
    }
}
