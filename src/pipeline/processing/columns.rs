use serde::Serialize;
use std::fmt;

use crate::config::ColumnsConfig;

/// Source category of a phone column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PhoneCategory {
    Direct,
    Mobile,
    Personal,
    /// Any other phone-like column, labelled by its column name
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarField {
    Timestamp,
    Address,
    City,
    State,
    Zip,
    ProfileUrl,
}

/// What the aggregator does with a column, decided from its name alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldRole {
    FirstName,
    LastName,
    /// Typed first-wins column
    Scalar(ScalarField),
    /// Never aggregated or emitted (hash digests, internal markers)
    Skipped,
    /// Do-not-contact flags for the named sibling phone column
    PhoneDnc { phone_column: Option<String> },
    BusinessEmail,
    VerifiedBusinessEmail,
    /// Verified non-business addresses; gathered by collect-all only
    VerifiedEmail,
    MixedEmail,
    Phone(PhoneCategory),
    Other,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRole::FirstName => write!(f, "identity (first name)"),
            FieldRole::LastName => write!(f, "identity (last name)"),
            FieldRole::Scalar(field) => write!(f, "first-wins {:?}", field),
            FieldRole::Skipped => write!(f, "skipped"),
            FieldRole::PhoneDnc { phone_column: Some(phone) } => write!(f, "DNC flags for {}", phone),
            FieldRole::PhoneDnc { phone_column: None } => write!(f, "DNC flags (unpaired)"),
            FieldRole::BusinessEmail => write!(f, "business email"),
            FieldRole::VerifiedBusinessEmail => write!(f, "verified business email"),
            FieldRole::VerifiedEmail => write!(f, "verified email (collect-all only)"),
            FieldRole::MixedEmail => write!(f, "email (classified by domain)"),
            FieldRole::Phone(category) => write!(f, "phone ({:?})", category),
            FieldRole::Other => write!(f, "other"),
        }
    }
}

/// Classify a header name into its aggregation role.
///
/// Configured column names win over marker heuristics; skip markers win over
/// everything except identity and configured scalar columns.
pub fn classify_column(name: &str, columns: &ColumnsConfig) -> FieldRole {
    let trimmed = name.trim();
    let upper = trimmed.to_uppercase();
    let is = |configured: &str| trimmed.eq_ignore_ascii_case(configured.trim());

    if is(&columns.first_name) {
        return FieldRole::FirstName;
    }
    if is(&columns.last_name) {
        return FieldRole::LastName;
    }

    let scalars = [
        (&columns.timestamp, ScalarField::Timestamp),
        (&columns.address, ScalarField::Address),
        (&columns.city, ScalarField::City),
        (&columns.state, ScalarField::State),
        (&columns.zip, ScalarField::Zip),
        (&columns.profile_url, ScalarField::ProfileUrl),
    ];
    if let Some((_, field)) = scalars.iter().find(|(configured, _)| is(configured.as_str())) {
        return FieldRole::Scalar(*field);
    }

    if columns
        .skip_markers
        .iter()
        .any(|marker| !marker.is_empty() && upper.contains(&marker.to_uppercase()))
    {
        return FieldRole::Skipped;
    }

    let dnc_suffix = columns.dnc_suffix.to_uppercase();
    if upper == dnc_suffix.trim_start_matches('_') {
        return FieldRole::PhoneDnc { phone_column: None };
    }
    if upper.ends_with(&dnc_suffix) {
        let phone_column = trimmed
            .get(..trimmed.len() - dnc_suffix.len())
            .map(str::to_string)
            .filter(|p| !p.is_empty());
        return FieldRole::PhoneDnc { phone_column };
    }

    if upper.contains(&columns.email_marker.to_uppercase()) {
        return if upper.contains("BUSINESS") && upper.contains("VERIFIED") {
            FieldRole::VerifiedBusinessEmail
        } else if upper.contains("BUSINESS") {
            FieldRole::BusinessEmail
        } else if upper.contains("VERIFIED") {
            FieldRole::VerifiedEmail
        } else {
            FieldRole::MixedEmail
        };
    }

    if columns
        .phone_markers
        .iter()
        .any(|marker| !marker.is_empty() && upper.contains(&marker.to_uppercase()))
    {
        return FieldRole::Phone(phone_category(trimmed, &upper));
    }

    FieldRole::Other
}

fn phone_category(name: &str, upper: &str) -> PhoneCategory {
    if upper.contains("DIRECT") {
        PhoneCategory::Direct
    } else if upper.contains("MOBILE") || upper.contains("CELL") {
        PhoneCategory::Mobile
    } else if upper.contains("PERSONAL") {
        PhoneCategory::Personal
    } else {
        PhoneCategory::Other(name.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub index: usize,
    pub name: String,
    pub role: FieldRole,
}

/// A phone column together with its sibling DNC column, if the header has one
#[derive(Debug, Clone)]
pub struct PhoneColumn {
    pub index: usize,
    pub name: String,
    pub category: PhoneCategory,
    pub dnc_index: Option<usize>,
}

/// Column roles resolved once per input header
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub columns: Vec<ColumnSpec>,
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
    pub scalars: Vec<(usize, ScalarField)>,
    pub phones: Vec<PhoneColumn>,
    pub business_emails: Vec<usize>,
    pub mixed_emails: Vec<usize>,
    pub verified_business_emails: Vec<usize>,
    pub verified_emails: Vec<usize>,
}

impl ColumnLayout {
    pub fn from_headers(headers: &[String], config: &ColumnsConfig) -> Self {
        let columns: Vec<ColumnSpec> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnSpec {
                index,
                name: name.trim().to_string(),
                role: classify_column(name, config),
            })
            .collect();

        let find_first = |wanted: &FieldRole| {
            columns.iter().find(|c| &c.role == wanted).map(|c| c.index)
        };
        let indices_of = |wanted: &FieldRole| {
            columns
                .iter()
                .filter(|c| &c.role == wanted)
                .map(|c| c.index)
                .collect::<Vec<_>>()
        };

        let scalars = columns
            .iter()
            .filter_map(|c| match c.role {
                FieldRole::Scalar(field) => Some((c.index, field)),
                _ => None,
            })
            .collect();

        let phones = columns
            .iter()
            .filter_map(|c| match &c.role {
                FieldRole::Phone(category) => Some(PhoneColumn {
                    index: c.index,
                    name: c.name.clone(),
                    category: category.clone(),
                    dnc_index: columns.iter().find_map(|d| match &d.role {
                        FieldRole::PhoneDnc { phone_column: Some(phone) }
                            if phone.eq_ignore_ascii_case(&c.name) =>
                        {
                            Some(d.index)
                        }
                        _ => None,
                    }),
                }),
                _ => None,
            })
            .collect();

        Self {
            first_name: find_first(&FieldRole::FirstName),
            last_name: find_first(&FieldRole::LastName),
            scalars,
            phones,
            business_emails: indices_of(&FieldRole::BusinessEmail),
            mixed_emails: indices_of(&FieldRole::MixedEmail),
            verified_business_emails: indices_of(&FieldRole::VerifiedBusinessEmail),
            verified_emails: indices_of(&FieldRole::VerifiedEmail),
            columns,
        }
    }

    pub fn has_identity_columns(&self) -> bool {
        self.first_name.is_some() && self.last_name.is_some()
    }

    /// Distinct phone categories in header order
    pub fn phone_categories(&self) -> Vec<PhoneCategory> {
        let mut categories: Vec<PhoneCategory> = Vec::new();
        for phone in &self.phones {
            if !categories.contains(&phone.category) {
                categories.push(phone.category.clone());
            }
        }
        categories
    }

    /// Columns eligible for the "other" bag: typed scalars and unclassified columns
    pub fn other_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| matches!(c.role, FieldRole::Scalar(_) | FieldRole::Other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str) -> FieldRole {
        classify_column(name, &ColumnsConfig::default())
    }

    #[test]
    fn test_classification_table() {
        let cases = vec![
            ("FIRST_NAME", FieldRole::FirstName),
            ("first_name", FieldRole::FirstName),
            (" LAST_NAME ", FieldRole::LastName),
            ("ActivityStartDate", FieldRole::Scalar(ScalarField::Timestamp)),
            ("PERSONAL_ADDRESS", FieldRole::Scalar(ScalarField::Address)),
            ("PERSONAL_CITY", FieldRole::Scalar(ScalarField::City)),
            ("PERSONAL_STATE", FieldRole::Scalar(ScalarField::State)),
            ("PERSONAL_ZIP", FieldRole::Scalar(ScalarField::Zip)),
            ("LINKEDIN_URL", FieldRole::Scalar(ScalarField::ProfileUrl)),
            ("DIRECT_NUMBER", FieldRole::Phone(PhoneCategory::Direct)),
            ("MOBILE_PHONE", FieldRole::Phone(PhoneCategory::Mobile)),
            ("PERSONAL_PHONE", FieldRole::Phone(PhoneCategory::Personal)),
            ("CELL_PHONE", FieldRole::Phone(PhoneCategory::Mobile)),
            (
                "COMPANY_PHONE",
                FieldRole::Phone(PhoneCategory::Other("COMPANY_PHONE".to_string())),
            ),
            (
                "DIRECT_NUMBER_DNC",
                FieldRole::PhoneDnc { phone_column: Some("DIRECT_NUMBER".to_string()) },
            ),
            (
                "MOBILE_PHONE_DNC",
                FieldRole::PhoneDnc { phone_column: Some("MOBILE_PHONE".to_string()) },
            ),
            ("DNC", FieldRole::PhoneDnc { phone_column: None }),
            ("BUSINESS_EMAIL", FieldRole::BusinessEmail),
            ("BUSINESS_VERIFIED_EMAILS", FieldRole::VerifiedBusinessEmail),
            ("PERSONAL_VERIFIED_EMAILS", FieldRole::VerifiedEmail),
            ("PERSONAL_EMAILS", FieldRole::MixedEmail),
            ("EMAIL", FieldRole::MixedEmail),
            ("SHA256_PERSONAL_EMAIL", FieldRole::Skipped),
            ("EMAIL_HASH", FieldRole::Skipped),
            ("FILE_TYPE", FieldRole::Skipped),
            ("JOB_TITLE", FieldRole::Other),
            ("COMPANY_NAME", FieldRole::Other),
        ];

        for (name, expected) in cases {
            assert_eq!(classify(name), expected, "column {}", name);
        }
    }

    #[test]
    fn test_classification_follows_configured_names() {
        let config = ColumnsConfig {
            first_name: "GIVEN".to_string(),
            last_name: "SURNAME".to_string(),
            ..ColumnsConfig::default()
        };
        assert_eq!(classify_column("given", &config), FieldRole::FirstName);
        assert_eq!(classify_column("SURNAME", &config), FieldRole::LastName);
        assert_eq!(classify_column("FIRST_NAME", &config), FieldRole::Other);
    }

    #[test]
    fn test_layout_pairs_phone_with_dnc_sibling() {
        let headers: Vec<String> = [
            "FIRST_NAME",
            "LAST_NAME",
            "DIRECT_NUMBER",
            "MOBILE_PHONE",
            "direct_number_dnc",
            "PERSONAL_EMAILS",
            "BUSINESS_EMAIL",
            "SHA256_EMAIL",
            "JOB_TITLE",
            "PERSONAL_VERIFIED_EMAILS",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let layout = ColumnLayout::from_headers(&headers, &ColumnsConfig::default());

        assert!(layout.has_identity_columns());
        assert_eq!(layout.first_name, Some(0));
        assert_eq!(layout.last_name, Some(1));
        assert_eq!(layout.phones.len(), 2);
        assert_eq!(layout.phones[0].dnc_index, Some(4));
        assert_eq!(layout.phones[1].dnc_index, None);
        assert_eq!(layout.business_emails, vec![6]);
        assert_eq!(layout.mixed_emails, vec![5]);
        assert!(layout.verified_business_emails.is_empty());
        assert_eq!(layout.verified_emails, vec![9]);
        assert_eq!(
            layout.phone_categories(),
            vec![PhoneCategory::Direct, PhoneCategory::Mobile]
        );

        let others: Vec<&str> = layout.other_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(others, vec!["JOB_TITLE"]);
    }

    #[test]
    fn test_layout_without_identity_columns() {
        let headers = vec!["NAME".to_string(), "PHONE".to_string()];
        let layout = ColumnLayout::from_headers(&headers, &ColumnsConfig::default());
        assert!(!layout.has_identity_columns());
    }
}
