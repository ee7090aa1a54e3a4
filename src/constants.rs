//! Column names, markers and output headers for the pixel export format.
//! The input column defaults can be overridden in `config.toml`.

// Identity columns
pub const FIRST_NAME_COLUMN: &str = "FIRST_NAME";
pub const LAST_NAME_COLUMN: &str = "LAST_NAME";

// First-wins scalar columns
pub const TIMESTAMP_COLUMN: &str = "ActivityStartDate";
pub const ADDRESS_COLUMN: &str = "PERSONAL_ADDRESS";
pub const CITY_COLUMN: &str = "PERSONAL_CITY";
pub const STATE_COLUMN: &str = "PERSONAL_STATE";
pub const ZIP_COLUMN: &str = "PERSONAL_ZIP";
pub const PROFILE_URL_COLUMN: &str = "LINKEDIN_URL";

// Column name markers used by the classifier
pub const PHONE_MARKERS: &[&str] = &["PHONE", "DIRECT_NUMBER", "MOBILE"];
pub const EMAIL_MARKER: &str = "EMAIL";
pub const DNC_SUFFIX: &str = "_DNC";
pub const SKIP_MARKERS: &[&str] = &["SHA256", "MD5", "HASH", "FILE_TYPE"];

/// Tokens that exports use in place of an empty cell
pub const NULL_SENTINELS: &[&str] = &["null", "undefined", "nan"];

/// Consumer mail providers; anything else is treated as a business address
pub const PERSONAL_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "msn.com",
    "live.com",
    "protonmail.com",
    "mail.com",
    "zoho.com",
];

pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

// Wide schema
pub const MAX_WIDE_EMAILS: usize = 5;
pub const WIDE_EMAIL_PREFIX: &str = "EMAIL_";
pub const WIDE_PHONE_PREFIX: &str = "PHONE_";
pub const WIDE_DNC_COLUMN: &str = "DNC";

// Narrow schema headers
pub const HEADER_DATE: &str = "Date";
pub const HEADER_FIRST_NAME: &str = "First Name";
pub const HEADER_LAST_NAME: &str = "Last Name";
pub const HEADER_ADDRESS: &str = "Address";
pub const HEADER_CITY: &str = "City";
pub const HEADER_STATE: &str = "State";
pub const HEADER_ZIP: &str = "Zip";
pub const HEADER_DIRECT_PHONE: &str = "Direct Phone";
pub const HEADER_DIRECT_PHONE_DNC: &str = "Direct Phone DNC";
pub const HEADER_MOBILE_PHONE: &str = "Mobile Phone";
pub const HEADER_PERSONAL_PHONE: &str = "Personal Phone";
pub const HEADER_PERSONAL_EMAIL: &str = "Personal Email";
pub const HEADER_BUSINESS_EMAIL: &str = "Business Email";
pub const HEADER_PROFILE_URL: &str = "Profile URL";
pub const HEADER_INTEREST_LEVEL: &str = "Interest Level";
pub const HEADER_ESTIMATED_TIME: &str = "Estimated Time";

/// Returns true when `value` is one of the null sentinel tokens (case-insensitive)
pub fn is_null_sentinel(value: &str) -> bool {
    NULL_SENTINELS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}
