use serde::Serialize;

use crate::constants::PERSONAL_EMAIL_DOMAINS;

const MIN_EMAIL_CHARS: usize = 6;

/// Whether an address belongs to a consumer mail provider or an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmailClass {
    Personal,
    Business,
}

/// Lowercase and trim an email, accepting it only when it looks plausible.
///
/// Plausible means it contains both `@` and `.` and is longer than five
/// characters. There is no domain or MX validation.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return None;
    }

    if email.contains('@') && email.contains('.') && email.chars().count() >= MIN_EMAIL_CHARS {
        Some(email)
    } else {
        None
    }
}

/// Classify an address by substring match against well-known consumer domains
pub fn classify_email_domain(email: &str) -> EmailClass {
    let email_lower = email.to_lowercase();
    if PERSONAL_EMAIL_DOMAINS
        .iter()
        .any(|domain| email_lower.contains(domain))
    {
        EmailClass::Personal
    } else {
        EmailClass::Business
    }
}
