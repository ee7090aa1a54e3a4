//! Field normalizers: pure functions from raw cell text to validated values.
//!
//! None of these fail loudly. A value that cannot be cleaned comes back as
//! `None` and the caller drops it.

pub mod email;
pub mod phone;
pub mod text;
pub mod timestamp;

pub use email::{classify_email_domain, normalize_email, EmailClass};
pub use phone::normalize_phone;
pub use text::{clean_flag, clean_text};
pub use timestamp::{extract_date, parse_timestamp};
