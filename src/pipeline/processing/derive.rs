use serde::Serialize;
use std::fmt;

/// Coarse interest classification from how often a person shows up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum InterestLevel {
    NotInterested,
    Medium,
    HighlyInterested,
}

impl InterestLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestLevel::NotInterested => "Not Interested",
            InterestLevel::Medium => "Medium",
            InterestLevel::HighlyInterested => "Highly Interested",
        }
    }
}

impl fmt::Display for InterestLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Step function over the number of rows merged into one person
pub fn interest_level(occurrences: usize) -> InterestLevel {
    match occurrences {
        n if n > 4 => InterestLevel::HighlyInterested,
        2..=4 => InterestLevel::Medium,
        _ => InterestLevel::NotInterested,
    }
}

/// Estimated engagement in seconds for a number of timestamped events.
///
/// Each bucket is roughly the midpoint of the range it stands for.
pub fn estimated_engagement_seconds(events: usize) -> Option<u64> {
    match events {
        0 => None,
        1 => Some(30),
        2 => Some(60),
        3..=5 => Some(180),
        6..=10 => Some(390),
        _ => Some(750),
    }
}

/// Human-readable engagement estimate; empty when there were no events
pub fn estimated_engagement(events: usize) -> String {
    estimated_engagement_seconds(events)
        .map(format_duration)
        .unwrap_or_default()
}

fn unit(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

/// Render seconds as `N seconds`, `M minutes S seconds` or `H hours M minutes`,
/// omitting a zero remainder
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return unit(seconds, "second");
    }

    if seconds < 3600 {
        let (minutes, rest) = (seconds / 60, seconds % 60);
        return if rest == 0 {
            unit(minutes, "minute")
        } else {
            format!("{} {}", unit(minutes, "minute"), unit(rest, "second"))
        };
    }

    let (hours, minutes) = (seconds / 3600, (seconds % 3600) / 60);
    if minutes == 0 {
        unit(hours, "hour")
    } else {
        format!("{} {}", unit(hours, "hour"), unit(minutes, "minute"))
    }
}
