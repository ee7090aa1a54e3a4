use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{ColumnsConfig, Config};
use crate::constants;
use crate::error::{CleanerError, Result};

/// Output schema variant. Each variant implies a default merge policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Narrow person profile: one phone per category, one email per class
    Profile,
    /// Profile plus DNC, profile URL, interest level and estimated time
    Engagement,
    /// Every phone and email in numbered columns plus all other columns
    Wide,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Profile => "profile",
            SchemaVariant::Engagement => "engagement",
            SchemaVariant::Wide => "wide",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "profile" => Ok(SchemaVariant::Profile),
            "engagement" => Ok(SchemaVariant::Engagement),
            "wide" => Ok(SchemaVariant::Wide),
            other => Err(CleanerError::Config(format!(
                "unknown variant '{}' (expected profile, engagement or wide)",
                other
            ))),
        }
    }
}

/// How phone candidates from a row are taken into a category sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhoneSelection {
    /// Only the first normalizable candidate of each phone cell
    FirstPerRow,
    /// Every normalizable candidate not already seen for the person
    CollectAll,
}

/// How emails are retained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmailSelection {
    /// First personal and first business email only
    FirstPerClass,
    /// Class slots plus an ordered list of every distinct valid email
    CollectAll,
}

/// Per-field merge policy applied by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergePolicy {
    pub phones: PhoneSelection,
    pub emails: EmailSelection,
    /// Keep first-seen values of unclassified columns
    pub capture_other: bool,
    /// Keep parsed activity timestamps for engagement estimation
    pub collect_timestamps: bool,
}

impl MergePolicy {
    pub fn for_variant(variant: SchemaVariant) -> Self {
        match variant {
            SchemaVariant::Profile => Self {
                phones: PhoneSelection::FirstPerRow,
                emails: EmailSelection::FirstPerClass,
                capture_other: false,
                collect_timestamps: false,
            },
            SchemaVariant::Engagement => Self {
                phones: PhoneSelection::CollectAll,
                emails: EmailSelection::FirstPerClass,
                capture_other: false,
                collect_timestamps: true,
            },
            SchemaVariant::Wide => Self {
                phones: PhoneSelection::CollectAll,
                emails: EmailSelection::CollectAll,
                capture_other: true,
                collect_timestamps: false,
            },
        }
    }
}

/// Everything one aggregation run needs to know
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub variant: SchemaVariant,
    pub policy: MergePolicy,
    pub columns: ColumnsConfig,
    pub progress_interval: usize,
}

impl PipelineConfig {
    /// Default column conventions with the variant's default policy
    pub fn for_variant(variant: SchemaVariant) -> Self {
        Self {
            variant,
            policy: MergePolicy::for_variant(variant),
            columns: ColumnsConfig::default(),
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            variant: config.variant,
            policy: MergePolicy::for_variant(config.variant),
            columns: config.columns.clone(),
            progress_interval: config.progress_interval,
        }
    }

    /// Reject policies the variant's output schema cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(CleanerError::Config(
                "progress_interval must be greater than zero".to_string(),
            ));
        }
        self.columns.validate()?;

        match self.variant {
            SchemaVariant::Wide => {
                if self.policy.phones != PhoneSelection::CollectAll
                    || self.policy.emails != EmailSelection::CollectAll
                {
                    return Err(CleanerError::Config(
                        "wide schema requires collect-all phones and emails".to_string(),
                    ));
                }
                if !self.policy.capture_other {
                    return Err(CleanerError::Config(
                        "wide schema requires other-column capture".to_string(),
                    ));
                }
            }
            SchemaVariant::Engagement => {
                if !self.policy.collect_timestamps {
                    return Err(CleanerError::Config(
                        "engagement schema requires timestamp collection".to_string(),
                    ));
                }
            }
            SchemaVariant::Profile => {}
        }

        Ok(())
    }
}
