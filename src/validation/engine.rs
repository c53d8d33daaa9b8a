//! Introduction validation entry point.
//!
//! Runs the greeting check and the structural check against the same
//! message and merges their errors, greeting errors first. Neither check
//! can stop the other from running.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;
use tracing::debug;

use super::greeting::GreetingChecker;
use super::structure::StructuralValidator;
use super::taxonomy::Taxonomy;
use super::types::{FormatReport, GreetingReport, TimeOfDay, ValidationResult};
use crate::config::ValidatorConfig;
use crate::error::ConfigError;

/// Verdict together with both sub-reports.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedValidation {
    pub result: ValidationResult,
    pub greeting: GreetingReport,
    pub format: FormatReport,
}

/// Stateless validator; safe to share across tasks behind an `Arc`.
pub struct IntroductionValidator {
    greeting: GreetingChecker,
    structure: StructuralValidator,
    offset: FixedOffset,
}

impl IntroductionValidator {
    pub fn new(taxonomy: Arc<Taxonomy>, offset: FixedOffset) -> Self {
        Self {
            greeting: GreetingChecker::new(offset),
            structure: StructuralValidator::new(taxonomy),
            offset,
        }
    }

    /// Build from configuration, loading the taxonomy file if one is set.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => Taxonomy::from_json_file(path)?,
            None => Taxonomy::default(),
        };
        Ok(Self::new(Arc::new(taxonomy), config.utc_offset()?))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn structure(&self) -> &StructuralValidator {
        &self.structure
    }

    /// Period of `now` in the validator's timezone.
    pub fn time_of_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeOfDay {
        self.greeting.time_of_day(now)
    }

    pub fn validate<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> ValidationResult {
        self.validate_detailed(text, now).result
    }

    pub fn validate_detailed<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> DetailedValidation {
        let greeting = self.greeting.validate_greeting(text, now);
        let format = self.structure.validate_format(text);

        let errors = greeting
            .errors
            .iter()
            .chain(format.errors.iter())
            .cloned()
            .collect();
        let result = ValidationResult::from_errors(errors);

        debug!(
            is_valid = result.is_valid,
            errors = result.errors.len(),
            time_of_day = %greeting.current_time_of_day,
            "Validated introduction"
        );

        DetailedValidation {
            result,
            greeting,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::types::SentenceSlot;

    const VALID: &str = "Good Morning Respected Seniors. My name is John Doe. I am from Mumbai, Maharashtra. I am pursuing Bachelor of Technology in Computer Science Engineering. My hobby is painting.";

    fn validator() -> IntroductionValidator {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        IntroductionValidator::new(Arc::new(Taxonomy::default()), ist)
    }

    fn local(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 6, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn greeting_errors_come_first() {
        let text = VALID.replace("painting", "coding");
        let result = validator().validate(&text, &local(19));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].slot, Some(SentenceSlot::Greeting));
        assert_eq!(result.errors.last().unwrap().slot, Some(SentenceSlot::Hobby));
    }

    #[test]
    fn detailed_reports_carry_both_checks() {
        let detailed = validator().validate_detailed(VALID, &local(9));
        assert!(detailed.result.is_valid);
        assert!(detailed.greeting.is_valid);
        assert!(detailed.format.is_valid);
        assert_eq!(detailed.greeting.current_time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn from_config_rejects_out_of_range_offset() {
        let config = ValidatorConfig {
            utc_offset_minutes: 24 * 60,
            taxonomy_path: None,
        };
        assert!(IntroductionValidator::from_config(&config).is_err());
    }

    #[test]
    fn from_config_loads_taxonomy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.json");
        std::fs::write(&path, r#"{"valid_hobbies": ["kite making"], "career_roots": ["kite"]}"#).unwrap();
        let config = ValidatorConfig {
            utc_offset_minutes: 330,
            taxonomy_path: Some(path),
        };
        let validator = IntroductionValidator::from_config(&config).unwrap();
        let text = VALID.replace("painting", "kite making");
        assert!(validator.validate(&text, &local(9)).is_valid);
        assert!(!validator.validate(VALID, &local(9)).is_valid);
    }
}
