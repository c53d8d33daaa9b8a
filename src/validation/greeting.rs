//! Time-of-day greeting check.
//!
//! The greeting must name the period the message was sent in, evaluated in
//! a fixed timezone, and must be written exactly as
//! "Good <Period> Respected Seniors".

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use regex::Regex;

use super::types::{GreetingReport, SentenceSlot, TimeOfDay, ValidationError};

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)good (morning|afternoon|evening) respected seniors")
        .expect("greeting regex is valid")
});

pub struct GreetingChecker {
    offset: FixedOffset,
}

impl GreetingChecker {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Period of `now` in the checker's timezone.
    pub fn time_of_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeOfDay {
        TimeOfDay::from_hour(now.with_timezone(&self.offset).hour())
    }

    pub fn validate_greeting<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> GreetingReport {
        let current = self.time_of_day(now);
        let first_sentence = text.split('.').next().unwrap_or_default().trim();

        let Some(captures) = GREETING.captures(first_sentence) else {
            return GreetingReport {
                is_valid: false,
                errors: vec![ValidationError::new(
                    SentenceSlot::Greeting,
                    "Message must start with \"Good Morning/Afternoon/Evening Respected Seniors.\"",
                )],
                current_time_of_day: current,
                greeting_time: None,
            };
        };

        let mut errors = Vec::new();
        let matched = captures.get(0).map_or("", |m| m.as_str());
        let greeting_time = captures.get(1).and_then(|m| TimeOfDay::parse_word(m.as_str()));

        if greeting_time != Some(current) {
            errors.push(ValidationError::new(
                SentenceSlot::Greeting,
                format!(
                    "Greeting should be \"Good {}\" based on current time",
                    current.as_word()
                ),
            ));
        }

        let exact = greeting_time.map(TimeOfDay::expected_greeting);
        if exact.as_deref() != Some(matched) {
            errors.push(ValidationError::new(
                SentenceSlot::Greeting,
                "Greeting must be exactly \"Good Morning/Afternoon/Evening Respected Seniors.\" with proper capitalization",
            ));
        }

        GreetingReport {
            is_valid: errors.is_empty(),
            errors,
            current_time_of_day: current,
            greeting_time,
        }
    }
}
