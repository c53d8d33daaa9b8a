//! Shared types for introduction validation.

use std::fmt;

use serde::Serialize;

// ── Slots ───────────────────────────────────────────────────────────

/// One of the five fixed sentence positions of an introduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceSlot {
    Greeting,
    Name,
    Location,
    Education,
    Hobby,
}

impl SentenceSlot {
    /// All slots in message order.
    pub const ALL: [SentenceSlot; 5] = [
        SentenceSlot::Greeting,
        SentenceSlot::Name,
        SentenceSlot::Location,
        SentenceSlot::Education,
        SentenceSlot::Hobby,
    ];

    /// Zero-based position of the slot within the message.
    pub fn ordinal(self) -> usize {
        match self {
            SentenceSlot::Greeting => 0,
            SentenceSlot::Name => 1,
            SentenceSlot::Location => 2,
            SentenceSlot::Education => 3,
            SentenceSlot::Hobby => 4,
        }
    }
}

impl fmt::Display for SentenceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentenceSlot::Greeting => "greeting",
            SentenceSlot::Name => "name",
            SentenceSlot::Location => "location",
            SentenceSlot::Education => "education",
            SentenceSlot::Hobby => "hobby",
        };
        f.write_str(s)
    }
}

// ── Time of day ─────────────────────────────────────────────────────

/// Greeting period. Evening also covers the hours after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Partition of the 24-hour clock: [5,12) morning, [12,17) afternoon,
    /// everything else evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    /// Capitalized form as it appears in a greeting.
    pub fn as_word(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    /// Case-insensitive parse of a greeting word.
    pub fn parse_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            _ => None,
        }
    }

    /// The full greeting sentence expected for this period.
    pub fn expected_greeting(self) -> String {
        format!("Good {} Respected Seniors", self.as_word())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_word().to_lowercase())
    }
}

// ── Degree ──────────────────────────────────────────────────────────

/// Accepted degree programmes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    Bachelor,
    IntegratedMaster,
}

impl Degree {
    /// Exact, case-sensitive parse of the degree literal.
    pub fn parse(literal: &str) -> Option<Self> {
        match literal {
            "Bachelor" => Some(Degree::Bachelor),
            "Integrated Master" => Some(Degree::IntegratedMaster),
            _ => None,
        }
    }
}

// ── Extracted fields ────────────────────────────────────────────────

/// A value pulled out of a sentence by its slot pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum ExtractedField {
    Greeting { time_of_day: TimeOfDay },
    Name { name: String },
    Location { city: String, state: String },
    Education { degree: Degree, branch: String },
    Hobby { hobby: String },
}

// ── Errors and verdicts ─────────────────────────────────────────────

/// A single human-readable rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Slot the violation belongs to; `None` for whole-message problems.
    pub slot: Option<SentenceSlot>,
    pub message: String,
}

impl ValidationError {
    pub fn new(slot: SentenceSlot, message: impl Into<String>) -> Self {
        Self {
            slot: Some(slot),
            message: message.into(),
        }
    }

    /// An error not tied to a particular slot.
    pub fn message_level(message: impl Into<String>) -> Self {
        Self {
            slot: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Final verdict for an introduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Build a verdict; validity is derived from the error list.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Error messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

/// Outcome of a word-level check (capitalization, hobby).
///
/// Checkers don't know which slot they are validating, so they return plain
/// messages and the structural validator tags them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl CheckOutcome {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Per-slot result of structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub slot: SentenceSlot,
    /// The trimmed sentence that filled the slot (empty when missing).
    pub sentence: String,
    pub extracted: Option<ExtractedField>,
    pub errors: Vec<ValidationError>,
}

impl SlotReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    /// One report per slot, in slot order.
    pub slots: Vec<SlotReport>,
}

impl FormatReport {
    pub fn slot(&self, slot: SentenceSlot) -> Option<&SlotReport> {
        self.slots.iter().find(|r| r.slot == slot)
    }
}

/// Result of the time-of-day greeting check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub current_time_of_day: TimeOfDay,
    /// Period named by the greeting, if one was found.
    pub greeting_time: Option<TimeOfDay>,
}

/// Diagnostic breakdown of the hobby checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HobbyDetails {
    pub is_listed: bool,
    pub can_be_career: bool,
    pub can_be_done_alone: bool,
    pub is_forbidden: bool,
    pub contains_forbidden_keyword: bool,
    pub has_multiple_hobbies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_partition_is_exhaustive() {
        for hour in 0..24 {
            let expected = if (5..12).contains(&hour) {
                TimeOfDay::Morning
            } else if (12..17).contains(&hour) {
                TimeOfDay::Afternoon
            } else {
                TimeOfDay::Evening
            };
            assert_eq!(TimeOfDay::from_hour(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn time_of_day_word_roundtrip() {
        assert_eq!(TimeOfDay::parse_word("AFTERNOON"), Some(TimeOfDay::Afternoon));
        assert_eq!(TimeOfDay::parse_word("night"), None);
        assert_eq!(
            TimeOfDay::Evening.expected_greeting(),
            "Good Evening Respected Seniors"
        );
        assert_eq!(TimeOfDay::Morning.to_string(), "morning");
    }

    #[test]
    fn degree_literal_is_case_sensitive() {
        assert_eq!(Degree::parse("Bachelor"), Some(Degree::Bachelor));
        assert_eq!(Degree::parse("Integrated Master"), Some(Degree::IntegratedMaster));
        assert_eq!(Degree::parse("bachelor"), None);
        assert_eq!(Degree::parse("Master"), None);
    }

    #[test]
    fn verdict_validity_tracks_errors() {
        assert!(ValidationResult::from_errors(vec![]).is_valid);
        let result = ValidationResult::from_errors(vec![ValidationError::message_level("x")]);
        assert!(!result.is_valid);
        assert_eq!(result.messages(), vec!["x"]);
    }

    #[test]
    fn slot_ordinals_follow_message_order() {
        for (i, slot) in SentenceSlot::ALL.iter().enumerate() {
            assert_eq!(slot.ordinal(), i);
        }
    }
}
