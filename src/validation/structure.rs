//! Five-sentence structural validation.
//!
//! The message is split on '.', trimmed, and empty pieces dropped. Every slot
//! is checked even when the sentence count is wrong; missing slots are
//! validated as empty sentences so their pattern errors still surface.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::capitalization::CapitalizationChecker;
use super::hobby::HobbyClassifier;
use super::taxonomy::Taxonomy;
use super::types::{
    CheckOutcome, Degree, ExtractedField, FormatReport, SentenceSlot, SlotReport, TimeOfDay,
    ValidationError,
};

const EXPECTED_SENTENCES: usize = 5;

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Good (Morning|Afternoon|Evening) Respected Seniors$").expect("valid regex")
});
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^My name is (.+)$").expect("valid regex"));
static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^I am from ([^,]+), (.+)$").expect("valid regex"));
static EDUCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^I am pursuing (Bachelor|Integrated Master) of Technology in (.+)$")
        .expect("valid regex")
});
static HOBBY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^My hobby is (.+)$").expect("valid regex"));

/// Split a message into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub struct StructuralValidator {
    taxonomy: Arc<Taxonomy>,
    capitalization: CapitalizationChecker,
    hobbies: HobbyClassifier,
}

impl StructuralValidator {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            capitalization: CapitalizationChecker::new(Arc::clone(&taxonomy)),
            hobbies: HobbyClassifier::new(Arc::clone(&taxonomy)),
            taxonomy,
        }
    }

    pub fn capitalization(&self) -> &CapitalizationChecker {
        &self.capitalization
    }

    pub fn hobbies(&self) -> &HobbyClassifier {
        &self.hobbies
    }

    pub fn validate_format(&self, text: &str) -> FormatReport {
        let sentences = split_sentences(text);
        let mut errors = Vec::new();

        if sentences.len() != EXPECTED_SENTENCES {
            errors.push(ValidationError::message_level(format!(
                "Introduction must contain exactly {EXPECTED_SENTENCES} sentences, found {}",
                sentences.len()
            )));
        }

        let slots: Vec<SlotReport> = SentenceSlot::ALL
            .iter()
            .map(|&slot| {
                let sentence = sentences.get(slot.ordinal()).copied().unwrap_or_default();
                self.validate_slot(slot, sentence)
            })
            .collect();

        errors.extend(slots.iter().flat_map(|r| r.errors.iter().cloned()));

        FormatReport {
            is_valid: errors.is_empty(),
            errors,
            slots,
        }
    }

    fn validate_slot(&self, slot: SentenceSlot, sentence: &str) -> SlotReport {
        let (extracted, messages) = match slot {
            SentenceSlot::Greeting => self.greeting_sentence(sentence),
            SentenceSlot::Name => self.name_sentence(sentence),
            SentenceSlot::Location => self.location_sentence(sentence),
            SentenceSlot::Education => self.education_sentence(sentence),
            SentenceSlot::Hobby => self.hobby_sentence(sentence),
        };
        SlotReport {
            slot,
            sentence: sentence.to_string(),
            extracted,
            errors: messages
                .into_iter()
                .map(|m| ValidationError::new(slot, m))
                .collect(),
        }
    }

    fn greeting_sentence(&self, sentence: &str) -> (Option<ExtractedField>, Vec<String>) {
        let time_of_day = GREETING
            .captures(sentence)
            .and_then(|c| c.get(1))
            .and_then(|m| TimeOfDay::parse_word(m.as_str()));
        match time_of_day {
            Some(time_of_day) => (Some(ExtractedField::Greeting { time_of_day }), Vec::new()),
            None => (
                None,
                vec!["First sentence must be \"Good Morning/Afternoon/Evening Respected Seniors.\"".into()],
            ),
        }
    }

    fn name_sentence(&self, sentence: &str) -> (Option<ExtractedField>, Vec<String>) {
        let Some([name]) = captures::<1>(&NAME, sentence) else {
            return (None, vec!["Second sentence must be \"My name is [Full Name].\"".into()]);
        };
        let outcome = self.capitalization.validate_name(&name);
        (Some(ExtractedField::Name { name }), outcome.errors)
    }

    fn location_sentence(&self, sentence: &str) -> (Option<ExtractedField>, Vec<String>) {
        let Some([city, state]) = captures::<2>(&LOCATION, sentence) else {
            return (None, vec!["Third sentence must be \"I am from [City/Town], [State].\"".into()]);
        };

        let mut errors = self.capitalization.validate_location(&city).errors;
        errors.extend(self.capitalization.validate_location(&state).errors);

        if self.taxonomy.is_town(&city) && !self.taxonomy.mentions_district(sentence) {
            errors.push("If from a town, mention the nearest district".into());
        }

        (Some(ExtractedField::Location { city, state }), errors)
    }

    fn education_sentence(&self, sentence: &str) -> (Option<ExtractedField>, Vec<String>) {
        let parts = captures::<2>(&EDUCATION, sentence)
            .and_then(|[degree, branch]| Some((Degree::parse(&degree)?, branch)));
        let Some((degree, branch)) = parts else {
            return (
                None,
                vec!["Fourth sentence must be \"I am pursuing Bachelor/Integrated Master of Technology in [Branch Name in full].\"".into()],
            );
        };
        let outcome = self.capitalization.validate_branch_name(&branch);
        (Some(ExtractedField::Education { degree, branch }), outcome.errors)
    }

    fn hobby_sentence(&self, sentence: &str) -> (Option<ExtractedField>, Vec<String>) {
        let Some([hobby]) = captures::<1>(&HOBBY, sentence) else {
            return (None, vec!["Fifth sentence must be \"My hobby is [Hobby].\"".into()]);
        };
        let CheckOutcome { errors, .. } = self.hobbies.validate_hobby(&hobby);
        (Some(ExtractedField::Hobby { hobby }), errors)
    }
}

/// Trimmed capture groups `1..=N` of `pattern`, or `None` if it doesn't match.
fn captures<const N: usize>(pattern: &Regex, sentence: &str) -> Option<[String; N]> {
    let caps = pattern.captures(sentence)?;
    let mut groups: [String; N] = std::array::from_fn(|_| String::new());
    for (i, group) in groups.iter_mut().enumerate() {
        *group = caps.get(i + 1)?.as_str().trim().to_string();
    }
    Some(groups)
}
