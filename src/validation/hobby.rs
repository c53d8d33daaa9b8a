//! Hobby classification.
//!
//! A hobby must be a single activity that can be pursued as a career and
//! done alone. Every check runs and reports independently.

use std::sync::Arc;

use rand::seq::SliceRandom;

use super::taxonomy::Taxonomy;
use super::types::{CheckOutcome, HobbyDetails};

/// Separators that indicate more than one hobby was named.
const MULTIPLE_HOBBY_MARKERS: &[&str] = &[" and ", " & ", ",", " or ", " plus "];

/// Hobbies offered as replacements when the given one is rejected.
const SUGGESTED_HOBBIES: &[&str] = &[
    "painting",
    "reading",
    "writing",
    "photography",
    "singing",
    "guitar playing",
    "cooking",
    "gardening",
    "drawing",
    "poetry",
];

pub struct HobbyClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl HobbyClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn validate_hobby(&self, hobby: &str) -> CheckOutcome {
        let lower = hobby.trim().to_lowercase();
        let mut errors = Vec::new();

        if has_multiple_hobbies(hobby) {
            errors.push("Only one hobby should be mentioned".to_string());
        }

        if self.is_forbidden(&lower) {
            errors.push(format!(
                "\"{hobby}\" is not allowed as it's either coding, sports, or typical college activity"
            ));
        }

        if let Some(keyword) = self.forbidden_keyword(&lower) {
            errors.push(format!("Hobby contains forbidden keyword \"{keyword}\""));
        }

        if !self.is_listed(&lower) {
            errors.push(format!(
                "\"{hobby}\" must be something that can be pursued as a career and done alone"
            ));
        }

        if !self.can_be_career(&lower) {
            errors.push(format!("\"{hobby}\" cannot be realistically pursued as a career"));
        }

        if !self.can_be_done_alone(&lower) {
            errors.push(format!(
                "\"{hobby}\" typically requires other people or is a group activity"
            ));
        }

        CheckOutcome::from_errors(errors)
    }

    /// Every sub-check as a boolean, for diagnostics.
    pub fn validation_details(&self, hobby: &str) -> HobbyDetails {
        let lower = hobby.trim().to_lowercase();
        HobbyDetails {
            is_listed: self.is_listed(&lower),
            can_be_career: self.can_be_career(&lower),
            can_be_done_alone: self.can_be_done_alone(&lower),
            is_forbidden: self.is_forbidden(&lower),
            contains_forbidden_keyword: self.forbidden_keyword(&lower).is_some(),
            has_multiple_hobbies: has_multiple_hobbies(hobby),
        }
    }

    /// A random acceptable hobby to offer the sender.
    pub fn suggest_alternative(&self) -> &'static str {
        SUGGESTED_HOBBIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("painting")
    }

    fn is_forbidden(&self, lower: &str) -> bool {
        self.taxonomy.forbidden_hobbies.contains(lower)
    }

    fn forbidden_keyword(&self, lower: &str) -> Option<&str> {
        self.taxonomy
            .forbidden_keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Listed if it matches a valid hobby in either substring direction
    /// ("oil painting" ⊇ "painting", "guitar" ⊆ "guitar playing").
    fn is_listed(&self, lower: &str) -> bool {
        self.taxonomy
            .valid_hobbies
            .iter()
            .any(|valid| lower.contains(valid.as_str()) || valid.contains(lower))
    }

    fn can_be_career(&self, lower: &str) -> bool {
        if self.taxonomy.valid_hobbies.iter().any(|v| v == lower) {
            return true;
        }
        self.taxonomy
            .career_roots
            .iter()
            .any(|root| lower.contains(root.as_str()))
    }

    fn can_be_done_alone(&self, lower: &str) -> bool {
        !self
            .taxonomy
            .group_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
    }
}

fn has_multiple_hobbies(hobby: &str) -> bool {
    let lower = hobby.to_lowercase();
    MULTIPLE_HOBBY_MARKERS.iter().any(|m| lower.contains(m))
}
