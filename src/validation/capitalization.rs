//! Word-level capitalization rules for names, locations, and branch names.
//!
//! Every word is classified, in order:
//! 1. known abbreviation → must be fully uppercase;
//! 2. lowercase-exception word (not first in the phrase) → must be fully lowercase;
//! 3. anything else → title case.
//!
//! Each offending word produces its own error.

use std::sync::Arc;

use super::taxonomy::Taxonomy;
use super::types::CheckOutcome;

/// What a word is expected to look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordRule {
    Uppercase,
    Lowercase,
    TitleCase,
}

/// Which phrase is being checked; only affects error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhraseKind {
    Name,
    Location,
    Branch,
}

pub struct CapitalizationChecker {
    taxonomy: Arc<Taxonomy>,
}

impl CapitalizationChecker {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// A full name needs at least a first and a last name.
    pub fn validate_name(&self, name: &str) -> CheckOutcome {
        let mut errors = Vec::new();
        if words(name).count() < 2 {
            errors.push("Name must contain at least first and last name".to_string());
        }
        errors.extend(self.check_phrase(name, PhraseKind::Name));
        CheckOutcome::from_errors(errors)
    }

    pub fn validate_location(&self, location: &str) -> CheckOutcome {
        CheckOutcome::from_errors(self.check_phrase(location, PhraseKind::Location))
    }

    pub fn validate_branch_name(&self, branch: &str) -> CheckOutcome {
        CheckOutcome::from_errors(self.check_phrase(branch, PhraseKind::Branch))
    }

    /// Rewrite a phrase with the capitalization the rules expect. Advisory
    /// only; nothing in validation applies it.
    pub fn suggest_capitalization(&self, phrase: &str) -> String {
        words(phrase)
            .enumerate()
            .map(|(i, word)| match self.rule_for(word, i == 0) {
                WordRule::Uppercase => word.to_uppercase(),
                WordRule::Lowercase => word.to_lowercase(),
                WordRule::TitleCase => title_case(word),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn rule_for(&self, word: &str, is_first: bool) -> WordRule {
        if self.taxonomy.is_abbreviation(word) {
            WordRule::Uppercase
        } else if !is_first && self.taxonomy.is_lowercase_word(word) {
            WordRule::Lowercase
        } else {
            WordRule::TitleCase
        }
    }

    fn check_phrase(&self, phrase: &str, kind: PhraseKind) -> Vec<String> {
        let mut errors = Vec::new();
        for (i, word) in words(phrase).enumerate() {
            let rule = self.rule_for(word, i == 0);
            let ok = match rule {
                WordRule::Uppercase => word == word.to_uppercase(),
                WordRule::Lowercase => word == word.to_lowercase(),
                WordRule::TitleCase => is_title_case(word),
            };
            if !ok {
                errors.push(violation_message(kind, rule, word));
            }
        }
        errors
    }
}

fn words(phrase: &str) -> impl Iterator<Item = &str> {
    phrase.split(' ').filter(|w| !w.is_empty())
}

/// First character not lowercase, the rest lowercase. Characters without
/// case (digits, hyphens) pass.
fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => !first.is_lowercase() && chars.all(|c| !c.is_uppercase()),
        None => false,
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn violation_message(kind: PhraseKind, rule: WordRule, word: &str) -> String {
    match (rule, kind) {
        (WordRule::Uppercase, _) => format!("Abbreviation \"{word}\" should be in uppercase"),
        (WordRule::Lowercase, _) => format!("Word \"{word}\" should be lowercase"),
        (WordRule::TitleCase, PhraseKind::Name) => {
            format!("Name \"{word}\" must start with capital letter")
        }
        (WordRule::TitleCase, PhraseKind::Location) => {
            format!("Location word \"{word}\" must be properly capitalized")
        }
        (WordRule::TitleCase, PhraseKind::Branch) => {
            format!("Branch name word \"{word}\" must start with capital letter")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> CapitalizationChecker {
        CapitalizationChecker::new(Arc::new(Taxonomy::default()))
    }

    #[test]
    fn proper_name_passes() {
        let outcome = checker().validate_name("John Doe");
        assert!(outcome.is_valid, "{:?}", outcome.errors);
    }

    #[test]
    fn single_word_name_fails_even_when_capitalized() {
        let outcome = checker().validate_name("John");
        assert_eq!(
            outcome.errors,
            vec!["Name must contain at least first and last name".to_string()]
        );
    }

    #[test]
    fn each_bad_name_word_is_reported() {
        let outcome = checker().validate_name("john doe");
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors[0].contains("\"john\""));
        assert!(outcome.errors[1].contains("\"doe\""));
    }

    #[test]
    fn shouting_name_is_not_title_case() {
        let outcome = checker().validate_name("JOHN Doe");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("JOHN"));
    }

    #[test]
    fn location_allows_lowercase_connectors_mid_phrase() {
        let c = checker();
        assert!(c.validate_location("Daman and Diu").is_valid);
        let outcome = c.validate_location("Daman And Diu");
        assert_eq!(outcome.errors, vec!["Word \"And\" should be lowercase".to_string()]);
    }

    #[test]
    fn first_word_connector_is_title_case() {
        let c = checker();
        assert!(c.validate_location("The Nilgiris").is_valid);
        assert!(!c.validate_location("the Nilgiris").is_valid);
    }

    #[test]
    fn branch_abbreviations_must_be_uppercase() {
        let c = checker();
        assert!(c.validate_branch_name("Computer Science and Engineering in AI").is_valid);
        let outcome = c.validate_branch_name("Electronics and Communication in Iot");
        assert_eq!(
            outcome.errors,
            vec!["Abbreviation \"Iot\" should be in uppercase".to_string()]
        );
    }

    #[test]
    fn branch_reports_every_bad_word() {
        let outcome = checker().validate_branch_name("computer science engineering");
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.errors.iter().all(|e| e.starts_with("Branch name word")));
    }

    #[test]
    fn suggestion_applies_all_rules() {
        let c = checker();
        assert_eq!(
            c.suggest_capitalization("computer SCIENCE and engineering in ai"),
            "Computer Science and Engineering in AI"
        );
        assert_eq!(c.suggest_capitalization("the  nilgiris"), "The Nilgiris");
    }

    #[test]
    fn caseless_characters_pass_title_case() {
        assert!(is_title_case("3d"));
        assert!(is_title_case("Stand-up"));
        assert!(!is_title_case("3D"));
    }
}
