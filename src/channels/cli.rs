//! CLI channel: a stdin/stdout REPL for validating introductions by hand.
//!
//! Lines accumulate into one message; an empty line submits it.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::ChannelError;
use crate::validation::types::{ExtractedField, SentenceSlot};
use crate::validation::{DetailedValidation, IntroductionValidator, ValidationResult};

/// Built-in sample introductions for `/examples`.
pub const EXAMPLES: [(&str, &str); 5] = [
    (
        "Valid morning introduction",
        "Good Morning Respected Seniors. My name is John Doe. I am from Mumbai, Maharashtra. I am pursuing Bachelor of Technology in Computer Science Engineering. My hobby is painting.",
    ),
    (
        "Valid evening introduction",
        "Good Evening Respected Seniors. My name is Jane Smith. I am from Delhi, Delhi. I am pursuing Integrated Master of Technology in Electronics and Communication Engineering. My hobby is photography.",
    ),
    (
        "Wrong capitalization",
        "Good Morning Respected Seniors. My name is john doe. I am from mumbai, maharashtra. I am pursuing Bachelor of Technology in computer science engineering. My hobby is painting.",
    ),
    (
        "Forbidden hobby",
        "Good Morning Respected Seniors. My name is John Doe. I am from Mumbai, Maharashtra. I am pursuing Bachelor of Technology in Computer Science Engineering. My hobby is coding.",
    ),
    (
        "Wrong format",
        "Hello seniors, I am John from Mumbai studying computer science and my hobby is painting.",
    ),
];

/// Session totals. Kept in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total: u64,
    pub valid: u64,
    pub invalid: u64,
}

impl ValidationStats {
    pub fn record(&mut self, result: &ValidationResult) {
        self.total += 1;
        if result.is_valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
    }
}

/// REPL commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Examples,
    Stats,
    Time,
    Quit,
}

impl CliCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/examples" => Some(Self::Examples),
            "/stats" => Some(Self::Stats),
            "/time" => Some(Self::Time),
            "/quit" | "/exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Collects pasted lines until a blank line ends the message.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    lines: Vec<String>,
}

impl MessageBuffer {
    /// Add a line. Returns the joined message when a blank line arrives
    /// after some content.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if !line.is_empty() {
            self.lines.push(line.to_string());
            return None;
        }
        if self.lines.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.lines).join(" "))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct CliChannel {
    validator: Arc<IntroductionValidator>,
    stats: ValidationStats,
}

impl CliChannel {
    pub fn new(validator: Arc<IntroductionValidator>) -> Self {
        Self {
            validator,
            stats: ValidationStats::default(),
        }
    }

    pub fn stats(&self) -> ValidationStats {
        self.stats
    }

    /// Run until `/quit` or EOF.
    pub async fn run(&mut self) -> Result<(), ChannelError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut buffer = MessageBuffer::default();

        eprintln!("{}", self.time_banner());
        eprintln!("   Paste an introduction, then an empty line to validate.");
        eprintln!("   Commands: /examples /stats /time /quit\n");
        eprint!("> ");

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            };

            if buffer.is_empty() {
                match CliCommand::parse(&line) {
                    Some(CliCommand::Quit) => break,
                    Some(command) => {
                        println!("{}", self.handle_command(command));
                        eprint!("> ");
                        continue;
                    }
                    None => {}
                }
            }

            if let Some(message) = buffer.push_line(&line) {
                println!("\n{}", self.validate_and_render(&message));
                eprint!("> ");
            }
        }

        // EOF with a pending message still validates it.
        if let Some(message) = buffer.push_line("") {
            println!("\n{}", self.validate_and_render(&message));
        }
        eprintln!("\n{}", self.render_stats());
        Ok(())
    }

    pub fn handle_command(&mut self, command: CliCommand) -> String {
        match command {
            CliCommand::Examples => {
                let mut out = String::new();
                for (i, (label, text)) in EXAMPLES.iter().enumerate() {
                    let _ = writeln!(out, "── Example {}: {} ──", i + 1, label);
                    let _ = writeln!(out, "\"{text}\"");
                    let _ = writeln!(out, "{}", self.validate_and_render(text));
                }
                out
            }
            CliCommand::Stats => self.render_stats(),
            CliCommand::Time => self.time_banner(),
            CliCommand::Quit => String::new(),
        }
    }

    /// Validate at the current instant, record stats, and format the verdict.
    pub fn validate_and_render(&mut self, message: &str) -> String {
        let detailed = self.validator.validate_detailed(message, &Utc::now());
        self.stats.record(&detailed.result);
        tracing::info!(
            is_valid = detailed.result.is_valid,
            errors = detailed.result.errors.len(),
            "CLI validation"
        );
        render_verdict(&self.validator, &detailed)
    }

    fn render_stats(&self) -> String {
        format!(
            "📊 Validated: {}  ✅ Valid: {}  ❌ Invalid: {}",
            self.stats.total, self.stats.valid, self.stats.invalid
        )
    }

    fn time_banner(&self) -> String {
        let now = Utc::now().with_timezone(&self.validator.offset());
        let period = self.validator.time_of_day(&now);
        format!(
            "🕐 Current time: {}\n📝 Expected greeting: \"{}\"",
            now.format("%Y-%m-%d %H:%M:%S %:z"),
            period.expected_greeting()
        )
    }
}

/// Human-readable verdict with advisory suggestions for failing slots.
pub fn render_verdict(validator: &IntroductionValidator, detailed: &DetailedValidation) -> String {
    let mut out = String::new();
    let result = &detailed.result;

    if result.is_valid {
        let _ = writeln!(out, "✅ VALID INTRODUCTION");
        let _ = writeln!(out, "   Action: react with 👍");
        return out;
    }

    let _ = writeln!(out, "❌ INVALID INTRODUCTION");
    for (i, error) in result.errors.iter().enumerate() {
        let _ = writeln!(out, "   {}. {}", i + 1, error);
    }

    let capitalization = validator.structure().capitalization();
    for report in detailed.format.slots.iter().filter(|r| !r.is_valid()) {
        let suggestion = match &report.extracted {
            Some(ExtractedField::Name { name }) => Some(capitalization.suggest_capitalization(name)),
            Some(ExtractedField::Location { city, state }) => Some(format!(
                "{}, {}",
                capitalization.suggest_capitalization(city),
                capitalization.suggest_capitalization(state)
            )),
            Some(ExtractedField::Education { branch, .. }) => {
                Some(capitalization.suggest_capitalization(branch))
            }
            _ => None,
        };
        if let Some(suggestion) = suggestion {
            let _ = writeln!(out, "   💡 {}: \"{}\"", report.slot, suggestion);
        }
        if report.slot == SentenceSlot::Hobby {
            let _ = writeln!(
                out,
                "   💡 hobby: try something like \"{}\"",
                validator.structure().hobbies().suggest_alternative()
            );
        }
    }

    let _ = writeln!(out, "   Action: reply \"repeat\"");
    out
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::validation::Taxonomy;

    fn validator() -> Arc<IntroductionValidator> {
        Arc::new(IntroductionValidator::new(
            Arc::new(Taxonomy::default()),
            FixedOffset::east_opt(19_800).unwrap(),
        ))
    }

    fn morning() -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
            .unwrap()
    }

    #[test]
    fn buffer_joins_lines_until_blank() {
        let mut buffer = MessageBuffer::default();
        assert_eq!(buffer.push_line(""), None);
        assert_eq!(buffer.push_line("Good Morning Respected Seniors."), None);
        assert_eq!(buffer.push_line("  My name is John Doe.  "), None);
        assert_eq!(
            buffer.push_line("   ").as_deref(),
            Some("Good Morning Respected Seniors. My name is John Doe.")
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn command_parsing() {
        assert_eq!(CliCommand::parse("/examples"), Some(CliCommand::Examples));
        assert_eq!(CliCommand::parse(" /quit "), Some(CliCommand::Quit));
        assert_eq!(CliCommand::parse("/exit"), Some(CliCommand::Quit));
        assert_eq!(CliCommand::parse("My name is"), None);
    }

    #[test]
    fn stats_count_outcomes() {
        let mut stats = ValidationStats::default();
        stats.record(&ValidationResult::from_errors(vec![]));
        stats.record(&ValidationResult::from_errors(vec![
            crate::validation::ValidationError::message_level("x"),
        ]));
        assert_eq!(
            stats,
            ValidationStats {
                total: 2,
                valid: 1,
                invalid: 1
            }
        );
    }

    #[test]
    fn valid_verdict_rendering() {
        let v = validator();
        let detailed = v.validate_detailed(EXAMPLES[0].1, &morning());
        let out = render_verdict(&v, &detailed);
        assert!(out.starts_with("✅ VALID INTRODUCTION"));
    }

    #[test]
    fn invalid_verdict_lists_errors_and_suggestions() {
        let v = validator();
        let detailed = v.validate_detailed(EXAMPLES[2].1, &morning());
        let out = render_verdict(&v, &detailed);
        assert!(out.starts_with("❌ INVALID INTRODUCTION"));
        assert!(out.contains("1. Name \"john\" must start with capital letter"));
        assert!(out.contains("💡 name: \"John Doe\""));
        assert!(out.contains("💡 location: \"Mumbai, Maharashtra\""));
        assert!(out.contains("💡 education: \"Computer Science Engineering\""));
    }

    #[test]
    fn hobby_failure_offers_alternative() {
        let v = validator();
        let detailed = v.validate_detailed(EXAMPLES[3].1, &morning());
        let out = render_verdict(&v, &detailed);
        assert!(out.contains("💡 hobby: try something like"));
    }

    #[test]
    fn examples_command_updates_stats() {
        let mut cli = CliChannel::new(validator());
        let out = cli.handle_command(CliCommand::Examples);
        assert!(out.contains("Example 5: Wrong format"));
        assert_eq!(cli.stats().total, EXAMPLES.len() as u64);
    }
}
