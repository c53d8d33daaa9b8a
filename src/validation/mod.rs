//! Introduction validation engine.
//!
//! A pure function of `(message text, evaluation instant)`:
//! 1. `GreetingChecker`: greeting names the right period of the day
//! 2. `StructuralValidator`: five sentences, one pattern per slot, with
//!    `CapitalizationChecker` and `HobbyClassifier` for field contents
//! 3. `IntroductionValidator`: runs both and merges their errors
//!
//! All word lists live in a shared, read-only `Taxonomy`.

pub mod capitalization;
pub mod engine;
pub mod greeting;
pub mod hobby;
pub mod structure;
pub mod taxonomy;
pub mod types;

pub use engine::{DetailedValidation, IntroductionValidator};
pub use taxonomy::Taxonomy;
pub use types::{SentenceSlot, TimeOfDay, ValidationError, ValidationResult};
