//! Static word tables used by the validators.
//!
//! A `Taxonomy` is built once (from the built-in tables or a JSON file) and
//! shared read-only through an `Arc` by every validator instance.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

const LOWERCASE_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "if", "in", "nor", "of", "on", "or", "so",
    "the", "to", "up", "yet",
];

const UPPERCASE_ABBREVIATIONS: &[&str] = &[
    "IT", "CS", "ECE", "EEE", "ME", "CE", "AI", "ML", "IOT", "VR", "AR",
];

const VALID_HOBBIES: &[&str] = &[
    // Creative arts
    "painting",
    "drawing",
    "sketching",
    "photography",
    "writing",
    "poetry",
    "calligraphy",
    "sculpture",
    "pottery",
    "origami",
    "knitting",
    "embroidery",
    "jewelry making",
    "woodworking",
    "carving",
    "digital art",
    "animation",
    // Solo music
    "singing",
    "guitar playing",
    "piano playing",
    "violin playing",
    "flute playing",
    "keyboard playing",
    "harmonica playing",
    "music composition",
    "music production",
    // Literary
    "reading",
    "blogging",
    "storytelling",
    "journaling",
    "research",
    "philosophy",
    "astronomy",
    "archaeology",
    "history research",
    // Crafts
    "gardening",
    "cooking",
    "baking",
    "candle making",
    "soap making",
    "leather working",
    "metalworking",
    "glass blowing",
    "weaving",
    // Solo performance
    "dancing",
    "acting",
    "stand-up comedy",
    "magic tricks",
    "ventriloquism",
    // Digital, non-coding
    "graphic design",
    "video editing",
    "sound engineering",
    "3d modeling",
    "web design",
    "ui/ux design",
    // Other
    "meditation",
    "yoga",
    "collecting",
    "bird watching",
    "nature photography",
    "herbalism",
    "perfume making",
    "fashion designing",
];

const FORBIDDEN_HOBBIES: &[&str] = &[
    // Coding
    "coding",
    "programming",
    "software development",
    "web development",
    "app development",
    "game development",
    "hacking",
    "debugging",
    // Sports
    "cricket",
    "football",
    "basketball",
    "volleyball",
    "tennis",
    "badminton",
    "swimming",
    "running",
    "cycling",
    "gym",
    "fitness",
    "bodybuilding",
    "wrestling",
    "boxing",
    "martial arts",
    "hockey",
    "golf",
    // College activities
    "robotics",
    "electronics projects",
    "circuit design",
    "lab experiments",
    "technical projects",
    "engineering design",
    "cad design",
    // Group activities
    "debating",
    "group discussions",
    "team building",
    "organizing events",
    "leadership activities",
    "student council",
    "club activities",
    // Vague
    "studying",
    "learning",
    "exploring",
    "thinking",
    "socializing",
    "hanging out",
    "chatting",
    "browsing internet",
    "social media",
];

const FORBIDDEN_KEYWORDS: &[&str] = &[
    "code",
    "program",
    "software",
    "app",
    "game dev",
    "hack",
    "sport",
    "team",
    "group",
    "club",
    "competition",
    "tournament",
    "engineering",
    "technical",
    "project",
    "lab",
    "experiment",
    "study",
    "learn",
    "explore",
    "social",
    "internet",
    "online",
];

const CAREER_ROOTS: &[&str] = &[
    "art", "music", "writing", "design", "craft", "cook", "bak", "photograph", "paint", "draw",
    "sing", "danc", "act", "garden",
];

const GROUP_MARKERS: &[&str] = &[
    "team",
    "group",
    "club",
    "band",
    "orchestra",
    "choir",
    "debate",
    "discussion",
    "meeting",
    "party",
    "event",
];

const MAJOR_CITIES: &[&str] = &[
    "mumbai",
    "delhi",
    "bangalore",
    "hyderabad",
    "ahmedabad",
    "chennai",
    "kolkata",
    "pune",
    "jaipur",
    "surat",
    "lucknow",
    "kanpur",
    "nagpur",
    "indore",
    "thane",
    "bhopal",
    "visakhapatnam",
    "pimpri",
    "patna",
    "vadodara",
    "ghaziabad",
    "ludhiana",
    "agra",
    "nashik",
    "faridabad",
    "meerut",
    "rajkot",
    "kalyan",
    "vasai",
    "varanasi",
    "srinagar",
    "aurangabad",
    "dhanbad",
    "amritsar",
    "navi mumbai",
    "allahabad",
    "ranchi",
    "howrah",
    "coimbatore",
    "jabalpur",
    "gwalior",
    "vijayawada",
    "jodhpur",
    "madurai",
    "raipur",
    "kota",
    "guwahati",
    "chandigarh",
];

const KNOWN_TOWNS: &[&str] = &[
    "pali", "sirohi", "nagaur", "barmer", "jalore", "baran", "sikar", "churu", "hapur", "shamli",
    "sehore", "dewas", "karad", "baramati", "hosur", "palani",
];

const TOWN_KEYWORDS: &[&str] = &["town", "village", "tehsil", "taluka"];

const DISTRICT_KEYWORDS: &[&str] = &["district", "dist", "near"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn owned_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// All classification tables.
///
/// Exact-membership tables are sets; tables scanned for substrings keep
/// their order so the first hit is stable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Taxonomy {
    /// Articles, prepositions, conjunctions written lowercase mid-phrase.
    pub lowercase_words: HashSet<String>,
    /// Abbreviations that must be written fully uppercase.
    pub uppercase_abbreviations: HashSet<String>,
    pub valid_hobbies: Vec<String>,
    pub forbidden_hobbies: HashSet<String>,
    pub forbidden_keywords: Vec<String>,
    /// Substrings indicating an activity that can become a career.
    pub career_roots: Vec<String>,
    /// Substrings indicating an activity that needs other people.
    pub group_markers: Vec<String>,
    pub major_cities: HashSet<String>,
    /// Town names recognised without a town keyword.
    pub known_towns: HashSet<String>,
    pub town_keywords: Vec<String>,
    pub district_keywords: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            lowercase_words: owned_set(LOWERCASE_WORDS),
            uppercase_abbreviations: owned_set(UPPERCASE_ABBREVIATIONS),
            valid_hobbies: owned(VALID_HOBBIES),
            forbidden_hobbies: owned_set(FORBIDDEN_HOBBIES),
            forbidden_keywords: owned(FORBIDDEN_KEYWORDS),
            career_roots: owned(CAREER_ROOTS),
            group_markers: owned(GROUP_MARKERS),
            major_cities: owned_set(MAJOR_CITIES),
            known_towns: owned_set(KNOWN_TOWNS),
            town_keywords: owned(TOWN_KEYWORDS),
            district_keywords: owned(DISTRICT_KEYWORDS),
        }
    }
}

impl Taxonomy {
    /// Parse a JSON object of tables. Missing tables keep their built-in
    /// contents.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let taxonomy: Taxonomy = serde_json::from_str(json)?;
        Ok(taxonomy.normalized())
    }

    /// Load tables from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json_str(&raw).map_err(|e| ConfigError::Taxonomy {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(
            path = %path.display(),
            valid_hobbies = taxonomy.valid_hobbies.len(),
            forbidden_hobbies = taxonomy.forbidden_hobbies.len(),
            major_cities = taxonomy.major_cities.len(),
            "Loaded taxonomy"
        );
        Ok(taxonomy)
    }

    /// Trim every entry, lowercase everything except abbreviations
    /// (uppercased), and drop empty entries.
    pub fn normalized(self) -> Self {
        fn lower_vec(v: Vec<String>) -> Vec<String> {
            v.into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }
        fn lower_set(s: HashSet<String>) -> HashSet<String> {
            s.into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        Self {
            lowercase_words: lower_set(self.lowercase_words),
            uppercase_abbreviations: self
                .uppercase_abbreviations
                .into_iter()
                .map(|w| w.trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
            valid_hobbies: lower_vec(self.valid_hobbies),
            forbidden_hobbies: lower_set(self.forbidden_hobbies),
            forbidden_keywords: lower_vec(self.forbidden_keywords),
            career_roots: lower_vec(self.career_roots),
            group_markers: lower_vec(self.group_markers),
            major_cities: lower_set(self.major_cities),
            known_towns: lower_set(self.known_towns),
            town_keywords: lower_vec(self.town_keywords),
            district_keywords: lower_vec(self.district_keywords),
        }
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.uppercase_abbreviations.contains(&word.to_uppercase())
    }

    pub fn is_lowercase_word(&self, word: &str) -> bool {
        self.lowercase_words.contains(&word.to_lowercase())
    }

    /// A town is anything that isn't a major city and either carries a town
    /// keyword or is a known town name.
    pub fn is_town(&self, city: &str) -> bool {
        let city = city.trim().to_lowercase();
        if self.major_cities.contains(&city) {
            return false;
        }
        self.known_towns.contains(&city) || self.town_keywords.iter().any(|k| city.contains(k))
    }

    pub fn mentions_district(&self, sentence: &str) -> bool {
        let sentence = sentence.to_lowercase();
        self.district_keywords.iter().any(|k| sentence.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_populated() {
        let t = Taxonomy::default();
        assert!(t.lowercase_words.contains("of"));
        assert!(t.uppercase_abbreviations.contains("IOT"));
        assert!(t.valid_hobbies.iter().any(|h| h == "painting"));
        assert!(t.forbidden_hobbies.contains("coding"));
        assert_eq!(t.forbidden_keywords.first().map(String::as_str), Some("code"));
    }

    #[test]
    fn major_city_is_never_a_town() {
        let t = Taxonomy::default();
        assert!(!t.is_town("Mumbai"));
        assert!(!t.is_town("Navi Mumbai"));
    }

    #[test]
    fn town_keyword_and_known_town() {
        let t = Taxonomy::default();
        assert!(t.is_town("Pali"));
        assert!(t.is_town("Rampur Village"));
        assert!(t.is_town("Sanand Taluka"));
        assert!(!t.is_town("Kochi"));
    }

    #[test]
    fn district_mention_is_case_insensitive() {
        let t = Taxonomy::default();
        assert!(t.mentions_district("I am from Pali Near Jodhpur, Rajasthan"));
        assert!(t.mentions_district("I am from Sojat Town Dist Pali, Rajasthan"));
        assert!(!t.mentions_district("I am from Pali, Rajasthan"));
    }

    #[test]
    fn json_overrides_only_named_tables() {
        let t = Taxonomy::from_json_str(r#"{"valid_hobbies": ["  Pottery ", ""], "uppercase_abbreviations": ["ds"]}"#)
            .unwrap();
        assert_eq!(t.valid_hobbies, vec!["pottery".to_string()]);
        assert!(t.uppercase_abbreviations.contains("DS"));
        assert_eq!(t.forbidden_hobbies, Taxonomy::default().forbidden_hobbies);
    }

    #[test]
    fn json_rejects_unknown_tables() {
        assert!(Taxonomy::from_json_str(r#"{"hobbies": []}"#).is_err());
    }

    #[test]
    fn file_loader_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Taxonomy::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Taxonomy { .. }));
        assert!(err.to_string().contains("taxonomy.json"));
    }
}
