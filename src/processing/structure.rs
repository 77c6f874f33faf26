//! Structural signals: contact details, sections, action verbs and quantified achievements

use crate::processing::keyword_index::{all_sections, SectionPattern, ACTION_VERBS, REQUIRED_SECTIONS};
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

/// Characters after a section marker inspected to judge how well it is filled in.
const SECTION_WINDOW_CHARS: usize = 500;
/// A section window needs more tokens than this to count as substantive.
const SECTION_GOOD_TOKENS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoCheck {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_linked_in: bool,
    pub has_location: bool,
    pub has_website: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionQuality {
    Good,
    NeedsImprovement,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCheck {
    pub name: String,
    pub found: bool,
    pub quality: SectionQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionVerbAnalysis {
    pub found: Vec<String>,
    pub count: usize,
    pub percentage: u32,
}

/// Everything the structural pass derives from one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralSignals {
    pub contact_info: ContactInfoCheck,
    pub sections: Vec<SectionCheck>,
    pub action_verbs: ActionVerbAnalysis,
    pub quantifiable_achievements: usize,
}

impl StructuralSignals {
    pub fn section(&self, name: &str) -> Option<&SectionCheck> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_found(&self, name: &str) -> bool {
        self.section(name).map(|s| s.found).unwrap_or(false)
    }

    /// The five required sections, in catalog order.
    pub fn required_sections(&self) -> &[SectionCheck] {
        &self.sections[..REQUIRED_SECTIONS.len().min(self.sections.len())]
    }

    pub fn optional_sections(&self) -> &[SectionCheck] {
        &self.sections[REQUIRED_SECTIONS.len().min(self.sections.len())..]
    }
}

pub struct StructuralAnalyzer {
    email_regex: Regex,
    phone_regex: Regex,
    location_keyword_regex: Regex,
    city_state_regex: Regex,
    website_prefix_regex: Regex,
    website_tld_regex: Regex,
    verb_set: RegexSet,
    achievement_patterns: Vec<Regex>,
}

impl Default for StructuralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralAnalyzer {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");
        let phone_regex =
            Regex::new(r"(\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
                .expect("Invalid phone regex");
        let location_keyword_regex = Regex::new(r"(?i)(?-u:\b)(city|state|country|address|location)(?-u:\b)")
            .expect("Invalid location regex");
        let city_state_regex =
            Regex::new(r"\b[A-Z][a-z]+,\s*[A-Z]{2}\b").expect("Invalid city/state regex");
        let website_prefix_regex =
            Regex::new(r"(?i)https?://|www\.").expect("Invalid website regex");
        let website_tld_regex =
            Regex::new(r"(?i)\.com|\.io|\.dev|\.org").expect("Invalid TLD regex");

        let verb_patterns: Vec<String> = ACTION_VERBS
            .iter()
            .map(|verb| format!(r"(?i)(?-u:\b){}(?:ed|ing|s)?(?-u:\b)", regex::escape(verb)))
            .collect();
        let verb_set = RegexSet::new(&verb_patterns).expect("Invalid action verb patterns");

        let achievement_patterns = [
            r"[0-9]+%",
            r"\$[0-9,]+(?:\.[0-9]{2})?",
            r"[0-9]+(?:,[0-9]{3})+",
            r"(?i)\b[0-9]+\+?\s*(?:years?|months?|weeks?|days?|hours?)",
            r"(?i)\b[0-9]+\s*(?:clients?|customers?|users?|teams?|projects?|people)",
            r"(?i)increased?\s*(?:by\s*)?[0-9]+",
            r"(?i)reduced?\s*(?:by\s*)?[0-9]+",
            r"(?i)saved?\s*\$?[0-9,]+",
            r"(?i)[0-9]+x\s",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid achievement regex"))
        .collect();

        Self {
            email_regex,
            phone_regex,
            location_keyword_regex,
            city_state_regex,
            website_prefix_regex,
            website_tld_regex,
            verb_set,
            achievement_patterns,
        }
    }

    /// Run every structural probe.
    ///
    /// Contact, section and verb probes read `lower`, the lower-cased normalized
    /// text; achievements are counted on `normalized`.
    pub fn analyze(&self, normalized: &str, lower: &str) -> StructuralSignals {
        StructuralSignals {
            contact_info: self.analyze_contact_info(lower),
            sections: self.analyze_sections(lower),
            action_verbs: self.analyze_action_verbs(lower),
            quantifiable_achievements: self.count_quantifiable_achievements(normalized),
        }
    }

    pub fn analyze_contact_info(&self, lower: &str) -> ContactInfoCheck {
        let digit_count = lower.chars().filter(|c| c.is_ascii_digit()).count();

        ContactInfoCheck {
            has_email: self.email_regex.is_match(lower),
            has_phone: self.phone_regex.is_match(lower) || digit_count >= 10,
            has_linked_in: lower.contains("linkedin"),
            has_location: self.location_keyword_regex.is_match(lower)
                || self.city_state_regex.is_match(lower),
            has_website: self.website_prefix_regex.is_match(lower)
                || self.website_tld_regex.is_match(lower),
        }
    }

    pub fn analyze_sections(&self, lower: &str) -> Vec<SectionCheck> {
        all_sections()
            .map(|section| Self::check_section(section, lower))
            .collect()
    }

    fn check_section(section: &SectionPattern, lower: &str) -> SectionCheck {
        let first_marker = section
            .patterns
            .iter()
            .filter_map(|pattern| lower.find(pattern))
            .min();

        let quality = match first_marker {
            None => SectionQuality::Missing,
            Some(start) => {
                let tokens = lower[start..]
                    .chars()
                    .take(SECTION_WINDOW_CHARS)
                    .collect::<String>()
                    .split_whitespace()
                    .count();
                if tokens > SECTION_GOOD_TOKENS {
                    SectionQuality::Good
                } else {
                    SectionQuality::NeedsImprovement
                }
            }
        };

        SectionCheck {
            name: section.name.to_string(),
            found: first_marker.is_some(),
            quality,
        }
    }

    pub fn analyze_action_verbs(&self, lower: &str) -> ActionVerbAnalysis {
        let found: Vec<String> = self
            .verb_set
            .matches(lower)
            .into_iter()
            .map(|idx| ACTION_VERBS[idx].to_string())
            .collect();
        let count = found.len();
        let percentage = ((count as f64 / ACTION_VERBS.len() as f64) * 100.0).round() as u32;

        ActionVerbAnalysis {
            found,
            count,
            percentage,
        }
    }

    /// Sum of matches across every achievement pattern; patterns may overlap.
    pub fn count_quantifiable_achievements(&self, normalized: &str) -> usize {
        self.achievement_patterns
            .iter()
            .map(|pattern| pattern.find_iter(normalized).count())
            .sum()
    }
}
