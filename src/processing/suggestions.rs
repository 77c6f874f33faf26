//! Rule-based improvement suggestions

use crate::processing::ats_matcher::KeywordAnalysis;
use crate::processing::keyword_index::ACTION_VERBS;
use crate::processing::scorer::AtsBreakdown;
use crate::processing::structure::StructuralSignals;
use crate::processing::text_processor::WordAnalysis;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_SUGGESTIONS: usize = 10;
const MISSING_KEYWORDS_LISTED: usize = 5;
const EXAMPLE_VERBS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsSuggestion {
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub fix: String,
}

impl AtsSuggestion {
    fn new(category: &str, severity: Severity, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            severity,
            message: message.into(),
            fix: fix.into(),
        }
    }
}

/// Evaluate every rule, then order by severity (stable) and keep the first ten.
pub fn generate_suggestions(
    breakdown: &AtsBreakdown,
    structural: &StructuralSignals,
    keywords: &KeywordAnalysis,
    words: &WordAnalysis,
) -> Vec<AtsSuggestion> {
    let mut suggestions = Vec::new();
    let contact = &structural.contact_info;

    if !contact.has_email {
        suggestions.push(AtsSuggestion::new(
            "contact",
            Severity::High,
            "Missing email address",
            "Add a professional email address at the top of your resume. Use a format like firstname.lastname@email.com",
        ));
    }
    if !contact.has_phone {
        suggestions.push(AtsSuggestion::new(
            "contact",
            Severity::High,
            "Missing phone number",
            "Include a phone number where recruiters can reach you. Format it consistently (e.g., (123) 456-7890)",
        ));
    }
    if !contact.has_linked_in {
        suggestions.push(AtsSuggestion::new(
            "contact",
            Severity::Medium,
            "No LinkedIn profile detected",
            "Add your LinkedIn profile URL. Many recruiters check LinkedIn to learn more about candidates",
        ));
    }

    for section in structural.required_sections().iter().filter(|s| !s.found) {
        suggestions.push(AtsSuggestion::new(
            "structure",
            Severity::High,
            format!("Missing \"{}\" section", section.name),
            format!(
                "Add a clear \"{}\" section to your resume. This is essential for ATS parsing",
                section.name
            ),
        ));
    }

    if breakdown.keywords < 60 {
        suggestions.push(AtsSuggestion::new(
            "keywords",
            Severity::High,
            "Low keyword density for industry terms",
            "Add more industry-specific keywords throughout your resume. Include relevant technical skills, tools, and methodologies",
        ));
    }
    if !keywords.missing.is_empty() {
        let listed: Vec<&str> = keywords
            .missing
            .iter()
            .take(MISSING_KEYWORDS_LISTED)
            .map(String::as_str)
            .collect();
        suggestions.push(AtsSuggestion::new(
            "keywords",
            Severity::Medium,
            format!("Missing key terms from job description: {}", listed.join(", ")),
            "Incorporate these keywords naturally into your experience descriptions and skills section",
        ));
    }

    if structural.action_verbs.count < 5 {
        suggestions.push(AtsSuggestion::new(
            "content",
            Severity::High,
            "Not enough action verbs used",
            format!(
                "Start bullet points with strong action verbs like: {}. These make your achievements stand out",
                ACTION_VERBS[..EXAMPLE_VERBS].join(", ")
            ),
        ));
    }
    if structural.quantifiable_achievements < 3 {
        suggestions.push(AtsSuggestion::new(
            "content",
            Severity::High,
            "Few quantifiable achievements found",
            "Add numbers, percentages, and metrics to demonstrate impact. E.g., \"Increased sales by 25%\" or \"Managed team of 10\"",
        ));
    }

    if words.word_count < 300 {
        suggestions.push(AtsSuggestion::new(
            "completeness",
            Severity::High,
            "Resume appears too short",
            "Expand your resume with more details about your responsibilities, achievements, and skills. Aim for at least 400-600 words",
        ));
    } else if words.word_count > 1000 {
        suggestions.push(AtsSuggestion::new(
            "formatting",
            Severity::Medium,
            "Resume may be too long",
            "Consider condensing your content. Focus on the most relevant and recent experience. Aim for 1-2 pages maximum",
        ));
    }

    if words.bullet_point_count < 5 {
        suggestions.push(AtsSuggestion::new(
            "formatting",
            Severity::Medium,
            "Limited use of bullet points",
            "Use bullet points to list achievements and responsibilities. This improves readability and ATS parsing",
        ));
    }
    if words.avg_words_per_sentence > 25 {
        suggestions.push(AtsSuggestion::new(
            "readability",
            Severity::Low,
            "Sentences are too long on average",
            "Break down long sentences into shorter, more concise statements. Aim for 15-20 words per sentence",
        ));
    }

    // sort_by_key is stable, so rule order survives within a severity
    suggestions.sort_by_key(|s| s.severity);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
