//! Analysis pipeline: normalization, structural and keyword signals, scoring and suggestions

use crate::config::TextWeights;
use crate::error::Result;
use crate::processing::ats_matcher::{KeywordAnalysis, KeywordMatcher};
use crate::processing::keyword_index::{EDUCATION_SECTION, EXPERIENCE_SECTION};
use crate::processing::scorer::{self, AtsBreakdown};
use crate::processing::structure::{
    ActionVerbAnalysis, ContactInfoCheck, SectionCheck, StructuralAnalyzer,
};
use crate::processing::suggestions::{generate_suggestions, AtsSuggestion};
use crate::processing::text_processor::{unify_line_endings, TextProcessor};
use serde::{Deserialize, Serialize};

/// Result of analysing one free-text resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysisResult {
    pub overall: u32,
    pub breakdown: AtsBreakdown,
    pub suggestions: Vec<AtsSuggestion>,
    pub keywords: KeywordAnalysis,
    pub details: AnalysisDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: usize,
    pub bullet_point_count: usize,
    pub has_contact_info: ContactInfoCheck,
    pub sections: Vec<SectionCheck>,
    pub action_verbs: ActionVerbAnalysis,
    pub quantifiable_achievements: usize,
    pub education_found: bool,
    pub experience_found: bool,
}

/// Stateless once built; one instance can analyse any number of resumes.
pub struct AtsAnalyzer {
    text_processor: TextProcessor,
    structural_analyzer: StructuralAnalyzer,
    keyword_matcher: KeywordMatcher,
    weights: TextWeights,
}

impl AtsAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_weights(TextWeights::default())
    }

    pub fn with_weights(weights: TextWeights) -> Result<Self> {
        Ok(Self {
            text_processor: TextProcessor::new(),
            structural_analyzer: StructuralAnalyzer::new(),
            keyword_matcher: KeywordMatcher::new()?,
            weights,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        self.text_processor.normalize(text)
    }

    pub fn analyze(&self, resume_text: &str, job_description: Option<&str>) -> AtsAnalysisResult {
        log::info!("Analyzing resume ({} bytes)", resume_text.len());

        let normalized = self.text_processor.normalize(resume_text);
        let lower = normalized.to_lowercase();
        let layout = unify_line_endings(resume_text);

        let job_keywords = match job_description {
            Some(jd) if !jd.trim().is_empty() => self.keyword_matcher.extract_job_keywords(jd),
            _ => Vec::new(),
        };
        log::debug!("Extracted {} job keywords", job_keywords.len());

        let structural = self.structural_analyzer.analyze(&normalized, &lower);
        let words = self.text_processor.analyze_words(&normalized, &layout);
        let keywords = self.keyword_matcher.match_keywords(&lower, &job_keywords);

        log::debug!(
            "Signals: {} words, {} sentences, {} bullets, {} action verbs, {} achievements",
            words.word_count,
            words.sentence_count,
            words.bullet_point_count,
            structural.action_verbs.count,
            structural.quantifiable_achievements
        );
        log::debug!(
            "Keywords: {} found, {} missing, industry match {}%",
            keywords.found.len(),
            keywords.missing.len(),
            keywords.industry_match
        );

        let breakdown = scorer::score(&structural, &words, &keywords, !job_keywords.is_empty());
        let overall = scorer::overall(&breakdown, &self.weights);
        log::debug!("Breakdown: {:?}, overall {}", breakdown, overall);

        let suggestions = generate_suggestions(&breakdown, &structural, &keywords, &words);

        let details = AnalysisDetails {
            word_count: words.word_count,
            sentence_count: words.sentence_count,
            avg_words_per_sentence: words.avg_words_per_sentence,
            bullet_point_count: words.bullet_point_count,
            education_found: structural.section_found(EDUCATION_SECTION),
            experience_found: structural.section_found(EXPERIENCE_SECTION),
            has_contact_info: structural.contact_info,
            sections: structural.sections,
            action_verbs: structural.action_verbs,
            quantifiable_achievements: structural.quantifiable_achievements,
        };

        AtsAnalysisResult {
            overall,
            breakdown,
            suggestions,
            keywords,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Roe\njane@example.com | (555) 123-4567 | linkedin.com/in/jane\n\n\
        Summary\nBackend engineer focused on Rust and Python services.\n\n\
        Experience\n- Led a team of 5 engineers\n- Increased throughput by 40%\n\n\
        Education\nBachelor of Science, Computer Science\n\n\
        Skills\nRust, Python, Docker, Kubernetes";

    #[test]
    fn test_analysis_details() {
        let analyzer = AtsAnalyzer::new().unwrap();
        let result = analyzer.analyze(RESUME, None);

        assert!(result.details.education_found);
        assert!(result.details.experience_found);
        assert!(result.details.has_contact_info.has_email);
        // the hyphen in the phone number counts as a bullet glyph too
        assert_eq!(result.details.bullet_point_count, 3);
        assert!(result.keywords.missing.is_empty());
        assert!(result.overall <= 100);
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let analyzer = AtsAnalyzer::new().unwrap();
        let without = analyzer.analyze(RESUME, None);
        let blank = analyzer.analyze(RESUME, Some("   "));
        assert_eq!(without, blank);
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let analyzer = AtsAnalyzer::new().unwrap();
        let json = serde_json::to_value(analyzer.analyze(RESUME, None)).unwrap();

        assert!(json["details"]["avgWordsPerSentence"].is_number());
        assert!(json["details"]["hasContactInfo"]["hasLinkedIn"].as_bool().unwrap());
        assert!(json["keywords"]["industryMatch"].is_number());
    }
}
