//! Weighted sub-scores for free-text analysis

use crate::config::TextWeights;
use crate::processing::ats_matcher::KeywordAnalysis;
use crate::processing::keyword_index::{
    EDUCATION_SECTION, EXPERIENCE_SECTION, SKILLS_SECTION, SUMMARY_SECTION,
};
use crate::processing::structure::{SectionQuality, StructuralSignals};
use crate::processing::text_processor::WordAnalysis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub keywords: u32,
    pub formatting: u32,
    pub completeness: u32,
    pub structure: u32,
    pub readability: u32,
}

impl AtsBreakdown {
    /// Sub-scores paired with their display names.
    pub fn components(&self) -> [(&'static str, u32); 5] {
        [
            ("Keywords", self.keywords),
            ("Formatting", self.formatting),
            ("Completeness", self.completeness),
            ("Structure", self.structure),
            ("Readability", self.readability),
        ]
    }
}

/// Round and clamp into `[0, 100]`.
pub(crate) fn clamp_score(score: f64) -> u32 {
    score.round().clamp(0.0, 100.0) as u32
}

pub fn score(
    structural: &StructuralSignals,
    words: &WordAnalysis,
    keywords: &KeywordAnalysis,
    has_job_description: bool,
) -> AtsBreakdown {
    AtsBreakdown {
        keywords: keyword_score(keywords, has_job_description),
        formatting: formatting_score(structural, words),
        completeness: completeness_score(structural, words),
        structure: structure_score(structural, words),
        readability: readability_score(structural, words),
    }
}

pub fn overall(breakdown: &AtsBreakdown, weights: &TextWeights) -> u32 {
    clamp_score(
        breakdown.keywords as f64 * weights.keywords
            + breakdown.formatting as f64 * weights.formatting
            + breakdown.completeness as f64 * weights.completeness
            + breakdown.structure as f64 * weights.structure
            + breakdown.readability as f64 * weights.readability,
    )
}

pub fn keyword_score(keywords: &KeywordAnalysis, has_job_description: bool) -> u32 {
    let found = keywords.found.len() as f64;
    let missing = keywords.missing.len() as f64;

    let mut score = (keywords.industry_match as f64).min(40.0);

    if has_job_description {
        let match_rate = if found + missing > 0.0 {
            found / (found + missing)
        } else {
            0.0
        };
        score += match_rate * 40.0;
    } else {
        score += 20.0;
    }

    score += (found * 2.0).min(20.0);

    clamp_score(score)
}

pub fn formatting_score(structural: &StructuralSignals, words: &WordAnalysis) -> u32 {
    let contact = &structural.contact_info;
    let mut score: i32 = 100;

    if !contact.has_email {
        score -= 15;
    }
    if !contact.has_phone {
        score -= 10;
    }
    if !contact.has_linked_in {
        score -= 5;
    }

    for section in structural.required_sections() {
        if !section.found {
            score -= 12;
        } else if section.quality == SectionQuality::NeedsImprovement {
            score -= 5;
        }
    }

    // 400-800 words is the comfortable range
    if words.word_count < 200 {
        score -= 15;
    } else if words.word_count < 400 {
        score -= 5;
    } else if words.word_count > 1200 {
        score -= 10;
    }

    if words.bullet_point_count < 3 {
        score -= 10;
    } else if words.bullet_point_count >= 10 {
        score += 5;
    }

    score.clamp(0, 100) as u32
}

pub fn completeness_score(structural: &StructuralSignals, words: &WordAnalysis) -> u32 {
    let contact = &structural.contact_info;
    let contact_fields = [
        contact.has_email,
        contact.has_phone,
        contact.has_linked_in,
        contact.has_location,
    ];
    let filled = contact_fields.iter().filter(|f| **f).count() as f64;
    let mut score = filled / contact_fields.len() as f64 * 20.0;

    let required = structural.required_sections();
    if !required.is_empty() {
        let found = required.iter().filter(|s| s.found).count() as f64;
        score += found / required.len() as f64 * 50.0;
    }

    let optional_found = structural
        .optional_sections()
        .iter()
        .filter(|s| s.found)
        .count() as f64;
    score += (optional_found / 3.0 * 15.0).min(15.0);

    if words.word_count >= 300 {
        score += 5.0;
    }
    if words.word_count >= 500 {
        score += 5.0;
    }
    if words.paragraph_count >= 4 {
        score += 5.0;
    }

    clamp_score(score)
}

pub fn structure_score(structural: &StructuralSignals, words: &WordAnalysis) -> u32 {
    let mut score: i32 = 100;

    if !structural.section_found(EXPERIENCE_SECTION) && !structural.section_found(EDUCATION_SECTION)
    {
        score -= 30;
    }
    if !structural.section_found(SUMMARY_SECTION) {
        score -= 15;
    }
    if !structural.section_found(SKILLS_SECTION) {
        score -= 10;
    }

    if words.avg_words_per_sentence > 30 {
        score -= 15;
    } else if words.avg_words_per_sentence > 25 {
        score -= 5;
    }

    if words.bullet_point_count >= 5 {
        score += 10;
    }

    score.clamp(0, 100) as u32
}

pub fn readability_score(structural: &StructuralSignals, words: &WordAnalysis) -> u32 {
    let verb_count = structural.action_verbs.count;
    let mut score = match verb_count {
        n if n >= 10 => 40,
        n if n >= 5 => 25,
        n if n >= 3 => 15,
        n => n * 3,
    };

    score += match words.avg_words_per_sentence {
        12..=20 => 30,
        8..=25 => 20,
        _ => 10,
    };

    score += match words.word_count {
        400..=800 => 30,
        300..=1000 => 20,
        n if n >= 200 => 10,
        _ => 0,
    };

    score.min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::structure::{ActionVerbAnalysis, ContactInfoCheck, SectionCheck};
    use crate::processing::keyword_index::all_sections;

    fn signals(found_sections: &[&str], contact: bool, verbs: usize) -> StructuralSignals {
        StructuralSignals {
            contact_info: ContactInfoCheck {
                has_email: contact,
                has_phone: contact,
                has_linked_in: contact,
                has_location: contact,
                has_website: contact,
            },
            sections: all_sections()
                .map(|s| {
                    let found = found_sections.contains(&s.name);
                    SectionCheck {
                        name: s.name.to_string(),
                        found,
                        quality: if found { SectionQuality::Good } else { SectionQuality::Missing },
                    }
                })
                .collect(),
            action_verbs: ActionVerbAnalysis {
                found: vec![],
                count: verbs,
                percentage: 0,
            },
            quantifiable_achievements: 0,
        }
    }

    fn words(word_count: usize, avg: usize, bullets: usize) -> WordAnalysis {
        WordAnalysis {
            word_count,
            sentence_count: if avg == 0 { 0 } else { word_count / avg },
            avg_words_per_sentence: avg,
            bullet_point_count: bullets,
            paragraph_count: 1,
        }
    }

    const REQUIRED: [&str; 5] = [
        "Contact Information",
        "Summary/Objective",
        "Work Experience",
        "Education",
        "Skills",
    ];

    #[test]
    fn test_keyword_score_without_job() {
        let analysis = KeywordAnalysis {
            found: vec!["a".into(), "b".into(), "c".into()],
            missing: vec![],
            industry_match: 50,
        };
        // 40 (capped) + 20 flat + 6 variety
        assert_eq!(keyword_score(&analysis, false), 66);
    }

    #[test]
    fn test_keyword_score_with_job() {
        let analysis = KeywordAnalysis {
            found: vec!["a".into(), "b".into(), "c".into()],
            missing: vec!["d".into()],
            industry_match: 10,
        };
        // 10 + 0.75 * 40 + 6
        assert_eq!(keyword_score(&analysis, true), 46);

        let empty = KeywordAnalysis { found: vec![], missing: vec![], industry_match: 0 };
        assert_eq!(keyword_score(&empty, true), 0);
    }

    #[test]
    fn test_formatting_penalties() {
        let bare = signals(&[], false, 0);
        // 100 - 30 contact - 60 sections - 15 length - 10 bullets
        assert_eq!(formatting_score(&bare, &words(50, 10, 0)), 0);

        let full = signals(&REQUIRED, true, 0);
        assert_eq!(formatting_score(&full, &words(600, 15, 10)), 100);
        assert_eq!(formatting_score(&full, &words(1500, 15, 0)), 80);
    }

    #[test]
    fn test_completeness() {
        let full = signals(&REQUIRED, true, 0);
        let mut stats = words(600, 15, 10);
        stats.paragraph_count = 4;
        // 20 + 50 + 0 optional + 15 depth
        assert_eq!(completeness_score(&full, &stats), 85);

        let mut with_optional = REQUIRED.to_vec();
        with_optional.extend(["Projects", "Awards", "Languages", "Volunteer"]);
        assert_eq!(completeness_score(&signals(&with_optional, true, 0), &stats), 100);
    }

    #[test]
    fn test_structure() {
        let none = signals(&[], false, 0);
        assert_eq!(structure_score(&none, &words(100, 35, 0)), 30);

        let full = signals(&REQUIRED, true, 0);
        assert_eq!(structure_score(&full, &words(500, 15, 5)), 100);
        assert_eq!(structure_score(&full, &words(500, 27, 0)), 95);
    }

    #[test]
    fn test_readability_tiers() {
        assert_eq!(readability_score(&signals(&[], false, 10), &words(600, 15, 0)), 100);
        assert_eq!(readability_score(&signals(&[], false, 5), &words(350, 22, 0)), 65);
        assert_eq!(readability_score(&signals(&[], false, 2), &words(100, 40, 0)), 16);
    }

    #[test]
    fn test_overall_weighting() {
        let breakdown = AtsBreakdown {
            keywords: 100,
            formatting: 50,
            completeness: 50,
            structure: 0,
            readability: 100,
        };
        // 30 + 10 + 10 + 0 + 15
        assert_eq!(overall(&breakdown, &TextWeights::default()), 65);
    }
}
