//! Keyword matching against the industry catalog and job-description vocabulary

use crate::error::{AtsError, Result};
use crate::processing::keyword_index::{all_industry_keywords, industry_keywords, GENERAL_INDUSTRY};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Frequency-ranked job-description tokens kept before catalog hits are appended.
pub const JOB_KEYWORD_LIMIT: usize = 30;
pub const MAX_FOUND_KEYWORDS: usize = 20;
pub const MAX_MISSING_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub industry_match: u32,
}

/// Substring matcher over the industry keyword catalog.
///
/// A keyword counts as present when its lower-cased form occurs anywhere in the
/// text; there is no word-boundary check, so "java" is present in "javascript".
pub struct KeywordMatcher {
    catalog: Vec<&'static str>,
    catalog_matcher: AhoCorasick,
    general_keywords: &'static [&'static str],
    text_processor: TextProcessor,
}

impl KeywordMatcher {
    pub fn new() -> Result<Self> {
        let catalog = all_industry_keywords();

        let catalog_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&catalog)
            .map_err(|e| AtsError::Processing(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            catalog,
            catalog_matcher,
            general_keywords: industry_keywords(GENERAL_INDUSTRY),
            text_processor: TextProcessor::new(),
        })
    }

    /// Catalog keywords occurring in `text`, in catalog order.
    pub fn catalog_hits(&self, text: &str) -> Vec<&'static str> {
        let mut present = vec![false; self.catalog.len()];
        for mat in self.catalog_matcher.find_overlapping_iter(text) {
            present[mat.pattern().as_usize()] = true;
        }

        self.catalog
            .iter()
            .zip(present)
            .filter_map(|(keyword, hit)| hit.then_some(*keyword))
            .collect()
    }

    /// Top frequency-ranked tokens of the job description followed by every catalog
    /// keyword it mentions, duplicates removed.
    pub fn extract_job_keywords(&self, job_description: &str) -> Vec<String> {
        let lower = job_description.to_lowercase();
        let ranked = self
            .text_processor
            .extract_keywords(&lower, JOB_KEYWORD_LIMIT);

        let mut seen = HashSet::new();
        ranked
            .into_iter()
            .chain(self.catalog_hits(&lower).into_iter().map(str::to_string))
            .filter(|kw| seen.insert(kw.clone()))
            .collect()
    }

    /// Compare lower-cased resume text against the catalog and any job keywords.
    pub fn match_keywords(&self, lower: &str, job_keywords: &[String]) -> KeywordAnalysis {
        let catalog_found = self.catalog_hits(lower);

        let mut seen: HashSet<String> = catalog_found.iter().map(|kw| kw.to_string()).collect();
        let mut found: Vec<String> = catalog_found.iter().map(|kw| kw.to_string()).collect();
        for keyword in job_keywords {
            let keyword_lower = keyword.to_lowercase();
            if lower.contains(&keyword_lower) && seen.insert(keyword.clone()) {
                found.push(keyword.clone());
            }
        }
        found.truncate(MAX_FOUND_KEYWORDS);

        let missing: Vec<String> = job_keywords
            .iter()
            .filter(|kw| !lower.contains(&kw.to_lowercase()))
            .take(MAX_MISSING_KEYWORDS)
            .cloned()
            .collect();

        KeywordAnalysis {
            found,
            missing,
            industry_match: self.industry_match(lower),
        }
    }

    /// Percentage of the general (soft-skill) keyword list present in the text.
    pub fn industry_match(&self, lower: &str) -> u32 {
        if self.general_keywords.is_empty() {
            return 0;
        }
        let matched = self
            .general_keywords
            .iter()
            .filter(|kw| lower.contains(*kw))
            .count();
        ((matched as f64 / self.general_keywords.len() as f64) * 100.0).round() as u32
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }
}
