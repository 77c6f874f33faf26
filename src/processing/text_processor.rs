//! Text normalization and word/sentence statistics

use crate::processing::keyword_index::{BULLET_GLYPHS, JOB_STOP_WORDS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
    word_regex: Regex,
    sentence_regex: Regex,
    paragraph_regex: Regex,
    job_token_regex: Regex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAnalysis {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: usize,
    pub bullet_point_count: usize,
    pub paragraph_count: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let word_regex = Regex::new(r"[A-Za-z0-9_]+").expect("Invalid word regex");
        let sentence_regex = Regex::new(r"[.!?]+").expect("Invalid sentence regex");
        let paragraph_regex = Regex::new(r"\n\s*\n").expect("Invalid paragraph regex");
        let job_token_regex =
            Regex::new(r"(?-u:\b)[a-z]+(?:[-./][a-z]+)*(?-u:\b)").expect("Invalid job token regex");

        Self {
            stop_words: JOB_STOP_WORDS.iter().copied().collect(),
            whitespace_regex,
            word_regex,
            sentence_regex,
            paragraph_regex,
            job_token_regex,
        }
    }

    /// Unify line endings, collapse every whitespace run to a single space and trim.
    ///
    /// Applying it to already-normalized text returns the same string.
    pub fn normalize(&self, text: &str) -> String {
        let unified = unify_line_endings(text);
        self.whitespace_regex
            .replace_all(&unified, " ")
            .trim()
            .to_string()
    }

    /// Word, sentence and bullet statistics over normalized text.
    ///
    /// `layout_text` is the same document with line endings unified but whitespace
    /// untouched; paragraphs are only visible there.
    pub fn analyze_words(&self, normalized: &str, layout_text: &str) -> WordAnalysis {
        let word_count = self.word_regex.find_iter(normalized).count();
        let sentence_count = self
            .sentence_regex
            .split(normalized)
            .filter(|s| !s.trim().is_empty())
            .count();
        let bullet_point_count = normalized
            .chars()
            .filter(|c| BULLET_GLYPHS.contains(c))
            .count();
        let paragraph_count = self
            .paragraph_regex
            .split(layout_text)
            .filter(|p| !p.trim().is_empty())
            .count();

        let avg_words_per_sentence = if sentence_count > 0 {
            (word_count as f64 / sentence_count as f64).round() as usize
        } else {
            0
        };

        WordAnalysis {
            word_count,
            sentence_count,
            avg_words_per_sentence,
            bullet_point_count,
            paragraph_count,
        }
    }

    /// Lower-case alphabetic tokens (internal `-`, `.` and `/` allowed), without
    /// stop words and tokens of two characters or fewer.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.job_token_regex
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| token.len() > 2 && !self.stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// Most frequent tokens first; ties keep the order of first appearance.
    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in self.tokenize(text) {
            match index.get(&token) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    index.insert(token.clone(), order.len());
                    order.push((token, 1));
                }
            }
        }

        // stable sort keeps first-seen order among equal counts
        order.sort_by(|a, b| b.1.cmp(&a.1));

        order
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word)
            .collect()
    }
}

/// Convert `\r\n` and lone `\r` to `\n` and tabs to spaces.
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', " ")
}
