//! Scoring of structured resume records
//!
//! A record is the builder's stored resume: typed fields instead of free text.
//! Sub-scores come from field presence and length; keyword and verb checks run
//! as substring tests over the lower-cased JSON serialization of the record.

use crate::config::RecordWeights;
use crate::error::{AtsError, Result};
use crate::processing::keyword_index::{RECORD_ACTION_VERBS, RECORD_KEYWORDS};
use crate::processing::scorer::clamp_score;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SUMMARY_MIN_CHARS: usize = 50;
const SUMMARY_GOOD_CHARS: usize = 100;
const MIN_VISIBLE_SKILLS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub category: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

impl ResumeRecord {
    pub fn visible_skill_count(&self) -> usize {
        self.skills.iter().filter(|s| !s.is_hidden).count()
    }

    fn summary_chars(&self) -> usize {
        self.personal_info
            .summary
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(0)
    }

    fn has_summary(&self) -> bool {
        self.summary_chars() > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBreakdown {
    pub keywords: u32,
    pub formatting: u32,
    pub completeness: u32,
    pub structure: u32,
    pub best_practices: u32,
}

impl RecordBreakdown {
    pub fn components(&self) -> [(&'static str, u32); 5] {
        [
            ("Keywords", self.keywords),
            ("Formatting", self.formatting),
            ("Completeness", self.completeness),
            ("Structure", self.structure),
            ("Best Practices", self.best_practices),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordScore {
    pub overall: u32,
    pub breakdown: RecordBreakdown,
    pub suggestions: Vec<String>,
}

/// Parse and validate a record exported as JSON.
pub fn import_record(json: &str) -> Result<ResumeRecord> {
    let value: Value = serde_json::from_str(json)
        .map_err(|_| AtsError::MalformedInput("Invalid JSON format".to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| AtsError::MalformedInput("Invalid JSON format".to_string()))?;

    let personal = match object.get("personalInfo") {
        Some(Value::Object(personal)) => personal,
        _ => {
            return Err(AtsError::MalformedInput(
                "Missing required field: personalInfo".to_string(),
            ))
        }
    };

    let filled = |field: &str| {
        personal
            .get(field)
            .and_then(Value::as_str)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    };
    if !(filled("firstName") && filled("lastName") && filled("email")) {
        return Err(AtsError::MalformedInput(
            "Missing required personal information fields".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| AtsError::MalformedInput(format!("Invalid resume record: {}", e)))
}

pub fn score_record(record: &ResumeRecord, weights: &RecordWeights) -> Result<RecordScore> {
    let serialized = serde_json::to_string(record)?.to_lowercase();

    let breakdown = RecordBreakdown {
        keywords: keywords_score(&serialized),
        formatting: formatting_score(record),
        completeness: completeness_score(record),
        structure: structure_score(record),
        best_practices: best_practices_score(record, &serialized),
    };

    let overall = clamp_score(
        breakdown.keywords as f64 * weights.keywords
            + breakdown.formatting as f64 * weights.formatting
            + breakdown.completeness as f64 * weights.completeness
            + breakdown.structure as f64 * weights.structure
            + breakdown.best_practices as f64 * weights.best_practices,
    );

    log::debug!("Record breakdown: {:?}, overall {}", breakdown, overall);

    Ok(RecordScore {
        overall,
        breakdown,
        suggestions: record_suggestions(record, &breakdown),
    })
}

fn fraction_found(haystack: &str, needles: &[&str]) -> f64 {
    let found = needles.iter().filter(|n| haystack.contains(*n)).count();
    found as f64 / needles.len() as f64
}

fn keywords_score(serialized: &str) -> u32 {
    clamp_score(fraction_found(serialized, RECORD_KEYWORDS) * 100.0)
}

fn formatting_score(record: &ResumeRecord) -> u32 {
    let info = &record.personal_info;
    let mut score: i32 = 100;

    if info.first_name.is_empty() || info.last_name.is_empty() {
        score -= 20;
    }
    if info.email.is_empty() {
        score -= 10;
    }
    if !record.work_experience.iter().any(|exp| !exp.start_date.is_empty()) {
        score -= 15;
    }
    if record.work_experience.is_empty() {
        score -= 20;
    }
    if record.education.is_empty() {
        score -= 15;
    }
    if record.visible_skill_count() == 0 {
        score -= 10;
    }

    score.max(0) as u32
}

fn filled_fraction(fields: &[bool]) -> f64 {
    fields.iter().filter(|f| **f).count() as f64 / fields.len() as f64
}

fn completeness_score(record: &ResumeRecord) -> u32 {
    let info = &record.personal_info;
    let present = |field: &Option<String>| field.as_deref().map(|s| !s.is_empty()).unwrap_or(false);

    let mut score = filled_fraction(&[
        !info.first_name.is_empty(),
        !info.last_name.is_empty(),
        !info.email.is_empty(),
        present(&info.phone),
        present(&info.summary),
    ]) * 20.0;

    if let Some(exp) = record.work_experience.first() {
        score += filled_fraction(&[
            !exp.company.is_empty(),
            !exp.position.is_empty(),
            !exp.start_date.is_empty(),
            !exp.description.is_empty(),
        ]) * 30.0;
    }

    if let Some(edu) = record.education.first() {
        score += filled_fraction(&[
            !edu.institution.is_empty(),
            !edu.degree.is_empty(),
            !edu.field.is_empty(),
            !edu.start_date.is_empty(),
        ]) * 20.0;
    }

    if record.visible_skill_count() > 0 {
        score += 15.0;
    }
    for extra in [
        !record.projects.is_empty(),
        !record.certifications.is_empty(),
        !record.languages.is_empty(),
    ] {
        if extra {
            score += 5.0;
        }
    }

    clamp_score(score)
}

fn structure_score(record: &ResumeRecord) -> u32 {
    let mut score: i32 = 100;

    if record.work_experience.is_empty() && record.education.is_empty() {
        score -= 30;
    }

    let out_of_order = record.work_experience.windows(2).any(|pair| {
        match (parse_date(&pair[0].start_date), parse_date(&pair[1].start_date)) {
            (Some(current), Some(next)) => current < next,
            _ => false,
        }
    });
    if out_of_order {
        score -= 10;
    }

    if record.summary_chars() < SUMMARY_MIN_CHARS {
        score -= 15;
    }

    score.max(0) as u32
}

fn best_practices_score(record: &ResumeRecord, serialized: &str) -> u32 {
    let mut score = fraction_found(serialized, RECORD_ACTION_VERBS) * 50.0;

    if serialized.chars().any(|c| c.is_ascii_digit()) {
        score += 30.0;
    }
    if record.summary_chars() >= SUMMARY_GOOD_CHARS {
        score += 20.0;
    }

    clamp_score(score)
}

fn record_suggestions(record: &ResumeRecord, breakdown: &RecordBreakdown) -> Vec<String> {
    let rules = [
        (
            breakdown.keywords < 70,
            "Add more industry-relevant keywords to improve discoverability",
        ),
        (
            breakdown.formatting < 80,
            "Ensure all required sections are filled out completely",
        ),
        (
            breakdown.completeness < 80,
            "Fill out all resume sections to improve completeness score",
        ),
        (
            breakdown.structure < 80,
            "Add a professional summary and ensure proper section ordering",
        ),
        (
            breakdown.best_practices < 70,
            "Use action verbs and include quantifiable achievements",
        ),
        (
            record.has_summary() && record.summary_chars() < SUMMARY_GOOD_CHARS,
            "Expand your professional summary to at least 100 characters",
        ),
        (
            record.work_experience.is_empty(),
            "Add work experience to strengthen your resume",
        ),
        (
            record.visible_skill_count() < MIN_VISIBLE_SKILLS,
            "Add more skills to showcase your capabilities",
        ),
    ];

    rules
        .into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, message)| message.to_string())
        .collect()
}

/// Best-effort start-date parsing; `None` when the format is not recognised.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%m/%d/%Y") {
        return Some(date);
    }
    value
        .parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}
