//! Report structures wrapping an analysis result with summary and metadata

use crate::processing::analyzer::AtsAnalysisResult;
use crate::processing::record::RecordScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sub-scores at or above this are reported as strengths.
const STRENGTH_THRESHOLD: u32 = 80;
/// Sub-scores below this are reported as improvement areas.
const IMPROVEMENT_THRESHOLD: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Headline numbers and verdict
    pub summary: ReportSummary,

    /// Full analysis result for the mode that produced it
    pub analysis: AnalysisBody,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", content = "result", rename_all = "lowercase")]
pub enum AnalysisBody {
    Text(AtsAnalysisResult),
    Record(RecordScore),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub overall: u32,
    pub verdict: String,
    pub components: Vec<ComponentScore>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub source_file: String,
    pub job_file: Option<String>,
}

/// How the report's suggestions read, independent of mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionLine {
    pub severity: Option<String>,
    pub message: String,
    pub fix: Option<String>,
}

impl AnalysisReport {
    pub fn from_text_analysis(
        result: AtsAnalysisResult,
        source_file: &str,
        job_file: Option<&str>,
    ) -> Self {
        let components = result.breakdown.components();
        Self {
            summary: ReportSummary::new(result.overall, &components),
            analysis: AnalysisBody::Text(result),
            metadata: ReportMetadata::new(source_file, job_file),
        }
    }

    pub fn from_record_score(score: RecordScore, source_file: &str) -> Self {
        let components = score.breakdown.components();
        Self {
            summary: ReportSummary::new(score.overall, &components),
            analysis: AnalysisBody::Record(score),
            metadata: ReportMetadata::new(source_file, None),
        }
    }

    pub fn mode_label(&self) -> &'static str {
        match self.analysis {
            AnalysisBody::Text(_) => "Resume text",
            AnalysisBody::Record(_) => "Resume record",
        }
    }

    pub fn suggestion_lines(&self) -> Vec<SuggestionLine> {
        match &self.analysis {
            AnalysisBody::Text(result) => result
                .suggestions
                .iter()
                .map(|s| SuggestionLine {
                    severity: Some(s.severity.to_string()),
                    message: s.message.clone(),
                    fix: Some(s.fix.clone()),
                })
                .collect(),
            AnalysisBody::Record(score) => score
                .suggestions
                .iter()
                .map(|message| SuggestionLine {
                    severity: None,
                    message: message.clone(),
                    fix: None,
                })
                .collect(),
        }
    }

    pub fn text_result(&self) -> Option<&AtsAnalysisResult> {
        match &self.analysis {
            AnalysisBody::Text(result) => Some(result),
            AnalysisBody::Record(_) => None,
        }
    }
}

impl ReportSummary {
    fn new(overall: u32, components: &[(&'static str, u32)]) -> Self {
        let strengths = components
            .iter()
            .filter(|(_, score)| *score >= STRENGTH_THRESHOLD)
            .map(|(name, score)| format!("{} ({}/100)", name, score))
            .collect();
        let improvement_areas = components
            .iter()
            .filter(|(_, score)| *score < IMPROVEMENT_THRESHOLD)
            .map(|(name, score)| format!("{} ({}/100)", name, score))
            .collect();

        Self {
            overall,
            verdict: verdict_for(overall).to_string(),
            components: components
                .iter()
                .map(|(name, score)| ComponentScore {
                    name: name.to_string(),
                    score: *score,
                })
                .collect(),
            strengths,
            improvement_areas,
        }
    }
}

impl ReportMetadata {
    fn new(source_file: &str, job_file: Option<&str>) -> Self {
        Self {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            source_file: source_file.to_string(),
            job_file: job_file.map(str::to_string),
        }
    }
}

pub fn verdict_for(overall: u32) -> &'static str {
    match overall {
        90..=u32::MAX => "Excellent - highly likely to pass ATS screening",
        80..=89 => "Very good - minor tweaks could help",
        70..=79 => "Good - some targeted improvements recommended",
        60..=69 => "Fair - several improvements needed",
        50..=59 => "Below average - significant improvements required",
        _ => "Poor - major revisions needed",
    }
}
