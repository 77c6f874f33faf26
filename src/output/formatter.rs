//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use crate::processing::analyzer::AtsAnalysisResult;
use crate::processing::structure::SectionQuality;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Compatibility Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .score-breakdown {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .score-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .suggestion {
            background: white;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        .severity-high { border-left-color: #dc3545; }
        .severity-medium { border-left-color: #ffc107; }
        .severity-low { border-left-color: #28a745; }
        .strengths, .improvements {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            margin: 10px 0;
        }
        .strengths { border-left: 4px solid #28a745; }
        .improvements { border-left: 4px solid #ffc107; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Compatibility Report</h1>
            <p>{{ mode }} | Generated {{ generated_at }}</p>
            <h2>Overall Score: {{ overall }}/100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <p><em>{{ verdict }}</em></p>
        </div>

        <div class="section">
            <h2>Score Breakdown</h2>
            <div class="score-breakdown">
                {% for component in components %}
                <div class="score-item"><strong>{{ component.name }}</strong><br>{{ component.score }}/100</div>
                {% endfor %}
            </div>
        </div>

        {% if !strengths.is_empty() %}
        <div class="strengths">
            <h3>Strengths</h3>
            <ul>{% for item in strengths %}<li>{{ item }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        {% if !improvement_areas.is_empty() %}
        <div class="improvements">
            <h3>Improvement Areas</h3>
            <ul>{% for item in improvement_areas %}<li>{{ item }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        {% if !found_keywords.is_empty() || !missing_keywords.is_empty() %}
        <div class="section">
            <h2>Keywords</h2>
            <p><strong>Found:</strong> {{ found_keywords }}</p>
            {% if !missing_keywords.is_empty() %}
            <p><strong>Missing:</strong> {{ missing_keywords }}</p>
            {% endif %}
        </div>
        {% endif %}

        <div class="section">
            <h2>Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion {{ suggestion.css_class }}">
                <strong>{{ suggestion.message }}</strong>
                {% if !suggestion.fix.is_empty() %}<p>{{ suggestion.fix }}</p>{% endif %}
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by ATS Analyzer v{{ version }}</strong></p>
            <p><strong>Source:</strong> {{ source_file }}{% if !job_file.is_empty() %} | <strong>Job:</strong> {{ job_file }}{% endif %}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    mode: String,
    generated_at: String,
    overall: u32,
    score_class: String,
    score_label: String,
    verdict: String,
    components: Vec<ComponentScore>,
    strengths: Vec<String>,
    improvement_areas: Vec<String>,
    found_keywords: String,
    missing_keywords: String,
    suggestions: Vec<HtmlSuggestion>,
    version: String,
    source_file: String,
    job_file: String,
}

#[derive(Debug, Clone)]
struct HtmlSuggestion {
    css_class: String,
    message: String,
    fix: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u32) -> String {
        let (badge, color) = match score {
            90..=u32::MAX => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_severity(&self, severity: Option<&str>) -> String {
        match severity {
            Some("high") => self.colorize("[HIGH]  ", Color::Red),
            Some("medium") => self.colorize("[MEDIUM]", Color::Yellow),
            Some(_) => self.colorize("[LOW]   ", Color::Green),
            None => "-".to_string(),
        }
    }

    fn score_bar(score: u32) -> String {
        let filled = (score.min(100) / 5) as usize;
        format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
    }

    fn format_details(&self, result: &AtsAnalysisResult) -> String {
        let details = &result.details;
        let mut output = String::new();

        output.push_str(&self.format_header("Detailed Analysis", 2));
        output.push_str(&format!(
            "Words: {} | Sentences: {} | Avg words/sentence: {} | Bullets: {}\n",
            details.word_count,
            details.sentence_count,
            details.avg_words_per_sentence,
            details.bullet_point_count
        ));
        output.push_str(&format!(
            "Quantifiable achievements: {}\n",
            details.quantifiable_achievements
        ));

        let contact = &details.has_contact_info;
        let contact_fields = [
            ("email", contact.has_email),
            ("phone", contact.has_phone),
            ("LinkedIn", contact.has_linked_in),
            ("location", contact.has_location),
            ("website", contact.has_website),
        ];
        let contact_line: Vec<String> = contact_fields
            .iter()
            .map(|(name, present)| format!("{} {}", if *present { "+" } else { "-" }, name))
            .collect();
        output.push_str(&format!("Contact: {}\n", contact_line.join("  ")));

        output.push_str(&self.format_header("Sections", 3));
        for section in &details.sections {
            let (label, color) = match section.quality {
                SectionQuality::Good => ("good", Color::Green),
                SectionQuality::NeedsImprovement => ("needs improvement", Color::Yellow),
                SectionQuality::Missing => ("missing", Color::Red),
            };
            output.push_str(&format!("  {:<22} {}\n", section.name, self.colorize(label, color)));
        }

        output.push_str(&self.format_header("Action Verbs", 3));
        output.push_str(&format!(
            "{} found ({}% of catalog): {}\n",
            details.action_verbs.count,
            details.action_verbs.percentage,
            details.action_verbs.found.join(", ")
        ));

        output.push_str(&self.format_header("Keywords", 3));
        output.push_str(&format!("Industry match: {}%\n", result.keywords.industry_match));
        output.push_str(&format!(
            "Found: {}\n",
            self.colorize(&result.keywords.found.join(", "), Color::Green)
        ));
        if !result.keywords.missing.is_empty() {
            output.push_str(&format!(
                "Missing: {}\n",
                self.colorize(&result.keywords.missing.join(", "), Color::Red)
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str(&self.format_header("ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "{} | Generated: {}\n",
            report.mode_label(),
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}/100 {}\n",
            summary.overall,
            self.format_score_badge(summary.overall)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for component in &summary.components {
            output.push_str(&format!(
                "  {:<15} {:>3}  {}\n",
                component.name,
                component.score,
                Self::score_bar(component.score)
            ));
        }

        if !summary.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &summary.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !summary.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Improvement Areas", 3));
            for area in &summary.improvement_areas {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
            }
        }

        let suggestions = report.suggestion_lines();
        output.push_str(&self.format_header("Suggestions", 2));
        if suggestions.is_empty() {
            output.push_str("No suggestions - nice work.\n");
        }
        for (i, suggestion) in suggestions.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {}\n",
                i + 1,
                self.format_severity(suggestion.severity.as_deref()),
                suggestion.message
            ));
            if let Some(fix) = &suggestion.fix {
                output.push_str(&format!("   {}\n", self.colorize(fix, Color::BrightBlack)));
            }
        }

        if self.detailed {
            if let Some(result) = report.text_result() {
                output.push_str(&self.format_details(result));
            }
        }

        output.push_str(&format!(
            "\nGenerated by ATS Analyzer v{} | Source: {}\n",
            report.metadata.analyzer_version, report.metadata.source_file
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_label(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str("# ATS Compatibility Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Mode:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.mode_label()
            ));
            output.push_str(&format!(
                "**Source:** `{}`",
                Self::file_label(&report.metadata.source_file)
            ));
            if let Some(job) = &report.metadata.job_file {
                output.push_str(&format!(" | **Job:** `{}`", Self::file_label(job)));
            }
            output.push_str("\n\n");
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Overall Score:** {}/100\n\n", summary.overall));
        output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        for component in &summary.components {
            output.push_str(&format!("| {} | {} |\n", component.name, component.score));
        }
        output.push('\n');

        if !summary.strengths.is_empty() {
            output.push_str("### Strengths\n\n");
            for strength in &summary.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !summary.improvement_areas.is_empty() {
            output.push_str("### Improvement Areas\n\n");
            for area in &summary.improvement_areas {
                output.push_str(&format!("- {}\n", area));
            }
            output.push('\n');
        }

        if let Some(result) = report.text_result() {
            output.push_str("## Keywords\n\n");
            output.push_str(&format!("**Industry match:** {}%\n\n", result.keywords.industry_match));
            if !result.keywords.found.is_empty() {
                output.push_str(&format!("**Found:** {}\n\n", result.keywords.found.join(", ")));
            }
            if !result.keywords.missing.is_empty() {
                output.push_str(&format!("**Missing:** {}\n\n", result.keywords.missing.join(", ")));
            }
        }

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in report.suggestion_lines().iter().enumerate() {
            match &suggestion.severity {
                Some(severity) => output.push_str(&format!(
                    "{}. **[{}]** {}\n",
                    i + 1,
                    severity.to_uppercase(),
                    suggestion.message
                )),
                None => output.push_str(&format!("{}. {}\n", i + 1, suggestion.message)),
            }
            if let Some(fix) = &suggestion.fix {
                output.push_str(&format!("   - {}\n", fix));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let (score_class, score_label) = match report.summary.overall {
            90..=u32::MAX => ("score-excellent", "Excellent"),
            80..=89 => ("score-good", "Very Good"),
            70..=79 => ("score-good", "Good"),
            60..=69 => ("score-fair", "Fair"),
            _ => ("score-poor", "Poor"),
        };

        let (found_keywords, missing_keywords) = report
            .text_result()
            .map(|r| (r.keywords.found.join(", "), r.keywords.missing.join(", ")))
            .unwrap_or_default();

        let suggestions = report
            .suggestion_lines()
            .into_iter()
            .map(|line| HtmlSuggestion {
                css_class: line
                    .severity
                    .as_deref()
                    .map(|s| format!("severity-{}", s))
                    .unwrap_or_default(),
                message: line.message,
                fix: line.fix.unwrap_or_default(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            mode: report.mode_label().to_string(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            overall: report.summary.overall,
            score_class: score_class.to_string(),
            score_label: score_label.to_string(),
            verdict: report.summary.verdict.clone(),
            components: report.summary.components.clone(),
            strengths: report.summary.strengths.clone(),
            improvement_areas: report.summary.improvement_areas.clone(),
            found_keywords,
            missing_keywords,
            suggestions,
            version: report.metadata.analyzer_version.clone(),
            source_file: report.metadata.source_file.clone(),
            job_file: report.metadata.job_file.clone().unwrap_or_default(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AtsAnalyzer;

    fn text_report() -> AnalysisReport {
        let analyzer = AtsAnalyzer::new().unwrap();
        let result = analyzer.analyze(
            "Jane Doe jane@example.com\nSummary\nExperience\n- Built <fast> APIs in Rust",
            Some("Rust and Go engineer"),
        );
        AnalysisReport::from_text_analysis(result, "cv.txt", Some("job.txt"))
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&text_report()).unwrap();

        assert!(output.contains("ATS COMPATIBILITY ANALYSIS"));
        assert!(output.contains("Overall Score:"));
        assert!(output.contains("Missing phone number"));
        assert!(output.contains("Sections"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_through_value() {
        let output = JsonFormatter::new(false).format_report(&text_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["analysis"]["mode"], "text");
        assert!(value["analysis"]["result"]["breakdown"]["keywords"].is_number());
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true).format_report(&text_report()).unwrap();

        assert!(output.starts_with("# ATS Compatibility Report"));
        assert!(output.contains("| Keywords |"));
        assert!(output.contains("**Job:** `job.txt`"));
        assert!(output.contains("**[HIGH]**"));
    }

    #[test]
    fn test_html_render() {
        let output = HtmlFormatter::new(false).format_report(&text_report()).unwrap();

        assert!(output.contains("<!DOCTYPE html>"));
        assert!(output.contains("severity-high"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "/tmp/jane_resume.pdf", false),
            "jane_resume_ats.md"
        );
        let stamped = suggest_filename(&OutputFormat::Json, "cv.txt", true);
        assert!(stamped.starts_with("cv_ats_"));
        assert!(stamped.ends_with(".json"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("out.md");

        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }
}
