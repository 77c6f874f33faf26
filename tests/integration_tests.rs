//! Integration tests for the ATS analyzer

use ats_analyzer::config::{Config, OutputFormat, RecordWeights};
use ats_analyzer::input::InputManager;
use ats_analyzer::output::formatter::ReportGenerator;
use ats_analyzer::output::report::AnalysisReport;
use ats_analyzer::processing::suggestions::Severity;
use ats_analyzer::{import_record, score_record, AtsAnalyzer, AtsError};
use tempfile::TempDir;

const FULL_RESUME: &str = "Jane Roe\n\
    jane.roe@example.com | (555) 123 4567 | linkedin.com/in/janeroe | Portland, OR\n\n\
    Summary\n\
    Backend engineer with 8 years of experience building reliable services in Rust and Python.\n\n\
    Experience\n\
    • Led a team of 6 engineers across two product lines.\n\
    • Increased throughput by 40% after redesigning the ingestion pipeline.\n\
    • Reduced cloud spend by $120,000 per year.\n\
    • Developed and deployed services used by 2,000,000 users.\n\
    • Mentored junior developers and reviewed designs.\n\n\
    Education\n\
    Bachelor of Science in Computer Science, State University\n\n\
    Skills\n\
    Rust, Python, Docker, Kubernetes, PostgreSQL, AWS, communication, leadership";

fn filler(words: usize) -> String {
    vec!["alpha"; words].join(" ")
}

fn analyzer() -> AtsAnalyzer {
    AtsAnalyzer::new().unwrap()
}

#[test]
fn test_scores_stay_in_range() {
    let analyzer = analyzer();
    let long = format!("{} {}", FULL_RESUME, filler(3000));
    let samples = [
        "",
        "   \n\t  ",
        "x",
        FULL_RESUME,
        long.as_str(),
        "----- ***** ••••• 100% 200% $5,000,000 10x faster",
    ];

    for sample in samples {
        for job in [None, Some("Rust developer with AWS and Kubernetes experience")] {
            let result = analyzer.analyze(sample, job);
            assert!(result.overall <= 100);
            for (name, score) in result.breakdown.components() {
                assert!(score <= 100, "{} out of range: {}", name, score);
            }
        }
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let analyzer = analyzer();
    let once = analyzer.normalize("  Jane\r\nRoe\t\tEngineer\r\r\n\n  Rust  ");
    let twice = analyzer.normalize(&once);

    assert_eq!(once, "Jane Roe Engineer Rust");
    assert_eq!(once, twice);
}

#[test]
fn test_email_never_lowers_formatting() {
    let analyzer = analyzer();
    let base = "Jane Roe\nSummary\nEngineer.\nExperience\nBuilt services.\nSkills\nRust";
    let with_email = format!("{}\njane@example.com", base);

    let before = analyzer.analyze(base, None).breakdown.formatting;
    let after = analyzer.analyze(&with_email, None).breakdown.formatting;
    assert!(after >= before);
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = analyzer();
    let job = Some("Looking for a Rust engineer with Kubernetes and AWS experience");

    let first = serde_json::to_string(&analyzer.analyze(FULL_RESUME, job)).unwrap();
    let second = serde_json::to_string(&analyzer.analyze(FULL_RESUME, job)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_suggestions_ordered_by_severity() {
    let analyzer = analyzer();
    let samples = [
        "short text",
        FULL_RESUME,
        "Jane Roe. This sentence keeps going and going without any pause at all because the writer never learned where to stop and so the reader is left waiting for a full stop that never arrives in time for anyone.",
    ];

    for sample in samples {
        let result = analyzer.analyze(sample, Some("Senior Go developer with Terraform"));
        assert!(result.suggestions.len() <= 10);
        for pair in result.suggestions.windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
    }
}

#[test]
fn test_present_keywords_are_never_missing() {
    let analyzer = analyzer();
    let job = "Rust Python Kubernetes Terraform GraphQL developer leadership";
    let result = analyzer.analyze(FULL_RESUME, Some(job));
    let lower = analyzer.normalize(FULL_RESUME).to_lowercase();

    for missing in &result.keywords.missing {
        assert!(!lower.contains(missing.as_str()), "{} reported missing", missing);
    }
    assert!(result.keywords.missing.contains(&"terraform".to_string()));
    assert!(result.keywords.missing.contains(&"graphql".to_string()));
}

#[test]
fn test_bare_text_without_contact_or_sections() {
    let text = "Hardworking person who enjoys solving puzzles and building things. \
        Quick learner with a positive attitude and strong curiosity about new tools. \
        Looking for an opportunity to grow with a friendly team in a fast moving \
        environment where good ideas are valued and shipped often to happy customers \
        around the world every single week.";
    let result = analyzer().analyze(text, None);

    assert!(result.breakdown.formatting <= 40);
    let email = result
        .suggestions
        .iter()
        .find(|s| s.message == "Missing email address")
        .unwrap();
    assert_eq!(email.severity, Severity::High);
    let phone = result
        .suggestions
        .iter()
        .find(|s| s.message == "Missing phone number")
        .unwrap();
    assert_eq!(phone.severity, Severity::High);
}

#[test]
fn test_achievements_and_action_verbs() {
    let text = "Increased sales by 25% within one quarter. Managed a team of 10 people. \
        Led the migration effort. Developed internal tooling. Designed the reporting layer.";
    // same length and sentences, one verb fewer
    let four_verbs = text.replace("Designed", "Owned");

    let analyzer = analyzer();
    let result = analyzer.analyze(text, None);
    let fewer = analyzer.analyze(&four_verbs, None);

    assert!(result.details.quantifiable_achievements >= 2);
    assert_eq!(result.details.action_verbs.count, 5);
    assert_eq!(fewer.details.action_verbs.count, 4);
    assert_eq!(result.details.word_count, fewer.details.word_count);
    // verb component: 25 points at five verbs, 15 at four
    assert_eq!(result.breakdown.readability, fewer.breakdown.readability + 10);
    assert!(result
        .suggestions
        .iter()
        .all(|s| s.message != "Not enough action verbs used"));
}

#[test]
fn test_job_description_keyword_match() {
    let job = "Looking for a React and Node.js developer with AWS experience";
    let resume = "Frontend engineer. Built dashboards in React and services in Node.js.";
    let result = analyzer().analyze(resume, Some(job));

    assert!(result.keywords.found.contains(&"react".to_string()));
    assert!(result.keywords.found.contains(&"node.js".to_string()));
    assert!(result.keywords.missing.contains(&"aws".to_string()));
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.message.starts_with("Missing key terms from job description:")));
}

#[test]
fn test_length_and_bullet_penalties() {
    let header = "Jane Roe\njane@example.com (555) 123 4567 linkedin.com/in/janeroe\n\
        Summary\nEngineer.\nExperience\nEducation\nSkills\n";
    let long = format!("{}{}", header, filler(1480));
    let bullets: String = (0..10).map(|_| format!("• {}\n", filler(58))).collect();
    let short = format!("{}{}", header, bullets);

    let analyzer = analyzer();
    let long_result = analyzer.analyze(&long, None);
    let short_result = analyzer.analyze(&short, None);

    assert!(long_result.details.word_count > 1200);
    assert_eq!(long_result.details.bullet_point_count, 0);
    assert!(short_result.details.word_count >= 400 && short_result.details.word_count <= 1200);
    assert_eq!(short_result.details.bullet_point_count, 10);
    assert!(short_result.breakdown.formatting >= long_result.breakdown.formatting + 20);
}

fn record_json(summary: &str) -> String {
    serde_json::json!({
        "personalInfo": {
            "firstName": "Jane",
            "lastName": "Roe",
            "email": "jane@example.com",
            "summary": summary
        },
        "workExperience": [],
        "education": [],
        "skills": []
    })
    .to_string()
}

#[test]
fn test_record_summary_bonus_threshold() {
    let weights = RecordWeights::default();
    let at = score_record(&import_record(&record_json(&"a".repeat(100))).unwrap(), &weights).unwrap();
    let below = score_record(&import_record(&record_json(&"a".repeat(99))).unwrap(), &weights).unwrap();

    assert_eq!(at.breakdown.best_practices, below.breakdown.best_practices + 20);
}

#[test]
fn test_record_import_errors() {
    let err = import_record("{not json").unwrap_err();
    assert!(matches!(err, AtsError::MalformedInput(ref m) if m == "Invalid JSON format"));

    let err = import_record(r#"{"title": "CV"}"#).unwrap_err();
    assert!(matches!(err, AtsError::MalformedInput(ref m) if m == "Missing required field: personalInfo"));

    let err = import_record(r#"{"personalInfo": {"firstName": "Jane"}}"#).unwrap_err();
    assert!(matches!(err, AtsError::MalformedInput(ref m) if m == "Missing required personal information fields"));
}

#[tokio::test]
async fn test_extraction_by_file_type() {
    let dir = TempDir::new().unwrap();
    let mut manager = InputManager::new();

    let txt = dir.path().join("resume.txt");
    std::fs::write(&txt, "Jane Roe\r\n\r\nSoftware   Engineer").unwrap();
    assert_eq!(manager.extract_text(&txt).await.unwrap(), "Jane Roe Software Engineer");

    let pdf = dir.path().join("resume.pdf");
    std::fs::write(
        &pdf,
        b"%PDF-1.4\nstream\nBT (Jane Roe Rust Engineer) Tj ET\nendstream\n%%EOF".as_slice(),
    )
    .unwrap();
    assert!(manager.extract_text(&pdf).await.unwrap().contains("Jane Roe Rust Engineer"));

    let docx = dir.path().join("resume.docx");
    std::fs::write(
        &docx,
        r#"<w:document><w:body><w:p><w:r><w:t>Jane Roe</w:t></w:r><w:r><w:t xml:space="preserve">Platform Engineer</w:t></w:r></w:p></w:body></w:document>"#,
    )
    .unwrap();
    let text = manager.extract_text(&docx).await.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Platform Engineer"));

    let doc = dir.path().join("resume.doc");
    std::fs::write(&doc, b"Jane\x01 Roe\x07 Data Engineer".as_slice()).unwrap();
    let text = manager.extract_text(&doc).await.unwrap();
    assert!(text.contains("Data Engineer"));
    assert!(!text.contains('\u{1}'));

    assert_eq!(manager.cache_size(), 4);
}

#[tokio::test]
async fn test_unsupported_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, [0x89u8, b'P', b'N', b'G']).unwrap();

    let err = InputManager::new().extract_text(&path).await.unwrap_err();
    assert!(matches!(err, AtsError::UnsupportedFileType(_)));
    assert!(err.user_message().contains("supported format"));
}

#[tokio::test]
async fn test_end_to_end_report() {
    let dir = TempDir::new().unwrap();
    let resume = dir.path().join("jane.txt");
    std::fs::write(&resume, FULL_RESUME).unwrap();

    let config = Config::default();
    let mut manager = InputManager::from_config(&config.extraction);
    let text = manager.extract_text(&resume).await.unwrap();

    let analyzer = AtsAnalyzer::with_weights(config.scoring.text_weights).unwrap();
    let result = analyzer.analyze(&text, Some("Rust engineer with Kubernetes"));
    assert!(result.details.experience_found);
    assert!(result.details.education_found);

    let report = AnalysisReport::from_text_analysis(result, "jane.txt", Some("inline"));
    let generator = ReportGenerator::with_options(false, true);

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["analysis"]["mode"], "text");
    assert_eq!(value["summary"]["overall"], value["analysis"]["result"]["overall"]);

    let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("jane.txt"));

    let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
    assert!(html.contains("<html"));
}
