//! ATS analyzer: heuristic applicant tracking system compatibility scoring for resumes

use anyhow::{Context, Result};
use ats_analyzer::cli::{self, Cli, Commands, ConfigAction};
use ats_analyzer::config::{Config, OutputFormat};
use ats_analyzer::error::AtsError;
use ats_analyzer::input::InputManager;
use ats_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use ats_analyzer::output::report::AnalysisReport;
use ats_analyzer::processing::{import_record, score_record, AtsAnalyzer};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        match e.downcast_ref::<AtsError>() {
            Some(ats_error) => error!("{}", ats_error.user_message()),
            None => error!("Command failed: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            detailed,
            save,
        } => {
            let format = cli::parse_output_format(output.as_deref(), config.output.format)
                .map_err(AtsError::InvalidInput)?;
            let mut input_manager = InputManager::from_config(&config.extraction);

            info!("Extracting resume text from {}", resume.display());
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let job_description = match (&job, job_text) {
                (Some(path), _) => Some(
                    input_manager
                        .read_raw(path)
                        .await
                        .with_context(|| format!("Failed to read job description {}", path.display()))?,
                ),
                (None, text) => text,
            };

            let analyzer = AtsAnalyzer::with_weights(config.scoring.text_weights)?;
            let result = analyzer.analyze(&resume_text, job_description.as_deref());
            info!("Analysis complete: overall score {}", result.overall);

            let job_label = job
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| job_description.as_ref().map(|_| "inline".to_string()));
            let report = AnalysisReport::from_text_analysis(
                result,
                &resume.to_string_lossy(),
                job_label.as_deref(),
            );

            emit_report(&report, &format, &config, detailed || config.output.detailed, save, &resume)?;
        }

        Commands::ScoreRecord { record, output, save } => {
            let format = cli::parse_output_format(output.as_deref(), config.output.format)
                .map_err(AtsError::InvalidInput)?;
            let input_manager = InputManager::from_config(&config.extraction);

            let json = input_manager
                .read_raw(&record)
                .await
                .with_context(|| format!("Failed to read record {}", record.display()))?;
            let resume_record = import_record(&json)?;
            let score = score_record(&resume_record, &config.scoring.record_weights)?;
            info!("Record scored: overall {}", score.overall);

            let report = AnalysisReport::from_record_score(score, &record.to_string_lossy());
            emit_report(&report, &format, &config, config.output.detailed, save, &record)?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("# {}\n", config_path.display());
                println!("{}", rendered);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut updated = config.clone();
                updated.set_value(&key, &value)?;
                updated.validate()?;
                updated.save_to(config_path)?;
                println!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn emit_report(
    report: &AnalysisReport,
    format: &OutputFormat,
    config: &Config,
    detailed: bool,
    save: Option<PathBuf>,
    source: &Path,
) -> Result<()> {
    let generator = ReportGenerator::with_options(config.output.color_output, detailed);

    match save {
        Some(path) => {
            // colour codes do not belong in a file
            let content = ReportGenerator::with_options(false, detailed).generate_report(report, format)?;
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &source.to_string_lossy(), true))
            } else {
                path
            };
            save_report_to_file(&content, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => {
            let content = generator.generate_report(report, format)?;
            println!("{}", content);
        }
    }

    Ok(())
}
