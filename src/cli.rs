//! CLI interface for the ATS analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ats-analyzer")]
#[command(about = "Heuristic ATS compatibility analyzer for resumes")]
#[command(long_about = "Score a resume for applicant tracking system compatibility, optionally against a job description, and get prioritized suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume file (TXT, PDF, DOC, DOCX)
    Analyze {
        /// Path to resume file
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description text file
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Include section, verb and keyword details
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Score a structured resume record exported as JSON
    ScoreRecord {
        /// Path to the record JSON file
        #[arg(short, long)]
        record: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.text_weights.keywords")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse the output format flag, falling back to the configured default.
pub fn parse_output_format(format: Option<&str>, default: OutputFormat) -> Result<OutputFormat, String> {
    match format {
        Some(value) => OutputFormat::parse(value).map_err(|e| e.to_string()),
        None => Ok(default),
    }
}
