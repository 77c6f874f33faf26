//! ATS resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AtsError, Result};
pub use processing::{import_record, score_record, AtsAnalysisResult, AtsAnalyzer, RecordScore, ResumeRecord};
