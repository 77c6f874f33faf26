//! Text processing and analysis module

pub mod analyzer;
pub mod ats_matcher;
pub mod keyword_index;
pub mod record;
pub mod scorer;
pub mod structure;
pub mod suggestions;
pub mod text_processor;

pub use analyzer::{AtsAnalysisResult, AtsAnalyzer};
pub use record::{import_record, score_record, RecordScore, ResumeRecord};
