//! Best-effort text extraction from uploaded resume bytes

use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use regex::Regex;

/// Printable-ASCII runs at least this long are kept from PDF bytes.
const PDF_ASCII_RUN_MIN: usize = 10;
/// Printable-ASCII runs at least this long are kept when a Word-XML file has no text runs.
const WORD_XML_ASCII_RUN_MIN: usize = 5;

/// An uploaded resume as handed to the extractor.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub bytes: Vec<u8>,
    pub declared_type: Option<String>,
    pub name: String,
}

impl ResumeFile {
    pub fn new(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            declared_type: None,
            name: name.into(),
        }
    }

    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    pub fn file_type(&self) -> Result<FileType> {
        FileType::detect(self.declared_type.as_deref(), &self.name)
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Scans content streams for parenthesised text-showing payloads.
///
/// No object graph is parsed. With `structured` set, `pdf-extract` is tried
/// first and the scanner only runs if it fails or finds nothing.
pub struct PdfExtractor {
    structured: bool,
    stream_regex: Regex,
    string_regex: Regex,
    ascii_run_regex: Regex,
    whitespace_regex: Regex,
}

impl PdfExtractor {
    pub fn new(structured: bool) -> Self {
        Self {
            structured,
            stream_regex: Regex::new(r"(?s)stream[\r\n]+(.*?)[\r\n]+endstream")
                .expect("Invalid PDF stream regex"),
            string_regex: Regex::new(r"\(([^)]+)\)").expect("Invalid PDF string regex"),
            ascii_run_regex: Regex::new(r"[\x20-\x7E\n\r\t]+").expect("Invalid ASCII run regex"),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    fn structured_text(&self, bytes: &[u8]) -> Option<String> {
        // pdf-extract panics on some malformed documents
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                warn!("pdf-extract returned no text, falling back to stream scan");
                None
            }
            Ok(Err(e)) => {
                warn!("pdf-extract failed ({}), falling back to stream scan", e);
                None
            }
            Err(_) => {
                warn!("pdf-extract panicked, falling back to stream scan");
                None
            }
        }
    }

    fn scan_streams(&self, raw: &str) -> String {
        let mut text = String::new();
        for stream in self.stream_regex.captures_iter(raw) {
            for payload in self.string_regex.captures_iter(&stream[1]) {
                text.push_str(&unescape_pdf_string(&payload[1]));
                text.push(' ');
            }
        }
        text
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if self.structured {
            if let Some(text) = self.structured_text(bytes) {
                return Ok(text);
            }
        }

        let raw = String::from_utf8_lossy(bytes);
        let streamed = self.scan_streams(&raw);
        let ascii = ascii_runs(&self.ascii_run_regex, &raw, PDF_ASCII_RUN_MIN);
        debug!(
            "PDF scan: {} chars from streams, {} chars of ASCII runs",
            streamed.len(),
            ascii.len()
        );

        let combined = format!("{} {}", streamed, ascii);
        let collapsed = self.whitespace_regex.replace_all(&combined, " ");
        let printable: String = collapsed
            .chars()
            .map(|c| if is_printable_ascii(c) { c } else { ' ' })
            .collect();
        Ok(printable.trim().to_string())
    }
}

/// Legacy binary Word documents read as text with control characters blanked.
pub struct LegacyWordExtractor;

impl TextExtractor for LegacyWordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let cleaned: String = String::from_utf8_lossy(bytes)
            .chars()
            .map(|c| if is_word_control(c) { ' ' } else { c })
            .collect();
        Ok(cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

pub struct WordXmlExtractor {
    text_run_regex: Regex,
    tag_regex: Regex,
    ascii_run_regex: Regex,
}

impl WordXmlExtractor {
    pub fn new() -> Self {
        Self {
            text_run_regex: Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("Invalid w:t regex"),
            tag_regex: Regex::new(r"<[^>]+>").expect("Invalid tag regex"),
            ascii_run_regex: Regex::new(r"[\x20-\x7E\n\r\t]+").expect("Invalid ASCII run regex"),
        }
    }
}

impl Default for WordXmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for WordXmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let raw = String::from_utf8_lossy(bytes);

        let runs: Vec<&str> = self
            .text_run_regex
            .captures_iter(&raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|run| !run.is_empty())
            .collect();

        let text = if runs.is_empty() {
            debug!("No <w:t> runs found, stripping tags");
            let untagged = self.tag_regex.replace_all(&raw, " ");
            ascii_runs(&self.ascii_run_regex, &untagged, WORD_XML_ASCII_RUN_MIN)
        } else {
            runs.join(" ")
        };

        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

/// Dispatches on the detected file type and normalizes whatever comes out.
pub struct ResumeExtractor {
    pdf: PdfExtractor,
    word_xml: WordXmlExtractor,
    text_processor: TextProcessor,
}

impl ResumeExtractor {
    pub fn new(structured_pdf: bool) -> Self {
        Self {
            pdf: PdfExtractor::new(structured_pdf),
            word_xml: WordXmlExtractor::new(),
            text_processor: TextProcessor::new(),
        }
    }

    pub fn extract(&self, file: &ResumeFile) -> Result<String> {
        let file_type = file.file_type()?;
        debug!("Extracting {} as {:?}", file.name, file_type);

        let raw = match file_type {
            FileType::PlainText => PlainTextExtractor.extract(&file.bytes)?,
            FileType::Pdf => self.pdf.extract(&file.bytes)?,
            FileType::LegacyWord => LegacyWordExtractor.extract(&file.bytes)?,
            FileType::WordXml => self.word_xml.extract(&file.bytes)?,
        };

        Ok(self.text_processor.normalize(&raw))
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Convenience wrapper using the heuristic PDF scanner.
pub fn extract(file: &ResumeFile) -> Result<String> {
    ResumeExtractor::default().extract(file)
}

fn unescape_pdf_string(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('(') => out.push('('),
            Some(')') => out.push(')'),
            Some('\\') => out.push('\\'),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}

fn ascii_runs(regex: &Regex, text: &str, min_len: usize) -> String {
    regex
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| run.len() >= min_len)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_printable_ascii(c: char) -> bool {
    matches!(c, '\x20'..='\x7E' | '\n' | '\r' | '\t')
}

fn is_word_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}
