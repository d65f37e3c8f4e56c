//! File loading boundary: pdf, txt, and docx → [`Document`].
//!
//! The loader dispatches on file extension. Anything outside the supported
//! set is an [`ChatError::UnsupportedFormat`]; batch loading logs and skips
//! such files instead of failing the batch.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::document::Document;
use crate::error::{ChatError, Result};

/// Loads files into [`Document`]s by extension.
///
/// Supported formats: `pdf` (text extraction), `txt` (UTF-8 read), `docx`
/// (the `word/document.xml` entry of the zip container, tags stripped).
///
/// # Example
///
/// ```rust,ignore
/// use docchat::DocumentLoader;
///
/// let docs = DocumentLoader::load_batch(&["syllabus.pdf", "notes.txt"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a single file into a [`Document`].
    ///
    /// The document ID is the file stem; metadata records the source path
    /// and format.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnsupportedFormat`] for extensions outside
    /// {pdf, txt, docx}, and [`ChatError::Loader`] if reading or parsing
    /// the file fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let text = match extension.as_str() {
            "pdf" => load_pdf(path)?,
            "txt" => load_txt(path)?,
            "docx" => load_docx(path)?,
            other => return Err(ChatError::UnsupportedFormat(other.to_string())),
        };

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();

        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), path.display().to_string());
        metadata.insert("format".to_string(), extension);

        info!(document.id = %id, path = %path.display(), "loaded document");

        Ok(Document { id, text, metadata, source_uri: Some(path.display().to_string()) })
    }

    /// Load many files, skipping any that are unsupported or fail to parse.
    ///
    /// Failures are logged with `warn!` and never abort the batch.
    pub fn load_batch<P: AsRef<Path>>(paths: &[P]) -> Vec<Document> {
        let mut documents = Vec::new();
        for path in paths {
            match Self::load(path) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    warn!(path = %path.as_ref().display(), error = %e, "skipping file");
                }
            }
        }
        documents
    }
}

fn loader_error(path: &Path, message: impl std::fmt::Display) -> ChatError {
    ChatError::Loader { path: path.display().to_string(), message: message.to_string() }
}

fn load_txt(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| loader_error(path, e))
}

fn load_pdf(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| loader_error(path, e))
}

/// A docx file is a zip container; the body text lives in `word/document.xml`.
fn load_docx(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| loader_error(path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| loader_error(path, e))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| loader_error(path, format!("missing word/document.xml: {e}")))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|e| loader_error(path, e))?;

    Ok(extract_plaintext_from_docx_xml(&xml))
}

/// Strip XML markup from docx body XML, inserting a newline per `</w:p>`
/// (paragraph end) so paragraph structure survives.
fn extract_plaintext_from_docx_xml(xml: &str) -> String {
    let mut text = String::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        if tag == "/w:p" {
            text.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_file_loads_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "The capstone deadline is May 1st.").unwrap();

        let doc = DocumentLoader::load(&path).unwrap();
        assert_eq!(doc.id, "notes");
        assert_eq!(doc.text, "The capstone deadline is May 1st.");
        assert_eq!(doc.metadata.get("format"), Some(&"txt".to_string()));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = DocumentLoader::load("slides.pptx");
        assert!(matches!(err, Err(ChatError::UnsupportedFormat(ext)) if ext == "pptx"));
    }

    #[test]
    fn batch_load_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.txt");
        std::fs::write(&good, "hello").unwrap();
        let unsupported = dir.path().join("b.csv");
        std::fs::write(&unsupported, "x,y").unwrap();
        let missing = dir.path().join("c.txt");

        let docs = DocumentLoader::load_batch(&[good, unsupported, missing]);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a");
    }

    #[test]
    fn docx_xml_tags_are_stripped() {
        let xml = "<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>World</w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(extract_plaintext_from_docx_xml(xml), "Hello\nWorld");
    }
}
