//! Input abstraction for loading curve documents.
//!
//! Documents come either as JSON (`.json`) or as a plain path listing
//! (`.path`, `.txt`, one path per line). Loading dispatches by file extension
//! and returns the document together with source provenance.

use serde::{Deserialize, Serialize};
use svgwave_spec::CurveDocument;
use std::path::{Path, PathBuf};

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Recognized path-listing extensions.
pub const PATH_LIST_EXTENSIONS: &[&str] = &["path", "txt"];

/// Identifies the source format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// JSON curve document.
    Json,
    /// One path per line.
    PathList,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Json => "json",
            SourceKind::PathList => "path_list",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of loading a document from any supported format.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed document.
    pub document: CurveDocument,
    /// Source format.
    pub source_kind: SourceKind,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during document loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// JSON parsing failed.
    JsonParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(
                    f,
                    "unknown file extension '.{}' (expected .json, .path or .txt)",
                    ext
                ),
                None => write!(f, "file has no extension (expected .json, .path or .txt)"),
            },
            InputError::JsonParse { message } => {
                write!(f, "JSON parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a curve document from a file path, dispatching by extension.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use svgwave_cli::input::load_document;
///
/// let result = load_document(Path::new("curves.json")).unwrap();
/// println!("Loaded {} curve(s)", result.document.curves.len());
/// ```
pub fn load_document(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    let source_kind = match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => SourceKind::Json,
        Some(ext) if PATH_LIST_EXTENSIONS.contains(&ext) => SourceKind::PathList,
        _ => return Err(InputError::UnknownExtension { extension }),
    };

    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let document = match source_kind {
        SourceKind::Json => {
            CurveDocument::from_json(&content).map_err(|e| InputError::JsonParse {
                message: e.to_string(),
            })?
        }
        SourceKind::PathList => CurveDocument::from_path_lines(&content),
    };

    Ok(LoadResult {
        document,
        source_kind,
        source_hash,
    })
}
