//! Curve document types.

use serde::{Deserialize, Serialize};

use crate::params::WavetableParams;

/// Current curve document version.
pub const DOCUMENT_VERSION: u32 = 1;

/// Reference rectangle in source coordinates.
///
/// When frame fitting is requested, the frame's origin becomes the source
/// origin and its extent is stretched to the wavetable's delta x / delta y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge in source units.
    pub x: f64,
    /// Top edge in source units.
    pub y: f64,
    /// Width in source units.
    pub width: f64,
    /// Height in source units.
    pub height: f64,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One path to convert into a wavetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveEntry {
    /// Optional identifier used in reports and output file names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// SVG path data (the `d` attribute mini-language).
    pub d: String,
    /// Optional reference frame for scale fitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

impl CurveEntry {
    /// Creates a curve entry from path data.
    pub fn new(d: impl Into<String>) -> Self {
        Self {
            id: None,
            d: d.into(),
            frame: None,
        }
    }

    /// Sets the curve id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the reference frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Returns a label for reports: the id if present, otherwise `#<position>`.
    pub fn label(&self, position: usize) -> String {
        match self.id {
            Some(ref id) => id.clone(),
            None => format!("#{}", position),
        }
    }
}

/// A curve document: parameters plus an ordered list of curves.
///
/// Each curve is converted independently and yields its own output block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDocument {
    /// Document format version.
    pub version: u32,
    /// Wavetable parameters shared by every curve in the document.
    #[serde(default)]
    pub params: WavetableParams,
    /// Curves in output order.
    pub curves: Vec<CurveEntry>,
}

impl CurveDocument {
    /// Creates a new document builder.
    pub fn builder() -> CurveDocumentBuilder {
        CurveDocumentBuilder::new()
    }

    /// Parses a document from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a document from a plain-text path listing.
    ///
    /// Every non-empty line that does not start with `#` is one curve's
    /// path data. Parameters take their defaults.
    pub fn from_path_lines(text: &str) -> Self {
        let curves = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(CurveEntry::new)
            .collect();

        Self {
            version: DOCUMENT_VERSION,
            params: WavetableParams::default(),
            curves,
        }
    }

    /// Serializes the document to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the document to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the document to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Builder for [`CurveDocument`].
#[derive(Debug, Clone, Default)]
pub struct CurveDocumentBuilder {
    params: WavetableParams,
    curves: Vec<CurveEntry>,
}

impl CurveDocumentBuilder {
    /// Creates a new document builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wavetable parameters.
    pub fn params(mut self, params: WavetableParams) -> Self {
        self.params = params;
        self
    }

    /// Appends a curve.
    pub fn curve(mut self, curve: CurveEntry) -> Self {
        self.curves.push(curve);
        self
    }

    /// Builds the document.
    pub fn build(self) -> CurveDocument {
        CurveDocument {
            version: DOCUMENT_VERSION,
            params: self.params,
            curves: self.curves,
        }
    }
}
