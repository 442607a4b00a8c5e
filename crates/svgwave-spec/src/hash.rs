//! Canonical document hashing.
//!
//! Two documents that differ only in key order or whitespace hash the same:
//!
//! ```text
//! document_hash = hex(BLAKE3(canonical_json(document)))
//! ```

use crate::document::CurveDocument;
use crate::error::SpecError;

/// Computes the canonical BLAKE3 hash of a curve document.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use svgwave_spec::{CurveDocument, CurveEntry};
/// use svgwave_spec::hash::canonical_document_hash;
///
/// let doc = CurveDocument::builder()
///     .curve(CurveEntry::new("M0 0 L256 256"))
///     .build();
///
/// let hash = canonical_document_hash(&doc).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_document_hash(doc: &CurveDocument) -> Result<String, SpecError> {
    let value = doc.to_value()?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    let hash = blake3::hash(canonical.as_bytes());
    Ok(hash.to_hex().to_string())
}

/// Canonicalizes a JSON value.
///
/// Object keys are sorted lexicographically, no whitespace is emitted
/// between tokens, and non-finite numbers are rejected.
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &serde_json::Value, out: &mut String) -> Result<(), SpecError> {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_number(n)?),
        serde_json::Value::String(s) => write_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn format_number(n: &serde_json::Number) -> Result<String, SpecError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => Err(SpecError::Canonicalization(format!(
            "non-finite number: {}",
            f
        ))),
        // Integer-valued floats hash like integers so `1` and `1.0` agree.
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok((f as i64).to_string()),
        Some(f) => Ok(format!("{}", f)),
        None => Err(SpecError::Canonicalization(format!(
            "unrepresentable number: {}",
            n
        ))),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CurveEntry;

    #[test]
    fn test_canonicalize_sorts_keys() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{ "z": 1, "a": { "y": true, "b": null } }"#).unwrap();
        assert_eq!(
            canonicalize_json(&value).unwrap(),
            r#"{"a":{"b":null,"y":true},"z":1}"#
        );
    }

    #[test]
    fn test_integer_valued_float_matches_integer() {
        let a: serde_json::Value = serde_json::from_str(r#"{ "x": 1.0 }"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{ "x": 1 }"#).unwrap();
        assert_eq!(
            canonical_value_hash(&a).unwrap(),
            canonical_value_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_document_hash_is_stable_and_sensitive() {
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L256 0").with_id("flat"))
            .build();
        let same = doc.clone();
        let other = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L256 1").with_id("flat"))
            .build();

        let hash = canonical_document_hash(&doc).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, canonical_document_hash(&same).unwrap());
        assert_ne!(hash, canonical_document_hash(&other).unwrap());
    }

    #[test]
    fn test_escapes_control_characters() {
        let value = serde_json::Value::String("a\tb\u{1}".to_string());
        assert_eq!(canonicalize_json(&value).unwrap(), r#""a\tb\u0001""#);
    }
}
