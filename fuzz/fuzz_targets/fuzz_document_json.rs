#![no_main]

use libfuzzer_sys::fuzz_target;
use svgwave_spec::{canonical_document_hash, validate_document, CurveDocument};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = CurveDocument::from_json(text) else {
        return;
    };

    let result = validate_document(&doc);
    if result.is_ok() {
        // A valid document always hashes and re-parses after serialization.
        let hash = canonical_document_hash(&doc).expect("valid document should hash");
        assert_eq!(hash.len(), 64);
        let json = doc.to_json().expect("valid document should serialize");
        let reparsed = CurveDocument::from_json(&json).expect("serialized document should parse");
        assert_eq!(reparsed.curves.len(), doc.curves.len());
    }
});
