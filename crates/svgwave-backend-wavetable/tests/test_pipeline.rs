//! End-to-end conversion tests.

use kurbo::Point;
use pretty_assertions::assert_eq;
use svgwave_backend_wavetable::{
    generate_curve, generate_document, GenerateOptions, PathCurve, RecordFormatter, WavResult,
    WavetableError,
};
use svgwave_spec::{
    BackendError, CurveDocument, CurveEntry, Delimiter, Frame, OutOfRangePolicy, WavetableParams,
};

// ============================================================================
// Helpers
// ============================================================================

/// Parameters that pass source y straight through (`y_out = cy`).
fn identity_params(sample_rate: u32, oversample: u32) -> WavetableParams {
    WavetableParams {
        sample_rate,
        oversample,
        y_scale: -1.0,
        span: Some(0.0),
        ..WavetableParams::default()
    }
}

fn square(t: f64) -> Point {
    let x = 4.0 * t;
    let y = match x.floor() as i32 {
        1 | 2 => 10.0,
        _ => 0.0,
    };
    Point::new(x, y)
}

// ============================================================================
// Single Curve Tests
// ============================================================================

#[test]
fn test_square_wave_records() {
    let params = identity_params(4, 400);
    let wavetable = generate_curve(&square, &params, &params.transform()).unwrap();

    assert_eq!(wavetable.samples, vec![-32767, 32767, 32767, -32767]);

    let formatter = RecordFormatter::new(Delimiter::parse(";"));
    assert_eq!(
        formatter.records(&wavetable.samples),
        vec!["0;-32767", "1;32767", "2;32767", "3;-32767", ""]
    );
}

#[test]
fn test_flat_curve_emits_nothing() {
    let params = identity_params(8, 800);
    let flat = |t: f64| Point::new(8.0 * t, 5.0);
    let err = generate_curve(&flat, &params, &params.transform()).unwrap_err();

    assert!(matches!(err, WavetableError::DegenerateRange { value } if value == 5.0));
    assert_eq!(err.code(), "WAVE_002");
}

#[test]
fn test_conversion_is_idempotent() {
    let params = WavetableParams::default();
    // The control points overshoot vertically but x stays inside [0, 256).
    let curve = PathCurve::from_svg("M0 0 C64 256 192 -256 256 0").unwrap();

    let a = generate_curve(&curve, &params, &params.transform()).unwrap();
    let b = generate_curve(&curve, &params, &params.transform()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_every_index_is_covered_once() {
    let params = WavetableParams::default();
    let curve = PathCurve::from_svg("M0 0 L128 128 L256 0").unwrap();
    let wavetable = generate_curve(&curve, &params, &params.transform()).unwrap();

    assert_eq!(wavetable.len(), 256);
    assert!(wavetable.samples.iter().all(|&v| (-32767..=32767).contains(&v)));
    assert_eq!(wavetable.samples.iter().filter(|&&v| v == 32767).count(), 1);
    assert_eq!(wavetable.samples[0], 32767);
    assert_eq!(wavetable.samples[128], -32767);
}

#[test]
fn test_descending_ramp_from_svg() {
    let params = WavetableParams::default();
    let curve = PathCurve::from_svg("M0 0 L256 256").unwrap();
    let wavetable = generate_curve(&curve, &params, &params.transform()).unwrap();

    // Source y grows downward, so the ramp falls in wavetable space.
    assert_eq!(wavetable.samples[0], 32767);
    assert_eq!(wavetable.samples[255], -32767);
    assert!(wavetable.samples.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(wavetable.y_max, 256.0);
}

#[test]
fn test_overshooting_curve_aborts_by_default() {
    let params = WavetableParams::default();
    let curve = PathCurve::from_svg("M0 0 L300 100").unwrap();
    let err = generate_curve(&curve, &params, &params.transform()).unwrap_err();

    assert!(matches!(err, WavetableError::OutOfRangeIndex { sample_rate: 256, .. }));
    assert_eq!(err.code(), "WAVE_001");
}

#[test]
fn test_overshooting_curve_can_be_skipped() {
    let params = WavetableParams {
        out_of_range: OutOfRangePolicy::Skip,
        ..WavetableParams::default()
    };
    // The line reaches x = 256 at t = 0.8; the rest is dropped.
    let curve = PathCurve::from_svg("M0 0 L320 100").unwrap();
    let wavetable = generate_curve(&curve, &params, &params.transform()).unwrap();

    assert_eq!(wavetable.len(), 256);
    assert_eq!(wavetable.skipped, 2000);
}

#[test]
fn test_short_curve_leaves_indices_unfilled() {
    let params = WavetableParams::default();
    let curve = PathCurve::from_svg("M0 0 L100 50").unwrap();
    let err = generate_curve(&curve, &params, &params.transform()).unwrap_err();

    match err {
        WavetableError::UnfilledBucket { index, sample_rate } => {
            assert_eq!(index, 101);
            assert_eq!(sample_rate, 256);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Document Tests
// ============================================================================

#[test]
fn test_document_isolates_failing_curves() {
    let doc = CurveDocument::builder()
        .curve(CurveEntry::new("M0 0 L256 256").with_id("ramp"))
        .curve(CurveEntry::new("M0 5 L256 5").with_id("flat"))
        .curve(CurveEntry::new("M0 0 X 10 10"))
        .curve(CurveEntry::new("M0 0 L128 128 L256 0").with_id("tri"))
        .build();

    let result = generate_document(&doc, &GenerateOptions::default());

    assert_eq!(result.outcomes.len(), 4);
    assert_eq!(result.success_count(), 2);
    assert!(result.any_succeeded());

    let failures: Vec<String> = result.failures().map(|f| f.to_string()).collect();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].starts_with("curve 1 (flat): [WAVE_002]"));
    assert!(failures[1].starts_with("curve 2 (#2): [WAVE_007]"));

    let records = result.records();
    assert_eq!(records.len(), 2 * 257);
    assert_eq!(records[0], "0;32767");
    assert_eq!(records[256], "");
    assert_eq!(records[257], "0;32767");
    assert_eq!(records[513], "");
}

#[test]
fn test_document_uses_its_delimiter() {
    let json = r#"{
        "version": 1,
        "params": { "sample_rate": 16, "oversample": 1600, "delimiter": "t" },
        "curves": [{ "d": "M0 0 L16 16" }]
    }"#;
    let doc = CurveDocument::from_json(json).unwrap();
    let result = generate_document(&doc, &GenerateOptions::default());

    let mut out = Vec::new();
    result.write_records(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 17);
    for line in &lines[..16] {
        assert_eq!(line.matches('\t').count(), 1);
    }
    assert_eq!(lines[0], "0\t32767");
    assert_eq!(lines[16], "");
}

#[test]
fn test_document_fits_frames_on_request() {
    let doc = CurveDocument::builder()
        .curve(
            CurveEntry::new("M0 0 L512 512").with_frame(Frame::new(0.0, 0.0, 512.0, 512.0)),
        )
        .build();

    let unfitted = generate_document(&doc, &GenerateOptions::default());
    assert!(!unfitted.any_succeeded());

    let fitted = generate_document(
        &doc,
        &GenerateOptions {
            fit_frame: true,
            ..GenerateOptions::default()
        },
    );
    assert_eq!(fitted.success_count(), 1);
}

#[test]
fn test_no_successes_when_every_curve_fails() {
    let doc = CurveDocument::from_path_lines("# all bad\nM0 5 L256 5\nM0 0 L10 10\n");
    let result = generate_document(&doc, &GenerateOptions::default());

    assert!(!result.any_succeeded());
    assert!(result.records().is_empty());
    assert_eq!(result.failures().count(), 2);
}

// ============================================================================
// WAV Export Tests
// ============================================================================

#[test]
fn test_wav_export_reads_back() {
    let params = identity_params(4, 400);
    let wavetable = generate_curve(&square, &params, &params.transform()).unwrap();
    let wav = WavResult::from_wavetable(&wavetable.samples, 44100, 3).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.wav");
    std::fs::write(&path, &wav.wav_data).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 12);
    assert_eq!(&samples[..4], &wavetable.samples[..]);
    assert_eq!(&samples[8..], &wavetable.samples[..]);
}
