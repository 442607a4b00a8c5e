#![no_main]

use libfuzzer_sys::fuzz_target;
use svgwave_backend_wavetable::{generate_curve, PathCurve};
use svgwave_spec::{OutOfRangePolicy, WavetableParams};

fuzz_target!(|data: &[u8]| {
    let Ok(d) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(curve) = PathCurve::from_svg(d) else {
        return;
    };

    let params = WavetableParams {
        sample_rate: 64,
        oversample: 4096,
        out_of_range: OutOfRangePolicy::Skip,
        ..WavetableParams::default()
    };
    if let Ok(wavetable) = generate_curve(&curve, &params, &params.transform()) {
        assert_eq!(wavetable.len(), 64);
        assert!(wavetable.samples.iter().all(|&v| v != i16::MIN));
    }
});
