#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed input must produce an error, never a panic
    let limits = bmpfx::Limits::untrusted();
    let _ = bmpfx::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    let _ = bmpfx::probe(data);
});
