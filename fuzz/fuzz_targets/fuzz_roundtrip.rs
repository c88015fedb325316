#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfx::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits::untrusted();
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = encode_bmp(&decoded.image, &decoded.info, enough::Unstoppable)
        .expect("decoded image failed to encode");
    let decoded2 = decode_bmp(&reencoded, enough::Unstoppable)
        .expect("re-encoded data failed to decode");

    assert_eq!(decoded.image, decoded2.image, "roundtrip pixel mismatch");
    assert_eq!(decoded.info.x_pels_per_meter, decoded2.info.x_pels_per_meter);
    assert_eq!(decoded.info.y_pels_per_meter, decoded2.info.y_pels_per_meter);
});
